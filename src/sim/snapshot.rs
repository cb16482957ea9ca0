//! Immutable per-tick render snapshot
//!
//! Captured from `&GameState` after a tick; the rendering collaborator draws
//! from it and can never mutate the simulation through it. Cosmetic phases
//! (boss color cycle, invincibility blink) are derived from the clock here
//! rather than stored in simulation state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::EffectKind;
use super::state::{EnemyLevel, ExplosionColor, GamePhase, GameState, PowerUpKind};

/// Cosmetic cycle lengths, in ms
const BOSS_COLOR_CYCLE_MS: u64 = 1_000;
const BLINK_CYCLE_MS: u64 = 300;

/// What to draw for one live entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpriteKind {
    Player {
        shield: bool,
        /// 0..1 blink cycle while invincible, 0 otherwise
        blink_phase: f32,
    },
    Enemy {
        level: EnemyLevel,
        boss: bool,
        /// 0..1 boss color-cycle position, 0 for regular enemies
        color_phase: f32,
    },
    Bullet,
    EnemyBullet,
    PowerUp {
        kind: PowerUpKind,
    },
    Explosion {
        frame: u32,
        color: ExplosionColor,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub pos: Vec2,
    pub size: Vec2,
}

/// HUD scalars for the overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub lives: u8,
    pub score: u64,
    pub high_score: u64,
    pub wave: u32,
    pub boss_wave: bool,
    pub combo: u32,
    pub phase: GamePhase,
    /// Seconds until the wave banner comes down, 0 outside the intro
    pub intro_secs: f32,
    /// Remaining seconds per timed effect, 0 when inactive
    pub rapid_secs: f32,
    pub shield_secs: f32,
    pub double_secs: f32,
    pub invincible_secs: f32,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub hud: Hud,
    pub sprites: Vec<Sprite>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let now = state.now_ms;
        let fx = &state.player.effects;

        let secs = |kind| fx.remaining_ms(kind, now) as f32 / 1000.0;
        let hud = Hud {
            lives: state.player.lives,
            score: state.score,
            high_score: state.high_score,
            wave: state.wave,
            boss_wave: state.boss_wave(),
            combo: state.combo,
            phase: state.phase,
            intro_secs: if state.phase == GamePhase::WaveIntro {
                state.intro_until_ms.saturating_sub(now) as f32 / 1000.0
            } else {
                0.0
            },
            rapid_secs: secs(EffectKind::RapidFire),
            shield_secs: secs(EffectKind::Shield),
            double_secs: secs(EffectKind::DoubleShot),
            invincible_secs: secs(EffectKind::Invincible),
        };

        let mut sprites = Vec::with_capacity(
            1 + state.entities.enemies.len()
                + state.entities.bullets.len()
                + state.entities.enemy_bullets.len()
                + state.entities.powerups.len()
                + state.entities.explosions.len(),
        );

        let blink_phase = if fx.is_active(EffectKind::Invincible) {
            cycle(now, BLINK_CYCLE_MS)
        } else {
            0.0
        };
        sprites.push(Sprite {
            kind: SpriteKind::Player {
                shield: fx.is_active(EffectKind::Shield),
                blink_phase,
            },
            pos: state.player.pos,
            size: state.player.size,
        });

        for enemy in &state.entities.enemies {
            let color_phase = if enemy.boss {
                cycle(now, BOSS_COLOR_CYCLE_MS)
            } else {
                0.0
            };
            sprites.push(Sprite {
                kind: SpriteKind::Enemy {
                    level: enemy.level,
                    boss: enemy.boss,
                    color_phase,
                },
                pos: enemy.pos,
                size: enemy.size,
            });
        }
        for bullet in &state.entities.bullets {
            sprites.push(Sprite {
                kind: SpriteKind::Bullet,
                pos: bullet.pos,
                size: bullet.size,
            });
        }
        for bullet in &state.entities.enemy_bullets {
            sprites.push(Sprite {
                kind: SpriteKind::EnemyBullet,
                pos: bullet.pos,
                size: bullet.size,
            });
        }
        for powerup in &state.entities.powerups {
            sprites.push(Sprite {
                kind: SpriteKind::PowerUp { kind: powerup.kind },
                pos: powerup.pos,
                size: powerup.size,
            });
        }
        for explosion in &state.entities.explosions {
            sprites.push(Sprite {
                kind: SpriteKind::Explosion {
                    frame: explosion.frame(),
                    color: explosion.color,
                },
                pos: explosion.pos,
                size: Vec2::ZERO,
            });
        }

        Self { hud, sprites }
    }
}

impl GameState {
    /// Capture the immutable render snapshot for this tick
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(self)
    }
}

/// Position within a repeating cosmetic cycle, 0..1
fn cycle(now_ms: u64, period_ms: u64) -> f32 {
    (now_ms % period_ms) as f32 / period_ms as f32
}
