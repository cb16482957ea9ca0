//! Collision detection and combat resolution
//!
//! Everything in this game is an axis-aligned box. Resolution runs once per
//! tick in a fixed pass order so outcomes are deterministic and testable:
//! player bullets vs enemies, bomb pickups, enemy bullets vs player, then
//! remaining pickups.

use glam::Vec2;
use rand::Rng;

use super::effects::EffectKind;
use super::state::{
    Entity, EntityId, Explosion, ExplosionColor, GamePhase, GameState, PowerUp, PowerUpKind,
};
use crate::consts::*;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from a top-left position and a size
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Strict overlap: boxes sharing only an edge do not collide
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Resolve all combat interactions for this tick. Must run after the effect
/// sweep so expired shields no longer protect.
pub fn resolve(state: &mut GameState) {
    resolve_bullets_vs_enemies(state);
    resolve_bombs(state);
    resolve_enemy_fire(state);
    resolve_pickups(state);

    debug_assert!(state.player.lives <= MAX_LIVES);
    debug_assert!(state.entities.enemies.iter().all(|e| e.health > 0));
}

/// Pass 1: each player bullet damages at most one enemy (store order), and is
/// consumed on the hit. Kills advance the combo, award score, burst, and may
/// drop a power-up.
fn resolve_bullets_vs_enemies(state: &mut GameState) {
    let entities = &mut state.entities;
    let mut consumed: Vec<EntityId> = Vec::new();

    for bullet in &entities.bullets {
        let bullet_box = bullet.bounds();
        for enemy in entities.enemies.iter_mut() {
            // Queued for removal this tick; bullets pass through
            if enemy.health == 0 {
                continue;
            }
            if bullet_box.intersects(&enemy.bounds()) {
                enemy.health -= 1;
                consumed.push(bullet.id);
                break;
            }
        }
    }
    entities.bullets.retain(|b| !consumed.contains(&b.id));

    // Deferred kill bookkeeping: scoring and drops need the whole context
    let killed: Vec<_> = entities
        .enemies
        .iter()
        .filter(|e| e.health == 0)
        .map(|e| (e.bounds().center(), e.level, e.boss))
        .collect();
    entities.enemies.retain(|e| e.health > 0);

    for (center, level, boss) in killed {
        let points = state.score_kill(level, boss);
        log::debug!("kill at {center}: +{points} (combo {})", state.combo);

        let color = if boss {
            ExplosionColor::Boss
        } else {
            ExplosionColor::Standard
        };
        state
            .entities
            .spawn(Entity::Explosion(Explosion::new(center, color)));

        if state.rng.random_bool(POWERUP_DROP_CHANCE) {
            let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
            let size = state.tuning.powerup_size;
            state.entities.spawn(Entity::PowerUp(PowerUp {
                id: 0,
                kind,
                pos: center - size / 2.0,
                size,
            }));
        }
    }
}

/// Pass 2: a bomb pickup touching the player clears the screen. Explosion per
/// enemy, zero score and no combo movement; bombs clear, they do not farm.
fn resolve_bombs(state: &mut GameState) {
    let player_box = state.player.bounds();
    let bombs: Vec<EntityId> = state
        .entities
        .powerups
        .iter()
        .filter(|p| p.kind == PowerUpKind::Bomb && p.bounds().intersects(&player_box))
        .map(|p| p.id)
        .collect();
    if bombs.is_empty() {
        return;
    }

    let centers: Vec<(Vec2, bool)> = state
        .entities
        .enemies
        .iter()
        .map(|e| (e.bounds().center(), e.boss))
        .collect();
    log::info!("bomb: clearing {} enemies", centers.len());
    state.entities.enemies.clear();
    for (center, boss) in centers {
        let color = if boss {
            ExplosionColor::Boss
        } else {
            ExplosionColor::Standard
        };
        state
            .entities
            .spawn(Entity::Explosion(Explosion::new(center, color)));
    }
    for id in bombs {
        state.entities.remove(id);
    }
}

/// Pass 3: enemy fire vs the player. Ignored entirely under shield or
/// invincibility; otherwise the first overlapping bullet lands, survivors get
/// a mercy window, and a last life lost requests the GameOver transition.
fn resolve_enemy_fire(state: &mut GameState) {
    if state.player.effects.collision_immune() {
        return;
    }

    let player_box = state.player.bounds();
    let hit = state
        .entities
        .enemy_bullets
        .iter()
        .find(|b| b.bounds().intersects(&player_box))
        .map(|b| b.id);
    let Some(id) = hit else {
        return;
    };

    state.entities.remove(id);
    state.entities.spawn(Entity::Explosion(Explosion::new(
        player_box.center(),
        ExplosionColor::Standard,
    )));
    state.player.lose_life();

    if state.player.lives > 0 {
        state.player.effects.activate(
            EffectKind::Invincible,
            state.now_ms,
            INVINCIBILITY_DURATION_MS,
        );
    } else {
        log::info!("player down on wave {}, score {}", state.wave, state.score);
        state.phase = GamePhase::GameOver;
    }
}

/// Pass 4: remaining (non-bomb) pickups touching the player
fn resolve_pickups(state: &mut GameState) {
    let player_box = state.player.bounds();
    let collected: Vec<(EntityId, PowerUpKind)> = state
        .entities
        .powerups
        .iter()
        .filter(|p| p.kind != PowerUpKind::Bomb && p.bounds().intersects(&player_box))
        .map(|p| (p.id, p.kind))
        .collect();

    for (id, kind) in collected {
        state.entities.remove(id);
        let now = state.now_ms;
        match kind {
            PowerUpKind::Health => state.player.gain_life(),
            PowerUpKind::Rapid => {
                state
                    .player
                    .effects
                    .activate(EffectKind::RapidFire, now, RAPID_FIRE_DURATION_MS)
            }
            PowerUpKind::Shield => {
                state
                    .player
                    .effects
                    .activate(EffectKind::Shield, now, SHIELD_DURATION_MS)
            }
            PowerUpKind::Double => {
                state
                    .player
                    .effects
                    .activate(EffectKind::DoubleShot, now, DOUBLE_SHOT_DURATION_MS)
            }
            PowerUpKind::Bomb => unreachable!("bombs are resolved in their own pass"),
        }
    }
}
