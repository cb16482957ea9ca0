//! Fixed timestep simulation tick
//!
//! The single entry point that advances one game by one tick. Pause and game
//! over are ordinary machine states with skip-update semantics, never nested
//! wait loops, so tests can single-step through every transition.

use glam::Vec2;

use super::collision::resolve;
use super::state::{Bullet, EnemyBullet, Entity, EntityKind, GamePhase, GameState};

/// Input intents for a single tick. The core knows nothing about physical
/// keys or devices.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    /// Pause toggle (edge-triggered by the host)
    pub pause: bool,
    /// Menu confirm: restart from game over
    pub confirm: bool,
    /// Menu cancel: quit from game over
    pub cancel: bool,
    /// Quit from any state
    pub quit: bool,
}

/// Advance the game state by one fixed tick of `dt_ms` elapsed milliseconds.
///
/// Per-tick order is fixed: motion and firing, effect expiry sweep, collision
/// resolution, explosion animation, wave-completion check. The clock only
/// advances in states that are not frozen, which is what freezes cooldowns
/// and effect expiries while paused.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u64) {
    if input.quit {
        state.phase = GamePhase::Terminated;
        return;
    }

    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Paused | GamePhase::Terminated => return,
        GamePhase::GameOver => {
            if input.confirm {
                state.restart();
            } else if input.cancel {
                state.phase = GamePhase::Terminated;
            }
            return;
        }
        GamePhase::WaveIntro => {
            state.now_ms += dt_ms;
            state.player.effects.sweep(state.now_ms);
            update_explosions(state, dt_ms);
            if state.now_ms >= state.intro_until_ms {
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.now_ms += dt_ms;
    let dt = dt_ms as f32 / 1000.0;

    update_player(state, input, dt);
    update_enemies(state, dt);
    update_projectiles(state, dt);

    // Expiry sweep runs exactly once, before collisions: an effect whose
    // expiry is <= now no longer protects this tick.
    state.player.effects.sweep(state.now_ms);

    resolve(state);

    update_explosions(state, dt_ms);

    // Wave cleared: bump the wave first, then show the intro (whose entry
    // action spawns the new formation)
    if state.phase == GamePhase::Playing && state.entities.is_empty(EntityKind::Enemy) {
        state.wave += 1;
        state.combo = 1;
        state.last_kill_ms = None;
        state.enter_wave_intro();
    }
}

/// Player motion and firing
fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let step = state.tuning.player_speed * dt;
    if input.move_left {
        state.player.pos.x -= step;
    }
    if input.move_right {
        state.player.pos.x += step;
    }
    state.player.pos.x = state
        .player
        .pos
        .x
        .clamp(0.0, state.tuning.width - state.player.size.x);

    if !input.fire {
        return;
    }
    let cooldown = state.player.effects.fire_cooldown_ms();
    if state.now_ms.saturating_sub(state.player.last_shot_ms) < cooldown {
        return;
    }
    state.player.last_shot_ms = state.now_ms;

    let size = state.tuning.bullet_size;
    let muzzle = Vec2::new(
        state.player.pos.x + (state.player.size.x - size.x) / 2.0,
        state.player.pos.y - size.y,
    );
    if state
        .player
        .effects
        .is_active(super::effects::EffectKind::DoubleShot)
    {
        let spread = state.player.size.x / 4.0;
        for dx in [-spread, spread] {
            state.entities.spawn(Entity::Bullet(Bullet {
                id: 0,
                pos: muzzle + Vec2::new(dx, 0.0),
                size,
            }));
        }
    } else {
        state.entities.spawn(Entity::Bullet(Bullet {
            id: 0,
            pos: muzzle,
            size,
        }));
    }
}

/// Enemy entry descent, patrol, and firing
fn update_enemies(state: &mut GameState, dt: f32) {
    let width = state.tuning.width;
    let height = state.tuning.height;
    let now = state.now_ms;
    let mut shots: Vec<Vec2> = Vec::new();

    for enemy in state.entities.enemies.iter_mut() {
        if enemy.entering {
            enemy.pos.y += enemy.entry_speed * dt;
            if enemy.pos.y >= enemy.target_y {
                enemy.pos.y = enemy.target_y;
                enemy.entering = false;
                // Shoot timer starts counting from formation arrival
                enemy.last_shot_ms = now;
            }
            continue;
        }

        enemy.pos.x += enemy.dir * enemy.patrol_speed * dt;
        if enemy.pos.x <= 0.0 {
            enemy.pos.x = 0.0;
            enemy.dir = 1.0;
        } else if enemy.pos.x + enemy.size.x >= width {
            enemy.pos.x = width - enemy.size.x;
            enemy.dir = -1.0;
        }

        if now.saturating_sub(enemy.last_shot_ms) >= enemy.shoot_interval_ms {
            enemy.last_shot_ms = now;
            shots.push(Vec2::new(
                enemy.pos.x + enemy.size.x / 2.0,
                enemy.pos.y + enemy.size.y,
            ));
        }
    }

    // Enemies that drift past the bottom edge vanish silently; escaping
    // costs the player nothing.
    state.entities.enemies.retain(|e| e.pos.y < height);

    let size = state.tuning.bullet_size;
    for muzzle in shots {
        state.entities.spawn(Entity::EnemyBullet(EnemyBullet {
            id: 0,
            pos: Vec2::new(muzzle.x - size.x / 2.0, muzzle.y),
            size,
        }));
    }
}

/// Bullet and power-up motion plus off-screen culling
fn update_projectiles(state: &mut GameState, dt: f32) {
    let height = state.tuning.height;

    let climb = state.tuning.bullet_speed * dt;
    for bullet in state.entities.bullets.iter_mut() {
        bullet.pos.y -= climb;
    }
    state.entities.bullets.retain(|b| b.pos.y + b.size.y > 0.0);

    let fall = state.tuning.enemy_bullet_speed * dt;
    for bullet in state.entities.enemy_bullets.iter_mut() {
        bullet.pos.y += fall;
    }
    state.entities.enemy_bullets.retain(|b| b.pos.y < height);

    let drift = state.tuning.powerup_fall_speed * dt;
    for powerup in state.entities.powerups.iter_mut() {
        powerup.pos.y += drift;
    }
    state.entities.powerups.retain(|p| p.pos.y < height);
}

/// Advance cosmetic explosion frames and drop finished ones
fn update_explosions(state: &mut GameState, dt_ms: u64) {
    for explosion in state.entities.explosions.iter_mut() {
        explosion.age_ms += dt_ms;
    }
    state.entities.explosions.retain(|x| !x.finished());
}
