//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, driven externally
//! - Seeded RNG only
//! - Stable iteration order (spawn order, by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{Aabb, resolve};
pub use effects::{ActiveEffects, EffectKind};
pub use snapshot::{Hud, RenderSnapshot, Sprite, SpriteKind};
pub use state::{
    Bullet, Enemy, EnemyBullet, EnemyLevel, Entities, Entity, EntityId, EntityKind, Explosion,
    ExplosionColor, GamePhase, GameState, Player, PowerUp, PowerUpKind,
};
pub use tick::{TickInput, tick};
pub use wave::{EnemySpec, spawn_wave};
