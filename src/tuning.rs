//! Injectable game-balance configuration
//!
//! Supplied once by the host at construction and treated as immutable by the
//! core. Everything here is geometry and base speed; the difficulty curve
//! constants live in [`crate::consts`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Static tuning constants: play-area bounds, entity sizes, base speeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    /// Play area width in pixels
    pub width: f32,
    /// Play area height in pixels
    pub height: f32,

    pub player_size: Vec2,
    pub enemy_size: Vec2,
    pub bullet_size: Vec2,
    pub powerup_size: Vec2,

    /// Player horizontal speed (px/s)
    pub player_speed: f32,
    /// Player bullet climb speed (px/s)
    pub bullet_speed: f32,
    /// Enemy bullet fall speed (px/s)
    pub enemy_bullet_speed: f32,
    /// Enemy descent speed during the entry phase (px/s)
    pub enemy_entry_speed: f32,
    /// Base horizontal patrol speed before wave scaling (px/s)
    pub enemy_patrol_speed: f32,
    /// Power-up fall speed (px/s)
    pub powerup_fall_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            player_size: Vec2::new(40.0, 40.0),
            enemy_size: Vec2::new(48.0, 40.0),
            bullet_size: Vec2::new(5.0, 12.0),
            powerup_size: Vec2::new(24.0, 24.0),
            player_speed: 600.0,
            bullet_speed: 720.0,
            enemy_bullet_speed: 360.0,
            enemy_entry_speed: 180.0,
            enemy_patrol_speed: 90.0,
            powerup_fall_speed: 160.0,
        }
    }
}

impl Tuning {
    /// Player spawn position: horizontally centered, resting on the bottom edge
    pub fn player_spawn(&self) -> Vec2 {
        Vec2::new(
            (self.width - self.player_size.x) / 2.0,
            self.height - self.player_size.y,
        )
    }
}
