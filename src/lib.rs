//! Galactica Core - simulation heart of a vertically-scrolling shoot-em-up
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, waves, combat, game state)
//! - `tuning`: Injectable game-balance configuration
//!
//! Rendering, audio, asset decoding and raw input devices live outside this
//! crate. A host loop feeds discretized input intents into [`sim::tick`] once
//! per fixed tick and draws from the [`sim::RenderSnapshot`] it captures.

pub mod sim;
pub mod tuning;

pub use sim::{GamePhase, GameState, RenderSnapshot, TickInput};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal fixed timestep the host is expected to drive, in ms
    pub const TICK_MS: u64 = 8;

    /// Lives the player starts a run with
    pub const START_LIVES: u8 = 3;
    /// Hard cap on lives (health pickups clamp here)
    pub const MAX_LIVES: u8 = 5;

    /// Baseline delay between player shots
    pub const FIRE_COOLDOWN_MS: u64 = 250;
    /// Shot delay while rapid-fire is active
    pub const RAPID_FIRE_COOLDOWN_MS: u64 = 80;

    /// Timed effect durations
    pub const RAPID_FIRE_DURATION_MS: u64 = 8_000;
    pub const SHIELD_DURATION_MS: u64 = 6_000;
    pub const DOUBLE_SHOT_DURATION_MS: u64 = 8_000;
    /// Post-hit mercy window
    pub const INVINCIBILITY_DURATION_MS: u64 = 2_000;

    /// Consecutive kills within this window grow the combo multiplier
    pub const COMBO_WINDOW_MS: u64 = 1_200;

    /// Base score for a level-1 kill
    pub const SCORE_LEVEL1: u64 = 10;
    /// Base score for a level-2 or boss kill
    pub const SCORE_LEVEL2: u64 = 30;
    /// Score multiplier applied on boss waves
    pub const BOSS_WAVE_MULTIPLIER: u64 = 2;

    /// Chance a destroyed enemy drops a power-up
    pub const POWERUP_DROP_CHANCE: f64 = 0.15;

    /// Wave banner display time before play begins
    pub const WAVE_INTRO_MS: u64 = 2_000;

    /// Formation geometry: `16 + 2*wave` enemies in 6 columns
    pub const FORMATION_BASE_SIZE: u32 = 16;
    pub const FORMATION_PER_WAVE: u32 = 2;
    pub const FORMATION_COLUMNS: u32 = 6;
    /// Grid spacing is enemy size plus these gaps
    pub const FORMATION_X_GAP: f32 = 60.0;
    pub const FORMATION_Y_GAP: f32 = 40.0;
    /// Top-left corner of the formation grid
    pub const FORMATION_ORIGIN_X: f32 = 80.0;
    pub const FORMATION_ORIGIN_Y: f32 = 120.0;
    /// V-shape pattern: per-column-distance outward shift and downward drop
    pub const V_SPREAD: f32 = 22.0;
    pub const V_DROP: f32 = 34.0;

    /// Every fifth wave is a boss wave
    pub const BOSS_WAVE_INTERVAL: u32 = 5;
    /// Chance an enemy is level 2 grows per wave, capped
    pub const LEVEL2_BASE_CHANCE: f64 = 0.2;
    pub const LEVEL2_CHANCE_PER_WAVE: f64 = 0.05;
    pub const LEVEL2_CHANCE_CAP: f64 = 0.7;

    /// Enemy shoot-interval range narrows with wave number
    pub const SHOOT_INTERVAL_BASE_MIN_MS: u64 = 1_400;
    pub const SHOOT_INTERVAL_BASE_MAX_MS: u64 = 2_800;
    pub const SHOOT_INTERVAL_MIN_SHRINK_MS: u64 = 100;
    pub const SHOOT_INTERVAL_MAX_SHRINK_MS: u64 = 200;
    pub const SHOOT_INTERVAL_FLOOR_MIN_MS: u64 = 400;
    pub const SHOOT_INTERVAL_FLOOR_MAX_MS: u64 = 800;
    /// Boss-wave shoot-interval range
    pub const BOSS_SHOOT_MIN_MS: u64 = 200;
    pub const BOSS_SHOOT_MAX_MS: u64 = 800;

    /// Patrol speed grows linearly with wave (px/s, 0.2 px/frame at 120 Hz)
    pub const ENEMY_SPEED_WAVE_BONUS: f32 = 24.0;
    /// Flat patrol/entry speed boost on boss waves (px/s)
    pub const BOSS_SPEED_BONUS: f32 = 60.0;

    /// Cosmetic explosion: frame count and per-frame duration
    pub const EXPLOSION_FRAMES: u32 = 6;
    pub const EXPLOSION_FRAME_MS: u64 = 60;
}
