//! Wave formation generation and difficulty scaling
//!
//! A wave number maps to one of four layout patterns and a linear difficulty
//! curve; every fifth wave upgrades the whole formation to boss tier. All
//! randomness (tier rolls, scatter jitter, shoot intervals) comes from the
//! injected RNG so runs replay bit-identically from a seed.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Enemy, EnemyLevel};
use crate::consts::*;
use crate::tuning::Tuning;

/// Everything the spawner decides about one enemy before it becomes a store
/// entity.
#[derive(Debug, Clone)]
pub struct EnemySpec {
    /// Spawn position, above the visible area
    pub pos: Vec2,
    /// Formation row the entry descent stops at
    pub target_y: f32,
    pub level: EnemyLevel,
    pub boss: bool,
    pub health: u8,
    pub patrol_speed: f32,
    pub entry_speed: f32,
    pub shoot_interval_ms: u64,
}

/// Layout pattern for a wave, cycling every four waves
fn pattern(wave: u32) -> u32 {
    wave % 4
}

/// Map a formation index to its (row, column) cell.
fn formation_cell(index: u32) -> (u32, u32) {
    (index / FORMATION_COLUMNS, index % FORMATION_COLUMNS)
}

/// Formation slot position for the wave's layout pattern.
fn slot_position(wave: u32, index: u32, tuning: &Tuning, rng: &mut Pcg32) -> Vec2 {
    let (row, col) = formation_cell(index);
    debug_assert!(col < FORMATION_COLUMNS, "formation index out of range");

    let cell_w = tuning.enemy_size.x + FORMATION_X_GAP;
    let cell_h = tuning.enemy_size.y + FORMATION_Y_GAP;
    let base = Vec2::new(
        FORMATION_ORIGIN_X + col as f32 * cell_w,
        FORMATION_ORIGIN_Y + row as f32 * cell_h,
    );

    match pattern(wave) {
        // Plain grid
        0 => base,
        // Zig-zag: odd rows shifted right by half a cell
        1 => {
            if row % 2 == 1 {
                base + Vec2::new(cell_w / 2.0, 0.0)
            } else {
                base
            }
        }
        // V-shape: columns farther from the midpoint sit lower and wider
        2 => {
            let offset = col as f32 - (FORMATION_COLUMNS - 1) as f32 / 2.0;
            base + Vec2::new(offset * V_SPREAD, offset.abs() * V_DROP)
        }
        // Random scatter within the top third of the play area
        _ => {
            let x_max = tuning.width - tuning.enemy_size.x - FORMATION_ORIGIN_X;
            Vec2::new(
                rng.random_range(FORMATION_ORIGIN_X..x_max),
                rng.random_range(40.0..tuning.height / 3.0),
            )
        }
    }
}

/// Shoot-interval bounds for a non-boss wave: both ends shrink linearly with
/// the wave number down to hard floors.
fn shoot_interval_bounds(wave: u32) -> (u64, u64) {
    let lo = SHOOT_INTERVAL_BASE_MIN_MS
        .saturating_sub(SHOOT_INTERVAL_MIN_SHRINK_MS * wave as u64)
        .max(SHOOT_INTERVAL_FLOOR_MIN_MS);
    let hi = SHOOT_INTERVAL_BASE_MAX_MS
        .saturating_sub(SHOOT_INTERVAL_MAX_SHRINK_MS * wave as u64)
        .max(SHOOT_INTERVAL_FLOOR_MAX_MS);
    (lo, hi)
}

/// Chance an enemy spawns as level 2 on a non-boss wave
fn level2_chance(wave: u32) -> f64 {
    (LEVEL2_BASE_CHANCE + LEVEL2_CHANCE_PER_WAVE * (wave - 1) as f64).min(LEVEL2_CHANCE_CAP)
}

/// Produce the initial formation for a wave: `16 + 2*wave` enemies in six
/// columns, spawned above the screen so they descend into place.
pub fn spawn_wave(wave: u32, tuning: &Tuning, rng: &mut Pcg32) -> Vec<EnemySpec> {
    debug_assert!(wave >= 1, "waves are 1-based");

    let count = FORMATION_BASE_SIZE + FORMATION_PER_WAVE * wave;
    let boss_wave = wave % BOSS_WAVE_INTERVAL == 0;
    let (lo, hi) = shoot_interval_bounds(wave);
    let patrol = tuning.enemy_patrol_speed + ENEMY_SPEED_WAVE_BONUS * wave as f32;

    let mut specs = Vec::with_capacity(count as usize);
    for index in 0..count {
        let (row, _) = formation_cell(index);
        let target = slot_position(wave, index, tuning, rng);
        // Rows stream in staggered from above the top edge
        let spawn_y = -(tuning.enemy_size.y + 40.0 + row as f32 * 30.0);

        let spec = if boss_wave {
            EnemySpec {
                pos: Vec2::new(target.x, spawn_y),
                target_y: target.y,
                level: EnemyLevel::Two,
                boss: true,
                health: Enemy::max_health(EnemyLevel::Two, true),
                patrol_speed: patrol + BOSS_SPEED_BONUS,
                entry_speed: tuning.enemy_entry_speed + BOSS_SPEED_BONUS,
                shoot_interval_ms: rng.random_range(BOSS_SHOOT_MIN_MS..=BOSS_SHOOT_MAX_MS),
            }
        } else {
            let level = if rng.random_bool(level2_chance(wave)) {
                EnemyLevel::Two
            } else {
                EnemyLevel::One
            };
            EnemySpec {
                pos: Vec2::new(target.x, spawn_y),
                target_y: target.y,
                level,
                boss: false,
                health: Enemy::max_health(level, false),
                patrol_speed: patrol,
                entry_speed: tuning.enemy_entry_speed,
                shoot_interval_ms: rng.random_range(lo..=hi),
            }
        };
        specs.push(spec);
    }

    log::info!(
        "wave {}: {} enemies, pattern {}, boss={}",
        wave,
        specs.len(),
        pattern(wave),
        boss_wave
    );
    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng(seed: u64) -> Pcg32 {
        Pcg32::seed_from_u64(seed)
    }

    #[test]
    fn test_formation_size_formula() {
        let tuning = Tuning::default();
        for wave in 1..=12 {
            let specs = spawn_wave(wave, &tuning, &mut rng(1));
            assert_eq!(specs.len() as u32, 16 + 2 * wave);
        }
    }

    #[test]
    fn test_boss_wave_all_boss_tier() {
        let tuning = Tuning::default();
        for wave in [5, 10, 15] {
            let specs = spawn_wave(wave, &tuning, &mut rng(2));
            assert!(specs.iter().all(|s| s.boss));
            assert!(specs.iter().all(|s| s.level == EnemyLevel::Two));
            assert!(specs.iter().all(|s| s.health == 7));
        }
    }

    #[test]
    fn test_wave_four_has_no_bosses() {
        let tuning = Tuning::default();
        let specs = spawn_wave(4, &tuning, &mut rng(3));
        assert!(specs.iter().all(|s| !s.boss));
    }

    #[test]
    fn test_health_never_exceeds_tier_max() {
        let tuning = Tuning::default();
        for wave in 1..=20 {
            for spec in spawn_wave(wave, &tuning, &mut rng(wave as u64)) {
                assert!(spec.health <= Enemy::max_health(spec.level, spec.boss));
                assert!(spec.health >= 1);
            }
        }
    }

    #[test]
    fn test_grid_pattern_has_six_columns() {
        let tuning = Tuning::default();
        // Wave 4 uses pattern 0 (plain grid)
        let specs = spawn_wave(4, &tuning, &mut rng(4));
        let mut xs: Vec<i64> = specs.iter().map(|s| s.pos.x as i64).collect();
        xs.sort_unstable();
        xs.dedup();
        assert_eq!(xs.len(), 6);
    }

    #[test]
    fn test_zigzag_shifts_odd_rows() {
        let tuning = Tuning::default();
        // Wave 1 uses pattern 1 (zig-zag)
        let specs = spawn_wave(1, &tuning, &mut rng(5));
        let cell_w = tuning.enemy_size.x + FORMATION_X_GAP;
        let row0_x = specs[0].pos.x;
        let row1_x = specs[FORMATION_COLUMNS as usize].pos.x;
        assert!((row1_x - row0_x - cell_w / 2.0).abs() < 0.001);
    }

    #[test]
    fn test_scatter_stays_in_top_third() {
        let tuning = Tuning::default();
        // Wave 3 uses pattern 3 (scatter)
        let specs = spawn_wave(3, &tuning, &mut rng(6));
        for spec in &specs {
            assert!(spec.target_y >= 40.0);
            assert!(spec.target_y <= tuning.height / 3.0);
            assert!(spec.pos.x >= 0.0);
            assert!(spec.pos.x + tuning.enemy_size.x <= tuning.width);
        }
    }

    #[test]
    fn test_enemies_spawn_above_screen() {
        let tuning = Tuning::default();
        for spec in spawn_wave(2, &tuning, &mut rng(7)) {
            assert!(spec.pos.y < 0.0);
            assert!(spec.target_y > spec.pos.y);
        }
    }

    #[test]
    fn test_shoot_interval_bounds_floor() {
        // Shrinks linearly
        assert_eq!(shoot_interval_bounds(1), (1_300, 2_600));
        assert_eq!(shoot_interval_bounds(5), (900, 1_800));
        // Floored at 400/800 for deep waves
        assert_eq!(shoot_interval_bounds(30), (400, 800));
    }

    #[test]
    fn test_same_seed_same_formation() {
        let tuning = Tuning::default();
        let a = spawn_wave(3, &tuning, &mut rng(99));
        let b = spawn_wave(3, &tuning, &mut rng(99));
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.level, y.level);
            assert_eq!(x.shoot_interval_ms, y.shoot_interval_ms);
        }
    }
}
