//! Game state and core simulation types
//!
//! Everything the simulation mutates lives here, owned by [`GameState`] so
//! multiple independent runs can coexist (tests step several in parallel).

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::effects::ActiveEffects;
use super::wave::{self, EnemySpec};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Wave banner on screen; formation already spawned, play not yet begun
    WaveIntro,
    /// Active gameplay
    Playing,
    /// Frozen: no motion, no collisions, no timer advances
    Paused,
    /// Run ended; waiting for a confirm (restart) or cancel (quit) intent
    GameOver,
    /// Terminal: the host should stop ticking and tear down
    Terminated,
}

/// Entity identifier, unique within one [`GameState`] for the whole run
pub type EntityId = u32;

/// Enemy strength tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyLevel {
    One,
    Two,
}

/// The player's ship. Created once per run, reset on restart.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub lives: u8,
    /// Timestamp of the last shot, for cooldown gating
    pub last_shot_ms: u64,
    pub effects: ActiveEffects,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.player_spawn(),
            size: tuning.player_size,
            lives: START_LIVES,
            last_shot_ms: 0,
            effects: ActiveEffects::default(),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Add a life, clamped at the cap. The clamp is deliberate and visible:
    /// picking up health at 5 lives is a no-op.
    pub fn gain_life(&mut self) {
        self.lives = (self.lives + 1).min(MAX_LIVES);
    }

    /// Remove a life, saturating at zero.
    pub fn lose_life(&mut self) {
        debug_assert!(self.lives > 0, "lose_life on a dead player");
        self.lives = self.lives.saturating_sub(1);
    }
}

/// A formation enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    pub level: EnemyLevel,
    pub boss: bool,
    pub health: u8,
    /// Horizontal patrol speed (px/s) and direction (+1 right, -1 left)
    pub patrol_speed: f32,
    pub dir: f32,
    /// Descent speed while entering (px/s)
    pub entry_speed: f32,
    /// Still descending into formation
    pub entering: bool,
    /// Formation row y-coordinate the entry phase descends to
    pub target_y: f32,
    pub shoot_interval_ms: u64,
    pub last_shot_ms: u64,
}

impl Enemy {
    /// Health ceiling for a tier: 1 for level 1, 3 for level 2, +4 if boss
    pub fn max_health(level: EnemyLevel, boss: bool) -> u8 {
        let base = match level {
            EnemyLevel::One => 1,
            EnemyLevel::Two => 3,
        };
        if boss { base + 4 } else { base }
    }

    pub fn from_spec(spec: &EnemySpec, size: Vec2) -> Self {
        debug_assert!(spec.health <= Self::max_health(spec.level, spec.boss));
        Self {
            id: 0,
            pos: spec.pos,
            size,
            level: spec.level,
            boss: spec.boss,
            health: spec.health,
            patrol_speed: spec.patrol_speed,
            dir: 1.0,
            entry_speed: spec.entry_speed,
            entering: true,
            target_y: spec.target_y,
            shoot_interval_ms: spec.shoot_interval_ms,
            last_shot_ms: 0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A player bullet, climbing at fixed speed
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Bullet {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// An enemy bullet, falling at fixed speed
#[derive(Debug, Clone)]
pub struct EnemyBullet {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
}

impl EnemyBullet {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Health,
    Rapid,
    Shield,
    Double,
    Bomb,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Health,
        PowerUpKind::Rapid,
        PowerUpKind::Shield,
        PowerUpKind::Double,
        PowerUpKind::Bomb,
    ];
}

/// A falling power-up capsule
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: EntityId,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
}

impl PowerUp {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Explosion palette: bosses burst in their own color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionColor {
    Standard,
    Boss,
}

/// A cosmetic explosion. The simulation only owns its lifecycle; the frames
/// themselves are the renderer's concern.
#[derive(Debug, Clone)]
pub struct Explosion {
    pub id: EntityId,
    pub pos: Vec2,
    pub color: ExplosionColor,
    pub age_ms: u64,
}

impl Explosion {
    pub fn new(pos: Vec2, color: ExplosionColor) -> Self {
        Self {
            id: 0,
            pos,
            color,
            age_ms: 0,
        }
    }

    /// Current frame index, clamped to the last frame
    pub fn frame(&self) -> u32 {
        ((self.age_ms / EXPLOSION_FRAME_MS) as u32).min(EXPLOSION_FRAMES - 1)
    }

    pub fn finished(&self) -> bool {
        self.age_ms >= EXPLOSION_FRAME_MS * EXPLOSION_FRAMES as u64
    }
}

/// Closed set of storable entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Enemy,
    Bullet,
    EnemyBullet,
    PowerUp,
    Explosion,
}

/// Tagged entity variant for [`Entities::spawn`]. Collision routing and
/// snapshot capture dispatch on the discriminator, never on attribute probing.
#[derive(Debug, Clone)]
pub enum Entity {
    Enemy(Enemy),
    Bullet(Bullet),
    EnemyBullet(EnemyBullet),
    PowerUp(PowerUp),
    Explosion(Explosion),
}

/// Owns every live variable-population entity. Storage and iteration only;
/// behavior lives in `tick` and `collision`.
#[derive(Debug, Clone, Default)]
pub struct Entities {
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub powerups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
    next_id: EntityId,
}

impl Entities {
    /// Allocate an id and store the entity. Iteration order is spawn order.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        self.next_id += 1;
        let id = self.next_id;
        match entity {
            Entity::Enemy(mut e) => {
                e.id = id;
                self.enemies.push(e);
            }
            Entity::Bullet(mut b) => {
                b.id = id;
                self.bullets.push(b);
            }
            Entity::EnemyBullet(mut b) => {
                b.id = id;
                self.enemy_bullets.push(b);
            }
            Entity::PowerUp(mut p) => {
                p.id = id;
                self.powerups.push(p);
            }
            Entity::Explosion(mut x) => {
                x.id = id;
                self.explosions.push(x);
            }
        }
        id
    }

    /// Remove by id across all kinds. Removing an unknown or already-removed
    /// id is a no-op, never an error.
    pub fn remove(&mut self, id: EntityId) {
        self.enemies.retain(|e| e.id != id);
        self.bullets.retain(|b| b.id != id);
        self.enemy_bullets.retain(|b| b.id != id);
        self.powerups.retain(|p| p.id != id);
        self.explosions.retain(|x| x.id != id);
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Enemy => self.enemies.len(),
            EntityKind::Bullet => self.bullets.len(),
            EntityKind::EnemyBullet => self.enemy_bullets.len(),
            EntityKind::PowerUp => self.powerups.len(),
            EntityKind::Explosion => self.explosions.len(),
        }
    }

    pub fn is_empty(&self, kind: EntityKind) -> bool {
        self.count(kind) == 0
    }

    /// Drop every entity. Id allocation keeps counting so ids never recycle
    /// within a run.
    pub fn clear(&mut self) {
        self.enemies.clear();
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.powerups.clear();
        self.explosions.clear();
    }
}

/// Complete simulation state: the injectable context every component works on
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,

    /// Simulation clock in ms; frozen while paused
    pub now_ms: u64,
    pub phase: GamePhase,
    /// Timestamp the current wave banner comes down
    pub intro_until_ms: u64,

    /// Current wave number (1-based)
    pub wave: u32,
    pub score: u64,
    /// Best score across restarts within this process run
    pub high_score: u64,
    /// Consecutive-kill multiplier, never below 1
    pub combo: u32,
    /// Timestamp of the most recent kill, for the combo window
    pub last_kill_ms: Option<u64>,

    pub player: Player,
    pub entities: Entities,
}

impl GameState {
    /// Create a fresh run and enter the wave-1 intro.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(&tuning),
            tuning,
            now_ms: 0,
            phase: GamePhase::WaveIntro,
            intro_until_ms: 0,
            wave: 1,
            score: 0,
            high_score: 0,
            combo: 1,
            last_kill_ms: None,
            entities: Entities::default(),
        };
        state.enter_wave_intro();
        state
    }

    /// Whether the current wave is a boss wave
    pub fn boss_wave(&self) -> bool {
        self.wave % BOSS_WAVE_INTERVAL == 0
    }

    /// Enter the intro banner for `self.wave` and spawn its formation.
    pub fn enter_wave_intro(&mut self) {
        self.phase = GamePhase::WaveIntro;
        self.intro_until_ms = self.now_ms + WAVE_INTRO_MS;
        let specs = wave::spawn_wave(self.wave, &self.tuning, &mut self.rng);
        for spec in &specs {
            self.entities
                .spawn(Entity::Enemy(Enemy::from_spec(spec, self.tuning.enemy_size)));
        }
    }

    /// Restart after game over: bank the high score, then reset the run.
    pub fn restart(&mut self) {
        self.high_score = self.high_score.max(self.score);
        log::info!(
            "restart: high score {} after run of {}",
            self.high_score,
            self.score
        );
        self.score = 0;
        self.wave = 1;
        self.combo = 1;
        self.last_kill_ms = None;
        self.entities.clear();
        self.player = Player::new(&self.tuning);
        self.enter_wave_intro();
    }

    /// Register an enemy kill for scoring: advances the combo window and
    /// returns the points awarded.
    pub fn score_kill(&mut self, level: EnemyLevel, boss: bool) -> u64 {
        self.combo = match self.last_kill_ms {
            Some(t) if self.now_ms - t <= COMBO_WINDOW_MS => self.combo + 1,
            _ => 1,
        };
        self.last_kill_ms = Some(self.now_ms);

        let base = if boss || level == EnemyLevel::Two {
            SCORE_LEVEL2
        } else {
            SCORE_LEVEL1
        };
        let mult = if self.boss_wave() {
            BOSS_WAVE_MULTIPLIER
        } else {
            1
        };
        let points = base * mult * self.combo as u64;
        self.score += points;
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn store_with_enemy() -> (Entities, EntityId) {
        let mut entities = Entities::default();
        let spec = EnemySpec {
            pos: Vec2::new(0.0, -40.0),
            target_y: 120.0,
            level: EnemyLevel::One,
            boss: false,
            health: 1,
            patrol_speed: 90.0,
            entry_speed: 180.0,
            shoot_interval_ms: 1000,
        };
        let id = entities.spawn(Entity::Enemy(Enemy::from_spec(
            &spec,
            Vec2::new(48.0, 40.0),
        )));
        (entities, id)
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (mut entities, id) = store_with_enemy();
        assert_eq!(entities.count(EntityKind::Enemy), 1);

        entities.remove(id);
        assert!(entities.is_empty(EntityKind::Enemy));

        // Second removal of the same id must be a silent no-op
        entities.remove(id);
        assert!(entities.is_empty(EntityKind::Enemy));

        // As must removal of an id that never existed
        entities.remove(9999);
    }

    #[test]
    fn test_ids_unique_across_kinds() {
        let mut entities = Entities::default();
        let a = entities.spawn(Entity::Bullet(Bullet {
            id: 0,
            pos: Vec2::ZERO,
            size: Vec2::new(5.0, 12.0),
        }));
        let b = entities.spawn(Entity::Explosion(Explosion::new(
            Vec2::ZERO,
            ExplosionColor::Standard,
        )));
        assert_ne!(a, b);
    }

    #[test]
    fn test_lives_clamped_at_cap() {
        let mut player = Player::new(&Tuning::default());
        for _ in 0..10 {
            player.gain_life();
        }
        assert_eq!(player.lives, MAX_LIVES);
    }

    #[test]
    fn test_enemy_health_tiers() {
        assert_eq!(Enemy::max_health(EnemyLevel::One, false), 1);
        assert_eq!(Enemy::max_health(EnemyLevel::Two, false), 3);
        assert_eq!(Enemy::max_health(EnemyLevel::Two, true), 7);
    }

    #[test]
    fn test_explosion_lifecycle() {
        let mut x = Explosion::new(Vec2::ZERO, ExplosionColor::Boss);
        assert_eq!(x.frame(), 0);
        assert!(!x.finished());

        x.age_ms = EXPLOSION_FRAME_MS * 2;
        assert_eq!(x.frame(), 2);

        x.age_ms = EXPLOSION_FRAME_MS * EXPLOSION_FRAMES as u64;
        assert!(x.finished());
    }

    #[test]
    fn test_new_game_enters_wave_intro() {
        let state = GameState::new(7, Tuning::default());
        assert_eq!(state.phase, GamePhase::WaveIntro);
        assert_eq!(state.wave, 1);
        assert_eq!(state.combo, 1);
        assert_eq!(state.entities.count(EntityKind::Enemy), 18);
    }
}
