//! Session state and the aggregate game world
//!
//! `Session` is the scoring state machine. `GameState` owns every manager the
//! tick touches: terrain, pools, spawners, player and camera.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::CameraRig;
use super::entities::{Enemy, Item, ItemKind, Obstacle, Projectile, Wall};
use super::events::{EventQueue, GameEvent, Impactor};
use super::player::{CraftKind, Player};
use super::pool::{EntityKind, Pool};
use super::spawner::Spawner;
use super::terrain::Terrain;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    /// Run ended; only `reset` leaves this phase
    GameOver,
}

/// Read-only view of the session for UI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub score: f64,
    pub health: f32,
    pub fuel: f32,
    pub is_game_over: bool,
}

/// Score, vitals and difficulty for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub score: f64,
    pub health: f32,
    pub fuel: f32,
    pub difficulty: f32,
    pub phase: GamePhase,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            score: 0.0,
            health: MAX_HEALTH,
            fuel: MAX_FUEL,
            difficulty: 0.0,
            phase: GamePhase::Playing,
        }
    }
}

impl Session {
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// World speed: base speed ramped by score, slowed by terrain drag
    pub fn effective_speed(&self, base_speed: f32, drag: f32) -> f32 {
        let ramp = 1.0 + (self.score / SPEED_RAMP_SCORE).min(SPEED_RAMP_CAP);
        (base_speed as f64 * ramp) as f32 * drag
    }

    /// Apply one gameplay event to score and vitals
    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::TerrainScrape { .. } => self.damage(TERRAIN_DAMAGE),
            GameEvent::ObstacleHit { .. } => self.damage(OBSTACLE_DAMAGE),
            GameEvent::WallHit {
                impactor: Impactor::Player,
                ..
            } => self.damage(WALL_DAMAGE),
            GameEvent::EnemyEscaped { .. } => self.damage(ESCAPE_DAMAGE),
            GameEvent::WallCleared { .. } => self.score += WALL_CLEAR_BONUS,
            GameEvent::EnemyKilled { .. } => self.score += KILL_BONUS,
            GameEvent::ItemCollected {
                kind: ItemKind::Score,
                ..
            } => self.score += ITEM_BONUS,
            GameEvent::ItemCollected {
                kind: ItemKind::Fuel,
                ..
            } => self.fuel = (self.fuel + FUEL_PICKUP).min(MAX_FUEL),
            GameEvent::WallHit { .. }
            | GameEvent::ObstacleDestroyed { .. }
            | GameEvent::Explosion { .. }
            | GameEvent::EmpHit { .. }
            | GameEvent::BulletFiredVisual { .. } => {}
        }
    }

    fn damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    /// Difficulty grows every playing frame, independent of spawns
    pub fn grow_difficulty(&mut self, dt: f32) {
        self.difficulty += dt * DIFFICULTY_RATE;
    }

    /// Time-based score accrual and fuel drain
    pub fn advance(&mut self, dt: f32, speed: f32, boosting: bool) {
        self.score += dt as f64 * speed as f64 * SCORE_RATE;
        let drain = if boosting { BOOST_FUEL_DRAIN } else { FUEL_DRAIN };
        self.fuel = (self.fuel - dt * drain).max(0.0);
    }

    /// Enter GameOver once health or fuel is exhausted.
    ///
    /// Returns true on the transition frame only.
    pub fn check_game_over(&mut self) -> bool {
        if self.phase == GamePhase::Playing && (self.health <= 0.0 || self.fuel <= 0.0) {
            self.phase = GamePhase::GameOver;
            log::info!(
                "Game over: score {:.0}, health {:.1}, fuel {:.1}",
                self.score,
                self.health,
                self.fuel
            );
            return true;
        }
        false
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            score: self.score,
            health: self.health,
            fuel: self.fuel,
            is_game_over: self.is_game_over(),
        }
    }
}

/// Every pool in the world
#[derive(Debug, Clone)]
pub struct Pools {
    pub obstacles: Pool<Obstacle>,
    pub enemies: Pool<Enemy>,
    pub items: Pool<Item>,
    pub walls: Pool<Wall>,
    pub projectiles: Pool<Projectile>,
}

impl Default for Pools {
    fn default() -> Self {
        Self {
            obstacles: Pool::new(EntityKind::Obstacle, OBSTACLE_POOL),
            enemies: Pool::new(EntityKind::Enemy, ENEMY_POOL),
            items: Pool::new(EntityKind::Item, ITEM_POOL),
            walls: Pool::new(EntityKind::Wall, WALL_POOL),
            projectiles: Pool::new(EntityKind::Projectile, PROJECTILE_POOL),
        }
    }
}

impl Pools {
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.enemies.clear();
        self.items.clear();
        self.walls.clear();
        self.projectiles.clear();
    }

    pub fn active_count(&self) -> usize {
        self.obstacles.active_count()
            + self.enemies.active_count()
            + self.items.active_count()
            + self.walls.active_count()
            + self.projectiles.active_count()
    }
}

/// Complete game world
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub terrain: Terrain,
    pub pools: Pools,
    pub spawner: Spawner,
    pub player: Player,
    pub camera: CameraRig,
    pub session: Session,
    /// Events from the last tick, waiting to be drained
    pub events: EventQueue,
    /// Spawn placement stream
    pub rng: Pcg32,
    /// Fire button state on the previous tick (edge detection)
    pub fire_held: bool,
    /// World speed used on the last tick
    pub speed: f32,
    /// Simulated seconds since the run started
    pub elapsed: f32,
}

impl GameState {
    pub fn new(settings: Settings) -> Self {
        let settings = settings.sanitized();
        let seed = settings.seed;
        Self {
            terrain: Terrain::new(
                seed as u32,
                settings.terrain_amplitude,
                settings.terrain_frequency,
                settings.terrain_glow,
            ),
            pools: Pools::default(),
            spawner: Spawner::default(),
            player: Player::new(settings.craft),
            camera: CameraRig::new(seed.wrapping_add(1)),
            session: Session::default(),
            events: EventQueue::new(),
            rng: Pcg32::seed_from_u64(seed),
            fire_held: false,
            speed: settings.base_speed,
            elapsed: 0.0,
            settings,
        }
    }

    /// Start a fresh run; the heightfield and craft are kept
    pub fn reset(&mut self) {
        self.session = Session::default();
        self.player.reset();
        self.pools.clear();
        self.spawner.reset();
        self.terrain.reset();
        self.camera.reset();
        self.events.clear();
        self.rng = Pcg32::seed_from_u64(self.settings.seed);
        self.fire_held = false;
        self.speed = self.settings.base_speed;
        self.elapsed = 0.0;
        log::info!("Run reset");
    }

    pub fn set_craft(&mut self, craft: CraftKind) {
        self.player.set_craft(craft);
    }

    /// Take the events of the last tick
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
