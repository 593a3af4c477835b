//! Aether Runner - headless simulation core for an endless airship runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, pools, combat, session state)
//! - `feed`: Read-only per-frame snapshot for the renderer
//! - `audio`: Sound cue selection from simulation events
//! - `settings`: Runtime tuning and preferences

pub mod audio;
pub mod feed;
pub mod settings;
pub mod sim;

pub use feed::RenderFeed;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Largest frame step the simulation will integrate (stall protection)
    pub const MAX_DT: f32 = 0.1;
    /// Fixed step used by the headless runner
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// World scroll units per second per unit of speed
    pub const SCROLL_RATE: f32 = 12.0;
    /// Entities behind this depth are despawned (behind the camera)
    pub const DESPAWN_Z: f32 = 20.0;

    /// Terrain defaults
    pub const TERRAIN_AMPLITUDE: f32 = 1.4;
    pub const TERRAIN_FREQUENCY: f32 = 0.08;
    pub const TERRAIN_GLOW: f32 = 0.6;
    /// Height scale applied on top of the amplitude
    pub const TERRAIN_HEIGHT_SCALE: f32 = 2.5;
    pub const TERRAIN_OCTAVES: usize = 5;
    /// Peak sharpening exponent
    pub const TERRAIN_SHARPEN: f32 = 1.2;
    pub const TERRAIN_X_OFFSET: f32 = 2.0;
    /// Phase speed of the rolling terrain
    pub const TERRAIN_TIME_RATE: f32 = 0.4;

    /// Player limits and handling
    pub const PLAYER_START_Y: f32 = 5.0;
    pub const PLAYER_X_LIMIT: f32 = 12.0;
    pub const PLAYER_Y_MIN: f32 = 1.5;
    pub const PLAYER_Y_MAX: f32 = 22.0;
    pub const PLAYER_LATERAL_ACCEL: f32 = 10.0;
    pub const PLAYER_VERTICAL_ACCEL: f32 = 8.0;
    pub const BOOST_MULTIPLIER: f32 = 1.8;
    /// Clearance kept above the ground
    pub const GROUND_MARGIN: f32 = 0.6;
    /// Depth below the clearance that counts as a hard hit
    pub const HARD_HIT_THRESHOLD: f32 = 0.2;
    pub const HARD_HIT_LERP: f32 = 0.2;
    pub const CUSHION_LERP: f32 = 0.1;
    /// Speed multiplier applied per hard terrain hit
    pub const TERRAIN_DRAG: f32 = 0.95;
    /// Recovery rate of the drag multiplier back to 1.0 (per second)
    pub const DRAG_RECOVERY: f32 = 0.5;
    pub const VISUAL_LERP: f32 = 0.1;
    pub const BANK_LERP: f32 = 0.05;
    /// Player hitbox size (x, y, z)
    pub const PLAYER_HITBOX: [f32; 3] = [1.0, 0.5, 1.0];

    /// Pool capacities
    pub const OBSTACLE_POOL: usize = 20;
    pub const ENEMY_POOL: usize = 10;
    pub const ITEM_POOL: usize = 10;
    pub const WALL_POOL: usize = 5;
    pub const PROJECTILE_POOL: usize = 50;

    /// Spawn intervals (seconds)
    pub const OBSTACLE_INTERVAL: f32 = 1.5;
    pub const ENEMY_BASE_INTERVAL: f32 = 3.0;
    pub const ENEMY_MIN_INTERVAL: f32 = 1.5;
    pub const ENEMY_INTERVAL_PER_SPEED: f32 = 0.4;
    pub const ITEM_INTERVAL: f32 = 2.5;
    pub const WALL_INTERVAL: f32 = 8.0;

    /// Spawn depths
    pub const OBSTACLE_SPAWN_Z: f32 = -100.0;
    pub const ENEMY_SPAWN_Z: f32 = -200.0;
    pub const ITEM_SPAWN_Z: f32 = -150.0;
    pub const WALL_SPAWN_Z: f32 = -200.0;

    /// Extra forward speed per kind
    pub const ENEMY_THRUST: f32 = 40.0;
    pub const WALL_THRUST: f32 = 5.0;

    /// Wall gates
    pub const DIFFICULTY_RATE: f32 = 0.01;
    pub const HOLE_START: f32 = 8.0;
    pub const HOLE_FLOOR: f32 = 3.0;
    pub const HOLE_SHRINK: f32 = 5.0;
    pub const HOLE_ASPECT: f32 = 0.8;
    /// Side length of each quadrant slab
    pub const WALL_SLAB: f32 = 50.0;
    pub const WALL_DEPTH: f32 = 0.5;

    /// Proximity radii
    pub const OBSTACLE_HIT_RADIUS: f32 = 1.5;
    pub const ITEM_PICKUP_RADIUS: f32 = 2.0;
    pub const PROJECTILE_HIT_RADIUS: f32 = 1.5;

    /// Projectiles
    pub const PROJECTILE_SPEED: f32 = 50.0;
    pub const PROJECTILE_LIFE: f32 = 2.0;
    pub const PROJECTILE_DAMAGE: i32 = 10;
    /// Muzzle position relative to the player
    pub const MUZZLE_OFFSET: [f32; 3] = [0.0, -0.2, -1.0];
    pub const PIERCE_BUDGET: i32 = 3;
    pub const EXPLOSION_RADIUS: f32 = 4.0;
    pub const EXPLOSION_DAMAGE: i32 = 25;
    pub const EMP_STUN: f32 = 2.0;
    pub const SHOTGUN_PELLETS: usize = 5;
    pub const SHOTGUN_SPREAD: f32 = 6.0;
    pub const SHOTGUN_LIFE: f32 = 1.0;
    pub const SHOTGUN_DAMAGE: i32 = 8;

    /// Session
    pub const MAX_HEALTH: f32 = 100.0;
    pub const MAX_FUEL: f32 = 100.0;
    pub const FUEL_DRAIN: f32 = 2.0;
    pub const BOOST_FUEL_DRAIN: f32 = 10.0;
    pub const FUEL_PICKUP: f32 = 30.0;
    pub const SCORE_RATE: f64 = 10.0;
    pub const KILL_BONUS: f64 = 500.0;
    pub const ITEM_BONUS: f64 = 1000.0;
    pub const WALL_CLEAR_BONUS: f64 = 1000.0;
    pub const SPEED_RAMP_CAP: f64 = 0.6;
    pub const SPEED_RAMP_SCORE: f64 = 30000.0;
    pub const TERRAIN_DAMAGE: f32 = 10.0;
    pub const OBSTACLE_DAMAGE: f32 = 10.0;
    pub const WALL_DAMAGE: f32 = 50.0;
    pub const ESCAPE_DAMAGE: f32 = 5.0;

    /// Camera
    pub const CAMERA_OFFSET: [f32; 3] = [0.0, 3.2, 5.0];
    pub const CAMERA_LOOK_OFFSET: [f32; 3] = [0.0, 0.0, -5.0];
    pub const CAMERA_LERP: f32 = 0.1;
    pub const CAMERA_KICK: f32 = 10.0;
    pub const TRAUMA_DECAY: f32 = 1.5;
    pub const FOV_NORMAL: f32 = 60.0;
    pub const FOV_BOOST: f32 = 75.0;
    pub const FOV_LERP: f32 = 0.1;
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Uniform sample in `[-half, half)` from a unit roll in `[0, 1)`
#[inline]
pub fn centered(roll: f32, half: f32) -> f32 {
    (roll - 0.5) * 2.0 * half
}
