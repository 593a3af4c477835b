//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only (spawns and camera shake use separate streams)
//! - Fixed-capacity pools iterated in slot order
//! - No rendering, audio or platform dependencies

pub mod camera;
pub mod collision;
pub mod combat;
pub mod entities;
pub mod events;
pub mod player;
pub mod pool;
pub mod spawner;
pub mod state;
pub mod terrain;
pub mod tick;

pub use camera::{CameraRig, CameraView};
pub use collision::{Aabb, PlaneCrossing, player_hits_wall, sweep_wall, within_radius};
pub use entities::{
    Enemy, EnemyVariant, Item, ItemKind, Obstacle, Projectile, ProjectileKind, Wall, hole_size,
};
pub use events::{EventQueue, GameEvent, Impactor};
pub use player::{CraftKind, Player};
pub use pool::{EntityId, EntityKind, Pool, Slot, Transform};
pub use spawner::{SpawnTimer, Spawner};
pub use state::{GamePhase, GameState, Pools, Session, SessionSnapshot};
pub use terrain::{Heightfield, Terrain};
pub use tick::{ControlIntent, tick};
