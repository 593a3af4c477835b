//! Pooled entity payloads and their per-frame kinematics

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::pool::{EntityId, Transform};
use crate::consts::*;

/// Enemy craft variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyVariant {
    /// Standard two-hit drone
    #[default]
    Drone,
    /// Fast, fragile, banks hard
    Interceptor,
    /// Slow and heavily armoured
    Bomber,
}

/// Per-variant tuning applied at spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyTuning {
    pub health: i32,
    pub speed_bonus: f32,
    pub bank_intensity: f32,
}

impl EnemyVariant {
    pub const ALL: [EnemyVariant; 3] = [
        EnemyVariant::Drone,
        EnemyVariant::Interceptor,
        EnemyVariant::Bomber,
    ];

    pub fn tuning(&self) -> EnemyTuning {
        match self {
            EnemyVariant::Drone => EnemyTuning {
                health: 20,
                speed_bonus: 0.0,
                bank_intensity: 0.3,
            },
            EnemyVariant::Interceptor => EnemyTuning {
                health: 12,
                speed_bonus: 15.0,
                bank_intensity: 0.5,
            },
            EnemyVariant::Bomber => EnemyTuning {
                health: 35,
                speed_bonus: -10.0,
                bank_intensity: 0.15,
            },
        }
    }

    /// Variant for the n-th spawn: every fifth is heavy, the rest alternate
    pub fn for_spawn(counter: u32) -> Self {
        if counter % 5 == 4 {
            EnemyVariant::Bomber
        } else if counter % 2 == 0 {
            EnemyVariant::Drone
        } else {
            EnemyVariant::Interceptor
        }
    }

    /// Index lookup; anything out of range falls back to `Drone`
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }
}

/// Enemy craft state
#[derive(Debug, Clone, Default)]
pub struct Enemy {
    pub variant: EnemyVariant,
    pub health: i32,
    pub speed_bonus: f32,
    pub bank_intensity: f32,
    /// Seconds of EMP stun remaining
    pub stun: f32,
    /// Banking wobble phase, seeded at spawn
    pub phase: f32,
}

/// Banking wobble frequency (radians per second)
const BANK_RATE: f32 = 3.0;

impl Enemy {
    pub fn new(variant: EnemyVariant, phase: f32) -> Self {
        let tuning = variant.tuning();
        Self {
            variant,
            health: tuning.health,
            speed_bonus: tuning.speed_bonus,
            bank_intensity: tuning.bank_intensity,
            stun: 0.0,
            phase,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_stunned(&self) -> bool {
        self.stun > 0.0
    }

    /// Forward speed; a stunned craft loses its own thrust and drifts
    pub fn forward_speed(&self, speed: f32) -> f32 {
        let scroll = speed * SCROLL_RATE;
        if self.is_stunned() {
            scroll
        } else {
            scroll + ENEMY_THRUST + self.speed_bonus
        }
    }

    pub fn advance(&mut self, transform: &mut Transform, dt: f32, speed: f32) {
        transform.position.z += self.forward_speed(speed) * dt;
        let bank = if self.is_stunned() {
            0.0
        } else {
            self.phase.sin() * self.bank_intensity
        };
        self.stun = (self.stun - dt).max(0.0);
        self.phase += dt * BANK_RATE;
        // Face +z, toward the player
        transform.rotation =
            Quat::from_rotation_y(std::f32::consts::PI) * Quat::from_rotation_z(bank);
    }
}

/// Floating mine / pillar
#[derive(Debug, Clone, Default)]
pub struct Obstacle {
    /// Euler angles (x, y, z)
    pub angles: Vec3,
    /// Spin rate per axis (radians per second)
    pub spin: Vec3,
}

impl Obstacle {
    pub fn advance(&mut self, transform: &mut Transform, dt: f32, speed: f32) {
        transform.position.z += speed * SCROLL_RATE * dt;
        self.angles += self.spin * dt;
        transform.rotation =
            Quat::from_euler(EulerRot::XYZ, self.angles.x, self.angles.y, self.angles.z);
    }
}

/// Collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemKind {
    #[default]
    Fuel,
    Score,
}

/// Floating collectible
#[derive(Debug, Clone, Default)]
pub struct Item {
    pub kind: ItemKind,
    /// Rest altitude the bob oscillates around
    pub base_y: f32,
    pub phase: f32,
    /// Accumulated spin (x, y)
    pub spin: (f32, f32),
}

const ITEM_BOB: f32 = 0.6;
const ITEM_BOB_RATE: f32 = 3.0;

impl Item {
    pub fn advance(&mut self, transform: &mut Transform, dt: f32, speed: f32) {
        self.phase += dt * ITEM_BOB_RATE;
        self.spin.0 += dt * 0.5;
        self.spin.1 += dt * 1.5;
        transform.position.z += speed * SCROLL_RATE * dt;
        transform.position.y = self.base_y + self.phase.sin() * ITEM_BOB;
        transform.rotation = Quat::from_euler(EulerRot::YXZ, self.spin.1, self.spin.0, 0.0);
        let pulse = 0.9 + (self.phase * 4.0 / 3.0).sin() * 0.12;
        transform.scale = Vec3::splat(pulse);
    }
}

/// A wall with a rectangular hole in it
#[derive(Debug, Clone, Default)]
pub struct Wall {
    pub hole_width: f32,
    pub hole_height: f32,
    /// Plane depth at the start of the current frame
    pub last_z: f32,
    /// Set once the gate is behind the player or has been crashed into
    pub passed: bool,
}

impl Wall {
    pub fn new(hole_width: f32, hole_height: f32, z: f32) -> Self {
        Self {
            hole_width,
            hole_height,
            last_z: z,
            passed: false,
        }
    }

    pub fn advance(&mut self, transform: &mut Transform, dt: f32, speed: f32) {
        self.last_z = transform.position.z;
        transform.position.z += (speed * SCROLL_RATE + WALL_THRUST) * dt;
    }

    /// Whether a point offset from the wall centre lies inside the hole
    pub fn hole_contains(&self, dx: f32, dy: f32) -> bool {
        dx.abs() < self.hole_width / 2.0 && dy.abs() < self.hole_height / 2.0
    }

    /// Whether an offset lies within the solid outer extent of the wall
    pub fn extent_contains(&self, dx: f32, dy: f32) -> bool {
        dx.abs() <= self.hole_width / 2.0 + WALL_SLAB && dy.abs() <= self.hole_height / 2.0 + WALL_SLAB
    }

    /// The four solid quadrants (top, bottom, left, right) around `center`
    pub fn quadrants(&self, center: Vec3) -> [Aabb; 4] {
        let half_w = self.hole_width / 2.0;
        let half_h = self.hole_height / 2.0;
        let slab = WALL_SLAB;
        let depth = WALL_DEPTH;
        [
            Aabb::from_center_size(
                center + Vec3::new(0.0, slab / 2.0 + half_h, 0.0),
                Vec3::new(slab, slab, depth),
            ),
            Aabb::from_center_size(
                center - Vec3::new(0.0, slab / 2.0 + half_h, 0.0),
                Vec3::new(slab, slab, depth),
            ),
            Aabb::from_center_size(
                center - Vec3::new(slab / 2.0 + half_w, 0.0, 0.0),
                Vec3::new(slab, self.hole_height, depth),
            ),
            Aabb::from_center_size(
                center + Vec3::new(slab / 2.0 + half_w, 0.0, 0.0),
                Vec3::new(slab, self.hole_height, depth),
            ),
        ]
    }
}

/// Hole width for the current difficulty (height follows at a fixed aspect)
pub fn hole_size(difficulty: f32) -> (f32, f32) {
    let width = (HOLE_START - difficulty * HOLE_SHRINK).max(HOLE_FLOOR);
    (width, width * HOLE_ASPECT)
}

/// Projectile behaviours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectileKind {
    #[default]
    Normal,
    /// Passes through a limited number of enemies
    Pierce,
    /// Area damage on impact
    Explosive,
    /// Stuns instead of damaging
    Emp,
    /// One pellet of a spread shot
    Shotgun,
}

impl ProjectileKind {
    /// Direct-hit damage
    pub fn damage(&self) -> i32 {
        match self {
            ProjectileKind::Normal | ProjectileKind::Pierce => PROJECTILE_DAMAGE,
            ProjectileKind::Shotgun => SHOTGUN_DAMAGE,
            ProjectileKind::Explosive => EXPLOSION_DAMAGE,
            ProjectileKind::Emp => 0,
        }
    }

    pub fn initial_pierce_budget(&self) -> i32 {
        match self {
            ProjectileKind::Pierce => PIERCE_BUDGET,
            _ => 0,
        }
    }
}

/// Projectile state; position lives in the slot transform
#[derive(Debug, Clone, Default)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub last_position: Vec3,
    pub velocity: Vec3,
    /// Seconds until expiry
    pub life: f32,
    pub pierce_budget: i32,
    /// Targets already damaged by this projectile
    pub hit_set: Vec<EntityId>,
}

impl Projectile {
    pub fn new(kind: ProjectileKind, origin: Vec3, velocity: Vec3, life: f32) -> Self {
        Self {
            kind,
            last_position: origin,
            velocity,
            life,
            pierce_budget: kind.initial_pierce_budget(),
            hit_set: Vec::new(),
        }
    }

    pub fn advance(&mut self, transform: &mut Transform, dt: f32) {
        self.last_position = transform.position;
        transform.position += self.velocity * dt;
        self.life -= dt;
    }

    pub fn has_hit(&self, id: EntityId) -> bool {
        self.hit_set.contains(&id)
    }
}
