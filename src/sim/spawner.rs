//! Per-kind spawn timers and placement policy

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use super::entities::{Enemy, EnemyVariant, Item, ItemKind, Obstacle, Wall, hole_size};
use super::pool::{Pool, Transform};
use super::terrain::Terrain;
use crate::centered;
use crate::consts::*;

/// Accumulating interval timer
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnTimer {
    pub elapsed: f32,
}

impl SpawnTimer {
    /// Advance by `dt`; returns true (and restarts) once `interval` is exceeded
    pub fn tick(&mut self, dt: f32, interval: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed > interval {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }
}

/// Enemy interval tightens as the world speeds up
pub fn enemy_interval(speed: f32) -> f32 {
    (ENEMY_BASE_INTERVAL - speed * ENEMY_INTERVAL_PER_SPEED).max(ENEMY_MIN_INTERVAL)
}

/// Spawn timers for the four world entity kinds
#[derive(Debug, Clone, Default)]
pub struct Spawner {
    pub obstacles: SpawnTimer,
    pub enemies: SpawnTimer,
    pub items: SpawnTimer,
    pub walls: SpawnTimer,
    /// Number of enemies spawned so far (drives the variant rotation)
    pub enemy_counter: u32,
}

/// Mutable world the spawner places entities into
pub struct SpawnTargets<'a> {
    pub obstacles: &'a mut Pool<Obstacle>,
    pub enemies: &'a mut Pool<Enemy>,
    pub items: &'a mut Pool<Item>,
    pub walls: &'a mut Pool<Wall>,
}

impl Spawner {
    /// Advance every timer and spawn whatever is due.
    ///
    /// A full pool just skips that spawn.
    pub fn update(
        &mut self,
        dt: f32,
        speed: f32,
        difficulty: f32,
        terrain: &Terrain,
        rng: &mut Pcg32,
        targets: SpawnTargets<'_>,
    ) {
        if self.obstacles.tick(dt, OBSTACLE_INTERVAL) {
            spawn_obstacle(targets.obstacles, terrain, rng);
        }
        if self.enemies.tick(dt, enemy_interval(speed)) {
            let variant = EnemyVariant::for_spawn(self.enemy_counter);
            if spawn_enemy(targets.enemies, variant, terrain, rng) {
                self.enemy_counter = self.enemy_counter.wrapping_add(1);
            }
        }
        if self.items.tick(dt, ITEM_INTERVAL) {
            spawn_item(targets.items, terrain, rng);
        }
        if self.walls.tick(dt, WALL_INTERVAL) {
            spawn_wall(targets.walls, difficulty, rng);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub fn spawn_obstacle(pool: &mut Pool<Obstacle>, terrain: &Terrain, rng: &mut Pcg32) -> bool {
    let x = centered(rng.random::<f32>(), 10.0);
    let z = OBSTACLE_SPAWN_Z;
    let y = terrain.height_at(x, z) + 2.0 + rng.random::<f32>() * 8.0;
    let angles = Vec3::new(
        rng.random::<f32>() * std::f32::consts::PI,
        rng.random::<f32>() * std::f32::consts::PI,
        0.0,
    );
    let spin = Vec3::new(
        centered(rng.random::<f32>(), 1.0),
        centered(rng.random::<f32>(), 1.0),
        0.0,
    );
    let spawned = pool
        .spawn(
            Transform::from_position(Vec3::new(x, y, z)),
            Obstacle { angles, spin },
        )
        .is_some();
    if !spawned {
        log::trace!("Obstacle pool exhausted, spawn skipped");
    }
    spawned
}

pub fn spawn_enemy(
    pool: &mut Pool<Enemy>,
    variant: EnemyVariant,
    terrain: &Terrain,
    rng: &mut Pcg32,
) -> bool {
    let x = centered(rng.random::<f32>(), 20.0);
    let z = ENEMY_SPAWN_Z;
    let ground = terrain.height_at(x, z);
    let y = (8.0 + centered(rng.random::<f32>(), 5.0)).max(ground + 2.0);
    let phase = rng.random::<f32>() * std::f32::consts::TAU;
    match pool.spawn(
        Transform::from_position(Vec3::new(x, y, z)),
        Enemy::new(variant, phase),
    ) {
        Some(id) => {
            log::debug!("Spawned {:?} enemy in slot {}", variant, id.index);
            true
        }
        None => {
            log::trace!("Enemy pool exhausted, spawn skipped");
            false
        }
    }
}

pub fn spawn_item(pool: &mut Pool<Item>, terrain: &Terrain, rng: &mut Pcg32) -> bool {
    let kind = if rng.random::<f32>() > 0.5 {
        ItemKind::Fuel
    } else {
        ItemKind::Score
    };
    let x = centered(rng.random::<f32>(), 15.0);
    let z = ITEM_SPAWN_Z;
    let y = terrain.height_at(x, z) + 6.0 + rng.random::<f32>() * 12.0;
    let item = Item {
        kind,
        base_y: y,
        phase: 0.0,
        spin: (0.0, 0.0),
    };
    let spawned = pool
        .spawn(Transform::from_position(Vec3::new(x, y, z)), item)
        .is_some();
    if !spawned {
        log::trace!("Item pool exhausted, spawn skipped");
    }
    spawned
}

pub fn spawn_wall(pool: &mut Pool<Wall>, difficulty: f32, rng: &mut Pcg32) -> bool {
    let (width, height) = hole_size(difficulty);
    let x = centered(rng.random::<f32>(), 5.0);
    let y = 6.0 + centered(rng.random::<f32>(), 2.0);
    let z = WALL_SPAWN_Z;
    match pool.spawn(
        Transform::from_position(Vec3::new(x, y, z)),
        Wall::new(width, height, z),
    ) {
        Some(_) => {
            log::debug!("Spawned wall gate, hole {:.2} x {:.2}", width, height);
            true
        }
        None => {
            log::trace!("Wall pool exhausted, spawn skipped");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pool::EntityKind;
    use rand::SeedableRng;

    struct World {
        obstacles: Pool<Obstacle>,
        enemies: Pool<Enemy>,
        items: Pool<Item>,
        walls: Pool<Wall>,
    }

    impl World {
        fn new() -> Self {
            Self {
                obstacles: Pool::new(EntityKind::Obstacle, OBSTACLE_POOL),
                enemies: Pool::new(EntityKind::Enemy, ENEMY_POOL),
                items: Pool::new(EntityKind::Item, ITEM_POOL),
                walls: Pool::new(EntityKind::Wall, WALL_POOL),
            }
        }

        fn targets(&mut self) -> SpawnTargets<'_> {
            SpawnTargets {
                obstacles: &mut self.obstacles,
                enemies: &mut self.enemies,
                items: &mut self.items,
                walls: &mut self.walls,
            }
        }
    }

    #[test]
    fn test_timer_fires_after_interval() {
        let mut timer = SpawnTimer::default();
        assert!(!timer.tick(1.0, 1.5));
        assert!(!timer.tick(0.5, 1.5));
        assert!(timer.tick(0.1, 1.5));
        assert_eq!(timer.elapsed, 0.0);
    }

    #[test]
    fn test_enemy_interval_floor() {
        assert!((enemy_interval(1.0) - 2.6).abs() < 1e-6);
        assert_eq!(enemy_interval(10.0), ENEMY_MIN_INTERVAL);
    }

    #[test]
    fn test_spawner_fills_pools_over_time() {
        let terrain = Terrain::new(1, 1.4, 0.08, 0.6);
        let mut rng = Pcg32::seed_from_u64(5);
        let mut world = World::new();
        let mut spawner = Spawner::default();
        // 9 seconds of quarter-second frames
        for _ in 0..36 {
            spawner.update(0.25, 1.0, 0.0, &terrain, &mut rng, world.targets());
        }
        assert_eq!(world.obstacles.active_count(), 5);
        assert_eq!(world.enemies.active_count(), 3);
        assert_eq!(world.items.active_count(), 3);
        assert_eq!(world.walls.active_count(), 1);
    }

    #[test]
    fn test_full_enemy_pool_skips_and_keeps_rotation() {
        let terrain = Terrain::new(1, 1.4, 0.08, 0.6);
        let mut rng = Pcg32::seed_from_u64(5);
        let mut pool: Pool<Enemy> = Pool::new(EntityKind::Enemy, 1);
        assert!(spawn_enemy(&mut pool, EnemyVariant::Drone, &terrain, &mut rng));
        assert!(!spawn_enemy(&mut pool, EnemyVariant::Bomber, &terrain, &mut rng));
        assert_eq!(pool.active_count(), 1);
        let enemy = pool.iter_active().next().unwrap();
        assert_eq!(enemy.payload.variant, EnemyVariant::Drone);
    }

    #[test]
    fn test_enemies_stay_above_ground() {
        let terrain = Terrain::new(3, 4.0, 0.08, 0.6);
        let mut rng = Pcg32::seed_from_u64(11);
        let mut pool: Pool<Enemy> = Pool::new(EntityKind::Enemy, 10);
        for _ in 0..10 {
            spawn_enemy(&mut pool, EnemyVariant::Drone, &terrain, &mut rng);
        }
        for slot in pool.iter_active() {
            let p = slot.transform.position;
            assert!(p.y >= terrain.height_at(p.x, p.z) + 2.0 - 1e-4);
            assert!(p.x.abs() <= 20.0);
        }
    }

    #[test]
    fn test_wall_hole_uses_difficulty() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut pool: Pool<Wall> = Pool::new(EntityKind::Wall, 2);
        spawn_wall(&mut pool, 0.0, &mut rng);
        spawn_wall(&mut pool, 2.0, &mut rng);
        let holes: Vec<_> = pool.iter_active().map(|w| w.payload.hole_width).collect();
        assert_eq!(holes, vec![8.0, 3.0]);
        for wall in pool.iter_active() {
            assert!(!wall.payload.passed);
            assert_eq!(wall.payload.last_z, WALL_SPAWN_Z);
        }
    }
}
