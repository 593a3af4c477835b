//! Weapon firing and projectile hit resolution
//!
//! Each live projectile is tested against enemies, then obstacles, then wall
//! gates. The first test that consumes the projectile ends its frame.

use glam::Vec3;

use super::collision::{PlaneCrossing, sweep_wall, within_radius};
use super::entities::{Enemy, Obstacle, Projectile, ProjectileKind, Wall};
use super::events::{EventQueue, GameEvent, Impactor};
use super::pool::{EntityId, Pool, Transform};
use crate::consts::*;
use crate::lerp;

/// Pools a projectile can strike
pub struct Targets<'a> {
    pub enemies: &'a mut Pool<Enemy>,
    pub obstacles: &'a mut Pool<Obstacle>,
    pub walls: &'a mut Pool<Wall>,
}

/// Result of testing a projectile against one target pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strike {
    /// Still flying
    Live,
    /// Consumed by the hit
    Spent,
    /// Explosive contact, blast at the projectile position
    Detonate,
}

/// Fire the given weapon from `player`.
///
/// Returns the number of projectiles spawned. A full pool drops the shots.
pub fn fire(
    projectiles: &mut Pool<Projectile>,
    kind: ProjectileKind,
    player: Vec3,
    events: &mut EventQueue,
) -> usize {
    let origin = player + Vec3::from(MUZZLE_OFFSET);
    let forward = Vec3::new(0.0, 0.0, -PROJECTILE_SPEED);

    let shots: Vec<(Vec3, f32)> = match kind {
        ProjectileKind::Shotgun => (0..SHOTGUN_PELLETS)
            .map(|i| {
                let t = i as f32 / (SHOTGUN_PELLETS - 1) as f32;
                let spread = lerp(-SHOTGUN_SPREAD, SHOTGUN_SPREAD, t);
                (forward + Vec3::new(spread, 0.0, 0.0), SHOTGUN_LIFE)
            })
            .collect(),
        _ => vec![(forward, PROJECTILE_LIFE)],
    };

    let mut fired = 0;
    for (velocity, life) in shots {
        let projectile = Projectile::new(kind, origin, velocity, life);
        if projectiles
            .spawn(Transform::from_position(origin), projectile)
            .is_some()
        {
            fired += 1;
        } else {
            log::trace!("Projectile pool exhausted, shot dropped");
        }
    }
    if fired > 0 {
        events.push(GameEvent::BulletFiredVisual { pos: origin });
    }
    fired
}

/// Resolve every active projectile against the world.
///
/// Expired projectiles are released before any test. Damaged enemies are not
/// released here; see [`reap_enemies`].
pub fn resolve_projectiles(
    projectiles: &mut Pool<Projectile>,
    targets: &mut Targets<'_>,
    events: &mut EventQueue,
) {
    let mut spent = Vec::new();
    for (id, slot) in projectiles.iter_active_ids_mut() {
        let pos = slot.transform.position;
        let projectile = &mut slot.payload;
        if projectile.life <= 0.0 || resolve_one(projectile, pos, targets, events) {
            spent.push(id);
        }
    }
    for id in spent {
        projectiles.release(id);
    }
}

/// Returns true when the projectile was consumed
fn resolve_one(
    projectile: &mut Projectile,
    pos: Vec3,
    targets: &mut Targets<'_>,
    events: &mut EventQueue,
) -> bool {
    match strike_enemies(projectile, pos, targets.enemies, events) {
        Strike::Spent => return true,
        Strike::Detonate => {
            detonate(pos, targets.enemies, targets.obstacles, events);
            return true;
        }
        Strike::Live => {}
    }

    match strike_obstacles(projectile, pos, targets.obstacles, events) {
        Strike::Spent => return true,
        Strike::Detonate => {
            detonate(pos, targets.enemies, targets.obstacles, events);
            return true;
        }
        Strike::Live => {}
    }

    let mut wall_hit = None;
    for wall in targets.walls.iter_active() {
        match sweep_wall(
            projectile.last_position,
            pos,
            &wall.payload,
            wall.transform.position,
        ) {
            PlaneCrossing::Hit(point) => {
                wall_hit = Some(point);
                break;
            }
            PlaneCrossing::PassThrough | PlaneCrossing::None => {}
        }
    }
    match wall_hit {
        Some(point) => {
            events.push(GameEvent::WallHit {
                pos: point,
                impactor: Impactor::Projectile(projectile.kind),
            });
            if projectile.kind == ProjectileKind::Explosive {
                detonate(point, targets.enemies, targets.obstacles, events);
            }
            true
        }
        None => false,
    }
}

fn strike_enemies(
    projectile: &mut Projectile,
    pos: Vec3,
    enemies: &mut Pool<Enemy>,
    events: &mut EventQueue,
) -> Strike {
    if projectile.kind == ProjectileKind::Pierce {
        for (id, slot) in enemies.iter_active_ids_mut() {
            if !slot.payload.is_alive()
                || projectile.has_hit(id)
                || !within_radius(pos, slot.transform.position, PROJECTILE_HIT_RADIUS)
            {
                continue;
            }
            slot.payload.health -= projectile.kind.damage();
            if spend_pierce(projectile, id) {
                return Strike::Spent;
            }
        }
        return Strike::Live;
    }

    let Some(slot) = enemies.iter_active_mut().find(|s| {
        s.payload.is_alive() && within_radius(pos, s.transform.position, PROJECTILE_HIT_RADIUS)
    }) else {
        return Strike::Live;
    };

    match projectile.kind {
        ProjectileKind::Explosive => Strike::Detonate,
        ProjectileKind::Emp => {
            slot.payload.stun = EMP_STUN;
            events.push(GameEvent::EmpHit {
                pos: slot.transform.position,
            });
            Strike::Spent
        }
        _ => {
            slot.payload.health -= projectile.kind.damage();
            Strike::Spent
        }
    }
}

fn strike_obstacles(
    projectile: &mut Projectile,
    pos: Vec3,
    obstacles: &mut Pool<Obstacle>,
    events: &mut EventQueue,
) -> Strike {
    let in_reach: Vec<(EntityId, Vec3)> = obstacles
        .iter_active()
        .filter(|s| within_radius(pos, s.transform.position, PROJECTILE_HIT_RADIUS))
        .map(|s| (obstacles.id_of(s), s.transform.position))
        .filter(|(id, _)| !projectile.has_hit(*id))
        .collect();

    let Some(&(first, first_pos)) = in_reach.first() else {
        return Strike::Live;
    };

    match projectile.kind {
        ProjectileKind::Explosive => Strike::Detonate,
        // Absorbed by the hull
        ProjectileKind::Emp => {
            events.push(GameEvent::EmpHit { pos: first_pos });
            Strike::Spent
        }
        ProjectileKind::Pierce => {
            for (id, at) in in_reach {
                destroy_obstacle(obstacles, id, at, events);
                if spend_pierce(projectile, id) {
                    return Strike::Spent;
                }
            }
            Strike::Live
        }
        ProjectileKind::Normal | ProjectileKind::Shotgun => {
            destroy_obstacle(obstacles, first, first_pos, events);
            Strike::Spent
        }
    }
}

/// Record a pierce hit; returns true once the budget is used up
fn spend_pierce(projectile: &mut Projectile, id: EntityId) -> bool {
    projectile.hit_set.push(id);
    projectile.pierce_budget -= 1;
    projectile.pierce_budget <= 0
}

fn destroy_obstacle(obstacles: &mut Pool<Obstacle>, id: EntityId, pos: Vec3, events: &mut EventQueue) {
    if obstacles.release(id) {
        events.push(GameEvent::ObstacleDestroyed { pos });
    }
}

/// Area blast: damages every live enemy and destroys every obstacle in range
pub fn detonate(
    center: Vec3,
    enemies: &mut Pool<Enemy>,
    obstacles: &mut Pool<Obstacle>,
    events: &mut EventQueue,
) {
    for slot in enemies.iter_active_mut() {
        if slot.payload.is_alive()
            && within_radius(center, slot.transform.position, EXPLOSION_RADIUS)
        {
            slot.payload.health -= EXPLOSION_DAMAGE;
        }
    }

    let caught: Vec<(EntityId, Vec3)> = obstacles
        .iter_active()
        .filter(|s| within_radius(center, s.transform.position, EXPLOSION_RADIUS))
        .map(|s| (obstacles.id_of(s), s.transform.position))
        .collect();
    for (id, pos) in caught {
        destroy_obstacle(obstacles, id, pos, events);
    }

    events.push(GameEvent::Explosion {
        pos: center,
        radius: EXPLOSION_RADIUS,
    });
}

/// Release every enemy at or below zero health, one `EnemyKilled` each.
///
/// Returns the number of kills.
pub fn reap_enemies(enemies: &mut Pool<Enemy>, events: &mut EventQueue) -> usize {
    let dead: Vec<(EntityId, Vec3)> = enemies
        .iter_active()
        .filter(|s| !s.payload.is_alive())
        .map(|s| (enemies.id_of(s), s.transform.position))
        .collect();
    for &(id, pos) in &dead {
        enemies.release(id);
        events.push(GameEvent::EnemyKilled { pos });
    }
    dead.len()
}
