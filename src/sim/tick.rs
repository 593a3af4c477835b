//! Per-frame simulation step
//!
//! Order within a tick: terrain scroll, difficulty, spawners, firing, player
//! kinematics, entity kinematics, projectile resolution, player contacts,
//! enemy reaping, session update, camera. All positions are committed before
//! any collision is resolved.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::{player_hits_wall, within_radius};
use super::combat::{self, Targets};
use super::events::{GameEvent, Impactor};
use super::player::CraftKind;
use super::pool::{EntityId, Pool, Slot};
use super::spawner::SpawnTargets;
use super::state::GameState;
use crate::consts::*;

/// Player input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlIntent {
    /// Steering, -1 (left) to 1 (right)
    pub lateral: f32,
    /// Climb, -1 (down) to 1 (up)
    pub vertical: f32,
    pub boost: bool,
    /// Fire button held; a shot is fired on the press edge only
    pub fire: bool,
    pub craft_select: Option<CraftKind>,
}

impl ControlIntent {
    /// Axes forced into [-1, 1]; NaN reads as centred
    pub fn clamped(&self) -> Self {
        let axis = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) };
        Self {
            lateral: axis(self.lateral),
            vertical: axis(self.vertical),
            ..*self
        }
    }
}

/// Advance the world by `dt` seconds (clamped to `MAX_DT`).
///
/// Does nothing once the session is over. Otherwise the event queue is cleared
/// first, so afterwards it holds exactly this frame's events.
pub fn tick(state: &mut GameState, input: &ControlIntent, dt: f32) {
    if state.session.is_game_over() {
        return;
    }
    let input = input.clamped();
    let dt = if dt.is_nan() { 0.0 } else { dt.clamp(0.0, MAX_DT) };
    state.events.clear();

    if let Some(craft) = input.craft_select {
        state.set_craft(craft);
    }

    let boosting = input.boost && state.session.fuel > 0.0;
    let speed = state
        .session
        .effective_speed(state.settings.base_speed, state.player.drag);
    state.speed = speed;
    state.elapsed += dt;

    state.terrain.advance(dt, speed);
    state.session.grow_difficulty(dt);

    state.spawner.update(
        dt,
        speed,
        state.session.difficulty,
        &state.terrain,
        &mut state.rng,
        SpawnTargets {
            obstacles: &mut state.pools.obstacles,
            enemies: &mut state.pools.enemies,
            items: &mut state.pools.items,
            walls: &mut state.pools.walls,
        },
    );

    let fire_pressed = input.fire && !state.fire_held;
    state.fire_held = input.fire;
    if fire_pressed {
        combat::fire(
            &mut state.pools.projectiles,
            state.player.craft.weapon(),
            state.player.position,
            &mut state.events,
        );
    }

    if let Some(scrape) = state.player.update(
        input.lateral,
        input.vertical,
        boosting,
        dt,
        &state.terrain,
    ) {
        state.events.push(scrape);
    }

    advance_entities(state, dt, speed);

    combat::resolve_projectiles(
        &mut state.pools.projectiles,
        &mut Targets {
            enemies: &mut state.pools.enemies,
            obstacles: &mut state.pools.obstacles,
            walls: &mut state.pools.walls,
        },
        &mut state.events,
    );

    player_contacts(state);

    combat::reap_enemies(&mut state.pools.enemies, &mut state.events);

    let shake_scale = state.settings.shake_scale();
    for event in state.events.iter() {
        state.session.apply(event);
        state.camera.shake(event.shake() * shake_scale);
    }
    state.session.advance(dt, speed, boosting);
    state.session.check_game_over();

    state.camera.target_fov = if boosting { FOV_BOOST } else { FOV_NORMAL };
    state.camera.update(state.player.visual_position, dt);
}

/// Move every pooled entity, then drop whatever is behind the camera
fn advance_entities(state: &mut GameState, dt: f32, speed: f32) {
    let pools = &mut state.pools;

    for slot in pools.obstacles.iter_active_mut() {
        slot.payload.advance(&mut slot.transform, dt, speed);
    }
    for slot in pools.enemies.iter_active_mut() {
        slot.payload.advance(&mut slot.transform, dt, speed);
    }
    for slot in pools.items.iter_active_mut() {
        slot.payload.advance(&mut slot.transform, dt, speed);
    }
    for slot in pools.walls.iter_active_mut() {
        slot.payload.advance(&mut slot.transform, dt, speed);
    }
    for slot in pools.projectiles.iter_active_mut() {
        slot.payload.advance(&mut slot.transform, dt);
    }

    release_behind(&mut pools.obstacles, |_| {});
    release_behind(&mut pools.items, |_| {});
    release_behind(&mut pools.walls, |_| {});
    let events = &mut state.events;
    release_behind(&mut pools.enemies, |slot| {
        if slot.payload.is_alive() {
            events.push(GameEvent::EnemyEscaped {
                pos: slot.transform.position,
            });
        }
    });
}

fn release_behind<T>(pool: &mut Pool<T>, mut on_release: impl FnMut(&Slot<T>)) {
    let behind: Vec<EntityId> = pool
        .iter_active()
        .filter(|s| s.transform.position.z > DESPAWN_Z)
        .map(|s| pool.id_of(s))
        .collect();
    for id in behind {
        if let Some(slot) = pool.get(id) {
            on_release(slot);
        }
        pool.release(id);
    }
}

/// Obstacles, wall gates and items against the player
fn player_contacts(state: &mut GameState) {
    let player = state.player.position;
    let pools = &mut state.pools;
    let events = &mut state.events;

    let struck: Vec<EntityId> = pools
        .obstacles
        .iter_active()
        .filter(|s| within_radius(player, s.transform.position, OBSTACLE_HIT_RADIUS))
        .map(|s| pools.obstacles.id_of(s))
        .collect();
    for id in struck {
        pools.obstacles.release(id);
        events.push(GameEvent::ObstacleHit { pos: player });
    }

    let hitbox = Vec3::from(PLAYER_HITBOX);
    for slot in pools.walls.iter_active_mut() {
        let center = slot.transform.position;
        let wall = &mut slot.payload;
        if wall.passed {
            continue;
        }
        // Impact wins over clearing when the slab swept through the player
        if player_hits_wall(player, hitbox, wall, center) {
            wall.passed = true;
            events.push(GameEvent::WallHit {
                pos: player,
                impactor: Impactor::Player,
            });
        } else if center.z > player.z {
            wall.passed = true;
            events.push(GameEvent::WallCleared { pos: center });
        }
    }

    let collected: Vec<EntityId> = pools
        .items
        .iter_active()
        .filter(|s| within_radius(player, s.transform.position, ITEM_PICKUP_RADIUS))
        .map(|s| pools.items.id_of(s))
        .collect();
    for id in collected {
        if let Some(slot) = pools.items.get(id) {
            events.push(GameEvent::ItemCollected {
                kind: slot.payload.kind,
                pos: slot.transform.position,
            });
        }
        pools.items.release(id);
    }
}
