//! Per-frame renderer feed
//!
//! A read-only snapshot of everything a renderer needs: every pool slot
//! (inactive ones flagged invisible), the player, the camera and sky colours.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::sim::{CameraView, EntityId, EntityKind, GameState, Pool, Transform};

/// One pooled entity as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub transform: Transform,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFeed {
    pub entities: Vec<EntityView>,
    /// Smoothed player transform
    pub player: Transform,
    pub camera: CameraView,
    pub fog_color: Vec3,
    pub tint_color: Vec3,
    pub terrain_glow: f32,
}

fn push_pool<T>(out: &mut Vec<EntityView>, pool: &Pool<T>) {
    out.extend(pool.slots().iter().map(|slot| EntityView {
        id: pool.id_of(slot),
        kind: pool.kind(),
        transform: slot.transform,
        visible: slot.visible(),
    }));
}

impl RenderFeed {
    pub fn capture(state: &GameState) -> Self {
        let pools = &state.pools;
        let mut entities = Vec::with_capacity(
            pools.obstacles.capacity()
                + pools.enemies.capacity()
                + pools.items.capacity()
                + pools.walls.capacity()
                + pools.projectiles.capacity(),
        );
        push_pool(&mut entities, &pools.obstacles);
        push_pool(&mut entities, &pools.enemies);
        push_pool(&mut entities, &pools.items);
        push_pool(&mut entities, &pools.walls);
        push_pool(&mut entities, &pools.projectiles);

        let player = Transform {
            position: state.player.visual_position,
            rotation: state.player.rotation(),
            scale: Vec3::ONE,
        };

        Self {
            entities,
            player,
            camera: state.camera.view(),
            fog_color: state.terrain.fog_color,
            tint_color: state.terrain.tint_target(),
            terrain_glow: state.terrain.glow,
        }
    }

    /// Entities that should be drawn this frame
    pub fn visible(&self) -> impl Iterator<Item = &EntityView> {
        self.entities.iter().filter(|e| e.visible)
    }

    /// Camera orientation as a quaternion
    pub fn camera_rotation(&self) -> Quat {
        self.camera.orientation
    }
}
