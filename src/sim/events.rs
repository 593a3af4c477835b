//! Discrete gameplay events
//!
//! Resolution passes append to an `EventQueue`; the session applies them after
//! the pass completes and collaborators (audio, VFX, UI) drain them afterwards.
//! The queue is cleared at the start of every tick, so undrained events never
//! outlive the frame that produced them.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::entities::{ItemKind, ProjectileKind};

/// What struck a wall gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impactor {
    Player,
    Projectile(ProjectileKind),
}

/// Events produced by one simulation tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player dug into the ground
    TerrainScrape { pos: Vec3 },
    /// Player flew into an obstacle
    ObstacleHit { pos: Vec3 },
    /// A projectile or blast destroyed an obstacle
    ObstacleDestroyed { pos: Vec3 },
    /// Something hit a solid part of a wall gate
    WallHit { pos: Vec3, impactor: Impactor },
    /// A gate went past the player untouched
    WallCleared { pos: Vec3 },
    EnemyKilled { pos: Vec3 },
    /// An enemy made it behind the camera alive
    EnemyEscaped { pos: Vec3 },
    ItemCollected { kind: ItemKind, pos: Vec3 },
    Explosion { pos: Vec3, radius: f32 },
    EmpHit { pos: Vec3 },
    BulletFiredVisual { pos: Vec3 },
}

impl GameEvent {
    /// World-space position the event happened at
    pub fn position(&self) -> Vec3 {
        match *self {
            GameEvent::TerrainScrape { pos }
            | GameEvent::ObstacleHit { pos }
            | GameEvent::ObstacleDestroyed { pos }
            | GameEvent::WallHit { pos, .. }
            | GameEvent::WallCleared { pos }
            | GameEvent::EnemyKilled { pos }
            | GameEvent::EnemyEscaped { pos }
            | GameEvent::ItemCollected { pos, .. }
            | GameEvent::Explosion { pos, .. }
            | GameEvent::EmpHit { pos }
            | GameEvent::BulletFiredVisual { pos } => pos,
        }
    }

    /// Camera trauma this event requests (before user preferences)
    pub fn shake(&self) -> f32 {
        match self {
            GameEvent::TerrainScrape { .. } => 0.5,
            GameEvent::ObstacleHit { .. } => 0.8,
            GameEvent::WallHit {
                impactor: Impactor::Player,
                ..
            } => 2.0,
            _ => 0.0,
        }
    }
}

/// Per-frame event buffer
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    /// Move every buffered event out, leaving the queue empty
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_queue() {
        let mut queue = EventQueue::new();
        queue.push(GameEvent::EnemyKilled { pos: Vec3::ONE });
        queue.push(GameEvent::EmpHit { pos: Vec3::ZERO });
        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_only_player_wall_hits_shake_hard() {
        let player = GameEvent::WallHit {
            pos: Vec3::ZERO,
            impactor: Impactor::Player,
        };
        let bullet = GameEvent::WallHit {
            pos: Vec3::ZERO,
            impactor: Impactor::Projectile(ProjectileKind::Normal),
        };
        assert_eq!(player.shake(), 2.0);
        assert_eq!(bullet.shake(), 0.0);
        assert_eq!(GameEvent::TerrainScrape { pos: Vec3::ZERO }.shake(), 0.5);
    }

    #[test]
    fn test_event_position() {
        let pos = Vec3::new(1.0, 2.0, 3.0);
        let event = GameEvent::Explosion { pos, radius: 4.0 };
        assert_eq!(event.position(), pos);
    }
}
