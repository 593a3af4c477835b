//! Sound cue selection
//!
//! Turns simulation events into sound effect cues and computes the engine
//! drone parameters. Synthesis and playback belong to the host.

use serde::{Deserialize, Serialize};

use crate::settings::{MAX_BASE_SPEED, MIN_BASE_SPEED};
use crate::sim::{GameEvent, Impactor, ItemKind};

/// Minimum spacing between collision sounds (seconds)
pub const COLLISION_THROTTLE: f32 = 0.12;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Weapon fired
    Shoot,
    /// Enemy destroyed, explosive blast or wall crash
    Explosion,
    /// Fuel canister collected
    PickupFuel,
    /// Score crystal collected
    PickupScore,
    /// Terrain scrape or obstacle impact
    Collision,
    /// Boost engaged
    Boost,
}

/// Engine drone parameters for the current speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineTone {
    /// Low-pass cutoff in Hz
    pub filter_hz: f32,
    pub gain: f32,
}

/// Normalised position of `speed` in the base speed range
pub fn speed_ratio(speed: f32) -> f32 {
    ((speed - MIN_BASE_SPEED) / (MAX_BASE_SPEED - MIN_BASE_SPEED)).clamp(0.0, 1.0)
}

/// Engine tone rises in pitch and volume with speed
pub fn engine_tone(speed: f32) -> EngineTone {
    let ratio = speed_ratio(speed);
    EngineTone {
        filter_hz: 400.0 + ratio * 400.0,
        gain: 0.1 + ratio * 0.05,
    }
}

/// Stateful cue selector (throttles and edge detection)
#[derive(Debug, Clone)]
pub struct AudioCues {
    master_volume: f32,
    muted: bool,
    /// Time of the last collision cue
    last_collision: Option<f32>,
    was_boosting: bool,
}

impl Default for AudioCues {
    fn default() -> Self {
        Self::new(0.8)
    }
}

impl AudioCues {
    pub fn new(master_volume: f32) -> Self {
        Self {
            master_volume: master_volume.clamp(0.0, 1.0),
            muted: false,
            last_collision: None,
            was_boosting: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Flip mute, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Cues for one frame of events at simulated time `now`
    pub fn cues_for(&mut self, events: &[GameEvent], now: f32) -> Vec<SoundEffect> {
        let mut cues = Vec::new();
        for event in events {
            let cue = match event {
                GameEvent::BulletFiredVisual { .. } => Some(SoundEffect::Shoot),
                GameEvent::EnemyKilled { .. }
                | GameEvent::Explosion { .. }
                | GameEvent::WallHit {
                    impactor: Impactor::Player,
                    ..
                } => Some(SoundEffect::Explosion),
                GameEvent::ItemCollected {
                    kind: ItemKind::Fuel,
                    ..
                } => Some(SoundEffect::PickupFuel),
                GameEvent::ItemCollected {
                    kind: ItemKind::Score,
                    ..
                } => Some(SoundEffect::PickupScore),
                GameEvent::TerrainScrape { .. } | GameEvent::ObstacleHit { .. } => {
                    self.collision(now)
                }
                _ => None,
            };
            cues.extend(cue);
        }
        cues
    }

    fn collision(&mut self, now: f32) -> Option<SoundEffect> {
        match self.last_collision {
            Some(last) if now - last <= COLLISION_THROTTLE => None,
            _ => {
                self.last_collision = Some(now);
                Some(SoundEffect::Collision)
            }
        }
    }

    /// Boost cue on the frame boosting starts
    pub fn boost(&mut self, boosting: bool) -> Option<SoundEffect> {
        let started = boosting && !self.was_boosting;
        self.was_boosting = boosting;
        started.then_some(SoundEffect::Boost)
    }

    pub fn reset(&mut self) {
        self.last_collision = None;
        self.was_boosting = false;
    }
}
