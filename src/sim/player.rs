//! Player airship: craft selection, control integration and ground reaction

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::entities::ProjectileKind;
use super::events::GameEvent;
use super::terrain::Terrain;
use crate::consts::*;
use crate::lerp;

/// Selectable player crafts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CraftKind {
    #[default]
    SpaceFighter,
    GyroCopter,
    RailStriker,
    SolarSkimmer,
    SteampunkPlane,
}

impl CraftKind {
    pub const ALL: [CraftKind; 5] = [
        CraftKind::SpaceFighter,
        CraftKind::GyroCopter,
        CraftKind::RailStriker,
        CraftKind::SolarSkimmer,
        CraftKind::SteampunkPlane,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CraftKind::SpaceFighter => "fighter",
            CraftKind::GyroCopter => "gyro",
            CraftKind::RailStriker => "rail",
            CraftKind::SolarSkimmer => "solar",
            CraftKind::SteampunkPlane => "plane",
        }
    }

    /// Parse a craft name; unknown names fall back to the default craft
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "fighter" => CraftKind::SpaceFighter,
            "gyro" => CraftKind::GyroCopter,
            "rail" => CraftKind::RailStriker,
            "solar" => CraftKind::SolarSkimmer,
            "plane" => CraftKind::SteampunkPlane,
            _ => CraftKind::default(),
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    /// Primary weapon fired by this craft
    pub fn weapon(&self) -> ProjectileKind {
        match self {
            CraftKind::SpaceFighter => ProjectileKind::Normal,
            CraftKind::GyroCopter => ProjectileKind::Shotgun,
            CraftKind::RailStriker => ProjectileKind::Pierce,
            CraftKind::SolarSkimmer => ProjectileKind::Emp,
            CraftKind::SteampunkPlane => ProjectileKind::Explosive,
        }
    }

    /// Control responsiveness multiplier
    pub fn handling(&self) -> f32 {
        match self {
            CraftKind::SpaceFighter => 1.0,
            CraftKind::GyroCopter => 0.9,
            CraftKind::RailStriker => 1.1,
            CraftKind::SolarSkimmer => 1.2,
            CraftKind::SteampunkPlane => 0.85,
        }
    }
}

/// The player airship
#[derive(Debug, Clone)]
pub struct Player {
    /// Simulated position used for collisions
    pub position: Vec3,
    /// Smoothed position handed to the renderer and camera
    pub visual_position: Vec3,
    /// Banking angles (pitch, yaw, roll)
    pub bank: Vec3,
    /// Speed multiplier from terrain scrapes, recovers toward 1.0
    pub drag: f32,
    pub craft: CraftKind,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(CraftKind::default())
    }
}

impl Player {
    pub fn new(craft: CraftKind) -> Self {
        let start = Vec3::new(0.0, PLAYER_START_Y, 0.0);
        Self {
            position: start,
            visual_position: start,
            bank: Vec3::ZERO,
            drag: 1.0,
            craft,
        }
    }

    pub fn set_craft(&mut self, craft: CraftKind) {
        if craft != self.craft {
            log::info!("Craft changed: {} -> {}", self.craft.as_str(), craft.as_str());
            self.craft = craft;
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.bank.y, self.bank.x, self.bank.z)
    }

    /// Integrate control intent and react to the ground.
    ///
    /// Returns a `TerrainScrape` event when the craft is driven too far into
    /// the ground.
    pub fn update(
        &mut self,
        lateral: f32,
        vertical: f32,
        boost: bool,
        dt: f32,
        terrain: &Terrain,
    ) -> Option<GameEvent> {
        let rate = if boost { BOOST_MULTIPLIER } else { 1.0 } * self.craft.handling();
        self.position.x += lateral * dt * PLAYER_LATERAL_ACCEL * rate;
        self.position.y += vertical * dt * PLAYER_VERTICAL_ACCEL * rate;
        self.position.x = self.position.x.clamp(-PLAYER_X_LIMIT, PLAYER_X_LIMIT);
        self.position.y = self.position.y.clamp(PLAYER_Y_MIN, PLAYER_Y_MAX);

        self.drag = (self.drag + DRAG_RECOVERY * dt).min(1.0);

        let ground = terrain.height_at(self.position.x, self.position.z);
        let scrape = self.react_to_ground(ground);

        self.visual_position = self.visual_position.lerp(self.position, VISUAL_LERP);
        self.bank.z = lerp(self.bank.z, -lateral * 0.4, BANK_LERP);
        self.bank.x = lerp(self.bank.x, vertical * 0.3, BANK_LERP);
        self.bank.y = lerp(self.bank.y, lateral * 0.2, BANK_LERP);

        scrape
    }

    /// Keep clear of the ground at height `ground`.
    ///
    /// Far below the clearance is a hard hit: lift, slow down and report a
    /// scrape. Just below it the craft is cushioned upward silently.
    pub fn react_to_ground(&mut self, ground: f32) -> Option<GameEvent> {
        let floor = ground + GROUND_MARGIN;
        if self.position.y < floor - HARD_HIT_THRESHOLD {
            self.position.y = lerp(self.position.y, floor, HARD_HIT_LERP);
            self.drag *= TERRAIN_DRAG;
            Some(GameEvent::TerrainScrape { pos: self.position })
        } else if self.position.y < floor {
            self.position.y = lerp(self.position.y, floor, CUSHION_LERP);
            None
        } else {
            None
        }
    }

    /// Back to the starting position; the craft choice is kept
    pub fn reset(&mut self) {
        *self = Self::new(self.craft);
    }
}
