//! Procedural heightfield and scrolling terrain
//!
//! The ground is never stored as a grid. Every height is recomputed from world
//! coordinates plus the accumulated scroll distance, so rendering and ground
//! collision always agree.

use glam::Vec3;
use noise::{NoiseFn, Perlin};

use crate::consts::*;

/// Deterministic fractal gradient noise.
///
/// The permutation table is built once from `seed` and never reshuffled, so
/// repeated samples with identical arguments are bit-identical.
#[derive(Clone)]
pub struct Heightfield {
    seed: u32,
    perlin: Perlin,
}

impl std::fmt::Debug for Heightfield {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Heightfield").field("seed", &self.seed).finish()
    }
}

impl Heightfield {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            perlin: Perlin::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Height at a world position with a zero time phase
    pub fn sample(&self, x: f32, z_world: f32, scroll: f32, amplitude: f32, frequency: f32) -> f32 {
        self.sample_at(x, z_world, scroll, 0.0, amplitude, frequency)
    }

    /// Height at a world position, `time` rolls the field in place
    pub fn sample_at(
        &self,
        x: f32,
        z_world: f32,
        scroll: f32,
        time: f32,
        amplitude: f32,
        frequency: f32,
    ) -> f32 {
        let nx = (x * frequency + TERRAIN_X_OFFSET) as f64;
        let nz = ((z_world + scroll) * frequency + time * TERRAIN_TIME_RATE) as f64;
        let raw = self.fbm(nx, 0.0, nz, TERRAIN_OCTAVES) as f32;
        // Sharpen peaks while keeping the sign
        let n = raw.signum() * raw.abs().powf(TERRAIN_SHARPEN);
        n * amplitude * TERRAIN_HEIGHT_SCALE
    }

    fn fbm(&self, x: f64, y: f64, z: f64, octaves: usize) -> f64 {
        let mut amp = 0.5;
        let mut freq = 1.0;
        let mut sum = 0.0;
        for _ in 0..octaves {
            sum += amp * self.perlin.get([x * freq, y * freq, z * freq]);
            freq *= 2.0;
            amp *= 0.5;
        }
        // Keep the documented bound even if the backend overshoots slightly
        sum.clamp(-1.0, 1.0)
    }
}

/// Sky palette stops: day, sunset, night
const PALETTE: [Vec3; 3] = [
    Vec3::new(0.0, 0.961, 1.0),
    Vec3::new(1.0, 0.294, 0.227),
    Vec3::new(0.102, 0.039, 0.180),
];

/// Scrolling terrain state shared by the player and the spawners
#[derive(Debug, Clone)]
pub struct Terrain {
    heightfield: Heightfield,
    /// Accumulated scroll offset (decreases as the world moves toward +z)
    pub travel: f32,
    /// Simulation clock driving the rolling phase
    pub time: f32,
    pub amplitude: f32,
    pub frequency: f32,
    pub glow: f32,
    /// Fog colour, eased toward the palette target every frame
    pub fog_color: Vec3,
}

impl Terrain {
    pub fn new(seed: u32, amplitude: f32, frequency: f32, glow: f32) -> Self {
        Self {
            heightfield: Heightfield::new(seed),
            travel: 0.0,
            time: 0.0,
            amplitude,
            frequency,
            glow,
            fog_color: PALETTE[0],
        }
    }

    pub fn heightfield(&self) -> &Heightfield {
        &self.heightfield
    }

    /// Scroll the terrain and ease the fog toward the current palette target
    pub fn advance(&mut self, dt: f32, speed: f32) {
        self.travel -= dt * speed * SCROLL_RATE;
        self.time += dt;
        let target = self.tint_target();
        self.fog_color = self.fog_color.lerp(target, (dt * 0.5).min(1.0));
    }

    /// Ground height under a world position at the current scroll and phase
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        self.heightfield.sample_at(
            x,
            z,
            self.travel,
            self.time,
            self.amplitude,
            self.frequency,
        )
    }

    /// Palette colour for the distance travelled (day -> sunset -> night -> day)
    pub fn tint_target(&self) -> Vec3 {
        let cycle = (self.travel.abs() * 0.005) % 3.0;
        let stop = (cycle.floor() as usize).min(2);
        let from = PALETTE[stop];
        let to = PALETTE[(stop + 1) % PALETTE.len()];
        from.lerp(to, cycle - stop as f32)
    }

    /// Back to the start of the run; the permutation table is kept
    pub fn reset(&mut self) {
        self.travel = 0.0;
        self.time = 0.0;
        self.fog_color = PALETTE[0];
    }
}
