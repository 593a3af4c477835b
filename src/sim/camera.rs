//! Chase camera with trauma-driven shake
//!
//! Trauma is a single scalar in [0, 1]. Shake magnitude is trauma squared, so
//! impacts snap hard and fade quickly instead of wobbling linearly.

use glam::{EulerRot, Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{centered, lerp};

/// Camera output for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraView {
    pub position: Vec3,
    pub orientation: Quat,
    /// Vertical field of view in degrees
    pub fov: f32,
}

#[derive(Debug, Clone)]
pub struct CameraRig {
    pub trauma: f32,
    /// Trauma lost per second
    pub decay_rate: f32,
    pub position: Vec3,
    pub fov: f32,
    pub target_fov: f32,
    /// Perturbation applied this frame (pitch, yaw, roll)
    pub perturbation: Vec3,
    orientation: Quat,
    rng: Pcg32,
}

impl CameraRig {
    pub fn new(seed: u64) -> Self {
        Self {
            trauma: 0.0,
            decay_rate: TRAUMA_DECAY,
            position: Vec3::new(0.0, 8.0, 15.0),
            fov: FOV_NORMAL,
            target_fov: FOV_NORMAL,
            perturbation: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Add trauma (clamped to 1.0)
    pub fn shake(&mut self, intensity: f32) {
        self.trauma = (self.trauma + intensity.max(0.0)).min(1.0);
    }

    pub fn shake_amount(&self) -> f32 {
        self.trauma * self.trauma
    }

    /// Follow `target`, apply shake, then decay trauma
    pub fn update(&mut self, target: Vec3, dt: f32) {
        self.fov = lerp(self.fov, self.target_fov, FOV_LERP);

        let shake = self.shake_amount();
        let mut ideal = target + Vec3::from(CAMERA_OFFSET);
        // Impact kickback
        ideal.z += shake * CAMERA_KICK;
        self.position = self.position.lerp(ideal, CAMERA_LERP);

        let look_at = target + Vec3::from(CAMERA_LOOK_OFFSET);
        let base = look_rotation(look_at - self.position);

        if self.trauma > 0.0 {
            let pitch = centered(self.rng.random::<f32>(), 0.25) * shake;
            let yaw = centered(self.rng.random::<f32>(), 0.25) * shake;
            let roll = centered(self.rng.random::<f32>(), 0.4) * shake;
            self.perturbation = Vec3::new(pitch, yaw, roll);

            self.position.x += centered(self.rng.random::<f32>(), 1.0) * shake;
            self.position.y += centered(self.rng.random::<f32>(), 1.0) * shake;
        } else {
            self.perturbation = Vec3::ZERO;
        }
        self.orientation = base
            * Quat::from_euler(
                EulerRot::YXZ,
                self.perturbation.y,
                self.perturbation.x,
                self.perturbation.z,
            );

        self.decay(dt);
    }

    pub fn decay(&mut self, dt: f32) {
        self.trauma = (self.trauma - dt * self.decay_rate).max(0.0);
    }

    pub fn view(&self) -> CameraView {
        CameraView {
            position: self.position,
            orientation: self.orientation,
            fov: self.fov,
        }
    }

    pub fn reset(&mut self) {
        self.trauma = 0.0;
        self.perturbation = Vec3::ZERO;
        self.fov = FOV_NORMAL;
        self.target_fov = FOV_NORMAL;
    }
}

/// Rotation that points the camera's -z axis along `dir` with +y up
fn look_rotation(dir: Vec3) -> Quat {
    let dir = dir.normalize_or_zero();
    if dir == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let yaw = (-dir.x).atan2(-dir.z);
    let pitch = dir.y.clamp(-1.0, 1.0).asin();
    Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shake_clamps_to_one() {
        let mut rig = CameraRig::new(1);
        rig.shake(0.5);
        rig.shake(2.0);
        assert_eq!(rig.trauma, 1.0);
    }

    #[test]
    fn test_trauma_decays_to_zero_and_stays() {
        let mut rig = CameraRig::new(1);
        rig.shake(1.0);
        rig.update(Vec3::ZERO, 2.0 / 3.0);
        assert_eq!(rig.trauma, 0.0);
        for _ in 0..10 {
            rig.update(Vec3::ZERO, 0.1);
            assert_eq!(rig.trauma, 0.0);
        }
    }

    #[test]
    fn test_trauma_decay_in_small_steps() {
        let mut rig = CameraRig::new(1);
        rig.shake(1.0);
        let mut last = rig.trauma;
        for _ in 0..60 {
            rig.decay(1.0 / 60.0);
            assert!(rig.trauma <= last);
            assert!(rig.trauma >= 0.0);
            last = rig.trauma;
        }
        assert_eq!(rig.trauma, 0.0);
    }

    #[test]
    fn test_quadratic_shake_amount() {
        let mut rig = CameraRig::new(1);
        rig.shake(0.5);
        assert!((rig.shake_amount() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_perturbation_bounded_by_shake() {
        let mut rig = CameraRig::new(9);
        for _ in 0..100 {
            rig.shake(1.0);
            let shake = rig.shake_amount();
            rig.update(Vec3::ZERO, 0.0);
            assert!(rig.perturbation.x.abs() <= 0.25 * shake);
            assert!(rig.perturbation.y.abs() <= 0.25 * shake);
            assert!(rig.perturbation.z.abs() <= 0.4 * shake);
        }
    }

    #[test]
    fn test_no_perturbation_without_trauma() {
        let mut rig = CameraRig::new(3);
        rig.update(Vec3::new(0.0, 5.0, 0.0), 0.016);
        assert_eq!(rig.perturbation, Vec3::ZERO);
    }

    #[test]
    fn test_fov_eases_toward_target() {
        let mut rig = CameraRig::new(1);
        rig.target_fov = FOV_BOOST;
        rig.update(Vec3::ZERO, 0.016);
        assert!(rig.fov > FOV_NORMAL && rig.fov < FOV_BOOST);
        for _ in 0..200 {
            rig.update(Vec3::ZERO, 0.016);
        }
        assert!((rig.fov - FOV_BOOST).abs() < 0.01);
    }

    #[test]
    fn test_same_seed_same_shake() {
        let mut a = CameraRig::new(77);
        let mut b = CameraRig::new(77);
        a.shake(0.8);
        b.shake(0.8);
        a.update(Vec3::ONE, 0.016);
        b.update(Vec3::ONE, 0.016);
        assert_eq!(a.view(), b.view());
    }
}
