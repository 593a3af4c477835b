//! Collision geometry
//!
//! Proximity tests, axis-aligned boxes, and the swept plane crossing used to
//! decide whether a fast projectile went through a wall's hole or into it.

use glam::Vec3;

use super::entities::Wall;

/// Below this relative travel the crossing is treated as degenerate
const CROSSING_EPSILON: f32 = 1e-6;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Overlap test, touching faces count as intersecting
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Simple distance-threshold proximity
#[inline]
pub fn within_radius(a: Vec3, b: Vec3, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// Outcome of sweeping a segment through a wall plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaneCrossing {
    /// No crossing this frame (or a degenerate step); try again next frame
    None,
    /// Crossed inside the hole
    PassThrough,
    /// Crossed a solid quadrant at this point
    Hit(Vec3),
}

/// Sweep a segment from `last` to `current` against a wall whose plane moved
/// from `wall.last_z` to `center.z` over the same frame.
///
/// Depths are taken relative to the plane so a moving wall and a moving
/// projectile are handled together. When the relative depth does not change
/// the crossing cannot be interpolated and nothing is resolved.
///
/// The crossing interval is half-open: a segment starting on the plane
/// crosses at t = 0, one ending on the plane is left for the next frame.
pub fn sweep_wall(last: Vec3, current: Vec3, wall: &Wall, center: Vec3) -> PlaneCrossing {
    let prev_rel = last.z - wall.last_z;
    let curr_rel = current.z - center.z;

    let crossed = (prev_rel >= 0.0 && curr_rel < 0.0) || (prev_rel <= 0.0 && curr_rel > 0.0);
    if !crossed {
        return PlaneCrossing::None;
    }

    let denom = prev_rel - curr_rel;
    if denom.abs() < CROSSING_EPSILON {
        return PlaneCrossing::None;
    }

    let t = (prev_rel / denom).clamp(0.0, 1.0);
    let point = last.lerp(current, t);
    let plane_z = wall.last_z + (center.z - wall.last_z) * t;

    let dx = point.x - center.x;
    let dy = point.y - center.y;
    if wall.hole_contains(dx, dy) {
        PlaneCrossing::PassThrough
    } else if wall.extent_contains(dx, dy) {
        PlaneCrossing::Hit(Vec3::new(point.x, point.y, plane_z))
    } else {
        PlaneCrossing::None
    }
}

/// Player hitbox against the four solid quadrants of a wall.
///
/// Each quadrant is stretched in depth over the distance the wall travelled
/// this frame (`wall.last_z` to `center.z`), so a long frame cannot carry a
/// solid slab across the player unseen.
pub fn player_hits_wall(player: Vec3, hitbox: Vec3, wall: &Wall, center: Vec3) -> bool {
    let player_box = Aabb::from_center_size(player, hitbox);
    let near = wall.last_z.min(center.z) - center.z;
    let far = wall.last_z.max(center.z) - center.z;
    wall.quadrants(center).iter().any(|quad| {
        let swept = Aabb {
            min: quad.min.with_z(quad.min.z + near),
            max: quad.max.with_z(quad.max.z + far),
        };
        swept.intersects(&player_box)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> Wall {
        Wall::new(4.0, 3.0, 0.0)
    }

    #[test]
    fn test_projectile_passes_through_hole() {
        let wall = gate();
        let result = sweep_wall(
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, -1.0),
            &wall,
            Vec3::ZERO,
        );
        assert_eq!(result, PlaneCrossing::PassThrough);
    }

    #[test]
    fn test_projectile_hits_quadrant_at_plane() {
        let wall = gate();
        let result = sweep_wall(
            Vec3::new(3.0, 1.0, 1.0),
            Vec3::new(3.0, 1.0, -1.0),
            &wall,
            Vec3::ZERO,
        );
        match result {
            PlaneCrossing::Hit(point) => {
                assert!((point.z).abs() < 1e-6);
                assert!((point.x - 3.0).abs() < 1e-6);
            }
            other => panic!("expected hit, got {other:?}"),
        }
    }

    #[test]
    fn test_interpolates_crossing_point() {
        let wall = gate();
        // Diagonal shot: a quarter of the way along the segment reaches z = 0
        let result = sweep_wall(
            Vec3::new(3.0, 0.0, 1.0),
            Vec3::new(7.0, 0.0, -3.0),
            &wall,
            Vec3::ZERO,
        );
        assert_eq!(result, PlaneCrossing::Hit(Vec3::new(4.0, 0.0, 0.0)));
    }

    #[test]
    fn test_no_crossing_on_same_side() {
        let wall = gate();
        let result = sweep_wall(
            Vec3::new(3.0, 1.0, 3.0),
            Vec3::new(3.0, 1.0, 1.0),
            &wall,
            Vec3::ZERO,
        );
        assert_eq!(result, PlaneCrossing::None);
    }

    #[test]
    fn test_degenerate_step_is_unresolved() {
        let wall = gate();
        let result = sweep_wall(Vec3::ZERO, Vec3::ZERO, &wall, Vec3::ZERO);
        assert_eq!(result, PlaneCrossing::None);
    }

    #[test]
    fn test_moving_wall_crossing() {
        // Wall moved from z = -1 to z = 1 while the shot moved 0.5 -> 0.0
        let mut wall = gate();
        wall.last_z = -1.0;
        let result = sweep_wall(
            Vec3::new(10.0, 0.0, 0.5),
            Vec3::new(10.0, 0.0, 0.0),
            &wall,
            Vec3::new(0.0, 0.0, 1.0),
        );
        assert!(matches!(result, PlaneCrossing::Hit(_)));
    }

    #[test]
    fn test_segment_starting_on_plane_crosses() {
        let wall = gate();
        let result = sweep_wall(
            Vec3::new(3.0, 1.0, 0.0),
            Vec3::new(3.0, 1.0, -1.0),
            &wall,
            Vec3::ZERO,
        );
        assert_eq!(result, PlaneCrossing::Hit(Vec3::new(3.0, 1.0, 0.0)));
    }

    #[test]
    fn test_segment_ending_on_plane_waits() {
        let wall = gate();
        let first = sweep_wall(
            Vec3::new(3.0, 1.0, 1.0),
            Vec3::new(3.0, 1.0, 0.0),
            &wall,
            Vec3::ZERO,
        );
        assert_eq!(first, PlaneCrossing::None);
        let next = sweep_wall(
            Vec3::new(3.0, 1.0, 0.0),
            Vec3::new(3.0, 1.0, -1.0),
            &wall,
            Vec3::ZERO,
        );
        assert!(matches!(next, PlaneCrossing::Hit(_)));
    }

    #[test]
    fn test_outside_wall_extent_is_ignored() {
        let wall = gate();
        let result = sweep_wall(
            Vec3::new(80.0, 0.0, 1.0),
            Vec3::new(80.0, 0.0, -1.0),
            &wall,
            Vec3::ZERO,
        );
        assert_eq!(result, PlaneCrossing::None);
    }

    #[test]
    fn test_player_in_hole_misses_wall() {
        let wall = Wall::new(8.0, 6.4, 0.0);
        let hitbox = Vec3::new(1.0, 0.5, 1.0);
        assert!(!player_hits_wall(Vec3::ZERO, hitbox, &wall, Vec3::ZERO));
        assert!(player_hits_wall(Vec3::new(3.8, 0.0, 0.0), hitbox, &wall, Vec3::ZERO));
        assert!(player_hits_wall(Vec3::new(0.0, -3.2, 0.0), hitbox, &wall, Vec3::ZERO));
    }

    #[test]
    fn test_wall_swept_across_player() {
        let hitbox = Vec3::new(1.0, 0.5, 1.0);
        let player = Vec3::new(0.0, -5.0, 0.0);
        // Slab jumped from z = -0.9 to z = 0.8 in one frame
        let mut wall = Wall::new(8.0, 6.4, -0.9);
        let center = Vec3::new(0.0, 0.0, 0.8);
        assert!(player_hits_wall(player, hitbox, &wall, center));

        // A short step that stays in front of the player misses
        wall.last_z = center.z;
        let end_only = Vec3::new(0.0, 0.0, 1.0);
        assert!(!player_hits_wall(player, hitbox, &wall, end_only));

        // Far from the player in depth
        wall.last_z = -10.0;
        assert!(!player_hits_wall(player, hitbox, &wall, Vec3::new(0.0, 0.0, -8.0)));
    }

    #[test]
    fn test_aabb_intersects() {
        let a = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        let b = Aabb::from_center_size(Vec3::new(1.5, 0.0, 0.0), Vec3::splat(1.0));
        let c = Aabb::from_center_size(Vec3::new(3.0, 0.0, 0.0), Vec3::splat(1.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_within_radius() {
        assert!(within_radius(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 1.5));
        assert!(!within_radius(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), 1.5));
    }
}
