//! Rigid follow offsets
//!
//! A [`FollowOffset`] is a fixed local-space vector captured at construction.
//! The world position of the follower is the anchor's position plus the
//! offset rotated by the anchor's yaw, so the follower keeps a constant
//! distance and bearing relative to whatever it trails.

use cgmath::{Basis3, InnerSpace, Rad, Rotation, Rotation3, Vector2, Vector3};

/// Fixed local-space offset from a parent object.
///
/// The offset is immutable after construction; rotating it never changes its
/// length, so the horizontal distance to the anchor is constant for every
/// yaw value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowOffset {
    local: Vector3<f32>,
}

impl FollowOffset {
    /// Captures a local-space offset relative to the parent.
    pub fn new(local: Vector3<f32>) -> Self {
        Self { local }
    }

    /// The offset in the parent's local space.
    pub fn local(&self) -> Vector3<f32> {
        self.local
    }

    /// Horizontal distance maintained from the anchor (constant per offset).
    pub fn radius(&self) -> f32 {
        Vector2::new(self.local.x, self.local.y).magnitude()
    }

    /// World position of the follower for the given anchor state.
    ///
    /// The local offset is rotated about the world up axis (+Z) by the
    /// anchor's yaw and added to the anchor's position.
    pub fn world_position(&self, anchor: Vector3<f32>, yaw: Rad<f32>) -> Vector3<f32> {
        anchor + Basis3::from_angle_z(yaw).rotate_vector(self.local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Rad, Vector3, Zero};
    use std::f32::consts::{FRAC_PI_2, PI};

    fn assert_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!(
            (a - b).magnitude() < 1e-5,
            "expected {:?} to be close to {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_world_position_is_anchor_plus_rotated_offset() {
        let offset = FollowOffset::new(Vector3::new(1.0, 0.0, 0.5));
        let anchor = Vector3::new(3.0, -2.0, 0.0);

        // Zero yaw leaves the offset untouched
        assert_close(
            offset.world_position(anchor, Rad(0.0)),
            Vector3::new(4.0, -2.0, 0.5),
        );

        // A quarter turn maps +X onto +Y; height is unaffected
        assert_close(
            offset.world_position(anchor, Rad(FRAC_PI_2)),
            Vector3::new(3.0, -1.0, 0.5),
        );
    }

    #[test]
    fn test_radius_constant_across_yaw() {
        let offset = FollowOffset::new(Vector3::new(0.6, 0.8, 1.2));
        let anchor = Vector3::new(10.0, 5.0, 0.0);

        for i in 0..16 {
            let yaw = Rad(i as f32 * PI / 8.0);
            let world = offset.world_position(anchor, yaw);
            let horizontal = Vector2::new(world.x - anchor.x, world.y - anchor.y).magnitude();
            assert!((horizontal - offset.radius()).abs() < 1e-5);
            assert!((world.z - anchor.z - 1.2).abs() < 1e-5);
        }
    }

    #[test]
    fn test_zero_offset_rides_the_anchor() {
        let offset = FollowOffset::new(Vector3::zero());
        let anchor = Vector3::new(-4.0, 7.5, 2.0);
        assert_close(offset.world_position(anchor, Rad(1.3)), anchor);
        assert_eq!(offset.radius(), 0.0);
    }

    #[test]
    fn test_moving_anchor_carries_the_follower() {
        let offset = FollowOffset::new(Vector3::new(0.0, 2.0, 0.0));
        let a = offset.world_position(Vector3::zero(), Rad(0.4));
        let b = offset.world_position(Vector3::new(5.0, 0.0, 0.0), Rad(0.4));
        assert_close(b - a, Vector3::new(5.0, 0.0, 0.0));
    }
}
