//! Seagulls and bugs
//!
//! A seagull circles the ship on a constant-radius orbit; each bug rides a
//! fixed offset from its seagull, rotated by the seagull's orbit angle.
//! Updates run parent-before-child: the gull's new position is computed
//! first, then every bug is evaluated against it.

use cgmath::{Deg, Rad, Vector3};

use crate::motion::{FollowOffset, Orbiter};

/// A bug trailing a seagull at a fixed offset.
#[derive(Debug, Clone)]
pub struct Bug {
    offset: FollowOffset,
    position: Vector3<f32>,
}

impl Bug {
    pub fn new(offset: Vector3<f32>) -> Self {
        Self {
            offset: FollowOffset::new(offset),
            position: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    /// Re-evaluates the bug against its seagull's current state.
    ///
    /// The bug copies the seagull's yaw, so the swarm rotates with the orbit.
    pub fn update(&mut self, gull_position: Vector3<f32>, gull_yaw: Rad<f32>) {
        self.position = self.offset.world_position(gull_position, gull_yaw);
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    /// Constant horizontal distance kept from the seagull.
    pub fn radius(&self) -> f32 {
        self.offset.radius()
    }
}

/// A seagull orbiting the ship, trailed by its bugs.
#[derive(Debug, Clone)]
pub struct Seagull {
    orbit: Orbiter,
    position: Vector3<f32>,
    bugs: Vec<Bug>,
}

impl Seagull {
    pub fn new(orbit: Orbiter) -> Self {
        Self {
            orbit,
            position: Vector3::new(0.0, 0.0, orbit.height()),
            bugs: Vec::new(),
        }
    }

    /// Adds a bug at the given offset (builder style).
    pub fn with_bug(mut self, offset: Vector3<f32>) -> Self {
        self.bugs.push(Bug::new(offset));
        self
    }

    /// Advances the orbit and re-evaluates the gull and its bugs.
    ///
    /// Parent-before-child: the gull's position is computed from the ship
    /// before any bug reads it.
    pub fn update(&mut self, ship_position: Vector3<f32>, dt: f32) {
        self.orbit.advance(dt);
        self.position = self.orbit.position(ship_position);

        let yaw = self.orbit.angle();
        for bug in &mut self.bugs {
            bug.update(self.position, yaw);
        }
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    /// Yaw the gull's body faces: tangent to its orbit.
    pub fn yaw(&self) -> Rad<f32> {
        self.orbit.heading()
    }

    /// Yaw in degrees, as scene object transforms expect.
    pub fn yaw_degrees(&self) -> f32 {
        Deg::from(self.yaw()).0
    }

    pub fn orbit(&self) -> &Orbiter {
        &self.orbit
    }

    pub fn bugs(&self) -> &[Bug] {
        &self.bugs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector2, Zero};

    fn test_gull() -> Seagull {
        Seagull::new(Orbiter::new(2.0, 1.6, Rad(0.0), Rad(0.9)))
            .with_bug(Vector3::new(0.4, 0.0, 0.2))
            .with_bug(Vector3::new(-0.3, 0.3, 0.1))
    }

    #[test]
    fn test_gull_keeps_orbital_radius_around_moving_ship() {
        let mut gull = test_gull();
        let mut ship_position = Vector3::zero();

        for step in 0..200 {
            ship_position += Vector3::new(0.05, 0.02, 0.0);
            gull.update(ship_position, 0.016);

            let horizontal = Vector2::new(
                gull.position().x - ship_position.x,
                gull.position().y - ship_position.y,
            )
            .magnitude();
            assert!(
                (horizontal - 2.0).abs() < 1e-4,
                "radius drifted at step {step}"
            );
            assert!((gull.position().z - ship_position.z - 1.6).abs() < 1e-5);
        }
    }

    #[test]
    fn test_bugs_keep_their_offsets() {
        let mut gull = test_gull();
        gull.update(Vector3::new(4.0, -3.0, 0.0), 0.25);

        for bug in gull.bugs() {
            let horizontal = Vector2::new(
                bug.position().x - gull.position().x,
                bug.position().y - gull.position().y,
            )
            .magnitude();
            assert!((horizontal - bug.radius()).abs() < 1e-5);
        }
    }

    #[test]
    fn test_bug_position_consistent_with_gull_angle() {
        let mut gull = Seagull::new(Orbiter::new(1.0, 0.0, Rad(0.0), Rad(0.0)))
            .with_bug(Vector3::new(0.5, 0.0, 0.0));

        // Zero angular rate: gull sits at angle 0, bug offset is unrotated
        gull.update(Vector3::zero(), 1.0);
        let bug = &gull.bugs()[0];
        assert!((bug.position() - Vector3::new(1.5, 0.0, 0.0)).magnitude() < 1e-5);
    }

    #[test]
    fn test_update_order_is_parent_before_child() {
        let mut gull = test_gull();
        let ship_a = Vector3::zero();
        let ship_b = Vector3::new(10.0, 0.0, 0.0);

        gull.update(ship_a, 0.016);
        gull.update(ship_b, 0.0);

        // After a zero-dt update against the new ship position, every bug is
        // placed relative to the gull's *current* position, not last frame's.
        for bug in gull.bugs() {
            let distance = (bug.position() - gull.position()).magnitude();
            assert!(distance < 1.0);
        }
        assert!((gull.position().x - ship_b.x).abs() < 2.5);
    }
}
