//! Circular orbits around a moving anchor
//!
//! An [`Orbiter`] keeps a constant radius and height relative to a center
//! point and integrates its angle over time. The center is supplied at
//! evaluation time, so the orbit follows a moving parent without any stored
//! back-reference.

use cgmath::{Angle, Rad, Vector3};
use std::f32::consts::FRAC_PI_2;

/// Constant-radius orbit with an angle advanced by a fixed angular rate.
#[derive(Debug, Clone, Copy)]
pub struct Orbiter {
    radius: f32,
    height: f32,
    angle: Rad<f32>,
    /// Radians per second; negative values orbit clockwise.
    angular_rate: Rad<f32>,
}

impl Orbiter {
    pub fn new(radius: f32, height: f32, angle: Rad<f32>, angular_rate: Rad<f32>) -> Self {
        Self {
            radius,
            height,
            angle: angle.normalize(),
            angular_rate,
        }
    }

    /// Orbital radius (constant after construction).
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Height above the orbit center (constant after construction).
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Current orbit angle, kept in `[0, 2π)`.
    pub fn angle(&self) -> Rad<f32> {
        self.angle
    }

    /// Integrates the angle by `rate * dt` and wraps it into `[0, 2π)`.
    pub fn advance(&mut self, dt: f32) {
        self.angle = (self.angle + self.angular_rate * dt).normalize();
    }

    /// World position on the orbit for the given center.
    pub fn position(&self, center: Vector3<f32>) -> Vector3<f32> {
        center
            + Vector3::new(
                self.radius * self.angle.cos(),
                self.radius * self.angle.sin(),
                self.height,
            )
    }

    /// Direction of travel along the orbit, as a yaw about world up.
    ///
    /// Tangent to the circle: a quarter turn ahead of the radial angle for
    /// counter-clockwise orbits, a quarter turn behind for clockwise ones.
    pub fn heading(&self) -> Rad<f32> {
        if self.angular_rate >= Rad(0.0) {
            (self.angle + Rad(FRAC_PI_2)).normalize()
        } else {
            (self.angle - Rad(FRAC_PI_2)).normalize()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector2, Vector3, Zero};
    use std::f32::consts::PI;

    #[test]
    fn test_radius_constant_under_advance() {
        let mut orbiter = Orbiter::new(2.0, 1.5, Rad(0.3), Rad(0.9));
        let center = Vector3::new(4.0, -1.0, 0.0);

        for _ in 0..100 {
            orbiter.advance(0.016);
            let pos = orbiter.position(center);
            let horizontal = Vector2::new(pos.x - center.x, pos.y - center.y).magnitude();
            assert!((horizontal - 2.0).abs() < 1e-4);
            assert!((pos.z - center.z - 1.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_advance_zero_dt_is_noop() {
        let mut orbiter = Orbiter::new(1.0, 0.0, Rad(1.1), Rad(2.0));
        let before = orbiter.angle();
        orbiter.advance(0.0);
        assert_eq!(orbiter.angle(), before);
    }

    #[test]
    fn test_angle_wraps_into_full_turn() {
        let mut orbiter = Orbiter::new(1.0, 0.0, Rad(0.0), Rad(PI));
        // Three seconds at π rad/s is 1.5 turns
        for _ in 0..300 {
            orbiter.advance(0.01);
        }
        let angle = orbiter.angle().0;
        assert!((0.0..2.0 * PI).contains(&angle));
        assert!((angle - PI).abs() < 1e-2);
    }

    #[test]
    fn test_negative_rate_orbits_clockwise() {
        let mut ccw = Orbiter::new(1.0, 0.0, Rad(0.0), Rad(1.0));
        let mut cw = Orbiter::new(1.0, 0.0, Rad(0.0), Rad(-1.0));
        ccw.advance(0.1);
        cw.advance(0.1);

        let p_ccw = ccw.position(Vector3::zero());
        let p_cw = cw.position(Vector3::zero());
        assert!(p_ccw.y > 0.0);
        assert!(p_cw.y < 0.0);
    }

    #[test]
    fn test_heading_is_tangent_to_travel() {
        let mut orbiter = Orbiter::new(1.0, 0.0, Rad(0.0), Rad(1.0));
        let before = orbiter.position(Vector3::zero());
        let heading = orbiter.heading();
        orbiter.advance(0.01);
        let after = orbiter.position(Vector3::zero());

        let travel = (after - before).normalize();
        let tangent = Vector3::new(heading.cos(), heading.sin(), 0.0);
        assert!(travel.dot(tangent) > 0.99);
    }

    #[test]
    fn test_zero_rate_degenerates_to_rigid_follow() {
        let mut orbiter = Orbiter::new(3.0, 0.5, Rad(0.7), Rad(0.0));
        let first = orbiter.position(Vector3::zero());
        for _ in 0..10 {
            orbiter.advance(0.5);
        }
        assert_eq!(orbiter.position(Vector3::zero()), first);
    }
}
