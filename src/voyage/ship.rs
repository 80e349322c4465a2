//! The player's ship
//!
//! Position, heading, and speed, steered by discrete commands applied once
//! per frame. Forward motion is heading-relative; turning integrates the
//! heading at a fixed rate.

use cgmath::{Angle, Rad, Vector3};

/// Base cruising speed in world units per second.
const BASE_SPEED: f32 = 2.5;
/// Speed adjustment per SpeedUp/SpeedDown command.
const SPEED_STEP: f32 = 0.05;
const MIN_SPEED: f32 = 1.0;
const MAX_SPEED: f32 = 10.0;
/// Turn rate in radians per second.
const TURN_RATE: f32 = 1.2;

/// Steering commands, mapped from held keys once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipCommand {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    SpeedUp,
    SpeedDown,
}

/// The ship: root of the follow hierarchy.
#[derive(Debug, Clone)]
pub struct Ship {
    position: Vector3<f32>,
    heading: Rad<f32>,
    speed: f32,
}

impl Ship {
    pub fn new(position: Vector3<f32>) -> Self {
        Self {
            position,
            heading: Rad(0.0),
            speed: BASE_SPEED,
        }
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn heading(&self) -> Rad<f32> {
        self.heading
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Unit vector the bow points along (in the ocean plane).
    pub fn forward(&self) -> Vector3<f32> {
        Vector3::new(self.heading.cos(), self.heading.sin(), 0.0)
    }

    /// Applies one steering command for this frame.
    pub fn steer(&mut self, command: ShipCommand, dt: f32) {
        match command {
            ShipCommand::SpeedUp => {
                self.speed = (self.speed + SPEED_STEP).min(MAX_SPEED);
            }
            ShipCommand::SpeedDown => {
                self.speed = (self.speed - SPEED_STEP).max(MIN_SPEED);
            }
            ShipCommand::Forward => {
                self.position += self.forward() * self.speed * dt;
            }
            ShipCommand::Backward => {
                self.position -= self.forward() * self.speed * dt;
            }
            ShipCommand::TurnLeft => {
                self.heading = (self.heading + Rad(TURN_RATE * dt)).normalize();
            }
            ShipCommand::TurnRight => {
                self.heading = (self.heading - Rad(TURN_RATE * dt)).normalize();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Zero};
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_speed_clamps_at_both_ends() {
        let mut ship = Ship::new(Vector3::zero());
        assert_eq!(ship.speed(), 2.5);

        for _ in 0..1000 {
            ship.steer(ShipCommand::SpeedUp, 0.016);
        }
        assert_eq!(ship.speed(), 10.0);

        for _ in 0..1000 {
            ship.steer(ShipCommand::SpeedDown, 0.016);
        }
        assert_eq!(ship.speed(), 1.0);
    }

    #[test]
    fn test_forward_motion_is_heading_relative() {
        let mut ship = Ship::new(Vector3::zero());

        // Turn a quarter circle left, then sail forward: motion is along +Y
        let steps = 100;
        let dt = FRAC_PI_2 / (1.2 * steps as f32);
        for _ in 0..steps {
            ship.steer(ShipCommand::TurnLeft, dt);
        }
        assert!((ship.heading().0 - FRAC_PI_2).abs() < 1e-3);

        ship.steer(ShipCommand::Forward, 1.0);
        assert!(ship.position().x.abs() < 1e-2);
        assert!((ship.position().y - ship.speed()).abs() < 1e-2);
    }

    #[test]
    fn test_backward_reverses_forward() {
        let mut ship = Ship::new(Vector3::new(3.0, 4.0, 0.0));
        let start = ship.position();
        ship.steer(ShipCommand::Forward, 0.5);
        ship.steer(ShipCommand::Backward, 0.5);
        assert!((ship.position() - start).magnitude() < 1e-5);
    }

    #[test]
    fn test_turns_integrate_heading() {
        let mut ship = Ship::new(Vector3::zero());
        ship.steer(ShipCommand::TurnLeft, 0.5);
        assert!((ship.heading().0 - 0.6).abs() < 1e-5);

        ship.steer(ShipCommand::TurnRight, 0.5);
        ship.steer(ShipCommand::TurnRight, 0.5);
        // Wrapped into [0, 2π)
        assert!((ship.heading().0 - (2.0 * std::f32::consts::PI - 0.6)).abs() < 1e-4);
    }

    #[test]
    fn test_ship_stays_in_ocean_plane() {
        let mut ship = Ship::new(Vector3::zero());
        for _ in 0..50 {
            ship.steer(ShipCommand::TurnLeft, 0.1);
            ship.steer(ShipCommand::Forward, 0.1);
        }
        assert_eq!(ship.position().z, 0.0);
    }
}
