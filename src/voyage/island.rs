//! Static islands
//!
//! Position and scale are captured at construction and never change; the
//! matching scene object gets its transform written once at initialization.

use cgmath::Vector3;

#[derive(Debug, Clone, Copy)]
pub struct Island {
    position: Vector3<f32>,
    scale: f32,
}

impl Island {
    pub fn new(position: Vector3<f32>, scale: f32) -> Self {
        Self { position, scale }
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}
