// src/lib.rs
//! Skerry
//!
//! A small real-time 3D sailing scene built on wgpu and winit: a ship on an
//! open ocean among islands, seagulls orbiting the mast, bugs trailing the
//! seagulls. The interesting part lives in [`motion`] and [`voyage`]: a
//! lightweight implicit scene graph with follow offsets and orbital
//! kinematics, evaluated parent-before-child once per frame.

pub mod app;
pub mod gfx;
pub mod motion;
pub mod prelude;
pub mod sim;
pub mod ui;
pub mod voyage;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::SkerryApp;

/// Creates a default application instance
pub fn default() -> SkerryApp {
    pollster::block_on(SkerryApp::new())
}
