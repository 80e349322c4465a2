//! # User Interface Module
//!
//! Dear ImGui-based overlay: the [`UiManager`] integrates imgui with winit
//! and wgpu (input capture, frame timing, rendering), and [`panel`] provides
//! the default scene inspector.

pub mod manager;
pub mod panel;

pub use manager::UiManager;
pub use panel::default_transform_panel;
