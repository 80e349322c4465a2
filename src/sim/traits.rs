//! Core simulation trait
//!
//! Defines the interface that simulations implement to integrate with the
//! rendering loop and UI overlay.

use crate::gfx::scene::Scene;
use imgui::Ui;
use winit::event::KeyEvent;

/// Per-frame simulation attached to the application.
///
/// The engine calls these lifecycle methods once per frame: keyboard events
/// are forwarded as they arrive, `update` advances the simulation by the
/// frame's delta time, and `render_ui` contributes overlay panels.
pub trait Simulation {
    /// Called once when the simulation is attached.
    ///
    /// Use this to resolve scene objects, set initial transforms, and cache
    /// whatever the update loop needs.
    fn initialize(&mut self, scene: &mut Scene);

    /// Advance the simulation by one time step.
    ///
    /// # Arguments
    /// * `delta_time` - Seconds elapsed since the last update
    /// * `scene` - Scene whose object transforms the simulation drives
    fn update(&mut self, delta_time: f32, scene: &mut Scene);

    /// Keyboard event hook, forwarded when the UI does not capture input.
    ///
    /// Simulations that poll held keys each frame record press/release state
    /// here. Default: ignore keyboard input.
    fn process_keyboard(&mut self, _event: &KeyEvent) {}

    /// Render custom UI controls for this simulation.
    fn render_ui(&mut self, ui: &Ui);

    /// Simulation name for UI display.
    fn name(&self) -> &str;

    /// Whether the simulation is currently running.
    fn is_running(&self) -> bool;

    /// Start/pause the simulation.
    fn set_running(&mut self, running: bool);

    /// Reset the simulation to its initial state.
    fn reset(&mut self, scene: &mut Scene);

    /// Optional cleanup when the simulation is detached.
    fn cleanup(&mut self, _scene: &mut Scene) {}
}
