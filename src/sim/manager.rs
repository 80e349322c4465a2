//! Simulation manager
//!
//! Owns the attached simulation and integrates it with the main loop:
//! pause state, time scaling, and an optional fixed timestep with an
//! accumulator for deterministic stepping.

use super::traits::Simulation;
use crate::gfx::scene::Scene;
use imgui::Ui;
use winit::event::KeyEvent;

/// Manages the lifecycle of the attached simulation.
pub struct SimulationManager {
    simulation: Option<Box<dyn Simulation>>,
    is_paused: bool,
    time_scale: f32,
    accumulated_time: f32,
    fixed_timestep: Option<f32>,
}

impl SimulationManager {
    pub fn new() -> Self {
        Self {
            simulation: None,
            is_paused: false,
            time_scale: 1.0,
            accumulated_time: 0.0,
            fixed_timestep: None,
        }
    }

    /// Attaches a simulation, detaching and cleaning up any previous one.
    pub fn attach_simulation(&mut self, mut simulation: Box<dyn Simulation>, scene: &mut Scene) {
        if let Some(mut old_sim) = self.simulation.take() {
            old_sim.cleanup(scene);
        }

        log::debug!("attaching simulation '{}'", simulation.name());
        simulation.initialize(scene);
        self.simulation = Some(simulation);
        self.is_paused = false;
    }

    /// Removes the current simulation.
    pub fn detach_simulation(&mut self, scene: &mut Scene) {
        if let Some(mut sim) = self.simulation.take() {
            sim.cleanup(scene);
        }
    }

    /// Updates the simulation (called every frame).
    ///
    /// With a fixed timestep configured, frame time accumulates and the
    /// simulation steps in `fixed_dt` increments; otherwise the scaled frame
    /// delta is passed straight through.
    pub fn update(&mut self, delta_time: f32, scene: &mut Scene) {
        if self.is_paused {
            return;
        }

        if let Some(simulation) = &mut self.simulation {
            let scaled_delta = delta_time * self.time_scale;

            if let Some(fixed_dt) = self.fixed_timestep {
                self.accumulated_time += scaled_delta;

                while self.accumulated_time >= fixed_dt {
                    simulation.update(fixed_dt, scene);
                    self.accumulated_time -= fixed_dt;
                }
            } else {
                simulation.update(scaled_delta, scene);
            }
        }
    }

    /// Forwards a keyboard event to the attached simulation.
    pub fn process_keyboard(&mut self, event: &KeyEvent) {
        if let Some(simulation) = &mut self.simulation {
            simulation.process_keyboard(event);
        }
    }

    /// Renders the shared simulation control panel plus the simulation's own UI.
    pub fn render_ui(&mut self, ui: &Ui, scene: &mut Scene) {
        let display_size = ui.io().display_size;
        let panel_width = 300.0;
        let panel_x = display_size[0] - panel_width - 20.0;

        if let Some(simulation) = &mut self.simulation {
            ui.window("Simulation Control")
                .size([panel_width, 200.0], imgui::Condition::FirstUseEver)
                .position([panel_x, 240.0], imgui::Condition::FirstUseEver)
                .build(|| {
                    ui.text(format!("Simulation: {}", simulation.name()));
                    ui.separator();

                    if ui.button(if self.is_paused { "Play" } else { "Pause" }) {
                        self.is_paused = !self.is_paused;
                        simulation.set_running(!self.is_paused);
                    }

                    ui.same_line();
                    if ui.button("Reset") {
                        simulation.reset(scene);
                    }

                    ui.separator();

                    ui.slider("Time Scale", 0.1, 3.0, &mut self.time_scale);

                    let mut use_fixed_timestep = self.fixed_timestep.is_some();
                    if ui.checkbox("Fixed Timestep", &mut use_fixed_timestep) {
                        if use_fixed_timestep && self.fixed_timestep.is_none() {
                            self.fixed_timestep = Some(1.0 / 60.0);
                        } else if !use_fixed_timestep {
                            self.fixed_timestep = None;
                        }
                    }

                    if let Some(ref mut fixed_dt) = self.fixed_timestep {
                        ui.slider("Fixed DT", 1.0 / 120.0, 1.0 / 30.0, fixed_dt);
                    }
                });

            simulation.render_ui(ui);
        }
    }

    /// Current simulation name, if one is attached.
    pub fn current_simulation_name(&self) -> Option<&str> {
        self.simulation.as_ref().map(|s| s.name())
    }

    pub fn is_running(&self) -> bool {
        !self.is_paused && self.simulation.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
        if let Some(simulation) = &mut self.simulation {
            simulation.set_running(!paused);
        }
    }

    /// Enables fixed timestep mode, or disables it with `None`.
    pub fn set_fixed_timestep(&mut self, timestep: Option<f32>) {
        self.fixed_timestep = timestep;
        self.accumulated_time = 0.0;
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn has_simulation(&self) -> bool {
        self.simulation.is_some()
    }
}

impl Default for SimulationManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera};
    use cgmath::{Vector3, Zero};

    struct CountingSimulation {
        running: bool,
    }

    impl CountingSimulation {
        fn new() -> Self {
            Self { running: true }
        }
    }

    impl Simulation for CountingSimulation {
        fn initialize(&mut self, _scene: &mut Scene) {}

        fn update(&mut self, _delta_time: f32, _scene: &mut Scene) {}

        fn render_ui(&mut self, _ui: &Ui) {}

        fn name(&self) -> &str {
            "counting"
        }

        fn is_running(&self) -> bool {
            self.running
        }

        fn set_running(&mut self, running: bool) {
            self.running = running;
        }

        fn reset(&mut self, _scene: &mut Scene) {}
    }

    fn test_scene() -> Scene {
        let camera = OrbitCamera::new(5.0, 0.4, 0.2, Vector3::zero(), 1.0);
        let controller = CameraController::new(0.005, 0.1);
        Scene::new(CameraManager::new(camera, controller))
    }

    #[test]
    fn test_pause_gates_updates() {
        let mut scene = test_scene();
        let mut manager = SimulationManager::new();
        manager.attach_simulation(Box::new(CountingSimulation::new()), &mut scene);

        manager.set_paused(true);
        manager.update(0.016, &mut scene);
        assert!(manager.is_paused());
        assert!(!manager.is_running());

        manager.set_paused(false);
        manager.update(0.016, &mut scene);
        assert!(manager.is_running());
    }

    #[test]
    fn test_fixed_timestep_steps_expected_count() {
        let mut scene = test_scene();
        let mut manager = SimulationManager::new();

        // Count steps through a shared cell since the manager owns the box
        use std::cell::Cell;
        use std::rc::Rc;

        struct SharedCounter {
            steps: Rc<Cell<usize>>,
            dts: Rc<Cell<f32>>,
        }
        impl Simulation for SharedCounter {
            fn initialize(&mut self, _scene: &mut Scene) {}
            fn update(&mut self, delta_time: f32, _scene: &mut Scene) {
                self.steps.set(self.steps.get() + 1);
                self.dts.set(delta_time);
            }
            fn render_ui(&mut self, _ui: &Ui) {}
            fn name(&self) -> &str {
                "shared"
            }
            fn is_running(&self) -> bool {
                true
            }
            fn set_running(&mut self, _running: bool) {}
            fn reset(&mut self, _scene: &mut Scene) {}
        }

        let steps = Rc::new(Cell::new(0));
        let dts = Rc::new(Cell::new(0.0));
        manager.attach_simulation(
            Box::new(SharedCounter {
                steps: steps.clone(),
                dts: dts.clone(),
            }),
            &mut scene,
        );

        manager.set_fixed_timestep(Some(0.01));
        manager.update(0.035, &mut scene);

        // 35ms at 10ms steps runs three times with 5ms carried over
        assert_eq!(steps.get(), 3);
        assert!((dts.get() - 0.01).abs() < 1e-6);

        manager.update(0.005, &mut scene);
        assert_eq!(steps.get(), 4);
    }

    #[test]
    fn test_time_scale_multiplies_delta() {
        let mut scene = test_scene();
        let mut manager = SimulationManager::new();

        use std::cell::Cell;
        use std::rc::Rc;

        struct DtRecorder {
            dt: Rc<Cell<f32>>,
        }
        impl Simulation for DtRecorder {
            fn initialize(&mut self, _scene: &mut Scene) {}
            fn update(&mut self, delta_time: f32, _scene: &mut Scene) {
                self.dt.set(delta_time);
            }
            fn render_ui(&mut self, _ui: &Ui) {}
            fn name(&self) -> &str {
                "dt"
            }
            fn is_running(&self) -> bool {
                true
            }
            fn set_running(&mut self, _running: bool) {}
            fn reset(&mut self, _scene: &mut Scene) {}
        }

        let dt = Rc::new(Cell::new(0.0));
        manager.attach_simulation(Box::new(DtRecorder { dt: dt.clone() }), &mut scene);

        manager.set_time_scale(2.0);
        manager.update(0.016, &mut scene);
        assert!((dt.get() - 0.032).abs() < 1e-6);

        // Negative scales are clamped away
        manager.set_time_scale(-1.0);
        assert_eq!(manager.time_scale(), 0.0);
    }

    #[test]
    fn test_attach_replaces_previous_simulation() {
        let mut scene = test_scene();
        let mut manager = SimulationManager::new();
        manager.attach_simulation(Box::new(CountingSimulation::new()), &mut scene);
        assert_eq!(manager.current_simulation_name(), Some("counting"));
        assert!(manager.has_simulation());

        manager.detach_simulation(&mut scene);
        assert!(!manager.has_simulation());
    }
}
