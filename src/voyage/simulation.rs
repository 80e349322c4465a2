//! The voyage simulation
//!
//! Drives the whole scene: polls held movement keys, steers the ship,
//! advances each seagull's orbit, evaluates dependent positions
//! parent-before-child, and writes the results into the scene objects.

use std::collections::HashSet;

use cgmath::{Deg, Rad, Vector3, Zero};
use imgui::Ui;
use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::gfx::scene::Scene;
use crate::motion::Orbiter;
use crate::sim::Simulation;

use super::{Island, Seagull, Ship, ShipCommand};

/// Scene object names the simulation drives.
///
/// The demo binary creates objects under these names; `initialize` resolves
/// them and warns about any that are missing.
const SHIP_OBJECT: &str = "ship";

pub struct VoyageSimulation {
    ship: Ship,
    seagulls: Vec<Seagull>,
    islands: Vec<Island>,
    pressed_keys: HashSet<KeyCode>,
    running: bool,
    time: f32,
}

impl VoyageSimulation {
    pub fn new() -> Self {
        Self {
            ship: Ship::new(Vector3::zero()),
            seagulls: make_flock(),
            islands: vec![
                Island::new(Vector3::new(18.0, 12.0, 0.0), 3.0),
                Island::new(Vector3::new(-22.0, 6.0, 0.0), 2.2),
                Island::new(Vector3::new(8.0, -26.0, 0.0), 4.0),
            ],
            pressed_keys: HashSet::new(),
            running: true,
            time: 0.0,
        }
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn seagulls(&self) -> &[Seagull] {
        &self.seagulls
    }

    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    /// Commands mapped from the keys held this frame.
    fn held_commands(&self) -> Vec<ShipCommand> {
        let mut commands = Vec::new();
        for key in &self.pressed_keys {
            match key {
                KeyCode::KeyW | KeyCode::ArrowUp => commands.push(ShipCommand::Forward),
                KeyCode::KeyS | KeyCode::ArrowDown => commands.push(ShipCommand::Backward),
                KeyCode::KeyA | KeyCode::ArrowLeft => commands.push(ShipCommand::TurnLeft),
                KeyCode::KeyD | KeyCode::ArrowRight => commands.push(ShipCommand::TurnRight),
                KeyCode::Equal | KeyCode::NumpadAdd => commands.push(ShipCommand::SpeedUp),
                KeyCode::Minus | KeyCode::NumpadSubtract => commands.push(ShipCommand::SpeedDown),
                _ => {}
            }
        }
        commands
    }

    /// Writes islands' static transforms once.
    fn place_islands(&self, scene: &mut Scene) {
        for (i, island) in self.islands.iter().enumerate() {
            let name = format!("island_{i}");
            if let Some(object) = scene.find_object_mut(&name) {
                let p = island.position();
                object.ui_transform.position = [p.x, p.y, p.z];
                object.ui_transform.scale = island.scale();
                object.apply_ui_transform();
            } else {
                log::warn!("scene object '{name}' not found; island will not be drawn");
            }
        }
    }

    /// Writes ship/gull/bug state into the matching scene objects.
    fn sync_to_scene(&self, scene: &mut Scene) {
        if let Some(object) = scene.find_object_mut(SHIP_OBJECT) {
            let p = self.ship.position();
            object.ui_transform.position = [p.x, p.y, p.z];
            object.ui_transform.rotation[2] = Deg::from(self.ship.heading()).0;
        }

        for (gi, gull) in self.seagulls.iter().enumerate() {
            let gull_name = format!("seagull_{gi}");
            if let Some(object) = scene.find_object_mut(&gull_name) {
                let p = gull.position();
                object.ui_transform.position = [p.x, p.y, p.z];
                object.ui_transform.rotation[2] = gull.yaw_degrees();
            }

            for (bi, bug) in gull.bugs().iter().enumerate() {
                let bug_name = format!("bug_{gi}_{bi}");
                if let Some(object) = scene.find_object_mut(&bug_name) {
                    let p = bug.position();
                    object.ui_transform.position = [p.x, p.y, p.z];
                    object.ui_transform.rotation[2] = gull.yaw_degrees();
                }
            }
        }
    }
}

impl Default for VoyageSimulation {
    fn default() -> Self {
        Self::new()
    }
}

/// Two gulls on opposite phases, each trailing a pair of bugs.
fn make_flock() -> Vec<Seagull> {
    vec![
        Seagull::new(Orbiter::new(2.0, 1.6, Rad(0.0), Rad(0.9)))
            .with_bug(Vector3::new(0.4, 0.0, 0.25))
            .with_bug(Vector3::new(-0.35, 0.2, 0.15)),
        Seagull::new(Orbiter::new(2.8, 2.1, Rad(std::f32::consts::PI), Rad(-0.7)))
            .with_bug(Vector3::new(0.3, -0.3, 0.2))
            .with_bug(Vector3::new(-0.25, -0.15, 0.3)),
    ]
}

impl Simulation for VoyageSimulation {
    fn initialize(&mut self, scene: &mut Scene) {
        log::info!(
            "voyage: {} seagulls, {} bugs, {} islands",
            self.seagulls.len(),
            self.seagulls.iter().map(|g| g.bugs().len()).sum::<usize>(),
            self.islands.len()
        );

        if scene.find_object(SHIP_OBJECT).is_none() {
            log::warn!("scene object '{SHIP_OBJECT}' not found; the ship will not be drawn");
        }

        self.place_islands(scene);

        // Settle every dependent object before the first frame renders
        for gull in &mut self.seagulls {
            gull.update(self.ship.position(), 0.0);
        }
        self.sync_to_scene(scene);
    }

    fn update(&mut self, delta_time: f32, scene: &mut Scene) {
        if !self.running {
            return;
        }

        self.time += delta_time;

        for command in self.held_commands() {
            self.ship.steer(command, delta_time);
        }

        // Parent-before-child: ship first, then each gull and its bugs
        for gull in &mut self.seagulls {
            gull.update(self.ship.position(), delta_time);
        }

        self.sync_to_scene(scene);
    }

    fn process_keyboard(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };

        match event.state {
            ElementState::Pressed => {
                self.pressed_keys.insert(code);
            }
            ElementState::Released => {
                self.pressed_keys.remove(&code);
            }
        }
    }

    fn render_ui(&mut self, ui: &Ui) {
        let display_size = ui.io().display_size;

        ui.window("Voyage")
            .size([320.0, 220.0], imgui::Condition::FirstUseEver)
            .position([10.0, display_size[1] - 240.0], imgui::Condition::FirstUseEver)
            .build(|| {
                let p = self.ship.position();
                ui.text(format!("At sea for {:.0}s", self.time));
                ui.text(format!("Position: ({:.1}, {:.1})", p.x, p.y));
                ui.text(format!(
                    "Heading: {:.0} deg",
                    Deg::from(self.ship.heading()).0
                ));
                ui.text(format!("Speed: {:.2}", self.ship.speed()));
                ui.separator();

                for (i, gull) in self.seagulls.iter().enumerate() {
                    ui.text(format!(
                        "Gull {}: r={:.1} angle={:.0} deg, {} bugs",
                        i,
                        gull.orbit().radius(),
                        Deg::from(gull.orbit().angle()).0,
                        gull.bugs().len()
                    ));
                }

                ui.separator();
                ui.text("W/S sail, A/D turn");
                ui.text("+/- trim speed, C toggles camera follow");
            });
    }

    fn name(&self) -> &str {
        "Voyage"
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    fn reset(&mut self, scene: &mut Scene) {
        self.ship = Ship::new(Vector3::zero());
        self.seagulls = make_flock();
        self.time = 0.0;

        for gull in &mut self.seagulls {
            gull.update(self.ship.position(), 0.0);
        }
        self.sync_to_scene(scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera};
    use cgmath::{InnerSpace, Vector2};

    fn test_scene() -> Scene {
        let camera = OrbitCamera::new(5.0, 0.4, 0.2, Vector3::zero(), 1.0);
        let controller = CameraController::new(0.005, 0.1);
        let mut scene = Scene::new(CameraManager::new(camera, controller));

        scene.add_cube().with_name("ship");
        scene.add_cube().with_name("seagull_0");
        scene.add_cube().with_name("seagull_1");
        scene.add_cube().with_name("bug_0_0");
        scene.add_cube().with_name("bug_0_1");
        scene.add_cube().with_name("bug_1_0");
        scene.add_cube().with_name("bug_1_1");
        scene.add_cube().with_name("island_0");
        scene.add_cube().with_name("island_1");
        scene.add_cube().with_name("island_2");
        scene
    }

    fn press(sim: &mut VoyageSimulation, key: KeyCode) {
        sim.pressed_keys.insert(key);
    }

    #[test]
    fn test_initialize_places_islands_and_flock() {
        let mut scene = test_scene();
        let mut sim = VoyageSimulation::new();
        sim.initialize(&mut scene);

        let island = scene.find_object_mut("island_0").unwrap();
        assert_eq!(island.ui_transform.position, [18.0, 12.0, 0.0]);
        assert_eq!(island.ui_transform.scale, 3.0);

        // The first gull starts at angle 0 on a radius-2 orbit
        let gull = scene.find_object_mut("seagull_0").unwrap();
        assert!((gull.ui_transform.position[0] - 2.0).abs() < 1e-4);
        assert!((gull.ui_transform.position[2] - 1.6).abs() < 1e-4);
    }

    #[test]
    fn test_held_forward_key_moves_ship_object() {
        let mut scene = test_scene();
        let mut sim = VoyageSimulation::new();
        sim.initialize(&mut scene);

        press(&mut sim, KeyCode::KeyW);
        for _ in 0..60 {
            sim.update(1.0 / 60.0, &mut scene);
        }

        // One second of sailing at base speed moves the ship along +X
        let ship_obj = scene.find_object_mut("ship").unwrap();
        assert!((ship_obj.ui_transform.position[0] - 2.5).abs() < 1e-3);
        assert!(ship_obj.ui_transform.position[1].abs() < 1e-4);
    }

    #[test]
    fn test_gulls_stay_on_radius_while_sailing() {
        let mut scene = test_scene();
        let mut sim = VoyageSimulation::new();
        sim.initialize(&mut scene);

        press(&mut sim, KeyCode::KeyW);
        press(&mut sim, KeyCode::KeyA);
        for _ in 0..120 {
            sim.update(1.0 / 60.0, &mut scene);
        }

        let ship_pos = sim.ship().position();
        for gull in sim.seagulls() {
            let horizontal = Vector2::new(
                gull.position().x - ship_pos.x,
                gull.position().y - ship_pos.y,
            )
            .magnitude();
            assert!((horizontal - gull.orbit().radius()).abs() < 1e-3);
        }
    }

    #[test]
    fn test_bug_objects_track_their_gulls() {
        let mut scene = test_scene();
        let mut sim = VoyageSimulation::new();
        sim.initialize(&mut scene);

        for _ in 0..30 {
            sim.update(1.0 / 60.0, &mut scene);
        }

        let gull = &sim.seagulls()[0];
        let bug = &gull.bugs()[0];
        let bug_obj = scene.find_object_mut("bug_0_0").unwrap();

        assert!((bug_obj.ui_transform.position[0] - bug.position().x).abs() < 1e-5);
        assert!((bug_obj.ui_transform.position[1] - bug.position().y).abs() < 1e-5);

        // And the bug itself keeps its constant offset from the gull
        let horizontal = Vector2::new(
            bug.position().x - gull.position().x,
            bug.position().y - gull.position().y,
        )
        .magnitude();
        assert!((horizontal - bug.radius()).abs() < 1e-5);
    }

    #[test]
    fn test_pause_freezes_the_scene() {
        let mut scene = test_scene();
        let mut sim = VoyageSimulation::new();
        sim.initialize(&mut scene);

        press(&mut sim, KeyCode::KeyW);
        sim.set_running(false);
        sim.update(1.0, &mut scene);

        assert_eq!(sim.ship().position(), Vector3::zero());
    }

    #[test]
    fn test_reset_returns_to_start() {
        let mut scene = test_scene();
        let mut sim = VoyageSimulation::new();
        sim.initialize(&mut scene);

        press(&mut sim, KeyCode::KeyW);
        for _ in 0..60 {
            sim.update(1.0 / 60.0, &mut scene);
        }
        assert!(sim.ship().position().magnitude() > 1.0);

        sim.reset(&mut scene);
        assert_eq!(sim.ship().position(), Vector3::zero());

        let ship_obj = scene.find_object_mut("ship").unwrap();
        assert_eq!(ship_obj.ui_transform.position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_key_release_stops_the_command() {
        let mut scene = test_scene();
        let mut sim = VoyageSimulation::new();
        sim.initialize(&mut scene);

        press(&mut sim, KeyCode::KeyW);
        sim.update(0.5, &mut scene);
        let mid = sim.ship().position();

        sim.pressed_keys.remove(&KeyCode::KeyW);
        sim.update(0.5, &mut scene);
        assert_eq!(sim.ship().position(), mid);
    }
}
