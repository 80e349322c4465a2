//! # Prelude
//!
//! One-stop import for typical applications:
//!
//! ```no_run
//! use skerry::prelude::*;
//!
//! let mut app = skerry::default();
//! app.attach_simulation(VoyageSimulation::new());
//! app.run();
//! ```

// Core application types
pub use crate::app::SkerryApp;
pub use crate::default;

// Graphics and scene types
pub use crate::gfx::camera::CameraManager;
pub use crate::gfx::geometry::{generate_cube, generate_plane, generate_sphere, GeometryData};
pub use crate::gfx::scene::Scene;

// Motion system
pub use crate::motion::{FollowOffset, Orbiter};

// Simulation framework
pub use crate::sim::{Simulation, SimulationManager};

// The sailing scene
pub use crate::voyage::{Bug, Island, Seagull, Ship, ShipCommand, VoyageSimulation};

// UI utilities
pub use crate::ui::default_transform_panel;

// Common external types
pub use cgmath::{Deg, InnerSpace, Rad, Vector3, Zero};
pub use imgui::Ui;
