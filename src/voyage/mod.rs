//! # Voyage
//!
//! The sailing scene itself: a ship steered by the keyboard, seagulls
//! orbiting the mast, bugs trailing each seagull, and static islands.
//!
//! [`VoyageSimulation`] ties the pieces into the engine's [`Simulation`]
//! seam: every frame it polls held movement keys, steers the ship, advances
//! each seagull's orbit, evaluates the dependent positions parent-before-
//! child, and writes the results into the matching scene objects.
//!
//! [`Simulation`]: crate::sim::Simulation

pub mod island;
pub mod ship;
pub mod simulation;
pub mod wildlife;

pub use island::Island;
pub use ship::{Ship, ShipCommand};
pub use simulation::VoyageSimulation;
pub use wildlife::{Bug, Seagull};
