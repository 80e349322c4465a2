//! # Procedural Motion
//!
//! Kinematics for dependent scene objects: rigid follow offsets and circular
//! orbits around a moving anchor. These are the building blocks of the
//! implicit scene graph — a seagull orbits the ship, a bug rides a fixed
//! offset from its seagull — evaluated parent-before-child once per frame.
//!
//! Positions are always computed from the parent's *current* world position;
//! nothing here stores a parent pointer, so the hierarchy stays implicit and
//! the constant-offset invariant holds by construction.

pub mod follow;
pub mod orbit;

pub use follow::FollowOffset;
pub use orbit::Orbiter;
