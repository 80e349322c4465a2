//! # Scene Management Module
//!
//! 3D scene management: the scene container, objects with meshes/materials/
//! transforms, and the GPU-facing vertex format.
//!
//! Objects support OBJ loading (with procedural fallback on load failure),
//! material assignment, transform editing, and GPU resource management
//! through the builder returned by the `add_*` methods on [`Scene`].

pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use object::{DrawObject, Object, UiTransform};
pub use scene::{AssetError, ObjectBuilder, Scene};
pub use vertex::Vertex3D;
