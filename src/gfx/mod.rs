//! # Graphics Module
//!
//! Engine-side data the viewer works on: the loaded scene graph, geometry,
//! materials and pointer picking. Actual drawing belongs to the host
//! renderer, which consumes the per-frame appearance the viewer emits.
//!
//! ## Architecture Overview
//!
//! - **Scene Management** ([`scene`]) - Node hierarchy, transforms, OBJ loading
//! - **Geometry** ([`geometry`]) - Triangle data and bounding volumes
//! - **Resources** ([`resources`]) - Materials with optional opacity/emissive channels
//! - **Picking** ([`picking`]) - Pointer rays and ray/box hit ordering

pub mod geometry;
pub mod picking;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use picking::{ObjectPicker, Pickable, Ray};
pub use resources::{Emissive, Material, Side};
pub use scene::{Mesh, SceneGraph, Transform};
