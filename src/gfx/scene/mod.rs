//! # Scene Management Module
//!
//! Hierarchical scene graphs as produced by model loading.
//!
//! ## Key Components
//!
//! - [`SceneGraph`] - Arena of named nodes with local transforms
//! - [`Mesh`] - Geometry plus materials and per-mesh render flags
//! - [`Transform`] - Translation / rotation / scale with matrix round-tripping
//! - [`ObjLoader`] - Reads the viewer's model file into a graph
//!
//! ## Usage
//!
//! ```no_run
//! use roomview::gfx::scene::ObjLoader;
//!
//! let graph = ObjLoader::new().load("assets/tiny_isometric_room.obj")?;
//! for id in graph.mesh_nodes() {
//!     println!("{:?}", graph.world_transform(id));
//! }
//! # Ok::<(), roomview::ViewerError>(())
//! ```

pub mod graph;
pub mod loader;
pub mod mesh;
pub mod transform;

// Re-export main types
pub use graph::{NodeId, SceneGraph, SceneNode};
pub use loader::ObjLoader;
pub use mesh::Mesh;
pub use transform::Transform;
