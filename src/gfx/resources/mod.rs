// src/gfx/resources/mod.rs
//! Render resources owned by scene meshes
//!
//! Currently just materials; GPU upload is left to the host renderer, which
//! watches [`Material::version`] to decide when to re-upload.

pub mod material;

// Re-export main types
pub use material::{Emissive, Material, Side};
