//! # Roomview Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use roomview::prelude::*;
//!
//! let viewer = HoverViewer::new(ViewerConfig::default(), InfoRegistry::new());
//! assert!(viewer.pieces().is_empty());
//! ```

// Re-export core application types
pub use crate::app::{HoverViewer, ModelState};
pub use crate::config::ViewerConfig;
pub use crate::error::ViewerError;

// Re-export graphics and scene types
pub use crate::gfx::geometry::GeometryData;
pub use crate::gfx::resources::{Emissive, Material, Side};
pub use crate::gfx::scene::{Mesh, ObjLoader, SceneGraph, Transform};

// Re-export hover, isolation and frame types
pub use crate::frame::{FrameOutput, FrameTask, PieceAppearance};
pub use crate::hover::{HoverSession, HoverStore};
pub use crate::info::{InfoRecord, InfoRegistry};
pub use crate::isolate::{HoverStyle, Piece, PieceDecomposer, PieceId, StyleParams};

// Re-export UI types
pub use crate::ui::{InfoPanel, OverlayContent};

// Re-export common external dependencies
pub use cgmath::{Matrix4, Vector3};
pub use imgui::Ui;
