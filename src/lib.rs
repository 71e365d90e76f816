// src/lib.rs
//! Roomview
//!
//! Hover-isolation core for a 3D scene viewer: splits a loaded model into
//! independently styled pieces, highlights the one under the pointer, dims
//! the rest and describes it in an ImGui overlay. Drawing is left to the
//! host renderer, which consumes the per-frame [`frame::FrameOutput`].
//!
//! ```no_run
//! use roomview::{HoverViewer, ViewerConfig};
//! use roomview::info::InfoRegistry;
//!
//! let registry = InfoRegistry::from_json_file("assets/info.json")?;
//! let mut viewer = HoverViewer::new(ViewerConfig::default(), registry);
//! viewer.load_from_config()?;
//!
//! // Once per rendered frame
//! let output = viewer.frame()?;
//! for piece in &output.pieces {
//!     println!("{} -> {:?} (opacity {:?})", piece.id, piece.style, piece.opacity);
//! }
//! # Ok::<(), roomview::ViewerError>(())
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod frame;
pub mod gfx;
pub mod hover;
pub mod info;
pub mod isolate;
pub mod prelude;
pub mod ui;

// Re-export main types for convenience
pub use app::{HoverViewer, ModelState};
pub use config::ViewerConfig;
pub use error::{Result, ViewerError};
