//! # Piece Isolation
//!
//! Turns a loaded model into hoverable pieces and keeps their look in sync
//! with the hover slot.
//!
//! - [`PieceDecomposer`] - one deep-copied [`Piece`] per renderable node
//! - [`HoverStyleTask`] - per-frame `Normal` / `Dim` / `Highlight` styling
//!
//! ## Usage
//!
//! ```no_run
//! use roomview::gfx::scene::ObjLoader;
//! use roomview::isolate::PieceDecomposer;
//!
//! let mut graph = ObjLoader::new().load("assets/tiny_isometric_room.obj")?;
//! let result = PieceDecomposer::new().with_allow_list(["Bed", "Desk"]).decompose(&mut graph);
//! for piece in &result.pieces {
//!     println!("{}", piece.id());
//! }
//! # Ok::<(), roomview::ViewerError>(())
//! ```

pub mod decomposer;
pub mod piece;
pub mod style;

pub use decomposer::{assign_identifier, Decomposition, PieceDecomposer};
pub use piece::{Piece, PieceId, PieceNode};
pub use style::{apply_style, apply_to_material, HoverStyle, HoverStyleTask, StyleParams};
