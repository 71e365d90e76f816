//! # Hover State
//!
//! The hovered-piece slot and everything that feeds or reflects it.
//!
//! - [`HoverStore`] - the single optional hovered identifier
//! - [`HoverSession`] - scope that owns the store; access outside it fails
//! - [`PointerDispatcher`] - turns pointer motion into piece enter/leave events
//! - [`CursorState`] / [`CursorTask`] - clickable cursor while something is hovered
//!
//! At most one piece is hovered at any time. Writes come only from piece
//! pointer handlers (enter sets, leave clears); the last write wins.

pub mod cursor;
pub mod pointer;
pub mod session;
pub mod store;

pub use cursor::{CursorState, CursorTask};
pub use pointer::{PointerDispatcher, PointerEvent, PointerEventKind};
pub use session::HoverSession;
pub use store::{HoverCommand, HoverStore};
