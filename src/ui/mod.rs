//! # User Interface Module
//!
//! Dear ImGui overlay describing the hovered piece. The host owns the ImGui
//! context and its renderer; this module only emits widgets into a frame.
//!
//! ## Key Components
//!
//! - [`overlay_content`] - Hover state + registry to [`OverlayContent`]
//! - [`InfoPanel`] - Fixed top-right window drawing that content
//!
//! ## Usage
//!
//! ```no_run
//! use roomview::info::InfoRegistry;
//! use roomview::ui::{overlay_content, InfoPanel};
//! # fn frame(ui: &imgui::Ui) {
//! let registry = InfoRegistry::new();
//! InfoPanel::default().draw(ui, &overlay_content(None, &registry));
//! # }
//! ```

pub mod panel;

// Re-export main types
pub use panel::{overlay_content, InfoPanel, OverlayContent, OverlayLine, PanelLayout};
