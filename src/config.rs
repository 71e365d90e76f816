//! Viewer configuration

use std::path::{Path, PathBuf};

use crate::isolate::StyleParams;
use crate::ui::PanelLayout;

/// Model shown when no path is configured
pub const DEFAULT_MODEL_PATH: &str = "assets/tiny_isometric_room.obj";

/// Settings for one [`HoverViewer`](crate::HoverViewer)
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub model_path: PathBuf,
    /// Node names to isolate. Empty means every mesh.
    pub allow_list: Vec<String>,
    pub style: StyleParams,
    pub panel: PanelLayout,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            allow_list: Vec::new(),
            style: StyleParams::default(),
            panel: PanelLayout::default(),
        }
    }
}

impl ViewerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: Set the model file
    pub fn with_model_path(mut self, path: impl AsRef<Path>) -> Self {
        self.model_path = path.as_ref().to_path_buf();
        self
    }

    /// Builder pattern: Restrict isolation to the named nodes
    pub fn with_allow_list<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_list = names.into_iter().map(Into::into).collect();
        self
    }

    /// Builder pattern: Set the style parameters
    pub fn with_style(mut self, style: StyleParams) -> Self {
        self.style = style;
        self
    }

    /// Builder pattern: Set the overlay panel layout
    pub fn with_panel(mut self, panel: PanelLayout) -> Self {
        self.panel = panel;
        self
    }
}
