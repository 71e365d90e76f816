// src/ui/panel.rs
//! Hover info panel
//!
//! The overlay is a pure function of the hovered identifier and the info
//! registry. [`overlay_content`] decides what to say; [`InfoPanel::draw`]
//! lays it out as a fixed, non-interactive ImGui window in the top-right
//! corner.

use imgui::Condition;

use crate::info::InfoRegistry;
use crate::isolate::PieceId;

pub const IDLE_PROMPT: &str = "Hover over an object to learn more.";
pub const HOVER_CAPTION: &str = "Hovering:";
pub const MISSING_DETAILS: &str =
    "No details added yet. Add an entry for this id in the info registry.";

/// What the overlay shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayContent {
    /// Nothing hovered
    Idle,
    /// Hovered piece with a registry entry
    Known {
        id: PieceId,
        title: String,
        description: String,
    },
    /// Hovered piece without a registry entry
    Unknown { id: PieceId },
}

/// One rendered line of the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayLine<'a> {
    /// Small dimmed text
    Caption(&'a str),
    /// Prominent piece title
    Title(&'a str),
    /// Wrapped body text
    Body(&'a str),
}

impl OverlayContent {
    pub fn hovered(&self) -> Option<&PieceId> {
        match self {
            OverlayContent::Idle => None,
            OverlayContent::Known { id, .. } | OverlayContent::Unknown { id } => Some(id),
        }
    }

    pub fn lines(&self) -> Vec<OverlayLine<'_>> {
        match self {
            OverlayContent::Idle => vec![OverlayLine::Caption(IDLE_PROMPT)],
            OverlayContent::Known {
                title, description, ..
            } => vec![
                OverlayLine::Caption(HOVER_CAPTION),
                OverlayLine::Title(title),
                OverlayLine::Body(description),
            ],
            OverlayContent::Unknown { id } => vec![
                OverlayLine::Caption(HOVER_CAPTION),
                OverlayLine::Title(id.as_str()),
                OverlayLine::Body(MISSING_DETAILS),
            ],
        }
    }
}

/// Overlay content for the current hover state
pub fn overlay_content(hovered: Option<&PieceId>, registry: &InfoRegistry) -> OverlayContent {
    let Some(id) = hovered else {
        return OverlayContent::Idle;
    };

    match registry.get(id) {
        Some(record) => OverlayContent::Known {
            id: id.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
        },
        None => {
            log::debug!("No info record for hovered piece '{}'", id);
            OverlayContent::Unknown { id: id.clone() }
        }
    }
}

/// Panel placement in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    pub width: f32,
    pub margin: f32,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            width: 300.0,
            margin: 16.0,
        }
    }
}

impl PanelLayout {
    /// Top-left corner and width for a display of the given size
    ///
    /// The panel never grows wider than the display minus both margins.
    /// Returns `None` for a degenerate display.
    pub fn placement(&self, display_size: [f32; 2]) -> Option<([f32; 2], f32)> {
        let [display_w, display_h] = display_size;
        if display_w <= 0.0 || display_h <= 0.0 {
            return None;
        }

        let width = self.width.min(display_w - 2.0 * self.margin).max(0.0);
        let x = (display_w - self.margin - width).max(0.0);
        Some(([x, self.margin], width))
    }
}

/// Fixed overlay window showing [`OverlayContent`]
#[derive(Debug, Clone, Default)]
pub struct InfoPanel {
    layout: PanelLayout,
}

impl InfoPanel {
    pub fn new(layout: PanelLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    /// Draws the panel into the current ImGui frame
    pub fn draw(&self, ui: &imgui::Ui, content: &OverlayContent) {
        let display_size = ui.io().display_size;
        let Some((position, width)) = self.layout.placement(display_size) else {
            return;
        };

        ui.window("##hover_info")
            .position(position, Condition::Always)
            .size([width, 0.0], Condition::Always)
            .bg_alpha(0.9)
            .no_decoration()
            .no_inputs()
            .focus_on_appearing(false)
            .build(|| {
                for line in content.lines() {
                    match line {
                        OverlayLine::Caption(text) => ui.text_disabled(text),
                        OverlayLine::Title(text) => {
                            ui.text(text);
                            ui.spacing();
                        }
                        OverlayLine::Body(text) => ui.text_wrapped(text),
                    }
                }
            });
    }
}
