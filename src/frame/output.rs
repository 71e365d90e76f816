use winit::window::CursorIcon;

use crate::gfx::resources::material::Emissive;
use crate::isolate::{HoverStyle, PieceId};

/// What the renderer should draw for one piece this frame
#[derive(Debug, Clone, PartialEq)]
pub struct PieceAppearance {
    pub id: PieceId,
    pub style: HoverStyle,
    /// Opacity written to every opacity-capable material, `None` when the
    /// piece has no such material
    pub opacity: Option<f32>,
    /// Glow written to every emissive-capable material, `None` when the
    /// piece has no such material
    pub emissive: Option<Emissive>,
    pub double_sided: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

/// Everything the host needs after a frame has run
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Frame number, starting at 1
    pub frame: u64,
    /// One entry per live piece, in piece order
    pub pieces: Vec<PieceAppearance>,
    pub cursor: CursorIcon,
    /// Whether `cursor` differs from the previous frame
    pub cursor_changed: bool,
}

impl FrameOutput {
    pub fn appearance(&self, id: &PieceId) -> Option<&PieceAppearance> {
        self.pieces.iter().find(|p| &p.id == id)
    }

    /// Pieces drawn with the given style
    pub fn with_style(&self, style: HoverStyle) -> impl Iterator<Item = &PieceAppearance> {
        self.pieces.iter().filter(move |p| p.style == style)
    }
}

impl Default for FrameOutput {
    fn default() -> Self {
        Self {
            frame: 0,
            pieces: Vec::new(),
            cursor: CursorIcon::Default,
            cursor_changed: false,
        }
    }
}
