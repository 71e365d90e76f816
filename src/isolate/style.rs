//! Hover styling
//!
//! Every frame each piece is put into exactly one of three styles, derived
//! from the hovered identifier alone:
//!
//! | hovered          | this piece   | other pieces |
//! |------------------|--------------|--------------|
//! | nothing          | `Normal`     | `Normal`     |
//! | this piece       | `Highlight`  | `Dim`        |
//!
//! Styling is written into each piece's own materials and re-applied every
//! frame, so materials attached after the first frame are picked up.

use crate::error::Result;
use crate::frame::{FrameContext, FrameTask, PieceAppearance};
use crate::gfx::resources::material::{Emissive, Material, Side};

use super::piece::{Piece, PieceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoverStyle {
    /// Opaque, no glow
    Normal,
    /// Translucent, no glow
    Dim,
    /// Opaque, soft gray glow
    Highlight,
}

impl HoverStyle {
    pub fn resolve(hovered: Option<&PieceId>, id: &PieceId) -> Self {
        match hovered {
            None => HoverStyle::Normal,
            Some(h) if h == id => HoverStyle::Highlight,
            Some(_) => HoverStyle::Dim,
        }
    }
}

/// Visual parameters of the three styles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleParams {
    pub dim_opacity: f32,
    pub highlight_emissive: Emissive,
}

impl Default for StyleParams {
    fn default() -> Self {
        let gray = 0x44 as f32 / 255.0;
        Self {
            dim_opacity: 0.4,
            highlight_emissive: Emissive::new([gray, gray, gray], 0.6),
        }
    }
}

impl StyleParams {
    pub fn opacity(&self, style: HoverStyle) -> f32 {
        match style {
            HoverStyle::Dim => self.dim_opacity,
            HoverStyle::Normal | HoverStyle::Highlight => 1.0,
        }
    }

    pub fn emissive(&self, style: HoverStyle) -> Emissive {
        match style {
            HoverStyle::Highlight => self.highlight_emissive,
            HoverStyle::Normal | HoverStyle::Dim => Emissive::NONE,
        }
    }
}

/// Writes `style` into one material
///
/// Channels the material lacks are left alone. Returns whether anything
/// changed; only then is the material flagged for re-upload.
pub fn apply_to_material(material: &mut Material, style: HoverStyle, params: &StyleParams) -> bool {
    let mut changed = false;

    if let Some(opacity) = &mut material.opacity {
        let target = params.opacity(style);
        if *opacity != target || !material.transparent {
            *opacity = target;
            material.transparent = true;
            changed = true;
        }
    }

    if let Some(emissive) = &mut material.emissive {
        let target = params.emissive(style);
        if *emissive != target {
            *emissive = target;
            changed = true;
        }
    }

    if changed {
        material.mark_needs_update();
    }
    changed
}

/// Styles every material in the piece's subtree and reports what the
/// renderer should draw
pub fn apply_style(piece: &mut Piece, style: HoverStyle, params: &StyleParams) -> PieceAppearance {
    let mut double_sided = true;
    let mut cast_shadow = false;
    let mut receive_shadow = false;
    let mut has_opacity = false;
    let mut has_emissive = false;

    piece.for_each_mesh_mut(|mesh| {
        cast_shadow |= mesh.cast_shadow;
        receive_shadow |= mesh.receive_shadow;
        for material in mesh.materials_mut() {
            apply_to_material(material, style, params);
            double_sided &= material.side == Side::Double;
            has_opacity |= material.supports_opacity();
            has_emissive |= material.supports_emissive();
        }
    });

    PieceAppearance {
        id: piece.id().clone(),
        style,
        opacity: has_opacity.then(|| params.opacity(style)),
        emissive: has_emissive.then(|| params.emissive(style)),
        double_sided,
        cast_shadow,
        receive_shadow,
    }
}

/// Per-frame task restyling every live piece from the hover slot
pub struct HoverStyleTask {
    params: StyleParams,
}

impl HoverStyleTask {
    pub fn new(params: StyleParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &StyleParams {
        &self.params
    }
}

impl Default for HoverStyleTask {
    fn default() -> Self {
        Self::new(StyleParams::default())
    }
}

impl FrameTask for HoverStyleTask {
    fn name(&self) -> &str {
        "hover-style"
    }

    fn tick(&mut self, ctx: &mut FrameContext<'_>) -> Result<()> {
        let hovered = ctx.session.hover()?.hovered().cloned();

        ctx.output.pieces.clear();
        for piece in ctx.pieces.iter_mut() {
            let style = HoverStyle::resolve(hovered.as_ref(), piece.id());
            let appearance = apply_style(piece, style, &self.params);
            ctx.output.pieces.push(appearance);
        }

        Ok(())
    }
}
