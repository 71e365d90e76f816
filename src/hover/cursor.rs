use winit::window::{CursorIcon, Window};

use crate::error::Result;
use crate::frame::{FrameContext, FrameTask};
use crate::isolate::PieceId;

/// Desired platform pointer cursor
///
/// Changes are latched until the host pushes them to the window, so the
/// window is only touched when the icon actually changes.
#[derive(Debug, Clone)]
pub struct CursorState {
    icon: CursorIcon,
    pending: bool,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            icon: CursorIcon::Default,
            pending: false,
        }
    }

    /// Clickable affordance while anything is hovered
    pub fn desired_for(hovered: Option<&PieceId>) -> CursorIcon {
        match hovered {
            Some(_) => CursorIcon::Pointer,
            None => CursorIcon::Default,
        }
    }

    pub fn icon(&self) -> CursorIcon {
        self.icon
    }

    /// Returns whether the icon changed
    pub fn set(&mut self, icon: CursorIcon) -> bool {
        if self.icon == icon {
            return false;
        }
        self.icon = icon;
        self.pending = true;
        true
    }

    pub fn reset(&mut self) {
        self.set(CursorIcon::Default);
    }

    pub fn has_pending_change(&self) -> bool {
        self.pending
    }

    /// Takes the latched change, if any
    pub fn take_change(&mut self) -> Option<CursorIcon> {
        if std::mem::take(&mut self.pending) {
            Some(self.icon)
        } else {
            None
        }
    }

    /// Pushes a latched change to the window
    pub fn apply_to(&mut self, window: &Window) {
        if let Some(icon) = self.take_change() {
            window.set_cursor(icon);
        }
    }
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-frame task keeping the cursor in sync with hover state
pub struct CursorTask;

impl FrameTask for CursorTask {
    fn name(&self) -> &str {
        "cursor"
    }

    fn tick(&mut self, ctx: &mut FrameContext<'_>) -> Result<()> {
        let desired = CursorState::desired_for(ctx.session.hover()?.hovered());
        ctx.cursor.set(desired);
        Ok(())
    }

    fn teardown(&mut self, ctx: &mut FrameContext<'_>) {
        ctx.cursor.reset();
    }
}
