//! Per-frame task interface
//!
//! Work that must be re-applied on every rendered frame, whether or not
//! anything observable changed, is expressed as a [`FrameTask`] and driven by
//! the [`FrameScheduler`](super::FrameScheduler).

use crate::error::Result;
use crate::hover::{CursorState, HoverSession};
use crate::isolate::Piece;

use super::output::FrameOutput;

/// Everything a task may read or write during one frame
pub struct FrameContext<'a> {
    pub session: &'a HoverSession,
    pub pieces: &'a mut [Piece],
    pub cursor: &'a mut CursorState,
    pub output: &'a mut FrameOutput,
}

/// Core trait for scheduled per-frame work
pub trait FrameTask {
    /// Task name for logging
    fn name(&self) -> &str;

    /// Called once per rendered frame
    ///
    /// Errors abort the rest of the frame and are returned to the caller.
    fn tick(&mut self, ctx: &mut FrameContext<'_>) -> Result<()>;

    /// Called once when the viewer is torn down, while the session is still
    /// active. Use it to release anything the task overrode.
    fn teardown(&mut self, _ctx: &mut FrameContext<'_>) {
        // Default: nothing to release
    }
}
