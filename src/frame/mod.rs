//! # Frame Scheduling
//!
//! Work re-applied on every rendered frame. Styling and the cursor
//! affordance both run here rather than on hover changes, so materials that
//! show up after the first frame still get styled.

pub mod output;
pub mod scheduler;
pub mod traits;

pub use output::{FrameOutput, PieceAppearance};
pub use scheduler::FrameScheduler;
pub use traits::{FrameContext, FrameTask};
