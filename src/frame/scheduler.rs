//! Frame scheduler
//!
//! Runs every registered task once per frame, in registration order, until
//! teardown.

use crate::error::Result;

use super::traits::{FrameContext, FrameTask};

pub struct FrameScheduler {
    tasks: Vec<Box<dyn FrameTask>>,
    frame: u64,
    stopped: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            frame: 0,
            stopped: false,
        }
    }

    /// Registers a task. Ignored once the scheduler is stopped.
    pub fn add_task(&mut self, task: Box<dyn FrameTask>) {
        if self.stopped {
            log::warn!("Ignoring frame task '{}' added after teardown", task.name());
            return;
        }
        self.tasks.push(task);
    }

    /// Runs one frame. Does nothing after teardown.
    pub fn run_frame(&mut self, ctx: &mut FrameContext<'_>) -> Result<()> {
        if self.stopped {
            return Ok(());
        }

        self.frame += 1;
        ctx.output.frame = self.frame;

        for task in &mut self.tasks {
            if let Err(e) = task.tick(ctx) {
                log::error!("Frame task '{}' failed: {}", task.name(), e);
                return Err(e);
            }
        }

        Ok(())
    }

    /// Gives every task its teardown call, then drops them. Later frames are no-ops.
    pub fn teardown(&mut self, ctx: &mut FrameContext<'_>) {
        for mut task in self.tasks.drain(..) {
            log::debug!("Tearing down frame task '{}'", task.name());
            task.teardown(ctx);
        }
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Frames run so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn task_names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.name()).collect()
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}
