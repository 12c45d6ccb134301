//! Cancelable one-shot timer for the quiz feedback window.
//!
//! Holds at most one pending task. Scheduling again replaces the pending
//! fire; dropping the timer cancels it, so a timer owned by a view cannot
//! outlive that view.

use log::debug;
use std::time::Duration;
use tokio::task::AbortHandle;

#[derive(Default)]
pub struct FeedbackTimer {
    handle: Option<AbortHandle>,
}

impl FeedbackTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `on_fire` after `delay` on the tokio runtime. Must be called from
    /// within a runtime context.
    pub fn schedule<F>(&mut self, delay: Duration, on_fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire();
        });
        self.handle = Some(task.abort_handle());
        debug!("Feedback timer scheduled ({} ms)", delay.as_millis());
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take()
            && !handle.is_finished()
        {
            handle.abort();
            debug!("Feedback timer cancelled");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for FeedbackTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
