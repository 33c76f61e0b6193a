use std::time::Duration;

use athletic::debounce::Scheduler;
use leptos::prelude::{set_timeout_with_handle, TimeoutHandle};

/// `setTimeout`-backed scheduler.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = Option<TimeoutHandle>;

    fn schedule(&self, after: Duration, task: Box<dyn FnOnce()>) -> Self::Handle {
        match set_timeout_with_handle(task, after) {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!("setTimeout failed: {e:?}");
                None
            }
        }
    }

    fn cancel(&self, handle: Self::Handle) {
        if let Some(handle) = handle {
            handle.clear();
        }
    }
}
