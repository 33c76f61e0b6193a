//! Deterministic scheduler for unit tests.

use std::cell::RefCell;
use std::time::Duration;

use crate::debounce::Scheduler;

struct Task {
    due_ms: u64,
    id: u64,
    run: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct ClockState {
    now_ms: u64,
    next_id: u64,
    tasks: Vec<Task>,
}

/// Virtual millisecond clock. Tasks run only inside [`VirtualClock::advance`],
/// in due-time order (ties in scheduling order).
#[derive(Default)]
pub(crate) struct VirtualClock {
    state: RefCell<ClockState>,
}

impl VirtualClock {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }

    pub(crate) fn pending_tasks(&self) -> usize {
        self.state.borrow().tasks.len()
    }

    /// Moves time forward by `ms`, running every task that comes due. Tasks
    /// scheduled while advancing run too if they fall inside the window.
    pub(crate) fn advance(&self, ms: u64) {
        let target = self.now_ms() + ms;
        loop {
            let next = {
                let mut st = self.state.borrow_mut();
                let idx = st
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due_ms <= target)
                    .min_by_key(|(_, t)| (t.due_ms, t.id))
                    .map(|(i, _)| i);
                idx.map(|i| {
                    let task = st.tasks.swap_remove(i);
                    st.now_ms = task.due_ms;
                    task
                })
            };
            match next {
                Some(task) => (task.run)(),
                None => break,
            }
        }
        self.state.borrow_mut().now_ms = target;
    }
}

impl Scheduler for VirtualClock {
    type Handle = u64;

    fn schedule(&self, after: Duration, task: Box<dyn FnOnce()>) -> u64 {
        let mut st = self.state.borrow_mut();
        let id = st.next_id;
        st.next_id += 1;
        let due_ms = st.now_ms + after.as_millis() as u64;
        st.tasks.push(Task {
            due_ms,
            id,
            run: task,
        });
        id
    }

    fn cancel(&self, handle: u64) {
        self.state.borrow_mut().tasks.retain(|t| t.id != handle);
    }
}
