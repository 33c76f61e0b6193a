//! Deferred work on a single-threaded event loop.
//!
//! [`Scheduler`] is the timer capability (the browser's `setTimeout` in
//! production, a virtual clock in tests). [`debounce`] builds a
//! trailing-edge rate limiter on top of it: bursts of calls collapse into a
//! single invocation that runs once the input has been quiet for `wait`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Fire-and-forget timer capability.
pub trait Scheduler {
    type Handle;

    /// Runs `task` once after `after` has elapsed.
    fn schedule(&self, after: Duration, task: Box<dyn FnOnce()>) -> Self::Handle;

    /// Drops a task that has not run yet. Cancelling a task that already ran
    /// is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

impl<S: Scheduler + ?Sized> Scheduler for Rc<S> {
    type Handle = S::Handle;

    fn schedule(&self, after: Duration, task: Box<dyn FnOnce()>) -> Self::Handle {
        (**self).schedule(after, task)
    }

    fn cancel(&self, handle: Self::Handle) {
        (**self).cancel(handle)
    }
}

struct Inner<S: Scheduler, A> {
    scheduler: S,
    wait: Duration,
    f: Box<dyn Fn(A)>,
    pending: RefCell<Option<S::Handle>>,
    latest: RefCell<Option<A>>,
}

impl<S: Scheduler, A> Inner<S, A> {
    fn take_pending(&self) -> Option<S::Handle> {
        self.pending.borrow_mut().take()
    }

    fn fire(&self) {
        // Release both borrows before calling out; `f` may call back in.
        self.pending.borrow_mut().take();
        let arg = self.latest.borrow_mut().take();
        if let Some(arg) = arg {
            (self.f)(arg);
        }
    }
}

/// Trailing-edge debounced wrapper around a handler. Cheap to clone; clones
/// share the pending invocation.
pub struct Debounced<S: Scheduler, A> {
    inner: Rc<Inner<S, A>>,
}

impl<S: Scheduler, A> Clone for Debounced<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S, A> Debounced<S, A>
where
    S: Scheduler + 'static,
    A: 'static,
{
    /// Records `arg` as the latest input and restarts the quiet-period timer.
    pub fn call(&self, arg: A) {
        if let Some(handle) = self.inner.take_pending() {
            self.inner.scheduler.cancel(handle);
        }
        *self.inner.latest.borrow_mut() = Some(arg);

        let weak: Weak<Inner<S, A>> = Rc::downgrade(&self.inner);
        let handle = self.inner.scheduler.schedule(
            self.inner.wait,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.fire();
                }
            }),
        );
        *self.inner.pending.borrow_mut() = Some(handle);
    }

    /// Runs the pending invocation now, if any.
    pub fn flush(&self) {
        if let Some(handle) = self.inner.take_pending() {
            self.inner.scheduler.cancel(handle);
            self.inner.fire();
        }
    }

    /// Drops the pending invocation without running it.
    pub fn cancel(&self) {
        if let Some(handle) = self.inner.take_pending() {
            self.inner.scheduler.cancel(handle);
        }
        self.inner.latest.borrow_mut().take();
    }

    pub fn is_pending(&self) -> bool {
        self.inner.pending.borrow().is_some()
    }

    pub fn wait(&self) -> Duration {
        self.inner.wait
    }
}

/// Wraps `f` so that it runs only after `wait` has passed without another
/// call, with the argument of the last call.
pub fn debounce<S, A, F>(scheduler: S, wait: Duration, f: F) -> Debounced<S, A>
where
    S: Scheduler + 'static,
    A: 'static,
    F: Fn(A) + 'static,
{
    Debounced {
        inner: Rc::new(Inner {
            scheduler,
            wait,
            f: Box::new(f),
            pending: RefCell::new(None),
            latest: RefCell::new(None),
        }),
    }
}
