//! Transient form notice.
//!
//! One slot: showing a notice replaces whatever is there. A notice stays
//! `Visible` for the configured lifetime, switches to `Leaving` while the exit
//! animation plays, then disappears.
//!
//! Timers are never cancelled. Each one is armed for a specific [`NoticeId`]
//! and does nothing if that notice has since been replaced, so a stale
//! timer cannot touch a newer notice.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::config::SiteConfig;
use crate::debounce::Scheduler;

pub type NoticeId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticePhase {
    Visible,
    Leaving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub kind: NoticeKind,
    pub text: String,
    pub phase: NoticePhase,
}

impl Notice {
    /// `form-message form-message-{kind}`, plus `form-message-leaving` during
    /// the exit animation.
    pub fn class(&self) -> String {
        let mut class = format!("form-message form-message-{}", self.kind.as_str());
        if self.phase == NoticePhase::Leaving {
            class.push_str(" form-message-leaving");
        }
        class
    }
}

type RenderFn = Box<dyn Fn(Option<&Notice>)>;

struct NoticeInner<S: Scheduler> {
    scheduler: S,
    ttl: Duration,
    exit: Duration,
    next_id: Cell<NoticeId>,
    current: RefCell<Option<Notice>>,
    render: RenderFn,
}

impl<S: Scheduler + 'static> NoticeInner<S> {
    fn publish(&self) {
        let snapshot = self.current.borrow().clone();
        (self.render)(snapshot.as_ref());
    }

    fn is_current(&self, id: NoticeId) -> bool {
        self.current.borrow().as_ref().is_some_and(|n| n.id == id)
    }

    fn begin_exit(self: &Rc<Self>, id: NoticeId) {
        {
            let mut current = self.current.borrow_mut();
            match current.as_mut() {
                Some(n) if n.id == id && n.phase == NoticePhase::Visible => {
                    n.phase = NoticePhase::Leaving;
                }
                _ => {
                    tracing::trace!(id, "stale notice exit timer");
                    return;
                }
            }
        }
        self.publish();

        let weak = Rc::downgrade(self);
        self.scheduler.schedule(
            self.exit,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.remove(id);
                }
            }),
        );
    }

    fn remove(&self, id: NoticeId) {
        if !self.is_current(id) {
            tracing::trace!(id, "stale notice removal timer");
            return;
        }
        self.current.borrow_mut().take();
        self.publish();
    }
}

/// Owns the notice slot and its timers. Every change is pushed to the render
/// callback (`None` when the slot empties).
pub struct NoticeController<S: Scheduler> {
    inner: Rc<NoticeInner<S>>,
}

impl<S: Scheduler> Clone for NoticeController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: Scheduler + 'static> NoticeController<S> {
    pub fn new(
        scheduler: S,
        ttl: Duration,
        exit: Duration,
        render: impl Fn(Option<&Notice>) + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(NoticeInner {
                scheduler,
                ttl,
                exit,
                next_id: Cell::new(1),
                current: RefCell::new(None),
                render: Box::new(render),
            }),
        }
    }

    pub fn from_config(
        scheduler: S,
        config: &SiteConfig,
        render: impl Fn(Option<&Notice>) + 'static,
    ) -> Self {
        Self::new(
            scheduler,
            config.notice_ttl(),
            config.notice_exit(),
            render,
        )
    }

    /// Replaces the current notice and arms its dismissal timer.
    pub fn show(&self, kind: NoticeKind, text: impl Into<String>) -> NoticeId {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        *self.inner.current.borrow_mut() = Some(Notice {
            id,
            kind,
            text: text.into(),
            phase: NoticePhase::Visible,
        });
        self.inner.publish();

        let weak: Weak<NoticeInner<S>> = Rc::downgrade(&self.inner);
        self.inner.scheduler.schedule(
            self.inner.ttl,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.begin_exit(id);
                }
            }),
        );
        id
    }

    pub fn current(&self) -> Option<Notice> {
        self.inner.current.borrow().clone()
    }
}
