//! Deferred execution before the next repaint.
//!
//! Chart draws must observe the DOM the runtime has just committed, so they
//! are never run inline from a port callback. The browser implementation
//! uses `requestAnimationFrame` and falls back to a zero-delay timeout when
//! animation frames are unavailable.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

use std::cell::RefCell;
use std::collections::VecDeque;

/// A zero-argument unit of deferred work.
pub type Task = Box<dyn FnOnce()>;

pub trait FrameScheduler {
    /// Run `task` before the next repaint, or as soon as possible if the
    /// host cannot paint. Never runs `task` before returning.
    fn schedule(&self, task: Task);
}

/// Scheduler that holds tasks until the owner drains them.
///
/// Used on hosts without a display loop and in tests to step frames.
#[derive(Default)]
pub struct QueuedScheduler {
    pending: RefCell<VecDeque<Task>>,
}

impl QueuedScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Run the tasks queued so far, in order. Tasks scheduled while
    /// draining wait for the next call. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let batch = std::mem::take(&mut *self.pending.borrow_mut());
        let count = batch.len();
        for task in batch {
            task();
        }
        count
    }
}

impl FrameScheduler for QueuedScheduler {
    fn schedule(&self, task: Task) {
        self.pending.borrow_mut().push_back(task);
    }
}

#[cfg(feature = "browser")]
pub use browser::AnimationFrameScheduler;

#[cfg(feature = "browser")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo_timers::callback::Timeout;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    use super::{FrameScheduler, Task};
    use crate::error::js_message;

    type TaskSlot = Rc<RefCell<Option<Task>>>;

    /// `requestAnimationFrame` with a `setTimeout(0)` fallback.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct AnimationFrameScheduler;

    impl FrameScheduler for AnimationFrameScheduler {
        fn schedule(&self, task: Task) {
            let slot: TaskSlot = Rc::new(RefCell::new(Some(task)));
            let Some(window) = web_sys::window() else {
                defer_with_timeout(slot);
                return;
            };

            let slot_for_frame = Rc::clone(&slot);
            let callback = Closure::once_into_js(move |_ts: f64| run_slot(&slot_for_frame));
            if let Err(err) = window.request_animation_frame(callback.unchecked_ref()) {
                log::debug!("schedule: requestAnimationFrame unavailable ({}), using timeout", js_message(&err));
                defer_with_timeout(slot);
            }
        }
    }

    fn defer_with_timeout(slot: TaskSlot) {
        Timeout::new(0, move || run_slot(&slot)).forget();
    }

    fn run_slot(slot: &TaskSlot) {
        let task = slot.borrow_mut().take();
        if let Some(task) = task {
            task();
        }
    }
}
