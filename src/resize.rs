//! Owned resize subscriptions.
//!
//! A [`Subscription`] is the only handle to an installed resize handler:
//! dropping it removes the handler. The chart port keeps at most one and
//! replaces it on every render request, so exactly one handler per chart
//! surface is ever live.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

pub trait ResizeSource {
    /// Install `handler` for viewport resizes until the returned
    /// subscription is dropped.
    fn subscribe(&self, handler: Box<dyn Fn()>) -> Subscription;
}

/// Handle for an installed handler; unsubscribes on drop.
#[must_use = "dropping a subscription removes its handler immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// A subscription with nothing to remove, for sources that failed to
    /// install the handler.
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(feature = "browser")]
pub use browser::WindowResize;

#[cfg(feature = "browser")]
mod browser {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    use super::{ResizeSource, Subscription};
    use crate::error::js_message;

    const RESIZE_EVENT: &str = "resize";

    /// Window `resize` events, one listener per subscription.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct WindowResize;

    impl ResizeSource for WindowResize {
        fn subscribe(&self, handler: Box<dyn Fn()>) -> Subscription {
            let Some(window) = web_sys::window() else {
                log::warn!("resize: no window; handler not installed");
                return Subscription::detached();
            };

            let closure = Closure::wrap(handler);
            if let Err(err) =
                window.add_event_listener_with_callback(RESIZE_EVENT, closure.as_ref().unchecked_ref())
            {
                log::warn!("resize: add listener failed: {}", js_message(&err));
                return Subscription::detached();
            }

            Subscription::new(move || {
                if let Err(err) =
                    window.remove_event_listener_with_callback(RESIZE_EVENT, closure.as_ref().unchecked_ref())
                {
                    log::warn!("resize: remove listener failed: {}", js_message(&err));
                }
            })
        }
    }
}
