//! Trailing-edge debounce for rapid-fire input.
//!
//! Each `schedule` cancels the previous pending timer, so a burst of
//! keystrokes collapses into one callback after the quiet period. Owners must
//! call `cancel` on teardown (`on_cleanup`) so no orphaned timer fires into a
//! disposed reactive scope.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Debounce window for free-text search inputs, in milliseconds.
pub const SEARCH_DEBOUNCE_MS: i32 = 400;

// wasm-bindgen imports panic when called off-wasm, so the window lookup is
// target-gated rather than checked at runtime.
#[cfg(target_arch = "wasm32")]
fn browser_window() -> Option<web_sys::Window> {
    web_sys::window()
}

#[cfg(not(target_arch = "wasm32"))]
fn browser_window() -> Option<web_sys::Window> {
    None
}

#[derive(Clone, Copy)]
pub struct Debouncer {
    timeout: StoredValue<Option<i32>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self {
            timeout: StoredValue::new(None),
        }
    }

    /// Schedule `f` after `delay_ms`, replacing any pending schedule.
    ///
    /// Without a window (non-browser build) the callback runs immediately.
    pub fn schedule(&self, delay_ms: i32, f: impl FnOnce() + 'static) {
        self.cancel();

        let window = match browser_window() {
            Some(w) => w,
            None => {
                f();
                return;
            }
        };

        let closure = Closure::once(f);
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref::<js_sys::Function>(),
            delay_ms,
        ) {
            Ok(timeout_id) => {
                closure.forget();
                self.timeout.set_value(Some(timeout_id));
            }
            Err(e) => log::error!("setTimeout failed: {:?}", e),
        }
    }

    /// Cancel the pending schedule, if any.
    pub fn cancel(&self) {
        if let Some(timeout_id) = self.timeout.get_value() {
            if let Some(window) = browser_window() {
                window.clear_timeout_with_handle(timeout_id);
            }
            self.timeout.set_value(None);
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_without_window_callback_runs_exactly_once() {
        let debouncer = Debouncer::new();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();

        debouncer.schedule(SEARCH_DEBOUNCE_MS, move || counter.set(counter.get() + 1));

        assert_eq!(calls.get(), 1);
        // An immediate run leaves no pending handle behind
        assert_eq!(debouncer.timeout.get_value(), None);
    }

    #[test]
    fn test_schedule_replaces_pending_handle() {
        let debouncer = Debouncer::new();
        debouncer.timeout.set_value(Some(42));
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();

        debouncer.schedule(SEARCH_DEBOUNCE_MS, move || counter.set(counter.get() + 1));

        // The stale handle was cancelled before the new schedule ran
        assert_eq!(debouncer.timeout.get_value(), None);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_cancel_clears_pending_handle() {
        let debouncer = Debouncer::new();
        debouncer.timeout.set_value(Some(7));

        debouncer.cancel();
        assert_eq!(debouncer.timeout.get_value(), None);

        // Cancelling with nothing pending stays quiet
        debouncer.cancel();
        assert_eq!(debouncer.timeout.get_value(), None);
    }
}
