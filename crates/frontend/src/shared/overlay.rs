//! Centralized overlay manager.
//!
//! One owned "current overlay" slot with `open`/`close`, provided via context
//! and injected where needed. `OverlayHost` renders the slot at the app root;
//! Escape and backdrop click close a dismissable overlay.

use leptos::prelude::*;
use std::sync::Arc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

#[derive(Clone)]
struct OverlayEntry {
    builder: Arc<dyn Fn() -> AnyView + Send + Sync>,
    dismissable: bool,
}

#[derive(Clone, Copy)]
pub struct OverlayService {
    current: RwSignal<Option<OverlayEntry>>,
}

impl OverlayService {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
        }
    }

    /// Open an overlay, replacing whatever was shown before.
    pub fn open(&self, builder: impl Fn() -> AnyView + Send + Sync + 'static) {
        self.open_entry(builder, true);
    }

    /// Open an overlay that backdrop click and Escape will not close
    /// (busy confirmations; content must close itself).
    pub fn open_undismissable(&self, builder: impl Fn() -> AnyView + Send + Sync + 'static) {
        self.open_entry(builder, false);
    }

    fn open_entry(&self, builder: impl Fn() -> AnyView + Send + Sync + 'static, dismissable: bool) {
        self.current.set(Some(OverlayEntry {
            builder: Arc::new(builder),
            dismissable,
        }));
    }

    pub fn close(&self) {
        self.current.set(None);
    }

    pub fn is_open(&self) -> bool {
        self.current.get().is_some()
    }
}

impl Default for OverlayService {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the overlay slot. Must be mounted exactly once, at the app root.
#[component]
pub fn OverlayHost() -> impl IntoView {
    let svc = use_context::<OverlayService>()
        .expect("OverlayService not provided in context (provide it in app root)");

    // Global Escape handler. OverlayHost lives for the whole app lifetime,
    // so the closure is forgotten intentionally.
    Effect::new(move |_| {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() {
                if keyboard_event.key() == "Escape" {
                    let dismissable = svc
                        .current
                        .get_untracked()
                        .map(|e| e.dismissable)
                        .unwrap_or(false);
                    if dismissable {
                        svc.close();
                    }
                }
            }
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    });

    view! {
        {move || {
            svc.current
                .get()
                .map(|entry| {
                    let dismissable = entry.dismissable;
                    let content = (entry.builder)();
                    view! {
                        <div
                            class="modal-overlay"
                            style="position: fixed; inset: 0; background: rgba(0,0,0,0.4); display: flex; align-items: center; justify-content: center; z-index: 1000;"
                            on:click=move |_| {
                                if dismissable {
                                    svc.close();
                                }
                            }
                        >
                            <div
                                class="modal-content"
                                style="background: white; border-radius: 6px; padding: 16px; min-width: 360px; max-width: 90vw; max-height: 90vh; overflow-y: auto;"
                                on:click=|e| e.stop_propagation()
                            >
                                {content}
                            </div>
                        </div>
                    }
                    .into_any()
                })
                .unwrap_or_else(|| view! { <></> }.into_any())
        }}
    }
}
