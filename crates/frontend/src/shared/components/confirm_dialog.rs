use leptos::prelude::*;

/// Confirmation step in front of a destructive action.
///
/// The caller owns `busy` and `error`: on failure it sets `error` and the
/// dialog stays open so the user can retry or cancel.
#[component]
pub fn ConfirmDialog(
    #[prop(into)] message: String,
    #[prop(optional, into)] confirm_label: String,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    let confirm_label = if confirm_label.is_empty() {
        "Delete".to_string()
    } else {
        confirm_label
    };

    view! {
        <div class="confirm-dialog">
            <p style="margin: 0 0 12px 0; font-size: 15px;">{message}</p>

            {move || error.get().map(|e| view! {
                <div class="error" style="background: #fee; color: #c33; padding: 8px; border-radius: 4px; margin-bottom: 12px; font-size: 14px;">
                    {e}
                </div>
            })}

            <div style="display: flex; gap: 8px; justify-content: flex-end;">
                <button
                    class="button button--secondary"
                    on:click=move |_| on_cancel.run(())
                    disabled=move || busy.get()
                >
                    {"Cancel"}
                </button>
                <button
                    class="button button--danger"
                    style="background: #c0392b; color: white;"
                    on:click=move |_| on_confirm.run(())
                    disabled=move || busy.get()
                >
                    {
                        let label = confirm_label.clone();
                        move || if busy.get() { "Working...".to_string() } else { label.clone() }
                    }
                </button>
            </div>
        </div>
    }
}
