use crate::shared::debounce::{Debouncer, SEARCH_DEBOUNCE_MS};
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Free-text search box with trailing-edge debounce and a clear button.
///
/// `on_change` fires once per quiet period, never per keystroke. The pending
/// timer is cancelled when the component is torn down.
#[component]
pub fn SearchInput(
    /// Callback with the settled search text
    on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    // Local state for the input itself (pre-debounce)
    let (input_value, set_input_value) = signal(String::new());

    let debouncer = Debouncer::new();
    on_cleanup(move || debouncer.cancel());

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        debouncer.schedule(SEARCH_DEBOUNCE_MS, move || {
            on_change.run(new_value);
        });
    };

    let clear_filter = move |_| {
        debouncer.cancel();
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div style="position: relative; display: inline-flex; align-items: center;">
            <input
                type="text"
                placeholder=placeholder
                style=move || format!(
                    "width: 280px; padding: 6px 32px 6px 10px; border: 1px solid #ddd; border-radius: 4px; font-size: 14px; background: {};",
                    if input_value.get().trim().is_empty() { "white" } else { "#fffbea" }
                )
                prop:value=move || input_value.get()
                on:input=move |ev| {
                    let val = event_target_value(&ev);
                    handle_input_change(val);
                }
            />
            {move || if !input_value.get().is_empty() {
                view! {
                    <button
                        style="position: absolute; right: 6px; background: none; border: none; cursor: pointer; padding: 4px; display: inline-flex; align-items: center; color: #666; line-height: 1;"
                        on:click=clear_filter
                        title="Clear"
                    >
                        {icon("x")}
                    </button>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}
        </div>
    }
}
