use crate::admin::api::fetch_options;
use crate::admin::form::RecordForm;
use crate::admin::registry;
use crate::admin::seq::RequestSeq;
use crate::shared::debounce::{Debouncer, SEARCH_DEBOUNCE_MS};
use crate::shared::icons::icon;
use contracts::admin::{display_text, record_id, Record, SelectOption};
use leptos::prelude::*;

/// Build a picker option from a just-created record.
fn option_from_record(record: &Record) -> Option<SelectOption> {
    let id = record_id(record)?;
    Some(SelectOption {
        value: id.to_string(),
        label: display_text(record, "name"),
        extra: None,
    })
}

/// Seed for the inline creation form: the unmatched search text becomes the
/// new record's name.
fn creation_seed(typed: &str) -> Record {
    let mut seed = Record::new();
    if !typed.trim().is_empty() {
        seed.insert(
            "name".to_string(),
            serde_json::Value::String(typed.trim().to_string()),
        );
    }
    seed
}

/// Related-entity picker: debounced remote search over a dropdown endpoint,
/// plus an inline "new" shortcut for the related entity.
///
/// The creation form renders in a layer owned by this component, not in the
/// app-level overlay slot: the picker may itself sit inside an overlay (a
/// record form's dropdown field), and taking the shared slot would tear that
/// parent form down. The layer back-fills the created record and returns to
/// the still-open parent.
#[component]
pub fn SearchableSelectOrCreate(
    /// Segment under `/api/dropdown/`
    #[prop(into)]
    endpoint: String,
    /// Two-way selection slot owned by the caller
    value: RwSignal<Option<SelectOption>>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    let open = RwSignal::new(false);
    let search = RwSignal::new(String::new());
    let options = RwSignal::new(Vec::<SelectOption>::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);
    // Some(seed) while the inline creation layer is shown
    let creating = RwSignal::new(Option::<Record>::None);

    let endpoint = StoredValue::new(endpoint);
    let seq = StoredValue::new(RequestSeq::new());

    let debouncer = Debouncer::new();
    on_cleanup(move || debouncer.cancel());

    let run_search = move |term: String| {
        let token = seq.try_update_value(|s| s.begin()).unwrap_or_default();
        loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_options(&endpoint.get_value(), &term).await;
            if !seq.with_value(|s| s.is_current(token)) {
                return;
            }
            loading.set(false);
            match result {
                Ok(found) => {
                    options.set(found);
                    error.set(None);
                }
                Err(e) => error.set(Some(e.message)),
            }
        });
    };

    let open_list = move |_| {
        open.set(true);
        run_search(search.get_untracked());
    };

    let handle_input = move |term: String| {
        search.set(term.clone());
        open.set(true);
        debouncer.schedule(SEARCH_DEBOUNCE_MS, move || run_search(term));
    };

    let pick = move |option: SelectOption| {
        value.set(Some(option));
        search.set(String::new());
        open.set(false);
    };

    let clear = move |_| {
        value.set(None);
        search.set(String::new());
        open.set(false);
    };

    let create_inline = move |_| {
        open.set(false);
        creating.set(Some(creation_seed(&search.get_untracked())));
    };

    let can_create = endpoint.with_value(|e| registry::descriptor_for(e).is_some());

    view! {
        <div class="select-or-create" style="position: relative;">
            {move || match value.get() {
                Some(selected) => view! {
                    <div style="display: flex; align-items: center; gap: 6px; padding: 6px 10px; border: 1px solid #ddd; border-radius: 4px; background: #f2f8f2;">
                        <span style="flex: 1; font-size: 14px;">{selected.label.clone()}</span>
                        <button
                            style="background: none; border: none; cursor: pointer; color: #666; padding: 2px; line-height: 1;"
                            on:click=clear
                            title="Clear selection"
                        >
                            {icon("x")}
                        </button>
                    </div>
                }.into_any(),
                None => view! {
                    <input
                        type="text"
                        placeholder=placeholder.clone()
                        style="width: 100%; padding: 6px 10px; border: 1px solid #ddd; border-radius: 4px; font-size: 14px; box-sizing: border-box;"
                        prop:value=move || search.get()
                        on:focus=open_list
                        on:input=move |ev| handle_input(event_target_value(&ev))
                    />
                }.into_any(),
            }}

            {move || (open.get() && value.get().is_none()).then(|| view! {
                <div
                    class="select-options"
                    style="position: absolute; top: 100%; left: 0; right: 0; background: white; border: 1px solid #ddd; border-radius: 4px; max-height: 240px; overflow-y: auto; z-index: 100; box-shadow: 0 2px 8px rgba(0,0,0,0.12);"
                >
                    {move || error.get().map(|e| view! {
                        <div style="padding: 8px 10px; color: #c33; font-size: 13px;">{e}</div>
                    })}
                    {move || loading.get().then(|| view! {
                        <div style="padding: 8px 10px; color: #888; font-size: 13px;">{"Loading..."}</div>
                    })}
                    {move || {
                        let found = options.get();
                        if found.is_empty() && !loading.get() {
                            view! {
                                <div style="padding: 8px 10px; color: #888; font-size: 13px;">{"No matches"}</div>
                            }.into_any()
                        } else {
                            found.into_iter().map(|option| {
                                let label = option.label.clone();
                                let extra = option.extra.clone();
                                view! {
                                    <div
                                        style="padding: 7px 10px; cursor: pointer; font-size: 14px; border-bottom: 1px solid #f2f2f2;"
                                        on:click=move |_| pick(option.clone())
                                    >
                                        {label}
                                        {extra.map(|e| view! {
                                            <span style="color: #888; font-size: 12px; margin-left: 6px;">{e}</span>
                                        })}
                                    </div>
                                }
                            }).collect_view().into_any()
                        }
                    }}
                    {can_create.then(|| view! {
                        <div
                            style="padding: 7px 10px; cursor: pointer; font-size: 14px; color: #2a7; border-top: 1px solid #eee; display: flex; align-items: center; gap: 4px;"
                            on:click=create_inline
                        >
                            {icon("plus")}
                            {" New..."}
                        </div>
                    })}
                </div>
            })}

            {move || creating.get().and_then(|seed| {
                endpoint.with_value(|e| registry::descriptor_for(e)).map(|descriptor| {
                    let on_saved = Callback::new(move |record: Record| {
                        if let Some(option) = option_from_record(&record) {
                            value.set(Some(option));
                        }
                        search.set(String::new());
                        creating.set(None);
                    });
                    let on_cancel = Callback::new(move |_| creating.set(None));
                    view! {
                        <div
                            class="picker-create-layer"
                            style="position: fixed; inset: 0; background: rgba(0,0,0,0.4); display: flex; align-items: center; justify-content: center; z-index: 1100;"
                            on:click=move |_| creating.set(None)
                        >
                            <div
                                style="background: white; border-radius: 6px; padding: 16px; min-width: 360px; max-width: 90vw; max-height: 90vh; overflow-y: auto;"
                                on:click=|e| e.stop_propagation()
                            >
                                <RecordForm
                                    descriptor=descriptor
                                    initial=seed
                                    on_saved=on_saved
                                    on_cancel=on_cancel
                                />
                            </div>
                        </div>
                    }
                })
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_option_from_record() {
        let record = json!({"id": 12, "name": "Nimal Perera"})
            .as_object()
            .unwrap()
            .clone();
        let option = option_from_record(&record).unwrap();
        assert_eq!(option.value, "12");
        assert_eq!(option.label, "Nimal Perera");

        let no_id = json!({"name": "ghost"}).as_object().unwrap().clone();
        assert!(option_from_record(&no_id).is_none());
    }

    #[test]
    fn test_creation_seed_captures_typed_text() {
        let seed = creation_seed("  St. Anne Clinic ");
        assert_eq!(seed["name"], json!("St. Anne Clinic"));

        assert!(creation_seed("").is_empty());
        assert!(creation_seed("   ").is_empty());
    }

    /// Inline creation must not touch the app-level overlay slot: the booking
    /// form sitting in that slot has to survive a patient being created from
    /// its picker.
    #[test]
    fn test_inline_create_leaves_shared_overlay_alone() {
        use crate::shared::overlay::OverlayService;

        let overlay = OverlayService::new();
        overlay.open(|| ().into_any());
        assert!(overlay.is_open());

        // Typing an unmatched name and choosing "New..." raises the local layer
        let creating = RwSignal::new(Option::<Record>::None);
        creating.set(Some(creation_seed("Nimal Perera")));
        assert!(overlay.is_open());

        // Saving back-fills the picker and drops the layer
        let value = RwSignal::new(Option::<SelectOption>::None);
        let created = json!({"id": 31, "name": "Nimal Perera"})
            .as_object()
            .unwrap()
            .clone();
        value.set(option_from_record(&created));
        creating.set(None);

        assert!(overlay.is_open());
        assert!(creating.get_untracked().is_none());
        let selected = value.get_untracked().unwrap();
        assert_eq!(selected.value, "31");
        assert_eq!(selected.label, "Nimal Perera");
    }
}
