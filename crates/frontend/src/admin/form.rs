//! Generic create/update form, driven entirely by a tab descriptor.
//!
//! One input per editable descriptor field, chosen by the resolved field
//! kind. Submission POSTs a new record or PUTs an existing one; on success
//! the caller patches its in-memory list with the returned record.

use crate::admin::api;
use crate::admin::descriptor::{FieldKind, ResolvedField, SortKind, TabDescriptor};
use crate::shared::components::SearchableSelectOrCreate;
use crate::shared::date_utils::today_iso;
use crate::shared::icons::icon;
use contracts::admin::{record_id, Record, SelectOption};
use contracts::error::ApiError;
use leptos::prelude::*;
use serde_json::Value;

/// Draft value as input text. Numbers render without quotes.
fn draft_text(draft: &Record, field: &str) -> String {
    match draft.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Parse plain input back into a draft value. Numeric-sorted columns are
/// stored as numbers when the text parses; otherwise the raw string is kept
/// and the backend validates it.
fn plain_value(field: &ResolvedField, raw: &str) -> Value {
    if field.sort == Some(SortKind::Numeric) {
        if let Ok(n) = raw.trim().parse::<i64>() {
            return Value::from(n);
        }
        if let Ok(f) = raw.trim().parse::<f64>() {
            return Value::from(f);
        }
    }
    Value::String(raw.to_string())
}

/// Seed a dropdown picker from the embedded relation of an existing record.
fn dropdown_initial(draft: &Record, field: &str) -> Option<SelectOption> {
    let related = draft.get(field)?.as_object()?;
    let id = related.get("id")?;
    let id = match id {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => return None,
    };
    let label = related.get("name")?.as_str()?.to_string();
    Some(SelectOption {
        value: id,
        label,
        extra: None,
    })
}

/// Write a dropdown selection into the draft: the foreign key the backend
/// consumes (`{field}Id`) plus the embedded relation so the patched row
/// renders without a re-fetch.
fn apply_dropdown(draft: &mut Record, field: &str, selection: Option<&SelectOption>) {
    let fk = format!("{}Id", field);
    match selection {
        Some(option) => {
            let id_value = option
                .value
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(option.value.clone()));
            draft.insert(fk, id_value.clone());
            draft.insert(
                field.to_string(),
                serde_json::json!({ "id": id_value, "name": option.label }),
            );
        }
        None => {
            draft.remove(&fk);
            draft.remove(field);
        }
    }
}

fn field_view(
    field: ResolvedField,
    draft: RwSignal<Record>,
    error: RwSignal<Option<ApiError>>,
) -> AnyView {
    let name = field.name.clone();
    let header = field.header.clone();

    let error_line = {
        let name = name.clone();
        move || {
            error
                .get()
                .and_then(|e| e.field_message(&name).map(String::from))
                .map(|message| {
                    view! {
                        <div class="field-error" style="color: #c33; font-size: 13px; margin-top: 2px;">
                            {message}
                        </div>
                    }
                })
        }
    };

    let control = match field.kind.clone() {
        FieldKind::Dropdown(endpoint) => {
            let selection =
                RwSignal::new(dropdown_initial(&draft.get_untracked(), &name));
            let name_for_effect = name.clone();
            Effect::new(move |prev: Option<()>| {
                let selected = selection.get();
                // First run with no selection: leave the draft untouched so an
                // existing foreign key without an embedded relation survives
                if prev.is_none() && selected.is_none() {
                    return;
                }
                draft.update(|d| apply_dropdown(d, &name_for_effect, selected.as_ref()));
            });
            view! {
                <SearchableSelectOrCreate
                    endpoint=endpoint
                    value=selection
                    placeholder=format!("Search {}...", header.to_lowercase())
                />
            }
            .into_any()
        }
        FieldKind::Enum(choices) => {
            let name_for_change = name.clone();
            let name_for_value = name.clone();
            view! {
                <select
                    style="padding: 6px 10px; border: 1px solid #ddd; border-radius: 4px; font-size: 14px; width: 100%;"
                    prop:value=move || draft_text(&draft.get(), &name_for_value)
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| {
                            if value.is_empty() {
                                d.remove(&name_for_change);
                            } else {
                                d.insert(name_for_change.clone(), Value::String(value.clone()));
                            }
                        });
                    }
                >
                    <option value="">{"—"}</option>
                    {choices.iter().map(|choice| {
                        let choice = choice.clone();
                        view! { <option value=choice.clone()>{choice.clone()}</option> }
                    }).collect_view()}
                </select>
            }
            .into_any()
        }
        FieldKind::Date => {
            let name_for_input = name.clone();
            let name_for_value = name.clone();
            view! {
                <input
                    type="date"
                    style="padding: 6px 10px; border: 1px solid #ddd; border-radius: 4px; font-size: 14px;"
                    prop:value=move || draft_text(&draft.get(), &name_for_value)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| {
                            d.insert(name_for_input.clone(), Value::String(value.clone()));
                        });
                    }
                />
            }
            .into_any()
        }
        FieldKind::Plain => {
            let field_for_input = field.clone();
            let name_for_value = name.clone();
            view! {
                <input
                    type="text"
                    style="padding: 6px 10px; border: 1px solid #ddd; border-radius: 4px; font-size: 14px; width: 100%;"
                    prop:value=move || draft_text(&draft.get(), &name_for_value)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        let parsed = plain_value(&field_for_input, &value);
                        draft.update(|d| {
                            d.insert(field_for_input.name.clone(), parsed.clone());
                        });
                    }
                />
            }
            .into_any()
        }
    };

    view! {
        <div class="form-group" style="margin-bottom: 10px;">
            <label style="display: block; font-size: 13px; color: #555; margin-bottom: 3px;">
                {field.header.clone()}
            </label>
            {control}
            {error_line}
        </div>
    }
    .into_any()
}

#[component]
pub fn RecordForm(
    descriptor: TabDescriptor,
    #[prop(optional, into)] initial: Option<Record>,
    on_saved: Callback<Record>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let editing_id = initial.as_ref().and_then(record_id);
    let mut seed = initial.unwrap_or_default();
    if editing_id.is_none() {
        // Date fields default to today; the front desk mostly books same-day
        for field in descriptor.resolved_fields() {
            if field.kind == FieldKind::Date && !seed.contains_key(&field.name) {
                seed.insert(field.name.clone(), Value::String(today_iso()));
            }
        }
    }
    let draft = RwSignal::new(seed);
    let error = RwSignal::new(Option::<ApiError>::None);
    let saving = RwSignal::new(false);

    let title = if editing_id.is_some() {
        format!("{}: edit", descriptor.title)
    } else {
        format!("{}: new", descriptor.title)
    };

    let form_fields: Vec<ResolvedField> = descriptor
        .resolved_fields()
        .iter()
        .filter(|f| f.editable())
        .cloned()
        .collect();

    let descriptor = StoredValue::new(descriptor);

    let save = move |_| {
        let current = draft.get_untracked();
        if let Err(e) = descriptor.with_value(|d| d.validate_draft(&current)) {
            error.set(Some(e));
            return;
        }
        let entity = descriptor.with_value(|d| d.id.clone());
        saving.set(true);
        error.set(None);
        wasm_bindgen_futures::spawn_local(async move {
            let result = match editing_id {
                Some(id) => api::update_record(&entity, id, &draft.get_untracked()).await,
                None => api::create_record(&entity, &draft.get_untracked()).await,
            };
            saving.set(false);
            match result {
                Ok(record) => on_saved.run(record),
                Err(e) => error.set(Some(e)),
            }
        });
    };

    view! {
        <div class="details-container" style="min-width: 380px;">
            <div class="details-header">
                <h3 style="margin: 0 0 12px 0;">{title}</h3>
            </div>

            {move || error.get().map(|e| view! {
                <div class="error" style="background: #fee; color: #c33; padding: 8px; border-radius: 4px; margin-bottom: 12px; font-size: 14px;">
                    {e.message.clone()}
                </div>
            })}

            <div class="details-form">
                {form_fields
                    .into_iter()
                    .map(|field| field_view(field, draft, error))
                    .collect_view()}
            </div>

            <div class="details-actions" style="display: flex; gap: 8px; justify-content: flex-end; margin-top: 12px;">
                <button
                    class="button button--secondary"
                    on:click=move |_| on_cancel.run(())
                    disabled=move || saving.get()
                >
                    {"Cancel"}
                </button>
                <button
                    class="button button--primary"
                    on:click=save
                    disabled=move || saving.get()
                >
                    {icon("save")}
                    {move || if saving.get() { " Saving..." } else { " Save" }}
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_plain_value_numeric_column() {
        let field = ResolvedField {
            name: "unitPrice".to_string(),
            header: "Unit price".to_string(),
            kind: FieldKind::Plain,
            sort: Some(SortKind::Numeric),
            badge: false,
        };
        assert_eq!(plain_value(&field, "12"), json!(12));
        assert_eq!(plain_value(&field, "12.5"), json!(12.5));
        // Unparseable input is kept for the backend to reject
        assert_eq!(plain_value(&field, "abc"), json!("abc"));
    }

    #[test]
    fn test_plain_value_text_column() {
        let field = ResolvedField {
            name: "name".to_string(),
            header: "Name".to_string(),
            kind: FieldKind::Plain,
            sort: Some(SortKind::Text),
            badge: false,
        };
        assert_eq!(plain_value(&field, "42"), json!("42"));
    }

    #[test]
    fn test_apply_dropdown_writes_fk_and_relation() {
        let mut draft = Record::new();
        let option = SelectOption {
            value: "7".to_string(),
            label: "General Hospital".to_string(),
            extra: None,
        };
        apply_dropdown(&mut draft, "hospital", Some(&option));
        assert_eq!(draft["hospitalId"], json!(7));
        assert_eq!(draft["hospital"], json!({"id": 7, "name": "General Hospital"}));

        apply_dropdown(&mut draft, "hospital", None);
        assert!(!draft.contains_key("hospitalId"));
        assert!(!draft.contains_key("hospital"));
    }

    #[test]
    fn test_dropdown_initial_from_embedded_relation() {
        let draft = record(json!({"hospital": {"id": 7, "name": "General Hospital"}}));
        let option = dropdown_initial(&draft, "hospital").unwrap();
        assert_eq!(option.value, "7");
        assert_eq!(option.label, "General Hospital");

        assert!(dropdown_initial(&draft, "doctor").is_none());
    }
}
