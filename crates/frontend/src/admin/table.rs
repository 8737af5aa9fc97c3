//! Schema-driven admin data grid.
//!
//! One component renders every entity page: columns, sorting, filtering,
//! pagination, row actions and the create/edit/delete flows all come from the
//! tab descriptor. Responses are guarded by a request sequence so a stale
//! response can never overwrite a newer one, and the last good rows stay on
//! screen when a fetch fails.

use crate::admin::api;
use crate::admin::descriptor::{FieldKind, RowAction, SortKind, TabDescriptor};
use crate::admin::form::RecordForm;
use crate::admin::rows::{apply_created, apply_deleted, apply_updated};
use crate::admin::seq::RequestSeq;
use crate::admin::state::QueryState;
use crate::shared::components::{ConfirmDialog, PaginationControls, SearchInput};
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::overlay::OverlayService;
use contracts::admin::{display_text, record_id, Record, SortDirection};
use leptos::prelude::*;
use std::collections::{HashMap, HashSet};

/// Row-action bookkeeping key: (record id, action id).
type ActionKey = (i64, &'static str);

/// Mark a row action as started. Refuses when the same action is already in
/// flight for this record, and clears any result left from a previous run.
fn begin_action(
    pending: &mut HashSet<ActionKey>,
    results: &mut HashMap<ActionKey, Result<String, String>>,
    key: ActionKey,
) -> bool {
    if pending.contains(&key) {
        return false;
    }
    results.remove(&key);
    pending.insert(key);
    true
}

/// Record the outcome of a finished row action next to its button.
fn finish_action(
    pending: &mut HashSet<ActionKey>,
    results: &mut HashMap<ActionKey, Result<String, String>>,
    key: ActionKey,
    outcome: Result<String, String>,
) {
    pending.remove(&key);
    results.insert(key, outcome);
}

/// Header suffix for a sortable column. The glyph pair depends on the
/// column's value type.
fn sort_glyph(kind: SortKind, active: Option<SortDirection>) -> &'static str {
    match (kind, active) {
        (SortKind::Text, Some(SortDirection::Asc)) => " A→Z",
        (SortKind::Text, Some(SortDirection::Desc)) => " Z→A",
        (SortKind::Numeric, Some(SortDirection::Asc)) => " 1→9",
        (SortKind::Numeric, Some(SortDirection::Desc)) => " 9→1",
        (_, None) => " ⇅",
    }
}

/// Pill color for badge columns, keyed on well-known status values.
fn badge_style(text: &str) -> &'static str {
    match text {
        "pending" => "background: #fdf3d8; color: #946c00;",
        "seen" => "background: #e2f4e5; color: #1e7a2e;",
        "cancelled" => "background: #fde2e2; color: #b3261e;",
        "yes" => "background: #e2f4e5; color: #1e7a2e;",
        "no" => "background: #f0f0f0; color: #666;",
        _ => "background: #eef2f7; color: #44546a;",
    }
}

#[component]
pub fn AdminTable(descriptor: TabDescriptor) -> impl IntoView {
    let rows = RwSignal::new(Vec::<Record>::new());
    let total = RwSignal::new(0usize);
    let query = RwSignal::new(QueryState::default());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);
    // Row actions in flight, and the outcome of the last finished run,
    // keyed by (record id, action id)
    let pending_actions = RwSignal::new(HashSet::<ActionKey>::new());
    let action_results = RwSignal::new(HashMap::<ActionKey, Result<String, String>>::new());

    let seq = StoredValue::new(RequestSeq::new());
    let entity = StoredValue::new(descriptor.id.clone());
    let descriptor = StoredValue::new(descriptor);

    let overlay = use_context::<OverlayService>()
        .expect("OverlayService not provided in context (provide it in app root)");

    // Deletion confirmation state, shared with the dialog in the overlay
    let del_busy = RwSignal::new(false);
    let del_error = RwSignal::new(Option::<String>::None);

    let do_fetch = move || {
        let token = seq.try_update_value(|s| s.begin()).unwrap_or_default();
        let list_query = query.get_untracked().to_list_query();
        loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = api::fetch_records(&entity.get_value(), &list_query).await;
            // A newer request owns the screen now; drop this response
            if !seq.with_value(|s| s.is_current(token)) {
                return;
            }
            loading.set(false);
            match result {
                Ok(page) => {
                    rows.set(page.data);
                    total.set(page.total);
                    error.set(None);
                }
                // Keep the last good rows visible under the error banner
                Err(e) => error.set(Some(e.message)),
            }
        });
    };

    do_fetch();

    let on_search = Callback::new(move |text: String| {
        query.update(|q| q.set_search(text));
        do_fetch();
    });

    let on_filter_change = move |raw: String| {
        let selected = raw
            .parse::<usize>()
            .ok()
            .and_then(|i| descriptor.with_value(|d| d.filters.get(i).cloned()));
        query.update(|q| match selected {
            Some(option) => q.set_filter(Some(option.field), Some(option.value)),
            None => q.set_filter(None, None),
        });
        do_fetch();
    };

    let on_page_change = Callback::new(move |page: usize| {
        query.update(|q| q.set_page(page));
        do_fetch();
    });

    let on_page_size_change = Callback::new(move |size: usize| {
        query.update(|q| q.set_page_size(size));
        do_fetch();
    });

    let open_form = move |initial: Option<Record>| {
        let on_saved = Callback::new(move |saved: Record| {
            rows.update(|list| {
                if !apply_updated(list, saved.clone()) {
                    apply_created(list, saved.clone());
                    total.update(|t| *t += 1);
                }
            });
            overlay.close();
        });
        let on_cancel = Callback::new(move |_| overlay.close());
        overlay.open(move || {
            let d = descriptor.get_value();
            match initial.clone() {
                Some(record) => view! {
                    <RecordForm descriptor=d initial=record on_saved=on_saved on_cancel=on_cancel />
                }
                .into_any(),
                None => view! {
                    <RecordForm descriptor=d on_saved=on_saved on_cancel=on_cancel />
                }
                .into_any(),
            }
        });
    };

    let request_delete = move |record: Record| {
        let Some(id) = record_id(&record) else {
            return;
        };
        del_busy.set(false);
        del_error.set(None);
        let message = descriptor.with_value(|d| d.delete_message.clone());
        let on_confirm = Callback::new(move |_| {
            del_busy.set(true);
            del_error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match api::delete_record(&entity.get_value(), id).await {
                    Ok(()) => {
                        rows.update(|list| {
                            if apply_deleted(list, id) {
                                total.update(|t| *t = t.saturating_sub(1));
                            }
                        });
                        overlay.close();
                    }
                    // Dialog stays open for retry or cancel
                    Err(e) => {
                        del_busy.set(false);
                        del_error.set(Some(e.message));
                    }
                }
            });
        });
        let on_cancel = Callback::new(move |_| overlay.close());
        overlay.open_undismissable(move || {
            view! {
                <ConfirmDialog
                    message=message.clone()
                    on_confirm=on_confirm
                    on_cancel=on_cancel
                    busy=del_busy
                    error=del_error
                />
            }
            .into_any()
        });
    };

    let run_action = move |action: RowAction, record: Record| {
        let Some(id) = record_id(&record) else {
            return;
        };
        let key = (id, action.id);
        let mut started = false;
        pending_actions.update(|p| {
            action_results.update(|r| started = begin_action(p, r, key));
        });
        if !started {
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = (action.run)(record).await.map_err(|e| e.message);
            pending_actions.update(|p| {
                action_results.update(|r| finish_action(p, r, key, outcome));
            });
        });
    };

    let header_cells = move || {
        descriptor.with_value(|d| {
            d.resolved_fields()
                .iter()
                .map(|field| {
                    let name = field.name.clone();
                    let header = field.header.clone();
                    match field.sort {
                        Some(kind) => {
                            let sort_name = name.clone();
                            let glyph = move || {
                                sort_glyph(kind, query.get().direction_for(&sort_name))
                            };
                            view! {
                                <th
                                    style="padding: 8px 10px; text-align: left; cursor: pointer; user-select: none; white-space: nowrap;"
                                    on:click=move |_| {
                                        query.update(|q| q.toggle_sort(&name));
                                        do_fetch();
                                    }
                                >
                                    {header}
                                    <span style="color: #999; font-size: 12px;">{glyph}</span>
                                </th>
                            }
                            .into_any()
                        }
                        None => view! {
                            <th style="padding: 8px 10px; text-align: left; white-space: nowrap;">
                                {header}
                            </th>
                        }
                        .into_any(),
                    }
                })
                .collect_view()
        })
    };

    let body_rows = move || {
        let fields: Vec<_> = descriptor.with_value(|d| d.resolved_fields().to_vec());
        let readonly = descriptor.with_value(|d| d.readonly);
        let actions = descriptor.with_value(|d| d.actions.clone());
        rows.get()
            .into_iter()
            .map(|record| {
                let cells = fields
                    .iter()
                    .map(|field| {
                        let mut text = display_text(&record, &field.display_path());
                        if field.kind == FieldKind::Date {
                            text = format_date(&text);
                        }
                        if field.badge && !text.is_empty() {
                            let style = badge_style(&text);
                            view! {
                                <td style="padding: 7px 10px;">
                                    <span style=format!("display: inline-block; padding: 2px 8px; border-radius: 10px; font-size: 12px; {}", style)>
                                        {text}
                                    </span>
                                </td>
                            }
                            .into_any()
                        } else {
                            view! { <td style="padding: 7px 10px;">{text}</td> }.into_any()
                        }
                    })
                    .collect_view();

                let action_buttons = actions
                    .iter()
                    .map(|action| {
                        let action = action.clone();
                        let record = record.clone();
                        let key_id = record_id(&record).unwrap_or_default();
                        let action_id = action.id;
                        let busy = move || {
                            pending_actions.with(|p| p.contains(&(key_id, action_id)))
                        };
                        // Outcome of the last run, shown next to the button
                        // until dismissed or the action runs again
                        let result_note = move || {
                            action_results
                                .with(|r| r.get(&(key_id, action_id)).cloned())
                                .map(|outcome| {
                                    let (style, text) = match outcome {
                                        Ok(message) => ("color: #1e7a2e;", message),
                                        Err(message) => ("color: #b3261e;", message),
                                    };
                                    view! {
                                        <span
                                            style=format!("font-size: 12px; margin-left: 4px; cursor: pointer; {}", style)
                                            title="Dismiss"
                                            on:click=move |_| action_results.update(|r| {
                                                r.remove(&(key_id, action_id));
                                            })
                                        >
                                            {text}
                                        </span>
                                    }
                                })
                        };
                        view! {
                            <button
                                class="button button--small"
                                title=action.label
                                disabled=busy
                                on:click=move |_| run_action(action.clone(), record.clone())
                            >
                                {icon(action.icon)}
                            </button>
                            {result_note}
                        }
                    })
                    .collect_view();

                let edit_record = record.clone();
                let delete_record = record.clone();
                let deletable = descriptor.with_value(|d| d.can_delete(&record));

                let controls = if readonly {
                    view! { <td style="padding: 7px 10px;">{action_buttons}</td> }.into_any()
                } else {
                    view! {
                        <td style="padding: 7px 10px; white-space: nowrap;">
                            {action_buttons}
                            <button
                                class="button button--small"
                                title="Edit"
                                on:click=move |_| open_form(Some(edit_record.clone()))
                            >
                                {icon("edit")}
                            </button>
                            <button
                                class="button button--small"
                                title=if deletable { "Delete" } else { "Cannot delete this record" }
                                disabled=!deletable
                                on:click=move |_| request_delete(delete_record.clone())
                            >
                                {icon("trash")}
                            </button>
                        </td>
                    }
                    .into_any()
                };

                view! {
                    <tr style="border-bottom: 1px solid #f0f0f0;">
                        {cells}
                        {controls}
                    </tr>
                }
            })
            .collect_view()
    };

    let filter_select = descriptor.with_value(|d| !d.filters.is_empty()).then(|| {
        let options = descriptor.with_value(|d| d.filters.clone());
        view! {
            <select
                style="padding: 6px 10px; border: 1px solid #ddd; border-radius: 4px; font-size: 14px;"
                on:change=move |ev| on_filter_change(event_target_value(&ev))
            >
                <option value="">{"All"}</option>
                {options
                    .iter()
                    .enumerate()
                    .map(|(i, option)| {
                        let label = option.label.clone();
                        view! { <option value=i.to_string()>{label}</option> }
                    })
                    .collect_view()}
            </select>
        }
    });

    let title = descriptor.with_value(|d| d.title.clone());
    let readonly = descriptor.with_value(|d| d.readonly);
    let search_placeholder = format!("Search {}...", title.to_lowercase());

    view! {
        <div class="admin-table">
            <div class="table-toolbar" style="display: flex; align-items: center; gap: 8px; margin-bottom: 10px; flex-wrap: wrap;">
                <h2 style="margin: 0 12px 0 0; font-size: 18px;">{title}</h2>
                <SearchInput on_change=on_search placeholder=search_placeholder />
                {filter_select}
                <button class="button" title="Reload" on:click=move |_| do_fetch()>
                    {icon("refresh")}
                </button>
                {(!readonly).then(|| view! {
                    <button
                        class="button button--primary"
                        on:click=move |_| open_form(None)
                    >
                        {icon("plus")}
                        {" New"}
                    </button>
                })}
                {move || loading.get().then(|| view! {
                    <span style="color: #888; font-size: 13px;">{"Loading..."}</span>
                })}
            </div>

            {move || error.get().map(|e| view! {
                <div class="error" style="background: #fee; color: #c33; padding: 8px 10px; border-radius: 4px; margin-bottom: 10px; font-size: 14px;">
                    {e}
                </div>
            })}

            <table style="width: 100%; border-collapse: collapse; background: white; font-size: 14px;">
                <thead style="background: #f7f8fa; border-bottom: 2px solid #e5e7eb;">
                    <tr>
                        {header_cells}
                        <th style="padding: 8px 10px; text-align: left;">{""}</th>
                    </tr>
                </thead>
                <tbody>
                    {body_rows}
                </tbody>
            </table>

            {move || (rows.get().is_empty() && !loading.get()).then(|| view! {
                <div style="padding: 24px; text-align: center; color: #888; font-size: 14px;">
                    {"No records"}
                </div>
            })}

            <div style="margin-top: 10px; display: flex; justify-content: flex-end;">
                <PaginationControls
                    current_page=Signal::derive(move || query.get().page)
                    total_pages=Signal::derive(move || {
                        let size = query.get().page_size.max(1);
                        total.get().div_ceil(size)
                    })
                    total_count=total
                    page_size=Signal::derive(move || query.get().page_size)
                    on_page_change=on_page_change
                    on_page_size_change=on_page_size_change
                />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_glyphs() {
        assert_eq!(sort_glyph(SortKind::Text, None), " ⇅");
        assert_eq!(sort_glyph(SortKind::Text, Some(SortDirection::Asc)), " A→Z");
        assert_eq!(sort_glyph(SortKind::Text, Some(SortDirection::Desc)), " Z→A");
        assert_eq!(sort_glyph(SortKind::Numeric, Some(SortDirection::Asc)), " 1→9");
        assert_eq!(sort_glyph(SortKind::Numeric, Some(SortDirection::Desc)), " 9→1");
    }

    /// Fetch tokens are taken through `StoredValue::try_update_value`, which
    /// is the only stored-value accessor that returns the closure's value.
    #[test]
    fn test_fetch_token_through_stored_value() {
        let seq = StoredValue::new(RequestSeq::new());
        let first = seq.try_update_value(|s| s.begin()).unwrap_or_default();
        let second = seq.try_update_value(|s| s.begin()).unwrap_or_default();
        assert!(second > first);
        assert!(seq.with_value(|s| s.is_current(second)));
        assert!(!seq.with_value(|s| s.is_current(first)));
    }

    #[test]
    fn test_row_action_lifecycle_bookkeeping() {
        let mut pending = HashSet::new();
        let mut results = HashMap::new();
        let key = (7, "create-user");

        assert!(begin_action(&mut pending, &mut results, key));
        // A second click while the action is in flight is refused
        assert!(!begin_action(&mut pending, &mut results, key));

        finish_action(
            &mut pending,
            &mut results,
            key,
            Ok("User account created".to_string()),
        );
        assert!(!pending.contains(&key));
        assert_eq!(results[&key], Ok("User account created".to_string()));

        // Re-running clears the previous outcome for this key
        assert!(begin_action(&mut pending, &mut results, key));
        assert!(!results.contains_key(&key));
        finish_action(
            &mut pending,
            &mut results,
            key,
            Err("Doctor already has a user".to_string()),
        );
        assert_eq!(results[&key], Err("Doctor already has a user".to_string()));
    }

    #[test]
    fn test_badge_styles_cover_statuses() {
        assert!(badge_style("pending").contains("946c00"));
        assert!(badge_style("seen").contains("1e7a2e"));
        assert!(badge_style("cancelled").contains("b3261e"));
        // Unknown values still get a neutral pill
        assert!(badge_style("archived").contains("eef2f7"));
    }
}
