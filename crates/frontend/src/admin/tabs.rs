use crate::admin::descriptor::TabDescriptor;
use crate::admin::table::AdminTable;
use leptos::prelude::*;

/// Tab strip over a set of admin tables. Only the active tab's table is
/// mounted, so switching tabs drops the previous table's in-flight state.
#[component]
pub fn AdminTabs(descriptors: Vec<TabDescriptor>) -> impl IntoView {
    let labels: Vec<(usize, String)> = descriptors
        .iter()
        .enumerate()
        .map(|(i, d)| (i, d.title.clone()))
        .collect();
    let descriptors = StoredValue::new(descriptors);
    let active = RwSignal::new(0usize);

    view! {
        <div class="admin-tabs">
            <div class="tab-strip" style="display: flex; gap: 2px; border-bottom: 2px solid #e5e7eb; margin-bottom: 12px;">
                {labels
                    .into_iter()
                    .map(|(i, label)| {
                        view! {
                            <button
                                class="tab-button"
                                style=move || format!(
                                    "padding: 8px 16px; border: none; cursor: pointer; font-size: 14px; border-radius: 4px 4px 0 0; {}",
                                    if active.get() == i {
                                        "background: white; font-weight: 600; border-bottom: 2px solid #2a7; margin-bottom: -2px;"
                                    } else {
                                        "background: #f0f2f5; color: #555;"
                                    }
                                )
                                on:click=move |_| active.set(i)
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            {move || {
                let index = active.get();
                descriptors
                    .with_value(|list| list.get(index).cloned())
                    .map(|descriptor| view! { <AdminTable descriptor=descriptor /> })
            }}
        </div>
    }
}
