use crate::layout::global_context::{AppGlobalContext, AppPage};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <div
            class="app-sidebar"
            style="width: 180px; background: #f5f5f5; border-right: 1px solid #ddd; padding: 8px 0; flex-shrink: 0;"
        >
            {AppPage::ALL
                .into_iter()
                .map(|page| {
                    let is_active = move || ctx.current_page.get() == page;
                    view! {
                        <button
                            class="sidebar-item"
                            style=move || format!(
                                "display: flex; align-items: center; gap: 8px; width: 100%; padding: 8px 14px; border: none; text-align: left; cursor: pointer; font-size: 14px; background: {}; color: {};",
                                if is_active() { "#dbe7f3" } else { "transparent" },
                                if is_active() { "#1e3a5f" } else { "#333" },
                            )
                            on:click=move |_| ctx.current_page.set(page)
                        >
                            {icon(page.icon())}
                            {page.title()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
