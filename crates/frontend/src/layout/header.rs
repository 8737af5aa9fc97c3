use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <div
            class="app-header"
            style="display: flex; align-items: center; gap: 16px; height: 48px; padding: 0 16px; background: #1e3a5f; color: white;"
        >
            <span style="font-weight: 600; font-size: 16px;">{"Clinic Front Office"}</span>
            <span style="color: #9fb3c8; font-size: 14px;">
                {move || ctx.current_page.get().title()}
            </span>
            <span style="margin-left: auto; color: #9fb3c8; font-size: 13px;">
                {chrono::Local::now().format("%d.%m.%Y").to_string()}
            </span>
        </div>
    }
}
