use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::overlay::{OverlayHost, OverlayService};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Navigation state for the whole app.
    provide_context(AppGlobalContext::new());

    // Centralized overlay slot (confirmations, record forms, inline create).
    provide_context(OverlayService::new());

    view! {
        <AppRoutes />
        <OverlayHost />
    }
}
