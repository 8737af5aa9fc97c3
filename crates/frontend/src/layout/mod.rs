pub mod global_context;
pub mod header;
pub mod sidebar;

use leptos::prelude::*;

/// Application shell: header on top, sidebar on the left, content in the
/// center.
///
/// ```text
/// +------------------------------------+
/// |              Header                |
/// +----------+-------------------------+
/// |  Sidebar |        Content          |
/// +----------+-------------------------+
/// ```
#[component]
pub fn Shell<C>(center: C) -> impl IntoView
where
    C: Fn() -> AnyView + 'static + Send,
{
    view! {
        <div class="app-layout">
            <header::Header />
            <div class="app-body" style="display: flex; min-height: calc(100vh - 48px);">
                <sidebar::Sidebar />
                <div class="app-main" style="flex: 1; overflow: hidden;">
                    {center()}
                </div>
            </div>
        </div>
    }
}
