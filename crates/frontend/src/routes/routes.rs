use crate::admin::registry;
use crate::admin::table::AdminTable;
use crate::admin::tabs::AdminTabs;
use crate::billing::specifics::{DoctorVisitBilling, PharmacySale};
use crate::billing::view::BillingPage;
use crate::layout::global_context::{AppGlobalContext, AppPage};
use crate::layout::Shell;
use leptos::prelude::*;

#[component]
fn PageSwitch() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    move || match ctx.current_page.get() {
        AppPage::Reception => view! {
            <AdminTable descriptor=registry::bookings() />
        }
        .into_any(),
        AppPage::DoctorBilling => view! {
            <BillingPage specifics=DoctorVisitBilling::new() />
        }
        .into_any(),
        AppPage::Pharmacy => view! {
            <BillingPage specifics=PharmacySale::new() />
        }
        .into_any(),
        AppPage::Administration => view! {
            <AdminTabs descriptors=registry::admin_tabs() />
        }
        .into_any(),
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Shell center=|| view! { <PageSwitch /> }.into_any() />
    }
}
