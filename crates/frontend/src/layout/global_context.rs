use leptos::prelude::*;

/// Top-level pages reachable from the sidebar.
///
/// Page switching is signal-based; URL routing is handled outside this app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPage {
    Reception,
    DoctorBilling,
    Pharmacy,
    Administration,
}

impl AppPage {
    pub fn title(&self) -> &'static str {
        match self {
            AppPage::Reception => "Reception",
            AppPage::DoctorBilling => "Doctor billing",
            AppPage::Pharmacy => "Pharmacy",
            AppPage::Administration => "Administration",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AppPage::Reception => "calendar",
            AppPage::DoctorBilling => "stethoscope",
            AppPage::Pharmacy => "pill",
            AppPage::Administration => "settings",
        }
    }

    pub const ALL: [AppPage; 4] = [
        AppPage::Reception,
        AppPage::DoctorBilling,
        AppPage::Pharmacy,
        AppPage::Administration,
    ];
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub current_page: RwSignal<AppPage>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            current_page: RwSignal::new(AppPage::Reception),
        }
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}
