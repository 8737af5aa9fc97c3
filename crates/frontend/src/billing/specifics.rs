//! Flow-specific halves of the billing page.
//!
//! The page owns the shared state (patient, items, total, submission) and
//! calls into a `BillingSpecifics` implementation for everything that differs
//! between the doctor-visit flow and the pharmacy counter.

use crate::billing::api;
use crate::billing::view_model::BillingViewModel;
use crate::shared::components::SearchableSelectOrCreate;
use contracts::admin::SelectOption;
use contracts::domain::{BillItem, BillItemKind, Doctor};
use leptos::prelude::*;

pub trait BillingSpecifics: Clone + Send + Sync + 'static {
    fn title(&self) -> &'static str;
    /// Dropdown endpoint the line-item picker searches.
    fn item_endpoint(&self) -> &'static str;
    fn item_label(&self) -> &'static str;
    fn item_kind(&self) -> BillItemKind;
    fn notify_event(&self) -> &'static str;
    /// Flow-level precondition checked before submission.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
    /// Items the flow contributes on top of the picked lines.
    fn base_items(&self) -> Vec<BillItem> {
        Vec::new()
    }
    fn booking_id(&self) -> Option<i64> {
        None
    }
    /// Extra controls rendered above the item picker.
    fn specifics_view(&self, vm: BillingViewModel) -> AnyView;
}

fn consultation_line(doctor: &Doctor) -> BillItem {
    BillItem {
        kind: BillItemKind::Consultation,
        name: format!("Consultation ({})", doctor.name),
        quantity: 1,
        unit_price: doctor.consultation_fee,
    }
}

/// Doctor-visit billing: pick the doctor, whose consultation fee becomes the
/// first bill line; treatments are added on top.
#[derive(Clone, Copy)]
pub struct DoctorVisitBilling {
    doctor: RwSignal<Option<SelectOption>>,
    details: RwSignal<Option<Doctor>>,
}

impl DoctorVisitBilling {
    pub fn new() -> Self {
        Self {
            doctor: RwSignal::new(None),
            details: RwSignal::new(None),
        }
    }
}

impl Default for DoctorVisitBilling {
    fn default() -> Self {
        Self::new()
    }
}

impl BillingSpecifics for DoctorVisitBilling {
    fn title(&self) -> &'static str {
        "Doctor visit billing"
    }

    fn item_endpoint(&self) -> &'static str {
        "treatments"
    }

    fn item_label(&self) -> &'static str {
        "Treatments"
    }

    fn item_kind(&self) -> BillItemKind {
        BillItemKind::Treatment
    }

    fn notify_event(&self) -> &'static str {
        "doctor-billing"
    }

    fn validate(&self) -> Result<(), String> {
        if self.details.get_untracked().is_none() {
            return Err("Select a doctor first".to_string());
        }
        Ok(())
    }

    fn base_items(&self) -> Vec<BillItem> {
        // Tracked read so the bill table and total follow the doctor choice
        self.details
            .get()
            .map(|doctor| vec![consultation_line(&doctor)])
            .unwrap_or_default()
    }

    fn specifics_view(&self, _vm: BillingViewModel) -> AnyView {
        let doctor = self.doctor;
        let details = self.details;

        // Resolve the picked doctor to their full record for the fee line.
        Effect::new(move |_| {
            let Some(selected) = doctor.get() else {
                details.set(None);
                return;
            };
            let Ok(id) = selected.value.parse::<i64>() else {
                details.set(None);
                return;
            };
            wasm_bindgen_futures::spawn_local(async move {
                match api::fetch_doctor(id).await {
                    Ok(fetched) => {
                        // The selection may have changed while we were waiting
                        let still_selected = doctor
                            .get_untracked()
                            .and_then(|s| s.value.parse::<i64>().ok())
                            == Some(id);
                        if still_selected {
                            details.set(Some(fetched));
                        }
                    }
                    Err(e) => log::warn!("doctor lookup failed: {}", e),
                }
            });
        });

        view! {
            <div class="form-group" style="margin-bottom: 10px; max-width: 420px;">
                <label style="display: block; font-size: 13px; color: #555; margin-bottom: 3px;">
                    {"Doctor"}
                </label>
                <SearchableSelectOrCreate endpoint="doctors" value=doctor placeholder="Search doctors..." />
                {move || details.get().map(|d| view! {
                    <div style="font-size: 13px; color: #555; margin-top: 4px;">
                        {format!("{} | consultation fee {:.2}", d.specialty, d.consultation_fee)}
                    </div>
                })}
            </div>
        }
        .into_any()
    }
}

/// Pharmacy counter sale: drugs only, no doctor and no base items.
#[derive(Clone, Copy)]
pub struct PharmacySale;

impl PharmacySale {
    pub fn new() -> Self {
        Self
    }
}

impl BillingSpecifics for PharmacySale {
    fn title(&self) -> &'static str {
        "Pharmacy sale"
    }

    fn item_endpoint(&self) -> &'static str {
        "drugs"
    }

    fn item_label(&self) -> &'static str {
        "Drugs"
    }

    fn item_kind(&self) -> BillItemKind {
        BillItemKind::Drug
    }

    fn notify_event(&self) -> &'static str {
        "pharmacy-sale"
    }

    fn specifics_view(&self, _vm: BillingViewModel) -> AnyView {
        view! { <></> }.into_any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consultation_line() {
        let doctor = Doctor {
            id: 3,
            name: "A. Fernando".to_string(),
            specialty: "Cardiology".to_string(),
            hospital_id: 1,
            consultation_fee: 1500.0,
        };
        let line = consultation_line(&doctor);
        assert_eq!(line.kind, BillItemKind::Consultation);
        assert_eq!(line.name, "Consultation (A. Fernando)");
        assert_eq!(line.line_total(), 1500.0);
    }
}
