//! Shared billing state: patient, line items, running total, submission.
//!
//! Owned by the billing page and handed to the flow's specifics so both
//! sides read and mutate the same signals.

use crate::billing::api;
use crate::shared::realtime;
use contracts::admin::SelectOption;
use contracts::domain::{Bill, BillDraft, BillItem, BillItemKind};
use leptos::prelude::*;
use uuid::Uuid;

/// Merge a line into the list: same kind and name bumps the quantity,
/// anything else appends.
pub fn add_line(items: &mut Vec<BillItem>, item: BillItem) {
    match items
        .iter_mut()
        .find(|existing| existing.kind == item.kind && existing.name == item.name)
    {
        Some(existing) => existing.quantity += item.quantity,
        None => items.push(item),
    }
}

#[derive(Clone, Copy)]
pub struct BillingViewModel {
    pub patient: RwSignal<Option<SelectOption>>,
    pub items: RwSignal<Vec<BillItem>>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    pub last_saved: RwSignal<Option<Bill>>,
}

impl BillingViewModel {
    pub fn new() -> Self {
        Self {
            patient: RwSignal::new(None),
            items: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
            last_saved: RwSignal::new(None),
        }
    }

    /// Add one unit of a picked option. The option's `extra` field carries
    /// the unit price from the dropdown endpoint.
    pub fn add_item(&self, kind: BillItemKind, option: &SelectOption) {
        let unit_price = option
            .extra
            .as_deref()
            .and_then(|e| e.trim().parse::<f64>().ok())
            .unwrap_or(0.0);
        let item = BillItem {
            kind,
            name: option.label.clone(),
            quantity: 1,
            unit_price,
        };
        self.items.update(|items| add_line(items, item));
    }

    pub fn set_quantity(&self, index: usize, quantity: u32) {
        self.items.update(|items| {
            if let Some(item) = items.get_mut(index) {
                item.quantity = quantity.max(1);
            }
        });
    }

    pub fn remove_item(&self, index: usize) {
        self.items.update(|items| {
            if index < items.len() {
                items.remove(index);
            }
        });
    }

    /// Grand total of the flow's base items plus the picked lines.
    pub fn total_with(&self, base_items: &[BillItem]) -> f64 {
        BillDraft::compute_total(base_items) + BillDraft::compute_total(&self.items.get())
    }

    /// Validate and submit. On success the draft is cleared, the saved bill
    /// is kept for the confirmation banner and a realtime event goes out.
    pub fn save(&self, base_items: Vec<BillItem>, booking_id: Option<i64>, event: &'static str) {
        if self.saving.get_untracked() {
            return;
        }
        let Some(patient) = self.patient.get_untracked() else {
            self.error.set(Some("Select a patient first".to_string()));
            return;
        };
        let Ok(patient_id) = patient.value.parse::<i64>() else {
            self.error.set(Some("Invalid patient selection".to_string()));
            return;
        };

        let mut items = base_items;
        items.extend(self.items.get_untracked());
        if items.is_empty() {
            self.error.set(Some("Bill has no items".to_string()));
            return;
        }

        let draft = BillDraft {
            reference: Uuid::new_v4(),
            patient_id,
            booking_id,
            total: BillDraft::compute_total(&items),
            items,
        };

        let vm = *self;
        vm.saving.set(true);
        vm.error.set(None);
        wasm_bindgen_futures::spawn_local(async move {
            match api::submit_bill(&draft).await {
                Ok(bill) => {
                    vm.saving.set(false);
                    vm.items.set(Vec::new());
                    vm.patient.set(None);
                    realtime::notify(
                        event,
                        serde_json::json!({ "billId": bill.id, "total": bill.total }),
                    );
                    vm.last_saved.set(Some(bill));
                }
                Err(e) => {
                    vm.saving.set(false);
                    vm.error.set(Some(e.message));
                }
            }
        });
    }
}

impl Default for BillingViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: BillItemKind, name: &str, quantity: u32, unit_price: f64) -> BillItem {
        BillItem {
            kind,
            name: name.to_string(),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn test_add_line_merges_same_kind_and_name() {
        let mut items = vec![item(BillItemKind::Drug, "Paracetamol", 2, 8.0)];
        add_line(&mut items, item(BillItemKind::Drug, "Paracetamol", 1, 8.0));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3);
    }

    #[test]
    fn test_add_line_keeps_distinct_lines_apart() {
        let mut items = vec![item(BillItemKind::Drug, "Paracetamol", 1, 8.0)];
        add_line(&mut items, item(BillItemKind::Drug, "Ibuprofen", 1, 12.0));
        add_line(&mut items, item(BillItemKind::Treatment, "Paracetamol", 1, 50.0));
        assert_eq!(items.len(), 3);
    }
}
