use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillItemKind {
    Consultation,
    Treatment,
    Drug,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItem {
    pub kind: BillItemKind,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl BillItem {
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// Bill as submitted by the frontend (`POST bills`).
///
/// `reference` is generated client-side so a double-submitted bill can be
/// collapsed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDraft {
    pub reference: Uuid,
    pub patient_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<i64>,
    pub items: Vec<BillItem>,
    pub total: f64,
}

impl BillDraft {
    /// Sum of line totals; the backend re-validates this.
    pub fn compute_total(items: &[BillItem]) -> f64 {
        items.iter().map(BillItem::line_total).sum()
    }
}

/// Bill as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: i64,
    pub reference: Uuid,
    pub patient_id: i64,
    pub booking_id: Option<i64>,
    pub items: Vec<BillItem>,
    pub total: f64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: BillItemKind, quantity: u32, unit_price: f64) -> BillItem {
        BillItem {
            kind,
            name: "x".to_string(),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(item(BillItemKind::Drug, 3, 12.5).line_total(), 37.5);
        assert_eq!(item(BillItemKind::Consultation, 1, 1500.0).line_total(), 1500.0);
    }

    #[test]
    fn test_compute_total() {
        let items = vec![
            item(BillItemKind::Consultation, 1, 1500.0),
            item(BillItemKind::Treatment, 2, 250.0),
            item(BillItemKind::Drug, 10, 8.0),
        ];
        assert_eq!(BillDraft::compute_total(&items), 2080.0);
        assert_eq!(BillDraft::compute_total(&[]), 0.0);
    }
}
