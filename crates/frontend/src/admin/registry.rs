//! Tab descriptors for every managed entity.
//!
//! Each function builds the static configuration one admin table needs;
//! `admin_tabs` groups the reference-data tables for the administration page,
//! while bookings get their own page at the reception desk.

use crate::admin::descriptor::{ActionFuture, RowAction, SortKind, TabDescriptor};
use crate::shared::api::{api_url, post_json};
use contracts::admin::{record_id, Record};
use contracts::domain::BookingStatus;
use contracts::error::ApiError;
use std::sync::Arc;

pub fn hospitals() -> TabDescriptor {
    TabDescriptor::new("hospitals", "Hospitals", &["name", "location"])
        .sortable("name", SortKind::Text)
        .sortable("location", SortKind::Text)
        .delete_message("Delete this hospital? Doctors attached to it keep their records.")
}

/// Doctors carry a row action: provision a login for the doctor so they can
/// use the billing screen themselves.
pub fn doctors() -> TabDescriptor {
    TabDescriptor::new(
        "doctors",
        "Doctors",
        &["name", "specialty", "hospital", "consultationFee"],
    )
    .dropdown("hospital", "hospitals")
    .sortable("name", SortKind::Text)
    .sortable("consultationFee", SortKind::Numeric)
    .action(RowAction {
        id: "create-user",
        label: "Create user account",
        icon: "user-plus",
        run: Arc::new(|record: Record| -> ActionFuture {
            Box::pin(async move {
                let id = record_id(&record)
                    .ok_or_else(|| ApiError::validation("Record has no id"))?;
                let url = api_url("/api/users/from-doctor");
                let body: serde_json::Value =
                    post_json(&url, &serde_json::json!({ "doctorId": id })).await?;
                Ok(body
                    .get("message")
                    .and_then(|m| m.as_str())
                    .unwrap_or("User account created")
                    .to_string())
            })
        }),
    })
}

pub fn patients() -> TabDescriptor {
    TabDescriptor::new("patients", "Patients", &["name", "nic", "phone", "address"])
        .sortable("name", SortKind::Text)
        .sortable("nic", SortKind::Text)
}

pub fn drugs() -> TabDescriptor {
    TabDescriptor::new("drugs", "Drugs", &["name", "unit", "unitPrice", "stock"])
        .sortable("name", SortKind::Text)
        .sortable("unitPrice", SortKind::Numeric)
        .sortable("stock", SortKind::Numeric)
}

pub fn treatments() -> TabDescriptor {
    TabDescriptor::new("treatments", "Treatments", &["name", "price"])
        .sortable("name", SortKind::Text)
        .sortable("price", SortKind::Numeric)
}

/// Booking rows cannot be deleted once billed; the bill is the financial
/// record and must keep its booking.
pub fn bookings() -> TabDescriptor {
    TabDescriptor::new(
        "bookings",
        "Bookings",
        &["date", "patient", "doctor", "status", "hasBill"],
    )
    .date("date")
    .dropdown("patient", "patients")
    .dropdown("doctor", "doctors")
    .select("status", &BookingStatus::ALL)
    .label("status")
    .label("hasBill")
    .sortable("date", SortKind::Text)
    .filter("Pending", "status", BookingStatus::Pending.as_str())
    .filter("Seen", "status", BookingStatus::Seen.as_str())
    .filter("Cancelled", "status", BookingStatus::Cancelled.as_str())
    .delete_message("Delete this booking and release its slot?")
    .delete_guard(|record| {
        !record
            .get("hasBill")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    })
}

/// Reference-data tables shown on the administration page.
pub fn admin_tabs() -> Vec<TabDescriptor> {
    vec![hospitals(), doctors(), patients(), drugs(), treatments()]
}

/// Descriptor for a dropdown endpoint, used by pickers to offer inline
/// creation of the related entity.
pub fn descriptor_for(endpoint: &str) -> Option<TabDescriptor> {
    match endpoint {
        "hospitals" => Some(hospitals()),
        "doctors" => Some(doctors()),
        "patients" => Some(patients()),
        "drugs" => Some(drugs()),
        "treatments" => Some(treatments()),
        "bookings" => Some(bookings()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::descriptor::FieldKind;
    use serde_json::json;

    #[test]
    fn test_entity_ids_match_endpoints() {
        for descriptor in admin_tabs() {
            assert_eq!(descriptor_for(&descriptor.id).map(|d| d.id), Some(descriptor.id));
        }
    }

    #[test]
    fn test_bookings_configuration() {
        let bookings = bookings();
        let fields = bookings.resolved_fields();
        assert_eq!(fields[0].kind, FieldKind::Date);
        assert_eq!(fields[1].kind, FieldKind::Dropdown("patients".to_string()));
        assert_eq!(fields[2].kind, FieldKind::Dropdown("doctors".to_string()));
        assert!(matches!(fields[3].kind, FieldKind::Enum(_)));
        assert_eq!(bookings.filters.len(), 3);
    }

    #[test]
    fn test_billed_booking_cannot_be_deleted() {
        let bookings = bookings();
        let billed = json!({"id": 1, "hasBill": true}).as_object().unwrap().clone();
        let open = json!({"id": 2, "hasBill": false}).as_object().unwrap().clone();
        assert!(!bookings.can_delete(&billed));
        assert!(bookings.can_delete(&open));
    }

    #[test]
    fn test_doctor_row_action_present() {
        let doctors = doctors();
        assert_eq!(doctors.actions.len(), 1);
        assert_eq!(doctors.actions[0].id, "create-user");
    }

    /// Plain and enum/date descriptor fields must match the wire keys of the
    /// corresponding DTO; dropdown fields resolve relations instead.
    #[test]
    fn test_descriptor_fields_match_dto_keys() {
        use contracts::domain::{Booking, Doctor, Drug, Hospital, Patient, Treatment};
        use chrono::NaiveDate;

        let dtos = [
            (
                hospitals(),
                serde_json::to_value(Hospital {
                    id: 1,
                    name: "General Hospital".to_string(),
                    location: "Colombo".to_string(),
                })
                .unwrap(),
            ),
            (
                doctors(),
                serde_json::to_value(Doctor {
                    id: 1,
                    name: "A. Fernando".to_string(),
                    specialty: "Cardiology".to_string(),
                    hospital_id: 1,
                    consultation_fee: 1500.0,
                })
                .unwrap(),
            ),
            (
                patients(),
                serde_json::to_value(Patient {
                    id: 1,
                    name: "Nimal Perera".to_string(),
                    nic: "851234567V".to_string(),
                    phone: "0771234567".to_string(),
                    address: "Kandy".to_string(),
                })
                .unwrap(),
            ),
            (
                drugs(),
                serde_json::to_value(Drug {
                    id: 1,
                    name: "Paracetamol".to_string(),
                    unit: "tablet".to_string(),
                    unit_price: 8.0,
                    stock: 500,
                })
                .unwrap(),
            ),
            (
                treatments(),
                serde_json::to_value(Treatment {
                    id: 1,
                    name: "Dressing".to_string(),
                    price: 250.0,
                })
                .unwrap(),
            ),
            (
                bookings(),
                serde_json::to_value(Booking {
                    id: 1,
                    patient_id: 1,
                    doctor_id: 1,
                    date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
                    status: BookingStatus::Pending,
                    has_bill: false,
                })
                .unwrap(),
            ),
        ];

        for (descriptor, dto) in dtos {
            for field in descriptor.resolved_fields() {
                if matches!(field.kind, FieldKind::Dropdown(_)) {
                    continue;
                }
                assert!(
                    dto.get(&field.name).is_some(),
                    "{}: field '{}' missing on DTO",
                    descriptor.id,
                    field.name
                );
            }
        }
    }
}
