use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Seen,
    Cancelled,
}

impl BookingStatus {
    /// Enumeration used by the bookings tab descriptor.
    pub const ALL: [&'static str; 3] = ["pending", "seen", "cancelled"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Seen => "seen",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub date: NaiveDate,
    pub status: BookingStatus,
    /// A booking that already has a bill must not be deleted
    pub has_bill: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_roundtrip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Seen,
            BookingStatus::Cancelled,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            let back: BookingStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }
}
