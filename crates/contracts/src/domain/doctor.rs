use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialty: String,
    pub hospital_id: i64,
    /// Consultation fee charged per visit, in the clinic's currency
    pub consultation_fee: f64,
}
