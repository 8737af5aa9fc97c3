use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drug {
    pub id: i64,
    pub name: String,
    /// Dispensing unit ("tablet", "bottle", ...)
    pub unit: String,
    pub unit_price: f64,
    pub stock: i64,
}
