use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    /// National identity card number
    pub nic: String,
    pub phone: String,
    pub address: String,
}
