use crate::shared::api;
use contracts::domain::{Bill, BillDraft, Doctor};
use contracts::error::ApiError;

pub async fn submit_bill(draft: &BillDraft) -> Result<Bill, ApiError> {
    let url = api::api_url("/api/bills");
    api::post_json(&url, draft).await
}

pub async fn fetch_doctor(id: i64) -> Result<Doctor, ApiError> {
    let url = api::api_url(&format!("/api/doctors/{}", id));
    api::get_json(&url).await
}
