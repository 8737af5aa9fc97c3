//! Generic record CRUD over the admin REST contract.
//!
//! Every admin table talks to `/api/{entity}` with the same five request
//! shapes; only the entity segment differs.

use crate::shared::api;
use contracts::admin::{parse_record_page, ListQuery, Page, Record, SelectOption};
use contracts::error::ApiError;

pub async fn fetch_records(entity: &str, query: &ListQuery) -> Result<Page<Record>, ApiError> {
    let url = api::api_url(&format!("/api/{}?{}", entity, query.to_query_string()));
    let body: serde_json::Value = api::get_json(&url).await?;
    Ok(parse_record_page(body)?)
}

pub async fn create_record(entity: &str, draft: &Record) -> Result<Record, ApiError> {
    let url = api::api_url(&format!("/api/{}", entity));
    api::post_json(&url, draft).await
}

pub async fn update_record(entity: &str, id: i64, draft: &Record) -> Result<Record, ApiError> {
    let url = api::api_url(&format!("/api/{}/{}", entity, id));
    api::put_json(&url, draft).await
}

pub async fn delete_record(entity: &str, id: i64) -> Result<(), ApiError> {
    let url = api::api_url(&format!("/api/{}/{}", entity, id));
    api::delete(&url).await
}

/// Options for a related-entity picker.
pub async fn fetch_options(endpoint: &str, search: &str) -> Result<Vec<SelectOption>, ApiError> {
    let mut url = api::api_url(&format!("/api/dropdown/{}", endpoint));
    if !search.trim().is_empty() {
        url.push_str(&format!("?search={}", urlencoding::encode(search.trim())));
    }
    api::get_json(&url).await
}
