//! HTTP plumbing for the REST backend.
//!
//! All helpers attach the session cookie (`credentials: include`) and map
//! failures into the shared [`ApiError`] taxonomy: transport problems become
//! `Network`, non-2xx responses are classified by status with the body parsed
//! for field-level messages.

use contracts::error::ApiError;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::RequestCredentials;

/// Base URL for API requests, derived from the current window location.
/// The backend listens on port 3000. Empty when no window is available.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path (should start with "/api/").
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

fn with_session(builder: RequestBuilder) -> RequestBuilder {
    builder.credentials(RequestCredentials::Include)
}

async fn error_from(response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ApiError::from_status(status, &body)
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::network(format!("Failed to parse response: {}", e)))
}

pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let response = with_session(Request::get(url))
        .send()
        .await
        .map_err(|e| ApiError::network(format!("Failed to send request: {}", e)))?;
    if !response.ok() {
        return Err(error_from(response).await);
    }
    parse_json(response).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    url: &str,
    body: &B,
) -> Result<T, ApiError> {
    let response = with_session(Request::post(url))
        .json(body)
        .map_err(|e| ApiError::network(format!("Failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(|e| ApiError::network(format!("Failed to send request: {}", e)))?;
    if !response.ok() {
        return Err(error_from(response).await);
    }
    parse_json(response).await
}

/// POST where the response body does not matter (fire-and-forget endpoints).
pub async fn post_json_unit<B: Serialize>(url: &str, body: &B) -> Result<(), ApiError> {
    let response = with_session(Request::post(url))
        .json(body)
        .map_err(|e| ApiError::network(format!("Failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(|e| ApiError::network(format!("Failed to send request: {}", e)))?;
    if !response.ok() {
        return Err(error_from(response).await);
    }
    Ok(())
}

pub async fn put_json<B: Serialize, T: DeserializeOwned>(
    url: &str,
    body: &B,
) -> Result<T, ApiError> {
    let response = with_session(Request::put(url))
        .json(body)
        .map_err(|e| ApiError::network(format!("Failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(|e| ApiError::network(format!("Failed to send request: {}", e)))?;
    if !response.ok() {
        return Err(error_from(response).await);
    }
    parse_json(response).await
}

/// DELETE; 200 and 204 both count as success.
pub async fn delete(url: &str) -> Result<(), ApiError> {
    let response = with_session(Request::delete(url))
        .send()
        .await
        .map_err(|e| ApiError::network(format!("Failed to send request: {}", e)))?;
    if !response.ok() {
        return Err(error_from(response).await);
    }
    Ok(())
}
