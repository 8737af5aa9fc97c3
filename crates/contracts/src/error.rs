use serde::{Deserialize, Serialize};

/// Error taxonomy for backend calls.
///
/// Authorization errors are surfaced here but the login redirect itself is
/// handled above this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiErrorKind {
    /// Transport failure: request never produced an HTTP response
    Network,
    /// 400/422: rejected input, usually with per-field messages
    Validation,
    /// 401/403
    Auth,
    /// 404
    NotFound,
    /// 409: e.g. deleting a record that still has dependents
    Conflict,
    /// Anything else (5xx and unexpected statuses)
    Server,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    pub field_errors: Vec<FieldError>,
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Validation,
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    /// Build an error from an HTTP status and the raw response body.
    ///
    /// The backend reports failures as `{"message": "...", "errors": {"field": "msg"}}`;
    /// a non-JSON body is used verbatim as the message.
    pub fn from_status(status: u16, body: &str) -> Self {
        let kind = match status {
            400 | 422 => ApiErrorKind::Validation,
            401 | 403 => ApiErrorKind::Auth,
            404 => ApiErrorKind::NotFound,
            409 => ApiErrorKind::Conflict,
            _ => ApiErrorKind::Server,
        };

        let mut message = String::new();
        let mut field_errors = Vec::new();

        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            if let Some(msg) = value.get("message").and_then(|v| v.as_str()) {
                message = msg.to_string();
            }
            if let Some(errors) = value.get("errors").and_then(|v| v.as_object()) {
                for (field, msg) in errors {
                    field_errors.push(FieldError {
                        field: field.clone(),
                        message: msg.as_str().unwrap_or_default().to_string(),
                    });
                }
            }
        }

        if message.is_empty() {
            message = if body.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                body.trim().to_string()
            };
        }

        Self {
            kind,
            message,
            field_errors,
        }
    }

    /// Message for one field, if the backend reported one.
    pub fn field_message(&self, field: &str) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self {
            kind: ApiErrorKind::Server,
            message: err.to_string(),
            field_errors: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::from_status(400, "").kind, ApiErrorKind::Validation);
        assert_eq!(ApiError::from_status(422, "").kind, ApiErrorKind::Validation);
        assert_eq!(ApiError::from_status(401, "").kind, ApiErrorKind::Auth);
        assert_eq!(ApiError::from_status(403, "").kind, ApiErrorKind::Auth);
        assert_eq!(ApiError::from_status(404, "").kind, ApiErrorKind::NotFound);
        assert_eq!(ApiError::from_status(409, "").kind, ApiErrorKind::Conflict);
        assert_eq!(ApiError::from_status(500, "").kind, ApiErrorKind::Server);
    }

    #[test]
    fn test_parses_field_errors() {
        let body = r#"{"message":"Validation failed","errors":{"name":"Name is required"}}"#;
        let err = ApiError::from_status(422, body);
        assert_eq!(err.message, "Validation failed");
        assert_eq!(err.field_message("name"), Some("Name is required"));
        assert_eq!(err.field_message("location"), None);
    }

    #[test]
    fn test_plain_text_body() {
        let err = ApiError::from_status(500, "something broke");
        assert_eq!(err.message, "something broke");
        assert!(err.field_errors.is_empty());
    }

    #[test]
    fn test_empty_body_falls_back_to_status() {
        let err = ApiError::from_status(404, "");
        assert_eq!(err.message, "HTTP 404");
    }
}
