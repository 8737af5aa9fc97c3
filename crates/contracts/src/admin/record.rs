//! Loosely typed records for the schema-driven admin tables.
//!
//! The backend returns entity rows without a fixed schema; related entities
//! arrive embedded (e.g. `{"doctor": {"name": "..."}}`). Columns address them
//! with colon-path notation (`doctor:name`), resolved by an explicit lookup
//! function rather than dynamic property access.

use serde_json::{Map, Value};

/// One backend row: field name to JSON value.
pub type Record = Map<String, Value>;

/// Server-assigned identifier field.
pub const ID_FIELD: &str = "id";

/// Extract the record id. Accepts both a JSON number and a numeric string.
pub fn record_id(record: &Record) -> Option<i64> {
    match record.get(ID_FIELD)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Resolve a colon-separated path (`hospital:name`) against a record.
///
/// Returns `None` if any segment is missing or a non-final segment is not an
/// object.
pub fn path_lookup<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    let mut segments = path.split(':');
    let first = segments.next()?;
    let mut current = record.get(first)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Human-readable cell text for a record field.
///
/// Missing paths and nulls render as an empty string; strings render without
/// quotes; nested objects fall back to their `name` field when present.
pub fn display_text(record: &Record, path: &str) -> String {
    match path_lookup(record, path) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => {
            if *b {
                "yes".to_string()
            } else {
                "no".to_string()
            }
        }
        Some(Value::Object(obj)) => obj
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Record {
        json!({
            "id": 7,
            "name": "General Hospital",
            "beds": 120,
            "active": true,
            "hospital": {"id": 2, "name": "Base Hospital", "location": "Kandy"},
            "note": null
        })
        .as_object()
        .unwrap()
        .clone()
    }

    #[test]
    fn test_record_id_number_and_string() {
        assert_eq!(record_id(&sample()), Some(7));

        let mut r = sample();
        r.insert("id".to_string(), json!("42"));
        assert_eq!(record_id(&r), Some(42));

        r.insert("id".to_string(), json!(true));
        assert_eq!(record_id(&r), None);
    }

    #[test]
    fn test_path_lookup_nested() {
        let r = sample();
        assert_eq!(
            path_lookup(&r, "hospital:name").and_then(|v| v.as_str()),
            Some("Base Hospital")
        );
        assert_eq!(
            path_lookup(&r, "hospital:location").and_then(|v| v.as_str()),
            Some("Kandy")
        );
        assert!(path_lookup(&r, "hospital:missing").is_none());
        assert!(path_lookup(&r, "missing:name").is_none());
        // Non-object intermediate segment
        assert!(path_lookup(&r, "name:first").is_none());
    }

    #[test]
    fn test_display_text() {
        let r = sample();
        assert_eq!(display_text(&r, "name"), "General Hospital");
        assert_eq!(display_text(&r, "beds"), "120");
        assert_eq!(display_text(&r, "active"), "yes");
        assert_eq!(display_text(&r, "note"), "");
        assert_eq!(display_text(&r, "missing"), "");
        // Bare object falls back to its name field
        assert_eq!(display_text(&r, "hospital"), "Base Hospital");
    }
}
