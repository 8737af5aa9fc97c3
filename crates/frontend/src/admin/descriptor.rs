//! Tab descriptors: the static configuration behind every admin table.
//!
//! A descriptor is authored once per entity page and stays immutable for the
//! page's lifetime. Field kinds (plain / dropdown / enum / date) are resolved
//! when the descriptor is built, not re-inspected on every render.

use contracts::admin::{path_lookup, Record};
use contracts::error::{ApiError, ApiErrorKind, FieldError};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type ActionFuture = Pin<Box<dyn Future<Output = Result<String, ApiError>>>>;

/// Named row-level action (e.g. "Create a user from this doctor record").
#[derive(Clone)]
pub struct RowAction {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub run: Arc<dyn Fn(Record) -> ActionFuture + Send + Sync>,
}

/// Input/display kind of one descriptor field, resolved once.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Plain,
    /// Foreign key picked from `/api/dropdown/{endpoint}`
    Dropdown(String),
    /// Fixed enumeration; other values are rejected client-side
    Enum(Vec<String>),
    Date,
}

/// Value type of a sortable column; chooses the header glyph set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    Text,
    Numeric,
}

/// One entry of the filter select: a predicate the backend understands.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOption {
    pub label: String,
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    pub name: String,
    pub header: String,
    pub kind: FieldKind,
    pub sort: Option<SortKind>,
    pub badge: bool,
}

impl ResolvedField {
    /// Path used to render the cell. Dropdown fields show the related
    /// entity's name instead of the raw foreign key.
    pub fn display_path(&self) -> String {
        match &self.kind {
            FieldKind::Dropdown(_) => format!("{}:name", self.name),
            _ => self.name.clone(),
        }
    }

    /// Editable in the record form. Colon-path columns are display-only
    /// projections of embedded relations.
    pub fn editable(&self) -> bool {
        !self.name.contains(':')
    }
}

/// Header text from a field name: `unitPrice` -> "Unit price",
/// `patient:name` -> "Patient name".
pub fn humanize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        match ch {
            ':' | '_' => out.push(' '),
            c if c.is_uppercase() => {
                out.push(' ');
                out.extend(c.to_lowercase());
            }
            c => out.push(c),
        }
    }
    let trimmed = out.trim().to_string();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => trimmed,
    }
}

#[derive(Clone)]
pub struct TabDescriptor {
    /// Entity name; doubles as the REST endpoint segment (`/api/{id}`)
    pub id: String,
    pub title: String,
    pub filters: Vec<FilterOption>,
    pub actions: Vec<RowAction>,
    pub readonly: bool,
    pub delete_message: String,
    fields: Vec<String>,
    dropdowns: HashMap<String, String>,
    selects: HashMap<String, Vec<String>>,
    dates: HashSet<String>,
    sorts: HashMap<String, SortKind>,
    labels: HashSet<String>,
    delete_guard: Option<Arc<dyn Fn(&Record) -> bool + Send + Sync>>,
    resolved: Vec<ResolvedField>,
}

impl TabDescriptor {
    pub fn new(id: &str, title: &str, fields: &[&str]) -> Self {
        let mut descriptor = Self {
            id: id.to_string(),
            title: title.to_string(),
            filters: Vec::new(),
            actions: Vec::new(),
            readonly: false,
            delete_message: "Delete this record?".to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
            dropdowns: HashMap::new(),
            selects: HashMap::new(),
            dates: HashSet::new(),
            sorts: HashMap::new(),
            labels: HashSet::new(),
            delete_guard: None,
            resolved: Vec::new(),
        };
        descriptor.rebuild();
        descriptor
    }

    pub fn dropdown(mut self, field: &str, endpoint: &str) -> Self {
        self.dropdowns.insert(field.to_string(), endpoint.to_string());
        self.rebuild();
        self
    }

    pub fn select(mut self, field: &str, choices: &[&str]) -> Self {
        self.selects.insert(
            field.to_string(),
            choices.iter().map(|c| c.to_string()).collect(),
        );
        self.rebuild();
        self
    }

    pub fn date(mut self, field: &str) -> Self {
        self.dates.insert(field.to_string());
        self.rebuild();
        self
    }

    pub fn sortable(mut self, field: &str, kind: SortKind) -> Self {
        self.sorts.insert(field.to_string(), kind);
        self.rebuild();
        self
    }

    pub fn label(mut self, field: &str) -> Self {
        self.labels.insert(field.to_string());
        self.rebuild();
        self
    }

    pub fn filter(mut self, label: &str, field: &str, value: &str) -> Self {
        self.filters.push(FilterOption {
            label: label.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn action(mut self, action: RowAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    pub fn delete_message(mut self, message: &str) -> Self {
        self.delete_message = message.to_string();
        self
    }

    /// Row-level predicate: returns true when the row may be deleted.
    pub fn delete_guard(
        mut self,
        guard: impl Fn(&Record) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.delete_guard = Some(Arc::new(guard));
        self
    }

    /// Kind resolution precedence: dropdown, then enum, then date, then plain.
    fn rebuild(&mut self) {
        self.resolved = self
            .fields
            .iter()
            .map(|name| {
                let kind = if let Some(endpoint) = self.dropdowns.get(name) {
                    FieldKind::Dropdown(endpoint.clone())
                } else if let Some(choices) = self.selects.get(name) {
                    FieldKind::Enum(choices.clone())
                } else if self.dates.contains(name) {
                    FieldKind::Date
                } else {
                    FieldKind::Plain
                };
                ResolvedField {
                    name: name.clone(),
                    header: humanize(name),
                    kind,
                    sort: self.sorts.get(name).copied(),
                    badge: self.labels.contains(name),
                }
            })
            .collect();
    }

    pub fn resolved_fields(&self) -> &[ResolvedField] {
        &self.resolved
    }

    pub fn can_delete(&self, record: &Record) -> bool {
        if self.readonly {
            return false;
        }
        match &self.delete_guard {
            Some(guard) => guard(record),
            None => true,
        }
    }

    /// Client-side draft validation: enum-constrained fields must hold one of
    /// their enumerated values. Runs before any network call.
    pub fn validate_draft(&self, draft: &Record) -> Result<(), ApiError> {
        let mut field_errors = Vec::new();
        for field in &self.resolved {
            if let FieldKind::Enum(choices) = &field.kind {
                if let Some(value) = path_lookup(draft, &field.name) {
                    let valid = value
                        .as_str()
                        .map(|s| choices.iter().any(|c| c == s))
                        .unwrap_or(false);
                    if !valid {
                        field_errors.push(FieldError {
                            field: field.name.clone(),
                            message: format!("Must be one of: {}", choices.join(", ")),
                        });
                    }
                }
            }
        }
        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError {
                kind: ApiErrorKind::Validation,
                message: "Validation failed".to_string(),
                field_errors,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("name"), "Name");
        assert_eq!(humanize("unitPrice"), "Unit price");
        assert_eq!(humanize("patient:name"), "Patient name");
        assert_eq!(humanize("has_bill"), "Has bill");
    }

    #[test]
    fn test_kind_resolution() {
        let descriptor = TabDescriptor::new("bookings", "Bookings", &["date", "patient", "status"])
            .dropdown("patient", "patients")
            .select("status", &["pending", "seen"])
            .date("date");

        let fields = descriptor.resolved_fields();
        assert_eq!(fields[0].kind, FieldKind::Date);
        assert_eq!(fields[1].kind, FieldKind::Dropdown("patients".to_string()));
        assert_eq!(
            fields[2].kind,
            FieldKind::Enum(vec!["pending".to_string(), "seen".to_string()])
        );
    }

    #[test]
    fn test_dropdown_display_path_and_editability() {
        let descriptor = TabDescriptor::new("bookings", "Bookings", &["patient", "doctor:name"])
            .dropdown("patient", "patients");
        let fields = descriptor.resolved_fields();
        assert_eq!(fields[0].display_path(), "patient:name");
        assert!(fields[0].editable());
        assert_eq!(fields[1].display_path(), "doctor:name");
        assert!(!fields[1].editable());
    }

    #[test]
    fn test_validate_draft_rejects_out_of_enumeration() {
        let descriptor = TabDescriptor::new("bookings", "Bookings", &["status"])
            .select("status", &["pending", "seen", "cancelled"]);

        assert!(descriptor
            .validate_draft(&record(json!({"status": "pending"})))
            .is_ok());
        // Missing value: required-ness is the backend's call
        assert!(descriptor.validate_draft(&record(json!({}))).is_ok());

        let err = descriptor
            .validate_draft(&record(json!({"status": "archived"})))
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Validation);
        assert!(err.field_message("status").is_some());
    }

    #[test]
    fn test_can_delete_guard_and_readonly() {
        let guarded = TabDescriptor::new("bookings", "Bookings", &["status"]).delete_guard(|r| {
            !r.get("hasBill").and_then(|v| v.as_bool()).unwrap_or(false)
        });
        assert!(guarded.can_delete(&record(json!({"hasBill": false}))));
        assert!(!guarded.can_delete(&record(json!({"hasBill": true}))));

        let readonly = TabDescriptor::new("audit", "Audit", &["event"]).readonly();
        assert!(!readonly.can_delete(&record(json!({}))));
    }
}
