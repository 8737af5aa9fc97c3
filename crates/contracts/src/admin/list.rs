//! List-query contract shared by every admin table.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Query parameters for `GET {endpoint}?...`.
///
/// Invariant: at most one sort field at a time (`sort` and `direction` are
/// set and cleared together by the table state).
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub search: String,
    pub filter_field: Option<String>,
    pub filter_value: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<SortDirection>,
    /// 1-based page number
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            filter_field: None,
            filter_value: None,
            sort: None,
            direction: None,
            page: 1,
            page_size: 25,
        }
    }
}

impl ListQuery {
    /// Render as a URL query string (without the leading `?`).
    /// Empty search and unset filter/sort are omitted.
    pub fn to_query_string(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if !self.search.trim().is_empty() {
            parts.push(format!("search={}", urlencoding::encode(self.search.trim())));
        }
        if let (Some(field), Some(value)) = (&self.filter_field, &self.filter_value) {
            parts.push(format!("filter_field={}", urlencoding::encode(field)));
            parts.push(format!("filter_value={}", urlencoding::encode(value)));
        }
        if let (Some(sort), Some(direction)) = (&self.sort, self.direction) {
            parts.push(format!("sort={}", urlencoding::encode(sort)));
            parts.push(format!("direction={}", direction.as_str()));
        }
        parts.push(format!("page={}", self.page));
        parts.push(format!("page_size={}", self.page_size));
        parts.join("&")
    }
}

/// One page of results plus the backend's total row count.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn total_pages(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.total.div_ceil(page_size)
    }
}

/// Parse a list response body.
///
/// Richer tabs return `{ "data": [...], "total": n }`; simpler tabs return a
/// bare array, treated as a single page.
pub fn parse_record_page(body: Value) -> anyhow::Result<Page<Record>> {
    let (items, total) = match body {
        Value::Array(items) => {
            let total = items.len();
            (items, total)
        }
        Value::Object(mut obj) => {
            let data = obj
                .remove("data")
                .ok_or_else(|| anyhow::anyhow!("list response has no 'data' field"))?;
            let Value::Array(items) = data else {
                anyhow::bail!("'data' is not an array");
            };
            let total = obj
                .get("total")
                .and_then(|v| v.as_u64())
                .map(|v| v as usize)
                .unwrap_or(items.len());
            (items, total)
        }
        other => anyhow::bail!("unexpected list response: {}", other),
    };

    let mut data = Vec::with_capacity(items.len());
    for item in items {
        let Value::Object(record) = item else {
            anyhow::bail!("list row is not an object");
        };
        data.push(record);
    }
    Ok(Page { data, total })
}

/// One choice of a related-entity picker (`GET /api/dropdown/{endpoint}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    /// Secondary display line (e.g. a doctor's hospital)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_string_defaults() {
        let q = ListQuery::default();
        assert_eq!(q.to_query_string(), "page=1&page_size=25");
    }

    #[test]
    fn test_query_string_full() {
        let q = ListQuery {
            search: "General Hospital".to_string(),
            filter_field: Some("status".to_string()),
            filter_value: Some("pending".to_string()),
            sort: Some("name".to_string()),
            direction: Some(SortDirection::Desc),
            page: 3,
            page_size: 50,
        };
        assert_eq!(
            q.to_query_string(),
            "search=General%20Hospital&filter_field=status&filter_value=pending\
             &sort=name&direction=desc&page=3&page_size=50"
        );
    }

    #[test]
    fn test_sort_without_direction_is_omitted() {
        let q = ListQuery {
            sort: Some("name".to_string()),
            direction: None,
            ..Default::default()
        };
        assert_eq!(q.to_query_string(), "page=1&page_size=25");
    }

    #[test]
    fn test_parse_object_shape() {
        let page = parse_record_page(json!({
            "data": [{"id": 7, "name": "General Hospital"}],
            "total": 40
        }))
        .unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.total, 40);
        assert_eq!(page.total_pages(25), 2);
    }

    #[test]
    fn test_parse_bare_array_shape() {
        let page = parse_record_page(json!([{"id": 1}, {"id": 2}])).unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_parse_rejects_non_object_rows() {
        assert!(parse_record_page(json!([1, 2, 3])).is_err());
        assert!(parse_record_page(json!("nope")).is_err());
        assert!(parse_record_page(json!({"total": 3})).is_err());
    }

    #[test]
    fn test_total_pages_rounding() {
        let page = Page::<Record> {
            data: Vec::new(),
            total: 51,
        };
        assert_eq!(page.total_pages(25), 3);
        assert_eq!(page.total_pages(0), 0);
    }
}
