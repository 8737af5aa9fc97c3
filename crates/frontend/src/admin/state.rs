//! Per-table query state: search, filter, sort, pagination.

use contracts::admin::{ListQuery, SortDirection};

/// Mutable query state owned by one table instance. Any change triggers a
/// re-fetch (debounced for free-text search).
///
/// Invariant: at most one active sort field; `sort_field` and `direction` are
/// either both set or both `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub search: String,
    pub filter_field: Option<String>,
    pub filter_value: Option<String>,
    pub sort_field: Option<String>,
    pub direction: Option<SortDirection>,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search: String::new(),
            filter_field: None,
            filter_value: None,
            sort_field: None,
            direction: None,
            page: 1,
            page_size: 25,
        }
    }
}

impl QueryState {
    /// New search text resets to the first page.
    pub fn set_search(&mut self, search: String) {
        self.search = search;
        self.page = 1;
    }

    /// New filter resets to the first page.
    pub fn set_filter(&mut self, field: Option<String>, value: Option<String>) {
        self.filter_field = field;
        self.filter_value = value;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Three-state sort cycle: none -> asc -> desc -> none.
    /// Toggling a different field drops the previous field back to none.
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field.as_deref() == Some(field) {
            match self.direction {
                Some(SortDirection::Asc) => self.direction = Some(SortDirection::Desc),
                _ => {
                    self.sort_field = None;
                    self.direction = None;
                }
            }
        } else {
            self.sort_field = Some(field.to_string());
            self.direction = Some(SortDirection::Asc);
        }
    }

    /// Current direction of one field's header, `None` when inactive.
    pub fn direction_for(&self, field: &str) -> Option<SortDirection> {
        if self.sort_field.as_deref() == Some(field) {
            self.direction
        } else {
            None
        }
    }

    pub fn to_list_query(&self) -> ListQuery {
        ListQuery {
            search: self.search.clone(),
            filter_field: self.filter_field.clone(),
            filter_value: self.filter_value.clone(),
            sort: self.sort_field.clone(),
            direction: self.direction,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_cycle_on_one_field() {
        let mut state = QueryState::default();
        assert_eq!(state.direction_for("name"), None);

        state.toggle_sort("name");
        assert_eq!(state.direction_for("name"), Some(SortDirection::Asc));

        state.toggle_sort("name");
        assert_eq!(state.direction_for("name"), Some(SortDirection::Desc));

        state.toggle_sort("name");
        assert_eq!(state.direction_for("name"), None);
        assert_eq!(state.sort_field, None);
        assert_eq!(state.direction, None);
    }

    #[test]
    fn test_sorting_another_field_resets_previous() {
        let mut state = QueryState::default();
        state.toggle_sort("name");
        state.toggle_sort("name");
        assert_eq!(state.direction_for("name"), Some(SortDirection::Desc));

        state.toggle_sort("location");
        assert_eq!(state.direction_for("name"), None);
        assert_eq!(state.direction_for("location"), Some(SortDirection::Asc));
    }

    #[test]
    fn test_search_and_filter_reset_page() {
        let mut state = QueryState::default();
        state.set_page(4);
        state.set_search("General".to_string());
        assert_eq!(state.page, 1);

        state.set_page(3);
        state.set_filter(Some("status".to_string()), Some("pending".to_string()));
        assert_eq!(state.page, 1);

        state.set_page(2);
        state.set_page_size(50);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_to_list_query() {
        let mut state = QueryState::default();
        state.set_search("General".to_string());
        state.toggle_sort("name");
        state.set_page(2);

        let query = state.to_list_query();
        assert_eq!(query.search, "General");
        assert_eq!(query.sort.as_deref(), Some("name"));
        assert_eq!(query.direction, Some(SortDirection::Asc));
        assert_eq!(query.page, 2);
        assert!(query
            .to_query_string()
            .starts_with("search=General&sort=name&direction=asc"));
    }
}
