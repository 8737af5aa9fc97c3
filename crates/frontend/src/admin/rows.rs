//! In-memory row list patching after a mutation, instead of a full re-fetch.

use contracts::admin::{record_id, Record};

/// A created record is appended.
pub fn apply_created(rows: &mut Vec<Record>, created: Record) {
    rows.push(created);
}

/// An updated record replaces the row with the same id.
/// Returns false (leaving the list untouched) when no row matches.
pub fn apply_updated(rows: &mut [Record], updated: Record) -> bool {
    let Some(id) = record_id(&updated) else {
        return false;
    };
    match rows.iter_mut().find(|row| record_id(row) == Some(id)) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

/// Remove the row with the given id. Returns false when nothing was removed
/// (already-deleted id must not disturb other rows).
pub fn apply_deleted(rows: &mut Vec<Record>, id: i64) -> bool {
    let before = rows.len();
    rows.retain(|row| record_id(row) != Some(id));
    rows.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows() -> Vec<Record> {
        vec![
            json!({"id": 1, "name": "General Hospital"})
                .as_object()
                .unwrap()
                .clone(),
            json!({"id": 2, "name": "Base Hospital"})
                .as_object()
                .unwrap()
                .clone(),
        ]
    }

    #[test]
    fn test_create_appends() {
        let mut list = rows();
        apply_created(
            &mut list,
            json!({"id": 3, "name": "District Hospital"})
                .as_object()
                .unwrap()
                .clone(),
        );
        assert_eq!(list.len(), 3);
        assert_eq!(record_id(&list[2]), Some(3));
    }

    #[test]
    fn test_update_replaces_matching_id_only() {
        let mut list = rows();
        let replaced = apply_updated(
            &mut list,
            json!({"id": 2, "name": "Renamed"}).as_object().unwrap().clone(),
        );
        assert!(replaced);
        assert_eq!(list.len(), 2);
        assert_eq!(list[1]["name"], "Renamed");
        assert_eq!(list[0]["name"], "General Hospital");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut list = rows();
        let replaced = apply_updated(
            &mut list,
            json!({"id": 99, "name": "Ghost"}).as_object().unwrap().clone(),
        );
        assert!(!replaced);
        assert_eq!(list, rows());
    }

    #[test]
    fn test_delete_removes_only_matching_row() {
        let mut list = rows();
        assert!(apply_deleted(&mut list, 1));
        assert_eq!(list.len(), 1);
        assert_eq!(record_id(&list[0]), Some(2));
    }

    #[test]
    fn test_delete_missing_id_removes_nothing() {
        let mut list = rows();
        assert!(!apply_deleted(&mut list, 42));
        assert_eq!(list.len(), 2);
    }
}
