//! Pure filters and derived counts over fetched rows.
//!
//! List screens derive their chips from the rows they hold instead of
//! calling the stats endpoint; the result is an approximation that is
//! rebuilt from scratch on every refetch and adjusted in place after a
//! local create or delete.

use qhse_forms::get_path;
use serde_json::Value;
use std::collections::BTreeMap;

/// Case-insensitive substring match over the declared search fields.
pub fn matches_search(row: &Value, fields: &[&str], query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    fields.iter().any(|field| {
        get_path(row, field)
            .and_then(Value::as_str)
            .map(|value| value.to_lowercase().contains(&needle))
            .unwrap_or(false)
    })
}

/// Exact-match filter on one field; `None` means no filter.
pub fn matches_field(row: &Value, field: &str, wanted: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => get_path(row, field)
            .and_then(Value::as_str)
            .map(|value| value == wanted)
            .unwrap_or(false),
    }
}

/// Bucket counts of a field's values across the rows.
pub fn count_by(rows: &[Value], field: &str) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for row in rows {
        if let Some(value) = get_path(row, field).and_then(Value::as_str) {
            if !value.is_empty() {
                *counts.entry(value.to_string()).or_insert(0) += 1;
            }
        }
    }
    counts
}

/// Decrement the bucket a removed row belonged to, dropping the bucket at
/// zero. Used after a local splice instead of a refetch.
pub fn decrement_bucket(counts: &mut BTreeMap<String, u64>, row: &Value, field: &str) {
    if let Some(value) = get_path(row, field).and_then(Value::as_str) {
        if let Some(count) = counts.get_mut(value) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                counts.remove(value);
            }
        }
    }
}

/// Increment the bucket a created row belongs to.
pub fn increment_bucket(counts: &mut BTreeMap<String, u64>, row: &Value, field: &str) {
    if let Some(value) = get_path(row, field).and_then(Value::as_str) {
        if !value.is_empty() {
            *counts.entry(value.to_string()).or_insert(0) += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows() -> Vec<Value> {
        vec![
            json!({"titre": "Chute échelle", "numeroIncident": "INC-2025-0001", "statut": "Déclaré"}),
            json!({"titre": "Fuite acide", "numeroIncident": "INC-2025-0002", "statut": "Clôturé"}),
            json!({"titre": "Départ de feu", "numeroIncident": "INC-2025-0003", "statut": "Déclaré"}),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let rows = rows();
        let fields = ["titre", "numeroIncident"];
        assert!(matches_search(&rows[0], &fields, "ÉCHELLE"));
        assert!(matches_search(&rows[1], &fields, "inc-2025-0002"));
        assert!(!matches_search(&rows[2], &fields, "acide"));
        // Empty query matches everything
        assert!(matches_search(&rows[2], &fields, "  "));
    }

    #[test]
    fn test_count_and_adjust_buckets() {
        let rows = rows();
        let mut counts = count_by(&rows, "statut");
        assert_eq!(counts["Déclaré"], 2);
        assert_eq!(counts["Clôturé"], 1);

        decrement_bucket(&mut counts, &rows[1], "statut");
        assert!(!counts.contains_key("Clôturé"), "empty bucket is dropped");

        increment_bucket(&mut counts, &rows[1], "statut");
        assert_eq!(counts["Clôturé"], 1);
    }

    #[test]
    fn test_field_filter() {
        let rows = rows();
        assert!(matches_field(&rows[0], "statut", None));
        assert!(matches_field(&rows[0], "statut", Some("Déclaré")));
        assert!(!matches_field(&rows[1], "statut", Some("Déclaré")));
    }
}
