#![deny(unsafe_code)]

//! Table assembly: first-seen column union over heterogeneous records.
//!
//! The column order is a contract: downstream styling and repeated runs over
//! the same input rely on stable positions, so the union is never sorted.

use std::collections::HashSet;

use scoredeck_model::{FlatRecord, Scalar, Table};
use tracing::debug;

/// Merge flattened records into one table.
///
/// Columns are the union of record keys in first-seen order (scan in input
/// order; a key is appended the first time it appears). Rows are aligned to
/// that list; missing fields become explicit null cells.
pub fn build_table(records: &[FlatRecord]) -> Table {
    let mut columns: Vec<String> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for record in records {
        for key in record.keys() {
            if seen.insert(key) {
                columns.push(key.to_string());
            }
        }
    }

    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let row: Vec<Scalar> = columns
            .iter()
            .map(|column| record.get(column).cloned().unwrap_or(Scalar::Null))
            .collect();
        rows.push(row);
    }

    debug!(rows = rows.len(), columns = columns.len(), "table built");
    Table { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(entries: &[(&str, Scalar)]) -> FlatRecord {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn column_union_is_first_seen_order() {
        let a = record(&[("x", Scalar::Int(1)), ("y", Scalar::Int(2))]);
        let b = record(&[("y", Scalar::Int(3)), ("z", Scalar::Int(4))]);
        let table = build_table(&[a, b]);

        assert_eq!(table.columns, vec!["x", "y", "z"]);
        assert_eq!(
            table.rows[0],
            vec![Scalar::Int(1), Scalar::Int(2), Scalar::Null]
        );
        assert_eq!(
            table.rows[1],
            vec![Scalar::Null, Scalar::Int(3), Scalar::Int(4)]
        );
    }

    #[test]
    fn later_records_do_not_reorder_columns() {
        let a = record(&[("b", Scalar::Int(1)), ("a", Scalar::Int(2))]);
        let b = record(&[("a", Scalar::Int(3)), ("b", Scalar::Int(4)), ("c", Scalar::Int(5))]);
        let table = build_table(&[a, b]);
        assert_eq!(table.columns, vec!["b", "a", "c"]);
    }

    #[test]
    fn row_order_is_preserved_without_dedup() {
        let a = record(&[("x", Scalar::Int(1))]);
        let table = build_table(&[a.clone(), a.clone(), a]);
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn empty_input_yields_empty_table() {
        let table = build_table(&[]);
        assert!(table.columns.is_empty());
        assert!(table.is_empty());
    }
}
