#![deny(unsafe_code)]

use crate::Scalar;

/// A rectangular view over a batch of flattened records.
///
/// Columns are the union of record keys in first-seen order; rows are aligned
/// to that column list with explicit null cells for missing fields.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Scalar>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Scalar>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Scalar> {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    /// A column counts as numeric when it holds at least one numeric cell
    /// and nothing but numbers and nulls.
    pub fn is_numeric_column(&self, index: usize) -> bool {
        let mut saw_number = false;
        for cell in self.column_values(index) {
            match cell {
                Scalar::Int(_) | Scalar::Float(_) => saw_number = true,
                Scalar::Null => {}
                Scalar::Bool(_) | Scalar::Text(_) => return false,
            }
        }
        saw_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        let mut t = Table::new(vec!["id".to_string(), "score".to_string(), "name".to_string()]);
        t.push_row(vec![
            Scalar::Int(1),
            Scalar::Float(10.5),
            Scalar::Text("a".to_string()),
        ]);
        t.push_row(vec![Scalar::Int(2), Scalar::Null, Scalar::Text("b".to_string())]);
        t
    }

    #[test]
    fn column_index_finds_by_name() {
        let t = table();
        assert_eq!(t.column_index("score"), Some(1));
        assert_eq!(t.column_index("missing"), None);
    }

    #[test]
    fn numeric_column_ignores_nulls() {
        let t = table();
        assert!(t.is_numeric_column(0));
        assert!(t.is_numeric_column(1));
        assert!(!t.is_numeric_column(2));
    }

    #[test]
    fn all_null_column_is_not_numeric() {
        let mut t = Table::new(vec!["x".to_string()]);
        t.push_row(vec![Scalar::Null]);
        assert!(!t.is_numeric_column(0));
    }
}
