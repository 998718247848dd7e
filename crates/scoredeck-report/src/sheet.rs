#![deny(unsafe_code)]

//! Sheet models and the derived views built from a table.
//!
//! The workbook always carries the data sheet; summary, statistics and
//! grouped-summary sheets are derived on demand and silently skip source
//! columns the table does not have.

use std::collections::BTreeMap;

use scoredeck_model::{ExportLayout, Scalar, Table};

/// Longest sheet name XLSX accepts.
pub const SHEET_NAME_MAX: usize = 31;

/// One renderable cell. Empty cells are omitted from the part entirely.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetCell {
    Empty,
    Text(String),
    Int(i64),
    Number(f64),
    Bool(bool),
}

impl SheetCell {
    pub fn from_scalar(scalar: &Scalar) -> SheetCell {
        match scalar {
            Scalar::Null => SheetCell::Empty,
            Scalar::Bool(b) => SheetCell::Bool(*b),
            Scalar::Int(i) => SheetCell::Int(*i),
            Scalar::Float(f) => SheetCell::Number(*f),
            Scalar::Text(s) => SheetCell::Text(s.clone()),
        }
    }

    /// Character width used for column auto-sizing.
    pub fn display_width(&self) -> usize {
        match self {
            SheetCell::Empty => 0,
            SheetCell::Text(s) => s.chars().count(),
            SheetCell::Int(i) => i.to_string().len(),
            SheetCell::Number(f) => format!("{f}").len(),
            SheetCell::Bool(b) => b.to_string().len(),
        }
    }
}

/// One worksheet: a styled header row plus data rows.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<SheetCell>>,
    /// Frozen pane as (columns, rows) split counts; data sheet only.
    pub freeze: Option<(u32, u32)>,
    pub autofilter: bool,
}

impl Sheet {
    fn plain(name: &str, header: Vec<String>, rows: Vec<Vec<SheetCell>>) -> Self {
        Self {
            name: sanitize_sheet_name(name),
            header,
            rows,
            freeze: None,
            autofilter: false,
        }
    }

    /// Auto-sized column widths: longest stringified value plus padding,
    /// capped at the configured maximum.
    pub fn column_widths(&self, max_width: f64) -> Vec<f64> {
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (index, cell) in row.iter().enumerate() {
                if index >= widths.len() {
                    widths.resize(index + 1, 0);
                }
                widths[index] = widths[index].max(cell.display_width());
            }
        }
        widths
            .into_iter()
            .map(|w| ((w + 2) as f64).min(max_width))
            .collect()
    }
}

/// Clip to the XLSX limit and replace characters worksheet names reject.
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    let cleaned = cleaned.trim();
    let fallback = if cleaned.is_empty() { "Sheet1" } else { cleaned };
    fallback.chars().take(SHEET_NAME_MAX).collect()
}

/// Build every sheet the layout asks for, data sheet first.
pub fn build_sheets(table: &Table, layout: &ExportLayout) -> Vec<Sheet> {
    let mut sheets = vec![data_sheet(table, layout)];
    if let Some(sheet) = summary_sheet(table, layout) {
        sheets.push(sheet);
    }
    if let Some(sheet) = statistics_sheet(table, layout) {
        sheets.push(sheet);
    }
    if let Some(sheet) = group_summary_sheet(table, layout) {
        sheets.push(sheet);
    }
    sheets
}

pub fn data_sheet(table: &Table, layout: &ExportLayout) -> Sheet {
    let rows = table
        .rows
        .iter()
        .map(|row| row.iter().map(SheetCell::from_scalar).collect())
        .collect();
    Sheet {
        name: sanitize_sheet_name(&layout.data_sheet),
        header: table.columns.clone(),
        rows,
        freeze: parse_cell_ref(&layout.freeze_pane).filter(|&(col, row)| col > 0 || row > 0),
        autofilter: layout.autofilter && !table.columns.is_empty(),
    }
}

/// Row count plus min/max/mean for the configured numeric columns. A column
/// missing from the table, or carrying no numeric cells, is skipped.
pub fn summary_sheet(table: &Table, layout: &ExportLayout) -> Option<Sheet> {
    let name = layout.summary_sheet.as_deref()?;
    let mut rows = vec![vec![
        SheetCell::Text("rows".to_string()),
        SheetCell::Int(table.row_count() as i64),
    ]];
    for column in &layout.summary_columns {
        let Some((min, max, mean)) = numeric_stats(table, column) else {
            continue;
        };
        rows.push(stat_row(column, "min", min));
        rows.push(stat_row(column, "max", max));
        rows.push(stat_row(column, "mean", mean));
    }
    Some(Sheet::plain(
        name,
        vec!["metric".to_string(), "value".to_string()],
        rows,
    ))
}

fn stat_row(column: &str, stat: &str, value: f64) -> Vec<SheetCell> {
    vec![
        SheetCell::Text(format!("{column} {stat}")),
        SheetCell::Number(value),
    ]
}

/// Value → count breakdown for the configured categorical columns; absent
/// columns are skipped, and the sheet is skipped when none remain.
pub fn statistics_sheet(table: &Table, layout: &ExportLayout) -> Option<Sheet> {
    let name = layout.statistics_sheet.as_deref()?;
    let mut rows = Vec::new();
    for column in &layout.statistics_columns {
        for (value, count) in frequencies(table, column) {
            rows.push(vec![
                SheetCell::Text(column.clone()),
                SheetCell::Text(value),
                SheetCell::Int(count as i64),
            ]);
        }
    }
    if rows.is_empty() {
        return None;
    }
    Some(Sheet::plain(
        name,
        vec![
            "column".to_string(),
            "value".to_string(),
            "count".to_string(),
        ],
        rows,
    ))
}

/// Grouped counts over the configured group columns (e.g. badge type and
/// category). Absent columns are dropped from the grouping; the sheet is
/// skipped entirely when none are present.
pub fn group_summary_sheet(table: &Table, layout: &ExportLayout) -> Option<Sheet> {
    let spec = layout.group_summary.as_ref()?;
    let present: Vec<(&String, usize)> = spec
        .group_columns
        .iter()
        .filter_map(|column| table.column_index(column).map(|index| (column, index)))
        .collect();
    if present.is_empty() {
        return None;
    }

    let mut counts: BTreeMap<Vec<String>, usize> = BTreeMap::new();
    for row in &table.rows {
        let key: Vec<String> = present
            .iter()
            .map(|(_, index)| {
                row.get(*index)
                    .map(Scalar::display_text)
                    .unwrap_or_default()
            })
            .collect();
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut entries: Vec<(Vec<String>, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut header: Vec<String> = present.iter().map(|(column, _)| (*column).clone()).collect();
    header.push("count".to_string());
    let rows = entries
        .into_iter()
        .map(|(key, count)| {
            let mut row: Vec<SheetCell> = key.into_iter().map(SheetCell::Text).collect();
            row.push(SheetCell::Int(count as i64));
            row
        })
        .collect();
    Some(Sheet::plain(&spec.sheet, header, rows))
}

/// Min/max/mean over the numeric cells of a column; `None` when the column
/// is absent or holds no numbers.
pub fn numeric_stats(table: &Table, column: &str) -> Option<(f64, f64, f64)> {
    let index = table.column_index(column)?;
    let values: Vec<f64> = table
        .column_values(index)
        .filter_map(Scalar::as_f64)
        .collect();
    if values.is_empty() {
        return None;
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for v in &values {
        min = min.min(*v);
        max = max.max(*v);
        sum += v;
    }
    Some((min, max, sum / values.len() as f64))
}

/// Value → count for a column, ordered by descending count then value.
/// Empty for an absent column.
pub fn frequencies(table: &Table, column: &str) -> Vec<(String, usize)> {
    let Some(index) = table.column_index(column) else {
        return Vec::new();
    };
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for cell in table.column_values(index) {
        *counts.entry(cell.display_text()).or_insert(0) += 1;
    }
    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

/// Parse an `A1`-style reference into zero-based (column, row) split counts.
pub fn parse_cell_ref(reference: &str) -> Option<(u32, u32)> {
    let reference = reference.trim();
    let letters: String = reference
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    let digits = &reference[letters.len()..];
    if letters.is_empty() || digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let mut column: u32 = 0;
    for c in letters.chars() {
        column = column * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }
    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((column - 1, row - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table {
            columns: vec![
                "division".to_string(),
                "score".to_string(),
                "name".to_string(),
            ],
            rows: vec![
                vec![
                    Scalar::Text("north".to_string()),
                    Scalar::Int(10),
                    Scalar::Text("a".to_string()),
                ],
                vec![
                    Scalar::Text("south".to_string()),
                    Scalar::Int(30),
                    Scalar::Text("b".to_string()),
                ],
                vec![Scalar::Text("north".to_string()), Scalar::Null, Scalar::Null],
            ],
        }
    }

    fn layout() -> ExportLayout {
        ExportLayout {
            summary_columns: vec!["score".to_string(), "absent".to_string()],
            statistics_columns: vec!["division".to_string(), "absent".to_string()],
            ..ExportLayout::default()
        }
    }

    #[test]
    fn data_sheet_mirrors_table() {
        let sheet = data_sheet(&table(), &layout());
        assert_eq!(sheet.name, "DATA");
        assert_eq!(sheet.header, vec!["division", "score", "name"]);
        assert_eq!(sheet.rows.len(), 3);
        assert_eq!(sheet.freeze, Some((0, 1)));
        assert!(sheet.autofilter);
    }

    #[test]
    fn summary_skips_missing_and_reports_stats() {
        let sheet = summary_sheet(&table(), &layout()).expect("summary");
        assert_eq!(sheet.rows[0][1], SheetCell::Int(3));
        // one row count + min/max/mean for "score" only
        assert_eq!(sheet.rows.len(), 4);
        assert_eq!(sheet.rows[1][0], SheetCell::Text("score min".to_string()));
        assert_eq!(sheet.rows[1][1], SheetCell::Number(10.0));
        assert_eq!(sheet.rows[2][1], SheetCell::Number(30.0));
        assert_eq!(sheet.rows[3][1], SheetCell::Number(20.0));
    }

    #[test]
    fn statistics_orders_by_count_then_value() {
        let sheet = statistics_sheet(&table(), &layout()).expect("statistics");
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0][1], SheetCell::Text("north".to_string()));
        assert_eq!(sheet.rows[0][2], SheetCell::Int(2));
        assert_eq!(sheet.rows[1][1], SheetCell::Text("south".to_string()));
    }

    #[test]
    fn statistics_sheet_skipped_when_no_column_present() {
        let mut layout = layout();
        layout.statistics_columns = vec!["absent".to_string()];
        assert!(statistics_sheet(&table(), &layout).is_none());
    }

    #[test]
    fn group_summary_uses_present_columns_only() {
        let mut layout = layout();
        layout.group_summary = Some(scoredeck_model::GroupSummarySpec {
            sheet: "BADGES".to_string(),
            group_columns: vec!["division".to_string(), "absent".to_string()],
        });
        let sheet = group_summary_sheet(&table(), &layout).expect("group summary");
        assert_eq!(sheet.header, vec!["division", "count"]);
        assert_eq!(sheet.rows[0][0], SheetCell::Text("north".to_string()));
        assert_eq!(sheet.rows[0][1], SheetCell::Int(2));
    }

    #[test]
    fn group_summary_skipped_without_columns() {
        let mut layout = layout();
        layout.group_summary = Some(scoredeck_model::GroupSummarySpec {
            sheet: "BADGES".to_string(),
            group_columns: vec!["absent".to_string()],
        });
        assert!(group_summary_sheet(&table(), &layout).is_none());
    }

    #[test]
    fn widths_are_capped() {
        let mut t = table();
        t.rows.push(vec![
            Scalar::Text("x".repeat(200)),
            Scalar::Null,
            Scalar::Null,
        ]);
        let sheet = data_sheet(&t, &layout());
        let widths = sheet.column_widths(60.0);
        assert_eq!(widths[0], 60.0);
        assert!(widths[1] >= "score".len() as f64);
    }

    #[test]
    fn cell_refs_parse() {
        assert_eq!(parse_cell_ref("A2"), Some((0, 1)));
        assert_eq!(parse_cell_ref("B1"), Some((1, 0)));
        assert_eq!(parse_cell_ref("AA10"), Some((26, 9)));
        assert_eq!(parse_cell_ref(""), None);
        assert_eq!(parse_cell_ref("17"), None);
        assert_eq!(parse_cell_ref("A0"), None);
    }

    #[test]
    fn sheet_names_are_sanitized() {
        assert_eq!(sanitize_sheet_name("Leaders"), "Leaders");
        assert_eq!(sanitize_sheet_name("bad/name:with*chars"), "bad_name_with_chars");
        assert_eq!(sanitize_sheet_name(""), "Sheet1");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40)).len(), SHEET_NAME_MAX);
    }
}
