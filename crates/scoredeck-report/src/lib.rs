//! scoredeck workbook output.
//!
//! Renders a [`scoredeck_model::Table`] into a styled multi-sheet XLSX file:
//!
//! - **DATA**: the table itself, styled header, frozen pane, autofilter
//! - **SUMMARY**: row count plus min/max/mean for configured numeric columns
//! - **STATISTICS**: value → count breakdowns for categorical columns
//! - optional grouped-summary sheet (e.g. badge counts by type/category)
//!
//! Parts are written directly as OOXML (quick-xml) inside a zip container.

mod package;
mod sheet;
mod xlsx;

pub use package::{export_table, write_workbook};
pub use sheet::{
    build_sheets, data_sheet, frequencies, group_summary_sheet, numeric_stats, parse_cell_ref,
    sanitize_sheet_name, statistics_sheet, summary_sheet, Sheet, SheetCell, SHEET_NAME_MAX,
};
pub use xlsx::{cell_ref, column_letter, worksheet_xml};
