//! Integration tests for workbook writing.

use std::fs::File;

use scoredeck_model::{ExportLayout, Scalar, Table};
use scoredeck_report::export_table;

fn sample_table() -> Table {
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
                Scalar::Float(12.5),
                Scalar::Text("b".to_string()),
            ],
        ],
    }
}

fn layout() -> ExportLayout {
    ExportLayout {
        summary_columns: vec!["score".to_string()],
        statistics_columns: vec!["division".to_string()],
        ..ExportLayout::default()
    }
}

#[test]
fn writes_an_openable_workbook() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("reports").join("rating_list_data.xlsx");

    let written = export_table(&path, &sample_table(), &layout()).expect("export");
    assert_eq!(written, path);

    let mut archive = zip::ZipArchive::new(File::open(&path).expect("open")).expect("zip");
    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "xl/workbook.xml",
        "xl/_rels/workbook.xml.rels",
        "xl/styles.xml",
        "xl/worksheets/sheet1.xml",
        // SUMMARY and STATISTICS sheets are both configured and present
        "xl/worksheets/sheet2.xml",
        "xl/worksheets/sheet3.xml",
    ] {
        assert!(archive.by_name(part).is_ok(), "missing part {part}");
    }
}

#[test]
fn data_sheet_only_when_aux_sheets_disabled() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("data.xlsx");
    let layout = ExportLayout {
        summary_sheet: None,
        statistics_sheet: None,
        ..ExportLayout::default()
    };

    export_table(&path, &sample_table(), &layout).expect("export");

    let mut archive = zip::ZipArchive::new(File::open(&path).expect("open")).expect("zip");
    assert!(archive.by_name("xl/worksheets/sheet1.xml").is_ok());
    assert!(archive.by_name("xl/worksheets/sheet2.xml").is_err());
}

#[test]
fn empty_table_still_produces_a_workbook() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("empty.xlsx");
    let table = Table::default();

    export_table(&path, &table, &layout()).expect("export");
    assert!(path.exists());
}

#[test]
fn failed_write_leaves_no_partial_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    // Parent "directory" is a plain file, so creating the output must fail.
    let blocker = dir.path().join("blocked");
    std::fs::write(&blocker, "x").expect("write blocker");
    let path = blocker.join("data.xlsx");

    assert!(export_table(&path, &sample_table(), &layout()).is_err());
    assert!(!path.exists());
}
