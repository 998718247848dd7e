#![deny(unsafe_code)]

//! Workbook container assembly.
//!
//! A workbook is a zip of OOXML parts. Failures while writing leave no
//! partial file behind: the destination is removed on a best-effort basis and
//! only a fully written path is ever reported back.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use scoredeck_model::{ExportLayout, Table};

use crate::sheet::{build_sheets, Sheet};
use crate::xlsx::{
    content_types_xml, styles_xml, workbook_rels_xml, workbook_xml, worksheet_xml, ROOT_RELS,
};

/// Build the configured sheets from `table` and write the workbook.
pub fn export_table(path: &Path, table: &Table, layout: &ExportLayout) -> Result<PathBuf> {
    let sheets = build_sheets(table, layout);
    write_workbook(path, &sheets, layout)
}

/// Write `sheets` as one XLSX file at `path`, creating parent directories.
pub fn write_workbook(path: &Path, sheets: &[Sheet], layout: &ExportLayout) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output directory {}", parent.display()))?;
        }
    }
    let result = (|| -> Result<()> {
        let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        let mut archive = ZipWriter::new(file);
        write_parts(&mut archive, sheets, layout)
            .with_context(|| format!("write workbook parts to {}", path.display()))?;
        archive.finish().context("finalize workbook archive")?;
        Ok(())
    })();
    match result {
        Ok(()) => {
            info!(
                path = %path.display(),
                sheets = sheets.len(),
                "workbook written"
            );
            Ok(path.to_path_buf())
        }
        Err(error) => {
            let _ = fs::remove_file(path);
            Err(error)
        }
    }
}

fn write_parts(archive: &mut ZipWriter<File>, sheets: &[Sheet], layout: &ExportLayout) -> Result<()> {
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let names = unique_sheet_names(sheets);

    add_part(archive, options, "[Content_Types].xml", &content_types_xml(sheets.len()))?;
    add_part(archive, options, "_rels/.rels", ROOT_RELS)?;
    add_part(archive, options, "xl/workbook.xml", &workbook_xml(&names)?)?;
    add_part(
        archive,
        options,
        "xl/_rels/workbook.xml.rels",
        &workbook_rels_xml(sheets.len()),
    )?;
    add_part(
        archive,
        options,
        "xl/styles.xml",
        &styles_xml(&layout.header_fill, &layout.header_font_color),
    )?;
    for (index, sheet) in sheets.iter().enumerate() {
        let widths = sheet.column_widths(layout.max_column_width);
        add_part(
            archive,
            options,
            &format!("xl/worksheets/sheet{}.xml", index + 1),
            &worksheet_xml(sheet, &widths)?,
        )?;
    }
    Ok(())
}

fn add_part(
    archive: &mut ZipWriter<File>,
    options: FileOptions,
    name: &str,
    content: &str,
) -> Result<()> {
    archive.start_file(name, options)?;
    archive.write_all(content.as_bytes())?;
    Ok(())
}

// Workbook sheet names must be unique; collisions after sanitizing get a
// numeric suffix.
fn unique_sheet_names(sheets: &[Sheet]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(sheets.len());
    for sheet in sheets {
        let mut candidate = sheet.name.clone();
        let mut attempt = 2;
        while names.contains(&candidate) {
            candidate = format!("{} ({attempt})", sheet.name);
            attempt += 1;
        }
        names.push(candidate);
    }
    names
}
