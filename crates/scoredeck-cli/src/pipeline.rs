//! Conversion pipeline with explicit stages.
//!
//! One file: read → resolve records → flatten/project/coerce per record →
//! build table → write workbook. A batch runs files strictly in the order
//! given; a failure is recorded and the batch continues with the next file.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use tracing::{debug, error, info, info_span};

use scoredeck_ingest::{flatten, read_json_file, resolve};
use scoredeck_model::{Diagnostics, FlatRecord, SourceConfig};
use scoredeck_report::export_table;
use scoredeck_transform::{build_table, coerce, project};

use crate::config::{find_source, source_for_file};
use crate::types::{ConversionReport, FileOutcome, FileSummary, RunResult};

/// Convert one response file into a workbook at `output`.
pub fn convert_file(
    input: &Path,
    output: &Path,
    source: &SourceConfig,
) -> Result<ConversionReport> {
    let convert_span = info_span!("convert", source = %source.name, input = %input.display());
    let _convert_guard = convert_span.enter();
    let convert_start = Instant::now();

    let raw = read_json_file(input).with_context(|| format!("read {}", input.display()))?;

    let extraction = info_span!("resolve").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let extraction = resolve(&raw, &source.strategies)?;
        debug!(
            strategy = %extraction.strategy,
            records = extraction.records.len(),
            duration_ms = start.elapsed().as_millis(),
            "records resolved"
        );
        Ok(extraction)
    })?;
    drop(raw);

    if extraction.is_empty() {
        debug!(strategy = %extraction.strategy, "strategy matched an empty batch");
    }

    let mut diagnostics = Diagnostics::new();
    let records: Vec<FlatRecord> = info_span!("normalize").in_scope(|| {
        let start = Instant::now();
        let mut records = Vec::with_capacity(extraction.records.len());
        for (index, value) in extraction.records.iter().enumerate() {
            let context = format!("{}#{index}", input.display());
            // A scalar batch element has no keys of its own; give it one.
            let prefix = if value.is_object() || value.is_array() {
                ""
            } else {
                "value"
            };
            let flat = flatten(value, prefix, &source.separator);
            let flat = project(flat, &source.projection);
            records.push(coerce(flat, &source.rules, &context, &mut diagnostics));
        }
        debug!(
            records = records.len(),
            warnings = diagnostics.len(),
            duration_ms = start.elapsed().as_millis(),
            "records normalized"
        );
        records
    });

    let table = build_table(&records);

    let written = info_span!("export").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let written = export_table(output, &table, &source.layout)?;
        debug!(
            path = %written.display(),
            duration_ms = start.elapsed().as_millis(),
            "workbook exported"
        );
        Ok(written)
    })?;

    info!(
        strategy = %extraction.strategy,
        rows = table.row_count(),
        columns = table.column_count(),
        warnings = diagnostics.len(),
        duration_ms = convert_start.elapsed().as_millis(),
        output = %written.display(),
        "conversion complete"
    );

    Ok(ConversionReport {
        output: written,
        strategy: extraction.strategy,
        rows: table.row_count(),
        columns: table.column_count(),
        diagnostics,
    })
}

pub struct BatchOptions<'a> {
    pub catalog: &'a [SourceConfig],
    /// Use this profile for every file instead of filename inference.
    pub forced_source: Option<&'a str>,
    /// Defaults to `<input parent>/output` per file when unset.
    pub output_dir: Option<&'a Path>,
}

/// Convert many files, one at a time, in the order given.
pub fn run_batch(files: &[PathBuf], options: &BatchOptions<'_>) -> RunResult {
    let progress = (files.len() > 1).then(|| ProgressBar::new(files.len() as u64));
    let mut result = RunResult::default();
    for input in files {
        if let Some(bar) = &progress {
            let name = input
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            bar.set_message(name.to_string());
        }
        result.files.push(process_one(input, options));
        if let Some(bar) = &progress {
            bar.inc(1);
        }
    }
    if let Some(bar) = &progress {
        bar.finish_and_clear();
    }
    result
}

fn process_one(input: &Path, options: &BatchOptions<'_>) -> FileSummary {
    let source = match options.forced_source {
        Some(name) => find_source(options.catalog, name),
        None => source_for_file(options.catalog, input),
    };
    let Some(source) = source else {
        let message =
            "no source profile matches this file name; pass --source".to_string();
        error!(input = %input.display(), "{message}");
        return FileSummary {
            input: input.to_path_buf(),
            source: "-".to_string(),
            outcome: FileOutcome::Failed(message),
        };
    };
    let output = output_path(input, source, options.output_dir);
    match convert_file(input, &output, source) {
        Ok(report) => FileSummary {
            input: input.to_path_buf(),
            source: source.name.clone(),
            outcome: FileOutcome::Converted(report),
        },
        Err(failure) => {
            let message = format!("{failure:#}");
            error!(input = %input.display(), error = %message, "conversion failed");
            FileSummary {
                input: input.to_path_buf(),
                source: source.name.clone(),
                outcome: FileOutcome::Failed(message),
            }
        }
    }
}

/// `rating_list_response_X.json` becomes `rating_list_data_X.xlsx` in the
/// output directory.
pub fn output_path(input: &Path, source: &SourceConfig, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(source.name.as_str());
    let name = if stem.contains("_response") {
        format!("{}.xlsx", stem.replacen("_response", "_data", 1))
    } else {
        format!("{stem}_data.xlsx")
    };
    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().unwrap_or(Path::new(".")).join("output"),
    };
    dir.join(name)
}
