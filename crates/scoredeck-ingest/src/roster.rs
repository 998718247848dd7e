#![deny(unsafe_code)]

//! Identifier-list loading.
//!
//! Scraping scripts are parameterized by plain lists of identifiers
//! (employee numbers, reward codes). Lists arrive either as one-per-line
//! text files or as CSV files whose first column carries the identifier.

use std::fs;
use std::io;
use std::path::Path;

use scoredeck_model::Result;
use tracing::debug;

/// Load identifiers from a CSV or TXT file, preserving order. Blank entries
/// and `#`-comment lines are dropped.
pub fn load_identifier_list(path: &Path) -> Result<Vec<String>> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let identifiers = if is_csv {
        load_csv(path)?
    } else {
        load_lines(path)?
    };
    debug!(
        path = %path.display(),
        count = identifiers.len(),
        "identifier list loaded"
    );
    Ok(identifiers)
}

fn load_csv(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(io::Error::other)?;
    let mut identifiers = Vec::new();
    for record in reader.records() {
        let record = record.map_err(io::Error::other)?;
        let Some(first) = record.get(0) else {
            continue;
        };
        let trimmed = first.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            identifiers.push(trimmed.to_string());
        }
    }
    Ok(identifiers)
}

fn load_lines(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}
