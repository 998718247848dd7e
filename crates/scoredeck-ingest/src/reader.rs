#![deny(unsafe_code)]

//! Whole-file JSON loading.
//!
//! Responses are read in full before processing begins; a missing file or
//! malformed document aborts the conversion with an input error and no
//! output is written.

use std::fs;
use std::path::Path;

use scoredeck_model::Result;
use serde_json::Value;
use tracing::{debug, info};

pub fn read_json_file(path: &Path) -> Result<Value> {
    debug!(path = %path.display(), "reading response file");
    let text = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;
    info!(
        path = %path.display(),
        bytes = text.len(),
        "response file loaded"
    );
    Ok(value)
}
