use std::path::PathBuf;

use scoredeck_model::Diagnostics;

/// Result of one conversion call, handed back to the CLI layer together with
/// the diagnostics collected during coercion.
#[derive(Debug)]
pub struct ConversionReport {
    pub output: PathBuf,
    /// Name of the extraction strategy that matched.
    pub strategy: String,
    pub rows: usize,
    pub columns: usize,
    pub diagnostics: Diagnostics,
}

/// Outcome for a single input file within a batch.
#[derive(Debug)]
pub enum FileOutcome {
    Converted(ConversionReport),
    Failed(String),
}

#[derive(Debug)]
pub struct FileSummary {
    pub input: PathBuf,
    pub source: String,
    pub outcome: FileOutcome,
}

/// Whole-batch result; files are processed strictly in the order given and a
/// failure never stops the batch.
#[derive(Debug, Default)]
pub struct RunResult {
    pub files: Vec<FileSummary>,
}

impl RunResult {
    pub fn has_errors(&self) -> bool {
        self.files
            .iter()
            .any(|file| matches!(file.outcome, FileOutcome::Failed(_)))
    }

    pub fn converted_count(&self) -> usize {
        self.files
            .iter()
            .filter(|file| matches!(file.outcome, FileOutcome::Converted(_)))
            .count()
    }
}
