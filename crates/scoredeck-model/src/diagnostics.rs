#![deny(unsafe_code)]

//! Conversion-scoped diagnostics.
//!
//! Coercion failures degrade per field and must never abort a conversion, so
//! they are collected here and handed back with the result instead of being
//! routed through a global. Each entry is mirrored to a `tracing` warning for
//! operators following a live run.

use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningKind {
    /// Unparseable numeric value replaced by the 0 / 0.0 sentinel.
    Numeric,
    /// Unparseable date value preserved as its original text.
    Date,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CoercionWarning {
    pub kind: WarningKind,
    pub field: String,
    pub raw: String,
    /// Identifies the surrounding record, e.g. `file.json#12`.
    pub context: String,
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<CoercionWarning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn numeric_failure(&mut self, field: &str, raw: &str, context: &str) {
        warn!(
            field = %field,
            raw = %raw,
            context = %context,
            "numeric coercion failed, substituting sentinel"
        );
        self.warnings.push(CoercionWarning {
            kind: WarningKind::Numeric,
            field: field.to_string(),
            raw: raw.to_string(),
            context: context.to_string(),
        });
    }

    pub fn date_failure(&mut self, field: &str, raw: &str, context: &str) {
        warn!(
            field = %field,
            raw = %raw,
            context = %context,
            "date coercion failed, keeping original value"
        );
        self.warnings.push(CoercionWarning {
            kind: WarningKind::Date,
            field: field.to_string(),
            raw: raw.to_string(),
            context: context.to_string(),
        });
    }

    pub fn warnings(&self) -> &[CoercionWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn merge(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
    }
}
