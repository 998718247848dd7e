#![deny(unsafe_code)]

//! Source configuration: immutable structs built once by the configuration
//! layer and passed explicitly into each pipeline stage.

use crate::Scalar;

/// Key separator used when composing flattened keys.
pub const DEFAULT_SEPARATOR: &str = "_";

/// Suffix for derived numeric fields when a rule keeps the original.
pub const DERIVED_NUMERIC_SUFFIX: &str = "_numeric";

/// Suffix for derived date fields when a rule keeps the original.
pub const DERIVED_DATE_SUFFIX: &str = "_date";

/// One candidate location of the record array inside a response envelope.
///
/// Strategies are evaluated in configured order; the first whose path yields
/// a non-empty array wins. Adding a new response shape is a pure data change.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExtractionStrategy {
    /// Strategy tag, reported back with the extraction result.
    pub name: String,
    /// Dotted path from the document root; empty addresses the root itself.
    #[serde(default)]
    pub path: String,
    /// Treat a single object at the path as a one-record batch.
    #[serde(default)]
    pub wrap_object: bool,
    /// Fields attached to every record this strategy yields.
    #[serde(default)]
    pub provenance: Vec<ProvenanceField>,
}

impl ExtractionStrategy {
    pub fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            wrap_object: false,
            provenance: Vec::new(),
        }
    }

    pub fn wrapping_object(mut self) -> Self {
        self.wrap_object = true;
        self
    }

    pub fn with_provenance(mut self, field: ProvenanceField) -> Self {
        self.provenance.push(field);
        self
    }
}

/// A provenance field is resolved from the envelope root (`path`) or supplied
/// as a constant (`value`); a path that resolves to nothing is skipped.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProvenanceField {
    pub field: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub value: Option<Scalar>,
}

impl ProvenanceField {
    pub fn from_path(field: &str, path: &str) -> Self {
        Self {
            field: field.to_string(),
            path: Some(path.to_string()),
            value: None,
        }
    }

    pub fn constant(field: &str, value: Scalar) -> Self {
        Self {
            field: field.to_string(),
            path: None,
            value: Some(value),
        }
    }
}

/// Include/exclude field filtering. `include` wins when non-empty.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProjectionSpec {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl ProjectionSpec {
    pub fn include(fields: &[&str]) -> Self {
        Self {
            include: fields.iter().map(|f| (*f).to_string()).collect(),
            exclude: Vec::new(),
        }
    }

    pub fn exclude(fields: &[&str]) -> Self {
        Self {
            include: Vec::new(),
            exclude: fields.iter().map(|f| (*f).to_string()).collect(),
        }
    }

    pub fn is_passthrough(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericTarget {
    Integer,
    Float,
}

/// Locale-aware numeric normalization for a group of fields.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NumericRule {
    pub fields: Vec<String>,
    pub target: NumericTarget,
    /// Decimal places kept for float targets; ignored for integers.
    #[serde(default = "default_decimals")]
    pub decimals: u32,
    /// Overwrite the field in place instead of adding `<field>_numeric`.
    #[serde(default)]
    pub replace_original: bool,
}

fn default_decimals() -> u32 {
    2
}

/// Pattern-driven date normalization for a group of fields.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DateRule {
    pub fields: Vec<String>,
    /// chrono pattern the raw value is expected in, e.g. `%d.%m.%y`.
    pub input_format: String,
    #[serde(default = "default_date_output")]
    pub output_format: String,
    /// Overwrite the field in place instead of adding `<field>_date`.
    #[serde(default)]
    pub replace_original: bool,
}

fn default_date_output() -> String {
    "%Y-%m-%d".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CoercionRules {
    #[serde(default)]
    pub numeric: Vec<NumericRule>,
    #[serde(default)]
    pub date: Vec<DateRule>,
}

impl CoercionRules {
    pub fn is_empty(&self) -> bool {
        self.numeric.is_empty() && self.date.is_empty()
    }
}

/// Optional grouped-count sheet, e.g. badge counts by type and category.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GroupSummarySpec {
    pub sheet: String,
    pub group_columns: Vec<String>,
}

/// Workbook layout: sheet names, header palette, freeze pane, autofilter.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExportLayout {
    #[serde(default = "default_data_sheet")]
    pub data_sheet: String,
    #[serde(default = "default_summary_sheet")]
    pub summary_sheet: Option<String>,
    #[serde(default = "default_statistics_sheet")]
    pub statistics_sheet: Option<String>,
    /// Header row fill, RGB hex without `#`.
    #[serde(default = "default_header_fill")]
    pub header_fill: String,
    /// Header row font color, RGB hex without `#`.
    #[serde(default = "default_header_font")]
    pub header_font_color: String,
    /// Cell reference below/right of which the data sheet stays scrollable.
    #[serde(default = "default_freeze_pane")]
    pub freeze_pane: String,
    #[serde(default = "default_true")]
    pub autofilter: bool,
    #[serde(default = "default_max_column_width")]
    pub max_column_width: f64,
    /// Numeric columns summarized with min/max/mean; absent columns are
    /// skipped, not errors.
    #[serde(default)]
    pub summary_columns: Vec<String>,
    /// Categorical columns broken down value → count on the statistics
    /// sheet; absent columns are skipped.
    #[serde(default)]
    pub statistics_columns: Vec<String>,
    #[serde(default)]
    pub group_summary: Option<GroupSummarySpec>,
}

fn default_data_sheet() -> String {
    "DATA".to_string()
}

fn default_summary_sheet() -> Option<String> {
    Some("SUMMARY".to_string())
}

fn default_statistics_sheet() -> Option<String> {
    Some("STATISTICS".to_string())
}

fn default_header_fill() -> String {
    "4F81BD".to_string()
}

fn default_header_font() -> String {
    "FFFFFF".to_string()
}

fn default_freeze_pane() -> String {
    "A2".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_column_width() -> f64 {
    60.0
}

impl Default for ExportLayout {
    fn default() -> Self {
        Self {
            data_sheet: default_data_sheet(),
            summary_sheet: default_summary_sheet(),
            statistics_sheet: default_statistics_sheet(),
            header_fill: default_header_fill(),
            header_font_color: default_header_font(),
            freeze_pane: default_freeze_pane(),
            autofilter: default_true(),
            max_column_width: default_max_column_width(),
            summary_columns: Vec::new(),
            statistics_columns: Vec::new(),
            group_summary: None,
        }
    }
}

/// Everything the pipeline needs to convert one logical data source.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SourceConfig {
    pub name: String,
    #[serde(default = "default_separator")]
    pub separator: String,
    pub strategies: Vec<ExtractionStrategy>,
    #[serde(default)]
    pub projection: ProjectionSpec,
    #[serde(default)]
    pub rules: CoercionRules,
    #[serde(default)]
    pub layout: ExportLayout,
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}
