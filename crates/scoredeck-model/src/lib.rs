pub mod config;
pub mod diagnostics;
pub mod error;
pub mod scalar;
pub mod table;

pub use config::{
    CoercionRules, DateRule, ExportLayout, ExtractionStrategy, GroupSummarySpec, NumericRule,
    NumericTarget, ProjectionSpec, ProvenanceField, SourceConfig, DEFAULT_SEPARATOR,
    DERIVED_DATE_SUFFIX, DERIVED_NUMERIC_SUFFIX,
};
pub use diagnostics::{CoercionWarning, Diagnostics, WarningKind};
pub use error::{ConvertError, Result};
pub use scalar::{FlatRecord, Scalar};
pub use table::Table;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_records_error_lists_strategies() {
        let error = ConvertError::NoRecords {
            tried: vec!["rating-leaders".to_string(), "body-data".to_string()],
        };
        let message = error.to_string();
        assert!(message.contains("no records found"));
        assert!(message.contains("rating-leaders, body-data"));
    }

    #[test]
    fn scalar_untagged_serde_matches_json() {
        let scalar: Scalar = serde_json::from_str("12").expect("deserialize int");
        assert_eq!(scalar, Scalar::Int(12));
        let scalar: Scalar = serde_json::from_str("\"KMKKSB\"").expect("deserialize text");
        assert_eq!(scalar, Scalar::Text("KMKKSB".to_string()));
        let scalar: Scalar = serde_json::from_str("null").expect("deserialize null");
        assert!(scalar.is_null());
    }
}
