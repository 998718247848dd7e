#![deny(unsafe_code)]

//! Include/exclude field projection.

use scoredeck_model::{FlatRecord, ProjectionSpec};

/// Filter a record's fields. `include` wins when non-empty; otherwise
/// `exclude` applies; otherwise the record passes through untouched. Field
/// order is the record's own. An `include` entry absent from the record is
/// silently a no-op.
pub fn project(record: FlatRecord, spec: &ProjectionSpec) -> FlatRecord {
    if !spec.include.is_empty() {
        record
            .into_iter()
            .filter(|(key, _)| spec.include.iter().any(|field| field == key))
            .collect()
    } else if !spec.exclude.is_empty() {
        record
            .into_iter()
            .filter(|(key, _)| !spec.exclude.iter().any(|field| field == key))
            .collect()
    } else {
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoredeck_model::Scalar;

    fn record() -> FlatRecord {
        [
            ("id".to_string(), Scalar::Int(1)),
            ("name".to_string(), Scalar::Text("a".to_string())),
            ("secret".to_string(), Scalar::Text("x".to_string())),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn include_wins_over_exclude() {
        let spec = ProjectionSpec {
            include: vec!["id".to_string(), "name".to_string()],
            exclude: vec!["name".to_string()],
        };
        let projected = project(record(), &spec);
        let keys: Vec<&str> = projected.keys().collect();
        assert_eq!(keys, vec!["id", "name"]);
    }

    #[test]
    fn exclude_drops_listed_fields() {
        let spec = ProjectionSpec::exclude(&["secret"]);
        let projected = project(record(), &spec);
        let keys: Vec<&str> = projected.keys().collect();
        assert_eq!(keys, vec!["id", "name"]);
    }

    #[test]
    fn empty_spec_passes_through() {
        let projected = project(record(), &ProjectionSpec::default());
        assert_eq!(projected.len(), 3);
    }

    #[test]
    fn missing_include_entry_is_not_synthesized() {
        let spec = ProjectionSpec::include(&["id", "absent"]);
        let projected = project(record(), &spec);
        let keys: Vec<&str> = projected.keys().collect();
        assert_eq!(keys, vec!["id"]);
    }

    #[test]
    fn include_keeps_record_order_not_spec_order() {
        let spec = ProjectionSpec::include(&["name", "id"]);
        let projected = project(record(), &spec);
        let keys: Vec<&str> = projected.keys().collect();
        assert_eq!(keys, vec!["id", "name"]);
    }
}
