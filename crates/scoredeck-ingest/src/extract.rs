#![deny(unsafe_code)]

//! Schema resolution.
//!
//! The gamification API wraps its record array at different nesting depths
//! across versions (`body.rating.leaders`, `body.participants`, a bare
//! array). Each known shape is a tagged [`ExtractionStrategy`]; strategies
//! are probed in configured priority order and the first one whose path
//! yields a non-empty array wins. A strategy that resolves to an *empty*
//! array is remembered and produces a valid empty batch when nothing better
//! matches — distinct from no strategy matching at all, which is an error.

use scoredeck_model::{ConvertError, ExtractionStrategy, Result, Scalar};
use serde_json::Value;
use tracing::debug;

/// One resolved batch of records plus the provenance attached to it.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Name of the strategy that matched.
    pub strategy: String,
    /// Record elements, already tagged with provenance fields.
    pub records: Vec<Value>,
    pub provenance: Vec<(String, Scalar)>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Resolve a dotted path against a JSON value. Numeric segments index
/// arrays; the empty path addresses the root itself.
pub fn json_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(root);
    }
    let mut current = root;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Probe `strategies` in order against `root`.
pub fn resolve(root: &Value, strategies: &[ExtractionStrategy]) -> Result<Extraction> {
    let mut empty_match: Option<&ExtractionStrategy> = None;
    for strategy in strategies {
        let Some(node) = json_path(root, &strategy.path) else {
            continue;
        };
        let Some(records) = candidate_records(node, strategy.wrap_object) else {
            continue;
        };
        if records.is_empty() {
            if empty_match.is_none() {
                empty_match = Some(strategy);
            }
            continue;
        }
        let provenance = resolve_provenance(strategy, root);
        let records = tag_records(records, &provenance);
        debug!(
            strategy = %strategy.name,
            records = records.len(),
            "extraction strategy matched"
        );
        return Ok(Extraction {
            strategy: strategy.name.clone(),
            records,
            provenance,
        });
    }
    if let Some(strategy) = empty_match {
        debug!(strategy = %strategy.name, "extraction strategy matched an empty batch");
        return Ok(Extraction {
            strategy: strategy.name.clone(),
            records: Vec::new(),
            provenance: resolve_provenance(strategy, root),
        });
    }
    Err(ConvertError::NoRecords {
        tried: strategies.iter().map(|s| s.name.clone()).collect(),
    })
}

fn candidate_records(node: &Value, wrap_object: bool) -> Option<Vec<Value>> {
    match node {
        Value::Array(items) => Some(items.clone()),
        // A single object counts as a one-record batch when the strategy
        // opts in (single-profile responses).
        Value::Object(_) if wrap_object => Some(vec![node.clone()]),
        _ => None,
    }
}

fn resolve_provenance(strategy: &ExtractionStrategy, root: &Value) -> Vec<(String, Scalar)> {
    let mut fields = Vec::new();
    for provenance in &strategy.provenance {
        let from_path = provenance
            .path
            .as_deref()
            .and_then(|path| json_path(root, path))
            .and_then(Scalar::from_json);
        let resolved = from_path.or_else(|| provenance.value.clone());
        match resolved {
            Some(scalar) => fields.push((provenance.field.clone(), scalar)),
            None => debug!(
                field = %provenance.field,
                "provenance field did not resolve, skipping"
            ),
        }
    }
    fields
}

fn tag_records(mut records: Vec<Value>, provenance: &[(String, Scalar)]) -> Vec<Value> {
    if provenance.is_empty() {
        return records;
    }
    for record in &mut records {
        if let Value::Object(map) = record {
            for (field, scalar) in provenance {
                map.insert(field.clone(), scalar_to_json(scalar));
            }
        }
    }
    records
}

fn scalar_to_json(scalar: &Scalar) -> Value {
    serde_json::to_value(scalar).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoredeck_model::ProvenanceField;
    use serde_json::json;

    fn strategy(name: &str, path: &str) -> ExtractionStrategy {
        ExtractionStrategy::new(name, path)
    }

    #[test]
    fn json_path_walks_objects_and_arrays() {
        let doc = json!({"body": {"pages": [{"id": 7}]}});
        assert_eq!(json_path(&doc, "body.pages.0.id"), Some(&json!(7)));
        assert_eq!(json_path(&doc, ""), Some(&doc));
        assert_eq!(json_path(&doc, "body.missing"), None);
        assert_eq!(json_path(&doc, "body.pages.x"), None);
    }

    #[test]
    fn first_matching_strategy_wins() {
        let doc = json!({"body": {"profiles": [{"a": 1}]}});
        let strategies = vec![
            strategy("absent", "body.badge.leaders"),
            strategy("profiles", "body.profiles"),
            strategy("root", ""),
        ];
        let extraction = resolve(&doc, &strategies).expect("resolve");
        assert_eq!(extraction.strategy, "profiles");
        assert_eq!(extraction.records.len(), 1);
    }

    #[test]
    fn later_strategy_provenance_is_used() {
        let doc = json!({
            "body": {"data": [{"a": 1}], "rewardCode": "GOLD"}
        });
        let strategies = vec![
            strategy("absent", "body.leaders"),
            strategy("data", "body.data").with_provenance(ProvenanceField::from_path(
                "rewardCode",
                "body.rewardCode",
            )),
        ];
        let extraction = resolve(&doc, &strategies).expect("resolve");
        assert_eq!(extraction.strategy, "data");
        assert_eq!(
            extraction.provenance,
            vec![("rewardCode".to_string(), Scalar::Text("GOLD".to_string()))]
        );
        assert_eq!(extraction.records[0]["rewardCode"], json!("GOLD"));
    }

    #[test]
    fn empty_array_is_a_valid_empty_result() {
        let doc = json!({"body": {"leaders": []}});
        let strategies = vec![strategy("leaders", "body.leaders")];
        let extraction = resolve(&doc, &strategies).expect("resolve");
        assert_eq!(extraction.strategy, "leaders");
        assert!(extraction.is_empty());
    }

    #[test]
    fn non_empty_match_beats_earlier_empty_match() {
        let doc = json!({"body": {"leaders": [], "data": [{"a": 1}]}});
        let strategies = vec![
            strategy("leaders", "body.leaders"),
            strategy("data", "body.data"),
        ];
        let extraction = resolve(&doc, &strategies).expect("resolve");
        assert_eq!(extraction.strategy, "data");
        assert_eq!(extraction.records.len(), 1);
    }

    #[test]
    fn no_match_is_an_explicit_error() {
        let doc = json!({"body": {"status": "ok"}});
        let strategies = vec![
            strategy("leaders", "body.leaders"),
            strategy("data", "body.data"),
        ];
        let error = resolve(&doc, &strategies).expect_err("must fail");
        match error {
            ConvertError::NoRecords { tried } => {
                assert_eq!(tried, vec!["leaders".to_string(), "data".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn wrap_object_yields_single_record_batch() {
        let doc = json!({"body": {"profile": {"id": 1, "name": "a"}}});
        let strategies = vec![strategy("profile", "body.profile").wrapping_object()];
        let extraction = resolve(&doc, &strategies).expect("resolve");
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0]["name"], json!("a"));
    }

    #[test]
    fn object_without_wrap_flag_does_not_match() {
        let doc = json!({"body": {"profile": {"id": 1}}});
        let strategies = vec![strategy("profile", "body.profile")];
        assert!(resolve(&doc, &strategies).is_err());
    }

    #[test]
    fn constant_provenance_backs_up_missing_path() {
        let doc = json!({"items": [{"a": 1}]});
        let strategies = vec![strategy("items", "items").with_provenance(ProvenanceField {
            field: "businessBlock".to_string(),
            path: Some("body.block".to_string()),
            value: Some(Scalar::Text("KMKKSB".to_string())),
        })];
        let extraction = resolve(&doc, &strategies).expect("resolve");
        assert_eq!(
            extraction.provenance,
            vec![("businessBlock".to_string(), Scalar::Text("KMKKSB".to_string()))]
        );
    }

    #[test]
    fn bare_root_array_matches_empty_path() {
        let doc = json!([{"a": 1}, {"a": 2}]);
        let strategies = vec![strategy("root", "")];
        let extraction = resolve(&doc, &strategies).expect("resolve");
        assert_eq!(extraction.records.len(), 2);
    }
}
