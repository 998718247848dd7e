#![deny(unsafe_code)]

//! Nested-to-flat key/value transform.
//!
//! Composite keys are path segments joined by the configured separator, with
//! array indices embedded as segments. Any JSON value is flattenable: the
//! walk visits each node exactly once and only ever emits scalars.

use scoredeck_model::{FlatRecord, Scalar};
use serde_json::Value;

/// Flatten `value` into a single-level record.
///
/// Keys of nested fields are prefixed with `prefix` when it is non-empty; a
/// bare scalar is assigned to `prefix` itself.
pub fn flatten(value: &Value, prefix: &str, separator: &str) -> FlatRecord {
    let mut record = FlatRecord::new();
    walk(value, prefix, separator, &mut record);
    record
}

fn walk(value: &Value, key: &str, separator: &str, out: &mut FlatRecord) {
    match value {
        Value::Object(map) => {
            for (name, child) in map {
                walk(child, &join(key, name, separator), separator, out);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let child_key = join(key, &index.to_string(), separator);
                match item {
                    // Nested containers are recursed so the record never
                    // holds a non-scalar value.
                    Value::Object(_) | Value::Array(_) => {
                        walk(item, &child_key, separator, out);
                    }
                    leaf => {
                        if let Some(scalar) = Scalar::from_json(leaf) {
                            out.insert(child_key, scalar);
                        }
                    }
                }
            }
        }
        leaf => {
            if let Some(scalar) = Scalar::from_json(leaf) {
                out.insert(key.to_string(), scalar);
            }
        }
    }
}

fn join(prefix: &str, segment: &str, separator: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}{separator}{segment}")
    }
}
