#![deny(unsafe_code)]

//! Rule application for the type coercer.
//!
//! Failure policies differ by rule kind and are deliberate (carried over from
//! the observed source behavior): a bad numeric value becomes the 0 / 0.0
//! sentinel so aggregations stay usable, while a bad date keeps its original
//! text so chronology errors stay visible. Neither ever drops the record or
//! aborts the conversion.

use scoredeck_model::{
    CoercionRules, Diagnostics, FlatRecord, NumericRule, NumericTarget, Scalar,
    DERIVED_DATE_SUFFIX, DERIVED_NUMERIC_SUFFIX,
};

use crate::normalize;

/// Apply the rule set to one record, after projection. `context` identifies
/// the record in diagnostics (e.g. `file.json#12`).
pub fn coerce(
    record: FlatRecord,
    rules: &CoercionRules,
    context: &str,
    diagnostics: &mut Diagnostics,
) -> FlatRecord {
    if rules.is_empty() {
        return record;
    }
    let mut record = record;
    for rule in &rules.numeric {
        for field in &rule.fields {
            let Some(value) = record.get(field) else {
                continue;
            };
            let raw = value.display_text();
            let coerced = match normalize::parse_numeric(&raw) {
                Some(parsed) => numeric_scalar(parsed, rule),
                None => {
                    diagnostics.numeric_failure(field, &raw, context);
                    sentinel(rule.target)
                }
            };
            if rule.replace_original {
                record.insert(field.clone(), coerced);
            } else {
                record.insert(format!("{field}{DERIVED_NUMERIC_SUFFIX}"), coerced);
            }
        }
    }
    for rule in &rules.date {
        for field in &rule.fields {
            let Some(value) = record.get(field) else {
                continue;
            };
            let raw = value.display_text();
            match normalize::reformat(&raw, &rule.input_format, &rule.output_format) {
                Some(formatted) => {
                    if rule.replace_original {
                        record.insert(field.clone(), Scalar::Text(formatted));
                    } else {
                        record.insert(
                            format!("{field}{DERIVED_DATE_SUFFIX}"),
                            Scalar::Text(formatted),
                        );
                    }
                }
                // Original value stays untouched; no derived field either.
                None => diagnostics.date_failure(field, &raw, context),
            }
        }
    }
    record
}

fn numeric_scalar(parsed: f64, rule: &NumericRule) -> Scalar {
    match rule.target {
        NumericTarget::Integer => Scalar::Int(parsed.trunc() as i64),
        NumericTarget::Float => Scalar::Float(normalize::round_to(parsed, rule.decimals)),
    }
}

fn sentinel(target: NumericTarget) -> Scalar {
    match target {
        NumericTarget::Integer => Scalar::Int(0),
        NumericTarget::Float => Scalar::Float(0.0),
    }
}
