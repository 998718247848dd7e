//! Source catalog.
//!
//! The built-in profiles mirror the data sources the scraping scripts are
//! generated for; a JSON bundle can replace or extend them. Each profile is
//! an immutable [`SourceConfig`] handed to the pipeline as-is.

use std::path::Path;

use anyhow::{Context, Result};
use scoredeck_model::{
    CoercionRules, DateRule, ExportLayout, ExtractionStrategy, GroupSummarySpec, NumericRule,
    NumericTarget, ProjectionSpec, ProvenanceField, SourceConfig,
};

/// External bundle shape: `{"sources": [...]}`.
#[derive(Debug, serde::Deserialize)]
struct ConfigBundle {
    sources: Vec<SourceConfig>,
}

/// Built-in catalog plus optional bundle overrides. A bundle source with the
/// same name replaces the built-in one; new names are appended.
pub fn catalog(bundle_path: Option<&Path>) -> Result<Vec<SourceConfig>> {
    let mut sources = builtin_sources();
    if let Some(path) = bundle_path {
        for source in load_bundle(path)? {
            match sources.iter_mut().find(|s| s.name == source.name) {
                Some(existing) => *existing = source,
                None => sources.push(source),
            }
        }
    }
    Ok(sources)
}

pub fn load_bundle(path: &Path) -> Result<Vec<SourceConfig>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config bundle {}", path.display()))?;
    let bundle: ConfigBundle = serde_json::from_str(&text)
        .with_context(|| format!("parse config bundle {}", path.display()))?;
    Ok(bundle.sources)
}

pub fn find_source<'a>(catalog: &'a [SourceConfig], name: &str) -> Option<&'a SourceConfig> {
    catalog.iter().find(|source| source.name == name)
}

/// Match a response file to a profile via the `<source>_response*.json`
/// naming convention, falling back to an exact stem match.
pub fn source_for_file<'a>(catalog: &'a [SourceConfig], path: &Path) -> Option<&'a SourceConfig> {
    let stem = path.file_stem()?.to_str()?;
    catalog
        .iter()
        .find(|source| stem.starts_with(&format!("{}_response", source.name)))
        .or_else(|| catalog.iter().find(|source| source.name == stem))
}

pub fn builtin_sources() -> Vec<SourceConfig> {
    vec![
        rating_list(),
        leaders_for_admin(),
        profile(),
        reward(),
        news_list(),
    ]
}

// Shape probes are ordered the way the API has been observed to drift:
// current envelope first, older envelopes after, bare array last.
fn rating_list() -> SourceConfig {
    SourceConfig {
        name: "rating_list".to_string(),
        separator: "_".to_string(),
        strategies: vec![
            ExtractionStrategy::new("rating-leaders", "body.rating.leaders")
                .with_provenance(ProvenanceField::from_path(
                    "businessBlock",
                    "body.rating.businessBlock",
                ))
                .with_provenance(ProvenanceField::from_path(
                    "timePeriod",
                    "body.rating.timePeriod",
                )),
            ExtractionStrategy::new("body-participants", "body.participants"),
            ExtractionStrategy::new("body-data", "body.data"),
            ExtractionStrategy::new("participants", "participants"),
            ExtractionStrategy::new("data", "data"),
            ExtractionStrategy::new("body-array", "body"),
            ExtractionStrategy::new("root-array", ""),
        ],
        projection: ProjectionSpec::exclude(&["photoData"]),
        rules: CoercionRules {
            numeric: vec![
                NumericRule {
                    fields: vec!["totalPoints".to_string(), "rank".to_string()],
                    target: NumericTarget::Integer,
                    decimals: 0,
                    replace_original: true,
                },
                NumericRule {
                    fields: vec!["score".to_string()],
                    target: NumericTarget::Float,
                    decimals: 2,
                    replace_original: true,
                },
            ],
            date: Vec::new(),
        },
        layout: ExportLayout {
            data_sheet: "Ratings".to_string(),
            summary_columns: vec!["totalPoints".to_string(), "score".to_string()],
            statistics_columns: vec![
                "businessBlock".to_string(),
                "timePeriod".to_string(),
                "divisionLevel".to_string(),
            ],
            ..ExportLayout::default()
        },
    }
}

fn leaders_for_admin() -> SourceConfig {
    SourceConfig {
        name: "leaders_for_admin".to_string(),
        separator: "_".to_string(),
        strategies: vec![
            ExtractionStrategy::new("badge-leaders", "body.badge.leaders").with_provenance(
                ProvenanceField::from_path("rewardCode", "body.badge.rewardCode"),
            ),
            ExtractionStrategy::new("body-leaders", "body.leaders"),
            ExtractionStrategy::new("leaders", "leaders"),
            ExtractionStrategy::new("root-array", ""),
        ],
        projection: ProjectionSpec::include(&[
            "id",
            "name",
            "score",
            "level",
            "rank",
            "rewardCode",
        ]),
        rules: CoercionRules {
            numeric: vec![NumericRule {
                fields: vec![
                    "score".to_string(),
                    "level".to_string(),
                    "rank".to_string(),
                ],
                target: NumericTarget::Integer,
                decimals: 0,
                replace_original: true,
            }],
            date: Vec::new(),
        },
        layout: ExportLayout {
            data_sheet: "Leaders".to_string(),
            summary_columns: vec!["score".to_string()],
            statistics_columns: vec!["level".to_string(), "rewardCode".to_string()],
            ..ExportLayout::default()
        },
    }
}

fn profile() -> SourceConfig {
    SourceConfig {
        name: "profile".to_string(),
        separator: "_".to_string(),
        strategies: vec![
            ExtractionStrategy::new("body-profile", "body.profile").wrapping_object(),
            ExtractionStrategy::new("body-object", "body").wrapping_object(),
            ExtractionStrategy::new("root-object", "").wrapping_object(),
        ],
        projection: ProjectionSpec::exclude(&["password_hash", "session_data", "photoData"]),
        rules: CoercionRules {
            numeric: Vec::new(),
            date: vec![DateRule {
                fields: vec!["registrationDate".to_string()],
                input_format: "%d.%m.%Y".to_string(),
                output_format: "%Y-%m-%d".to_string(),
                replace_original: true,
            }],
        },
        layout: ExportLayout {
            data_sheet: "Profiles".to_string(),
            statistics_columns: vec!["department".to_string(), "position".to_string()],
            ..ExportLayout::default()
        },
    }
}

fn reward() -> SourceConfig {
    SourceConfig {
        name: "reward".to_string(),
        separator: "_".to_string(),
        strategies: vec![
            ExtractionStrategy::new("badge-profiles", "body.badge.profiles")
                .with_provenance(ProvenanceField::from_path(
                    "rewardCode",
                    "body.badge.rewardCode",
                ))
                .with_provenance(ProvenanceField::from_path(
                    "badgeType",
                    "body.badge.badgeType",
                )),
            ExtractionStrategy::new("body-profiles", "body.profiles"),
            ExtractionStrategy::new("profiles", "profiles"),
            ExtractionStrategy::new("root-array", ""),
        ],
        projection: ProjectionSpec::exclude(&["approval_chain", "internal_notes"]),
        rules: CoercionRules {
            numeric: vec![NumericRule {
                fields: vec!["amount".to_string()],
                target: NumericTarget::Float,
                decimals: 2,
                replace_original: true,
            }],
            date: vec![DateRule {
                fields: vec!["date".to_string()],
                input_format: "%d.%m.%y".to_string(),
                output_format: "%Y-%m-%d".to_string(),
                replace_original: false,
            }],
        },
        layout: ExportLayout {
            data_sheet: "Rewards".to_string(),
            summary_columns: vec!["amount".to_string()],
            statistics_columns: vec!["status".to_string()],
            group_summary: Some(GroupSummarySpec {
                sheet: "BADGES".to_string(),
                group_columns: vec!["badgeType".to_string(), "rewardCode".to_string()],
            }),
            ..ExportLayout::default()
        },
    }
}

fn news_list() -> SourceConfig {
    SourceConfig {
        name: "news_list".to_string(),
        separator: "_".to_string(),
        strategies: vec![
            ExtractionStrategy::new("body-news", "body.news"),
            ExtractionStrategy::new("news", "news"),
            ExtractionStrategy::new("root-array", ""),
        ],
        projection: ProjectionSpec::exclude(&["full_content", "metadata"]),
        rules: CoercionRules {
            numeric: Vec::new(),
            date: vec![DateRule {
                fields: vec!["date".to_string()],
                input_format: "%d.%m.%Y".to_string(),
                output_format: "%Y-%m-%d".to_string(),
                replace_original: true,
            }],
        },
        layout: ExportLayout {
            data_sheet: "NewsList".to_string(),
            statistics_columns: vec!["category".to_string(), "author".to_string()],
            ..ExportLayout::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_are_unique() {
        let sources = builtin_sources();
        let mut names: Vec<&str> = sources.iter().map(|s| s.name.as_str()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn every_builtin_ends_with_a_fallback_strategy() {
        for source in builtin_sources() {
            let last = source.strategies.last().expect("strategies");
            assert!(
                last.path.is_empty(),
                "{} should fall back to the document root",
                source.name
            );
        }
    }

    #[test]
    fn file_names_map_to_sources() {
        let sources = builtin_sources();
        let matched = source_for_file(
            &sources,
            Path::new("/tmp/rating_list_response_20250805.json"),
        )
        .expect("match");
        assert_eq!(matched.name, "rating_list");
        assert!(source_for_file(&sources, Path::new("unknown_response.json")).is_none());
    }
}
