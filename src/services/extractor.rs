use crate::models::{
    AnalysisSummary, BreakpointKind, Extraction, MediaQueryRecord, SheetAccess, StyleRule,
    StylesheetSource, TopLevelRule,
};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

lazy_static! {
    static ref MIN_WIDTH: Regex = Regex::new(r"min-width:\s*(\d+)px").unwrap();
    static ref MAX_WIDTH: Regex = Regex::new(r"max-width:\s*(\d+)px").unwrap();
}

pub struct ExtractorService;

impl ExtractorService {
    pub fn new() -> Self {
        Self
    }

    /// Walks the snapshotted stylesheets and inventories every `@media` block.
    /// Inaccessible sheets are skipped; the result under-reports whatever they
    /// defined, and the summary counts only what was reachable.
    pub fn extract(&self, sheets: &[StylesheetSource]) -> Extraction {
        let mut media_queries = Vec::new();
        let mut distinct_values = BTreeSet::new();

        for sheet in sheets {
            let rules = match &sheet.access {
                SheetAccess::Accessible { rules } => rules,
                SheetAccess::Inaccessible => {
                    warn!(
                        "Skipping inaccessible stylesheet: {}",
                        sheet.href.as_deref().unwrap_or("<inline>")
                    );
                    continue;
                }
            };

            for rule in rules {
                if let TopLevelRule::Media { condition, rules } = rule {
                    let record = classify(condition, rules.clone());
                    if let Some(value) = record.breakpoint {
                        distinct_values.insert(value);
                    }
                    media_queries.push(record);
                }
            }
        }

        debug!(
            "Extracted {} media queries, {} distinct breakpoint values",
            media_queries.len(),
            distinct_values.len()
        );

        let breakpoints = group_by_breakpoint(&media_queries);
        let summary = AnalysisSummary {
            total_media_queries: media_queries.len(),
            unique_breakpoints: distinct_values.into_iter().collect(),
        };

        Extraction {
            media_queries,
            breakpoints,
            summary,
        }
    }
}

impl Default for ExtractorService {
    fn default() -> Self {
        Self::new()
    }
}

/// min-width is checked first, so a closed range like
/// `(min-width: 768px) and (max-width: 1024px)` classifies as min-width.
fn classify(condition: &str, rules: Vec<StyleRule>) -> MediaQueryRecord {
    if let Some(caps) = MIN_WIDTH.captures(condition) {
        if let Ok(value) = caps[1].parse() {
            return MediaQueryRecord {
                condition: condition.to_string(),
                breakpoint: Some(value),
                kind: Some(BreakpointKind::MinWidth),
                rules,
            };
        }
    }

    if let Some(caps) = MAX_WIDTH.captures(condition) {
        if let Ok(value) = caps[1].parse() {
            return MediaQueryRecord {
                condition: condition.to_string(),
                breakpoint: Some(value),
                kind: Some(BreakpointKind::MaxWidth),
                rules,
            };
        }
    }

    MediaQueryRecord {
        condition: condition.to_string(),
        breakpoint: None,
        kind: None,
        rules,
    }
}

/// Groups records under their `{type}-{value}` key. Records with no width
/// clause belong to no bucket.
pub fn group_by_breakpoint(
    records: &[MediaQueryRecord],
) -> BTreeMap<String, Vec<MediaQueryRecord>> {
    let mut buckets: BTreeMap<String, Vec<MediaQueryRecord>> = BTreeMap::new();
    for record in records {
        if let Some(key) = record.breakpoint_key() {
            buckets.entry(key).or_default().push(record.clone());
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn style_rule(selector: &str, properties: &[(&str, &str)]) -> StyleRule {
        StyleRule {
            selector: selector.to_string(),
            properties: properties
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn media(condition: &str, rules: Vec<StyleRule>) -> TopLevelRule {
        TopLevelRule::Media {
            condition: condition.to_string(),
            rules,
        }
    }

    fn accessible(rules: Vec<TopLevelRule>) -> StylesheetSource {
        StylesheetSource {
            href: Some("https://example.com/site.css".to_string()),
            access: SheetAccess::Accessible { rules },
        }
    }

    #[test]
    fn extracts_and_classifies_width_clauses() {
        let sheets = vec![accessible(vec![
            media(
                "screen and (max-width: 768px)",
                vec![style_rule(".navbar", &[("flex-direction", "column")])],
            ),
            media(
                "(min-width: 1024px)",
                vec![style_rule(".sidebar", &[("display", "block")])],
            ),
            media("print", vec![style_rule("body", &[("color", "black")])]),
            TopLevelRule::Style {
                selector: "body".to_string(),
                properties: BTreeMap::new(),
            },
            TopLevelRule::Other,
        ])];

        let extraction = ExtractorService::new().extract(&sheets);

        assert_eq!(extraction.summary.total_media_queries, 3);
        assert_eq!(extraction.summary.unique_breakpoints, vec![768, 1024]);

        let records = &extraction.media_queries;
        assert_eq!(records[0].kind, Some(BreakpointKind::MaxWidth));
        assert_eq!(records[0].breakpoint, Some(768));
        assert_eq!(records[1].kind, Some(BreakpointKind::MinWidth));
        assert_eq!(records[1].breakpoint, Some(1024));
        assert_eq!(records[2].kind, None);
        assert_eq!(records[2].breakpoint, None);

        assert!(extraction.breakpoints.contains_key("max-width-768"));
        assert!(extraction.breakpoints.contains_key("min-width-1024"));
        assert_eq!(extraction.breakpoints.len(), 2);
    }

    #[test]
    fn closed_ranges_classify_as_min_width() {
        let sheets = vec![accessible(vec![media(
            "(min-width: 768px) and (max-width: 1024px)",
            vec![style_rule(".grid", &[("gap", "1rem")])],
        )])];

        let extraction = ExtractorService::new().extract(&sheets);
        assert_eq!(
            extraction.media_queries[0].kind,
            Some(BreakpointKind::MinWidth)
        );
        assert_eq!(extraction.media_queries[0].breakpoint, Some(768));
    }

    #[test]
    fn same_value_under_different_kinds_buckets_separately() {
        let sheets = vec![accessible(vec![
            media("(min-width: 768px)", vec![style_rule("a", &[("color", "red")])]),
            media("(max-width: 768px)", vec![style_rule("a", &[("color", "blue")])]),
        ])];

        let extraction = ExtractorService::new().extract(&sheets);
        assert_eq!(extraction.breakpoints.len(), 2);
        assert_eq!(extraction.summary.unique_breakpoints, vec![768]);
    }

    #[test]
    fn inaccessible_sheets_are_skipped_not_fatal() {
        let sheets = vec![
            accessible(vec![media(
                "(max-width: 600px)",
                vec![style_rule(".menu", &[("display", "none")])],
            )]),
            StylesheetSource {
                href: Some("https://cdn.example.net/vendor.css".to_string()),
                access: SheetAccess::Inaccessible,
            },
        ];

        let extraction = ExtractorService::new().extract(&sheets);
        assert_eq!(extraction.summary.total_media_queries, 1);
        assert_eq!(extraction.media_queries[0].breakpoint, Some(600));
    }

    #[test]
    fn extraction_is_deterministic() {
        let sheets = vec![accessible(vec![
            media(
                "(min-width: 480px)",
                vec![style_rule(".a", &[("padding", "1rem"), ("margin", "0")])],
            ),
            media("(orientation: landscape)", vec![]),
            media("(max-width: 1200px)", vec![style_rule(".b", &[("width", "100%")])]),
        ])];

        let extractor = ExtractorService::new();
        let first = extractor.extract(&sheets);
        let second = extractor.extract(&sheets);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn no_media_queries_yields_empty_well_formed_result() {
        let sheets = vec![accessible(vec![TopLevelRule::Other])];
        let extraction = ExtractorService::new().extract(&sheets);

        assert_eq!(extraction.summary.total_media_queries, 0);
        assert!(extraction.summary.unique_breakpoints.is_empty());
        assert!(extraction.media_queries.is_empty());
        assert!(extraction.breakpoints.is_empty());
    }

    #[test]
    fn breakpoint_and_kind_are_always_paired() {
        let sheets = vec![accessible(vec![
            media("(min-width: 320px)", vec![]),
            media("screen and (hover: hover)", vec![]),
            media("(max-width: 900px)", vec![]),
            media("print and (orientation: portrait)", vec![]),
        ])];

        for record in ExtractorService::new().extract(&sheets).media_queries {
            assert_eq!(record.breakpoint.is_none(), record.kind.is_none());
        }
    }
}
