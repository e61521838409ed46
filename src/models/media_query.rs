use crate::models::StyleRule;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BreakpointKind {
    #[serde(rename = "min-width")]
    MinWidth,
    #[serde(rename = "max-width")]
    MaxWidth,
}

impl fmt::Display for BreakpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakpointKind::MinWidth => write!(f, "min-width"),
            BreakpointKind::MaxWidth => write!(f, "max-width"),
        }
    }
}

/// One `@media` block. `breakpoint` and `kind` are both set or both absent:
/// a query with no width clause (orientation, print) carries neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaQueryRecord {
    pub condition: String,
    pub breakpoint: Option<u32>,
    #[serde(rename = "type")]
    pub kind: Option<BreakpointKind>,
    pub rules: Vec<StyleRule>,
}

impl MediaQueryRecord {
    /// Bucket key of the form `min-width-768` / `max-width-1024`.
    /// The same pixel value under different kinds is a different bucket.
    pub fn breakpoint_key(&self) -> Option<String> {
        match (self.kind, self.breakpoint) {
            (Some(kind), Some(value)) => Some(format!("{}-{}", kind, value)),
            _ => None,
        }
    }

    pub fn declared_property_count(&self) -> usize {
        self.rules.iter().map(StyleRule::property_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn record(kind: Option<BreakpointKind>, breakpoint: Option<u32>) -> MediaQueryRecord {
        MediaQueryRecord {
            condition: "screen".to_string(),
            breakpoint,
            kind,
            rules: vec![],
        }
    }

    #[test]
    fn breakpoint_key_pairs_kind_with_value() {
        assert_eq!(
            record(Some(BreakpointKind::MaxWidth), Some(768)).breakpoint_key(),
            Some("max-width-768".to_string())
        );
        assert_eq!(
            record(Some(BreakpointKind::MinWidth), Some(768)).breakpoint_key(),
            Some("min-width-768".to_string())
        );
        assert_eq!(record(None, None).breakpoint_key(), None);
    }

    #[test]
    fn serializes_with_css_facing_field_names() {
        let mut properties = BTreeMap::new();
        properties.insert("display".to_string(), "none".to_string());

        let record = MediaQueryRecord {
            condition: "(min-width: 1024px)".to_string(),
            breakpoint: Some(1024),
            kind: Some(BreakpointKind::MinWidth),
            rules: vec![StyleRule {
                selector: ".sidebar".to_string(),
                properties,
            }],
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "min-width");
        assert_eq!(json["breakpoint"], 1024);
        assert_eq!(json["rules"][0]["selector"], ".sidebar");
    }
}
