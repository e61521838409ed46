use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One stylesheet as snapshotted from the page. Cross-origin sheets come back
/// `Inaccessible` because the browser refuses to expose their rule list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StylesheetSource {
    pub href: Option<String>,
    pub access: SheetAccess,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SheetAccess {
    Accessible { rules: Vec<TopLevelRule> },
    Inaccessible,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopLevelRule {
    Media {
        condition: String,
        rules: Vec<StyleRule>,
    },
    Style {
        selector: String,
        properties: BTreeMap<String, String>,
    },
    Other,
}

/// A selector block. Selectors are kept verbatim, comma-compounds included.
/// Repeated properties collapse to the last declaration, as in CSS itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRule {
    pub selector: String,
    pub properties: BTreeMap<String, String>,
}

impl StyleRule {
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_browser_snapshot_shape() {
        // Mirrors the JSON produced by the in-page snapshot script.
        let json = r#"[
            {
                "href": "https://example.com/site.css",
                "access": {
                    "status": "accessible",
                    "rules": [
                        {
                            "kind": "media",
                            "condition": "screen and (max-width: 768px)",
                            "rules": [
                                {
                                    "selector": ".navbar",
                                    "properties": { "flex-direction": "column" }
                                }
                            ]
                        },
                        { "kind": "style", "selector": "body", "properties": { "margin": "0px" } },
                        { "kind": "other" }
                    ]
                }
            },
            { "href": "https://cdn.example.net/vendor.css", "access": { "status": "inaccessible" } }
        ]"#;

        let sheets: Vec<StylesheetSource> = serde_json::from_str(json).unwrap();
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[1].access, SheetAccess::Inaccessible);

        match &sheets[0].access {
            SheetAccess::Accessible { rules } => {
                assert_eq!(rules.len(), 3);
                match &rules[0] {
                    TopLevelRule::Media { condition, rules } => {
                        assert_eq!(condition, "screen and (max-width: 768px)");
                        assert_eq!(rules[0].selector, ".navbar");
                        assert_eq!(rules[0].property_count(), 1);
                    }
                    other => panic!("expected media rule, got {:?}", other),
                }
            }
            SheetAccess::Inaccessible => panic!("first sheet should be accessible"),
        }
    }
}
