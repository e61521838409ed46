use crate::models::{MediaQueryRecord, StyleRule};

/// Narrows records to rules matching the given filters. The property match is
/// deliberately loose and bidirectional (`"flex"` matches `flex-direction`,
/// `"flex-direction-reverse"` matches `flex-direction`); the selector match is
/// a literal case-sensitive substring. Records left with no rules are dropped.
pub fn filter_records(
    records: &[MediaQueryRecord],
    property: Option<&str>,
    selector: Option<&str>,
) -> Vec<MediaQueryRecord> {
    records
        .iter()
        .filter_map(|record| {
            let rules: Vec<StyleRule> = record
                .rules
                .iter()
                .filter(|rule| rule_matches(rule, property, selector))
                .cloned()
                .collect();

            if rules.is_empty() {
                None
            } else {
                Some(MediaQueryRecord {
                    rules,
                    ..record.clone()
                })
            }
        })
        .collect()
}

fn rule_matches(rule: &StyleRule, property: Option<&str>, selector: Option<&str>) -> bool {
    let property_ok = match property {
        Some(filter) => rule
            .properties
            .keys()
            .any(|name| name.contains(filter) || filter.contains(name.as_str())),
        None => true,
    };

    let selector_ok = match selector {
        Some(filter) => rule.selector.contains(filter),
        None => true,
    };

    property_ok && selector_ok
}
