use crate::models::{
    BreakpointKind, ComplexityBreakdown, ComplexityLevel, ComplexityResult, MediaQueryRecord,
    ProblemBreakpoint,
};
use crate::services::extractor::group_by_breakpoint;
use std::collections::BTreeMap;
use tracing::debug;

const PROBLEM_RATIO: f64 = 1.5;
const PROBLEM_FLOOR: usize = 20;

const NESTED_FEATURES: [&str; 5] = [
    "orientation",
    "resolution",
    "aspect-ratio",
    "hover",
    "pointer",
];

pub struct ComplexityService;

impl ComplexityService {
    pub fn new() -> Self {
        Self
    }

    /// Scores the unfiltered record list. Deterministic, no I/O; identical
    /// input yields identical output.
    pub fn score(&self, records: &[MediaQueryRecord]) -> ComplexityResult {
        if records.is_empty() {
            return ComplexityResult {
                score: 0,
                level: ComplexityLevel::Simple,
                recommendation: ComplexityLevel::Simple.recommendation().to_string(),
                breakdown: ComplexityBreakdown::default(),
                problem_breakpoints: Vec::new(),
            };
        }

        let buckets = group_by_breakpoint(records);
        let bucket_properties: BTreeMap<String, usize> = buckets
            .iter()
            .map(|(key, records)| {
                let count = records
                    .iter()
                    .map(MediaQueryRecord::declared_property_count)
                    .sum();
                (key.clone(), count)
            })
            .collect();

        let breakpoint_count = bucket_properties.len();
        let total_properties: usize = bucket_properties.values().sum();
        let mean_properties = if breakpoint_count == 0 {
            0.0
        } else {
            total_properties as f64 / breakpoint_count as f64
        };

        let nested_queries = records
            .iter()
            .filter(|record| is_combined_condition(&record.condition))
            .count();
        let overlaps = count_overlaps(records);

        let breakdown = ComplexityBreakdown {
            breakpoint_count,
            property_changes_per_breakpoint: mean_properties.round() as usize,
            nested_queries,
            overlaps,
            total_queries: records.len(),
        };

        let score = breakpoint_points(breakpoint_count)
            + density_points(breakpoint_count, mean_properties)
            + nesting_points(nested_queries)
            + overlap_points(overlaps)
            + volume_points(records.len());

        debug!("Complexity breakdown: {:?} -> score {}", breakdown, score);

        let level = ComplexityLevel::from_score(score);

        ComplexityResult {
            score,
            level,
            recommendation: level.recommendation().to_string(),
            breakdown,
            problem_breakpoints: problem_breakpoints(&bucket_properties, mean_properties),
        }
    }
}

impl Default for ComplexityService {
    fn default() -> Self {
        Self::new()
    }
}

fn breakpoint_points(count: usize) -> u32 {
    match count {
        0 => 0,
        1..=3 => 5,
        4..=5 => 10,
        6..=7 => 15,
        8..=10 => 20,
        _ => 25,
    }
}

fn density_points(breakpoint_count: usize, mean: f64) -> u32 {
    if breakpoint_count == 0 {
        0
    } else if mean <= 5.0 {
        5
    } else if mean <= 15.0 {
        12
    } else if mean <= 30.0 {
        20
    } else {
        30
    }
}

fn nesting_points(count: usize) -> u32 {
    match count {
        0 => 0,
        1..=2 => 5,
        3..=5 => 12,
        _ => 20,
    }
}

fn overlap_points(count: usize) -> u32 {
    match count {
        0 => 0,
        1..=2 => 5,
        3..=5 => 10,
        _ => 15,
    }
}

fn volume_points(total: usize) -> u32 {
    if total <= 10 {
        2
    } else if total <= 25 {
        5
    } else if total <= 50 {
        7
    } else {
        10
    }
}

/// More than two and-joined clauses, or any of the non-width media features.
fn is_combined_condition(condition: &str) -> bool {
    let clauses = condition.matches(" and ").count() + 1;
    clauses > 2
        || NESTED_FEATURES
            .iter()
            .any(|feature| condition.contains(feature))
}

/// Counts (min-width record, max-width record) pairs whose breakpoint values
/// differ by at most one pixel.
fn count_overlaps(records: &[MediaQueryRecord]) -> usize {
    let mins: Vec<u32> = records
        .iter()
        .filter(|r| r.kind == Some(BreakpointKind::MinWidth))
        .filter_map(|r| r.breakpoint)
        .collect();
    let maxes: Vec<u32> = records
        .iter()
        .filter(|r| r.kind == Some(BreakpointKind::MaxWidth))
        .filter_map(|r| r.breakpoint)
        .collect();

    mins.iter()
        .flat_map(|min| maxes.iter().map(move |max| (*min, *max)))
        .filter(|(min, max)| min.abs_diff(*max) <= 1)
        .count()
}

/// Flags buckets whose property count exceeds both 1.5x the site mean and an
/// absolute floor of 20; both bounds are strict.
fn problem_breakpoints(
    bucket_properties: &BTreeMap<String, usize>,
    mean: f64,
) -> Vec<ProblemBreakpoint> {
    bucket_properties
        .iter()
        .filter(|(_, &count)| count as f64 > mean * PROBLEM_RATIO && count > PROBLEM_FLOOR)
        .map(|(key, &count)| ProblemBreakpoint {
            breakpoint: key.clone(),
            property_count: count,
            reason: format!(
                "{} property changes against a site average of {:.1}",
                count, mean
            ),
        })
        .collect()
}
