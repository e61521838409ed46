use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw metrics feeding the five weighted sub-scores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityBreakdown {
    /// Distinct `(type, breakpoint)` pairs across all records.
    pub breakpoint_count: usize,
    /// Rounded mean of declared properties per distinct breakpoint.
    pub property_changes_per_breakpoint: usize,
    /// Records combining more than two and-joined clauses or referencing
    /// orientation/resolution/aspect-ratio/hover/pointer features.
    pub nested_queries: usize,
    /// (min-width, max-width) record pairs whose values differ by at most 1px.
    pub overlaps: usize,
    /// Total record count, with or without a breakpoint.
    pub total_queries: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplexityLevel {
    Simple,
    Moderate,
    Complex,
    #[serde(rename = "Very Complex")]
    VeryComplex,
    #[serde(rename = "Extremely Complex")]
    ExtremelyComplex,
}

impl ComplexityLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=20 => ComplexityLevel::Simple,
            21..=40 => ComplexityLevel::Moderate,
            41..=60 => ComplexityLevel::Complex,
            61..=80 => ComplexityLevel::VeryComplex,
            _ => ComplexityLevel::ExtremelyComplex,
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            ComplexityLevel::Simple => {
                "Responsive behavior is minimal; one pass over the primary breakpoints is enough to recreate it."
            }
            ComplexityLevel::Moderate => {
                "A handful of breakpoints drive the layout; verify each one at its boundary width."
            }
            ComplexityLevel::Complex => {
                "Breakpoint interactions are significant; analyze each breakpoint range separately before recreating styles."
            }
            ComplexityLevel::VeryComplex => {
                "The breakpoint strategy is intricate; budget for per-component responsive analysis and boundary testing."
            }
            ComplexityLevel::ExtremelyComplex => {
                "Responsive styling is heavily entangled; recreate the layout breakpoint by breakpoint and audit overlapping ranges first."
            }
        }
    }
}

impl fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComplexityLevel::Simple => "Simple",
            ComplexityLevel::Moderate => "Moderate",
            ComplexityLevel::Complex => "Complex",
            ComplexityLevel::VeryComplex => "Very Complex",
            ComplexityLevel::ExtremelyComplex => "Extremely Complex",
        };
        write!(f, "{}", name)
    }
}

/// A breakpoint whose rule set is disproportionately large for the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemBreakpoint {
    pub breakpoint: String,
    pub property_count: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityResult {
    pub score: u32,
    pub level: ComplexityLevel,
    pub recommendation: String,
    pub breakdown: ComplexityBreakdown,
    pub problem_breakpoints: Vec<ProblemBreakpoint>,
}
