use crate::models::{ComplexityResult, MediaQueryRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_media_queries: usize,
    /// Distinct breakpoint pixel values, ascending.
    pub unique_breakpoints: Vec<u32>,
}

/// Raw extraction output, before any filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction {
    pub media_queries: Vec<MediaQueryRecord>,
    pub breakpoints: BTreeMap<String, Vec<MediaQueryRecord>>,
    pub summary: AnalysisSummary,
}

/// The persisted artifact. `summary` and `complexity` always describe the full
/// extraction; `media_queries` and `breakpoints` reflect any requested filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub summary: AnalysisSummary,
    pub media_queries: Vec<MediaQueryRecord>,
    pub breakpoints: BTreeMap<String, Vec<MediaQueryRecord>>,
    pub complexity: ComplexityResult,
}
