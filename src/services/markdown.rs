use crate::models::AnalysisReport;
use chrono::Utc;
use url::Url;

pub struct MarkdownService;

impl MarkdownService {
    pub fn new() -> Self {
        Self
    }

    /// Renders the human-facing companion to the JSON artifact.
    pub fn render(&self, url: &Url, report: &AnalysisReport) -> String {
        let mut out = String::new();

        out.push_str(&format!("# Media Query Analysis: {}\n\n", url));
        out.push_str(&format!(
            "Generated: {}\n\n",
            Utc::now().format("%Y-%m-%d %H:%M UTC")
        ));

        out.push_str("## Summary\n\n");
        out.push_str(&format!(
            "- Media queries: {}\n",
            report.summary.total_media_queries
        ));
        let breakpoints = report
            .summary
            .unique_breakpoints
            .iter()
            .map(|v| format!("{}px", v))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "- Breakpoints: {}\n\n",
            if breakpoints.is_empty() {
                "none".to_string()
            } else {
                breakpoints
            }
        ));

        let complexity = &report.complexity;
        out.push_str("## Complexity\n\n");
        out.push_str(&format!(
            "**{}/100 - {}**\n\n{}\n\n",
            complexity.score, complexity.level, complexity.recommendation
        ));

        out.push_str("| Metric | Value |\n|---|---|\n");
        out.push_str(&format!(
            "| Distinct breakpoints | {} |\n",
            complexity.breakdown.breakpoint_count
        ));
        out.push_str(&format!(
            "| Property changes per breakpoint | {} |\n",
            complexity.breakdown.property_changes_per_breakpoint
        ));
        out.push_str(&format!(
            "| Combined/feature queries | {} |\n",
            complexity.breakdown.nested_queries
        ));
        out.push_str(&format!(
            "| Overlapping min/max pairs | {} |\n",
            complexity.breakdown.overlaps
        ));
        out.push_str(&format!(
            "| Total queries | {} |\n\n",
            complexity.breakdown.total_queries
        ));

        if !complexity.problem_breakpoints.is_empty() {
            out.push_str("## Problem Breakpoints\n\n");
            for problem in &complexity.problem_breakpoints {
                out.push_str(&format!(
                    "- `{}` - {}\n",
                    problem.breakpoint, problem.reason
                ));
            }
            out.push('\n');
        }

        out.push_str("## Breakpoints\n\n");
        if report.breakpoints.is_empty() {
            out.push_str("No width-based media queries found.\n");
        }
        for (key, records) in &report.breakpoints {
            out.push_str(&format!("### {}\n\n", key));
            for record in records {
                out.push_str(&format!("`{}`\n\n", record.condition));
                for rule in &record.rules {
                    out.push_str(&format!("- `{}`", rule.selector));
                    let properties = rule
                        .properties
                        .iter()
                        .map(|(name, value)| format!("{}: {}", name, value))
                        .collect::<Vec<_>>()
                        .join("; ");
                    if !properties.is_empty() {
                        out.push_str(&format!(" - {}", properties));
                    }
                    out.push('\n');
                }
                out.push('\n');
            }
        }

        out
    }
}

impl Default for MarkdownService {
    fn default() -> Self {
        Self::new()
    }
}
