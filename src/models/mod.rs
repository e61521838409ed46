pub mod complexity;
pub mod media_query;
pub mod report;
pub mod stylesheet;

pub use complexity::{ComplexityBreakdown, ComplexityLevel, ComplexityResult, ProblemBreakpoint};
pub use media_query::{BreakpointKind, MediaQueryRecord};
pub use report::{AnalysisReport, AnalysisSummary, Extraction};
pub use stylesheet::{SheetAccess, StyleRule, StylesheetSource, TopLevelRule};
