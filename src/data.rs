//! Data inputs and outputs: knowledge graphs, batch subject files and reports.

pub mod graph;
pub mod report;
pub mod subjects;
pub mod yaml;

pub use graph::{GraphLink, GraphNode, KnowledgeGraph};
pub use report::{ComparisonReport, OutputFormat, ReportSummary, VerdictCounts};
pub use subjects::{SubjectEntry, SubjectsFile};
pub use yaml::*;
