pub mod analyzer;
pub mod config;
pub mod dataset;
pub mod error;
pub mod insights;
pub mod loader;
pub mod numeric;
pub mod outliers;
pub mod report;
pub mod statistics;
pub mod visualizer;

pub use analyzer::{AnalysisSummary, Analyzer};
pub use config::AnalysisConfig;
pub use dataset::{classify, Column, ColumnClassification, ColumnKind, Dataset};
pub use error::{AnalysisError, Result};
pub use report::AnalysisReport;
pub use visualizer::VisualizationOutcome;
