//! Analyzer - runs the five stages in order over one loaded dataset
//!
//! load -> statistics -> visualizations -> outliers -> insights -> report
//!
//! The analyzer only owns its configuration. The dataset and its column
//! classification are created inside `run` and lent to each stage.

use crate::config::AnalysisConfig;
use crate::dataset::{classify, ColumnClassification, Dataset};
use crate::error::Result;
use crate::insights::generate_insights;
use crate::loader::load_dataset;
use crate::outliers::detect_outliers;
use crate::report::AnalysisReport;
use crate::statistics::generate_statistics;
use crate::visualizer::{create_visualizations, VisualizationOutcome};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// What a completed run produced
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    pub shape: (usize, usize),
    pub numeric_features: usize,
    pub categorical_features: usize,
    pub missing_values: usize,
    pub report_path: PathBuf,
    pub visualization: VisualizationOutcome,
}

impl fmt::Display for AnalysisSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== SUMMARY ===")?;
        writeln!(f, "Dataset shape: ({}, {})", self.shape.0, self.shape.1)?;
        writeln!(f, "Numeric features: {}", self.numeric_features)?;
        writeln!(f, "Categorical features: {}", self.categorical_features)?;
        write!(f, "Missing values: {}", self.missing_values)
    }
}

pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Load and classify; the only fallible step before any output exists
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(Dataset, ColumnClassification)> {
        let dataset = load_dataset(path)?;
        let classification = classify(&dataset);
        println!(
            "Data loaded successfully: ({}, {})",
            dataset.row_count(),
            dataset.column_count()
        );
        Ok((dataset, classification))
    }

    /// Run every stage against an already loaded dataset and write the report
    pub fn analyze(
        &self,
        dataset: &Dataset,
        classification: &ColumnClassification,
    ) -> Result<AnalysisSummary> {
        println!("\n=== Generating Statistics ===");
        let statistics = generate_statistics(dataset, classification);

        println!("\n=== Creating Visualizations ===");
        let visualization = create_visualizations(dataset, classification, &self.config)?;
        if let VisualizationOutcome::Skipped { reason } = &visualization {
            println!("{}", reason);
        }

        println!("\n=== Detecting Outliers ===");
        let outliers = detect_outliers(dataset, classification, &self.config);

        println!("\n=== Generating Insights ===");
        let insights = generate_insights(dataset, classification, &self.config);

        let summary = AnalysisSummary {
            shape: statistics.basic_info.shape,
            numeric_features: statistics.basic_info.numeric_columns.len(),
            categorical_features: statistics.basic_info.categorical_columns.len(),
            missing_values: statistics.basic_info.total_missing(),
            report_path: self.config.report_path(),
            visualization,
        };

        let report = AnalysisReport {
            statistics,
            outliers,
            insights,
        };
        report.save(&summary.report_path)?;

        println!("\nData analysis complete!");
        println!("Report saved to: {}", summary.report_path.display());
        if let Some(path) = summary.visualization.path() {
            println!("Visualizations saved to: {}", path.display());
        }

        info!("Analysis finished for {} rows", summary.shape.0);
        Ok(summary)
    }

    /// Load then analyze. A load failure returns before anything is written.
    pub fn run(&self, path: impl AsRef<Path>) -> Result<AnalysisSummary> {
        let (dataset, classification) = self.load(path)?;
        self.analyze(&dataset, &classification)
    }
}
