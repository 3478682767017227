//! Insight Generator - heuristic recommendations from missing data,
//! strong pairwise correlation and outlier-heavy columns.
//!
//! The three checks are independent: any subset of the advisories may fire.

use crate::config::AnalysisConfig;
use crate::dataset::{ColumnClassification, Dataset};
use crate::numeric;
use crate::outliers::detect_outliers;
use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const MISSING_DATA_ADVICE: &str =
    "Consider handling missing values (>10% missing in some columns)";
pub const HIGH_CORRELATION_ADVICE: &str =
    "Consider feature selection due to high correlation between some features";
pub const OUTLIER_ADVICE: &str = "Consider outlier treatment for features with >5% outliers";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataQuality {
    /// column -> percentage of rows with no value
    pub missing_data: IndexMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub feature1: String,
    pub feature2: String,
    pub correlation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Pattern {
    HighCorrelation { pairs: Vec<CorrelationPair> },
    Outliers { features: Vec<String> },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    pub data_quality: DataQuality,
    pub recommendations: Vec<String>,
    pub patterns: Vec<Pattern>,
}

/// Percentage of missing rows per column (all columns, zero rows -> 0.0)
pub fn missing_percentages(dataset: &Dataset) -> IndexMap<String, f64> {
    let rows = dataset.row_count();
    dataset
        .columns()
        .iter()
        .map(|c| {
            let pct = if rows == 0 {
                0.0
            } else {
                100.0 * c.missing_count() as f64 / rows as f64
            };
            (c.name().to_string(), pct)
        })
        .collect()
}

/// Unordered numeric pairs whose |r| exceeds `threshold`, upper triangle order
pub fn high_correlation_pairs(
    dataset: &Dataset,
    classification: &ColumnClassification,
    threshold: f64,
) -> Vec<CorrelationPair> {
    classification
        .numeric
        .iter()
        .tuple_combinations()
        .filter_map(|(a, b)| {
            let r = numeric::pearson(dataset.numeric(a)?, dataset.numeric(b)?)?;
            (r.abs() > threshold).then(|| CorrelationPair {
                feature1: a.clone(),
                feature2: b.clone(),
                correlation: r,
            })
        })
        .collect()
}

pub fn generate_insights(
    dataset: &Dataset,
    classification: &ColumnClassification,
    config: &AnalysisConfig,
) -> InsightReport {
    let mut report = InsightReport::default();

    report.data_quality.missing_data = missing_percentages(dataset);
    if report
        .data_quality
        .missing_data
        .values()
        .any(|&pct| pct > config.missing_threshold_pct)
    {
        report.recommendations.push(MISSING_DATA_ADVICE.to_string());
    }

    if classification.numeric.len() > 1 {
        let pairs = high_correlation_pairs(dataset, classification, config.correlation_threshold);
        if !pairs.is_empty() {
            debug!("{} highly correlated pairs", pairs.len());
            report.patterns.push(Pattern::HighCorrelation { pairs });
            report.recommendations.push(HIGH_CORRELATION_ADVICE.to_string());
        }
    }

    let outliers = detect_outliers(dataset, classification, config);
    let features: Vec<String> = outliers
        .iter()
        .filter(|(_, summary)| summary.percentage > config.outlier_threshold_pct)
        .map(|(name, _)| name.clone())
        .collect();
    if !features.is_empty() {
        report.patterns.push(Pattern::Outliers { features });
        report.recommendations.push(OUTLIER_ADVICE.to_string());
    }

    info!("Generated {} recommendations", report.recommendations.len());
    report
}
