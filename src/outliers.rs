//! Outlier Detector - Tukey IQR fences per numeric column

use crate::config::AnalysisConfig;
use crate::dataset::{ColumnClassification, Dataset};
use crate::numeric::{self, Quartiles};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierSummary {
    pub count: usize,
    /// Share of *all* rows, including rows where this column is missing
    pub percentage: f64,
    /// `None` only when the column has no value at all
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
}

/// numeric column -> outlier summary, in column order
pub type OutlierReport = IndexMap<String, OutlierSummary>;

/// Apply the IQR rule to one column given the dataset's total row count
pub fn column_outliers(values: &[Option<f64>], total_rows: usize, multiplier: f64) -> OutlierSummary {
    let sorted = numeric::sorted_present(values);

    let Some(quartiles) = Quartiles::of_sorted(&sorted) else {
        return OutlierSummary {
            count: 0,
            percentage: 0.0,
            lower_bound: None,
            upper_bound: None,
        };
    };

    let (lower, upper) = quartiles.fences(multiplier);
    let count = sorted.iter().filter(|&&v| v < lower || v > upper).count();

    let percentage = if total_rows == 0 {
        0.0
    } else {
        100.0 * count as f64 / total_rows as f64
    };

    OutlierSummary {
        count,
        percentage,
        lower_bound: Some(lower),
        upper_bound: Some(upper),
    }
}

pub fn detect_outliers(
    dataset: &Dataset,
    classification: &ColumnClassification,
    config: &AnalysisConfig,
) -> OutlierReport {
    let total_rows = dataset.row_count();

    let report: OutlierReport = classification
        .numeric
        .iter()
        .filter_map(|name| {
            let values = dataset.numeric(name)?;
            let summary = column_outliers(values, total_rows, config.iqr_multiplier);
            debug!(
                "Column '{}': {} outliers ({:.2}%)",
                name, summary.count, summary.percentage
            );
            Some((name.clone(), summary))
        })
        .collect();

    info!(
        "Outlier detection finished: {} of {} numeric columns have outliers",
        report.values().filter(|s| s.count > 0).count(),
        report.len()
    );

    report
}
