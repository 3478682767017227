//! Statistics Generator - shape, missing values, numeric summaries,
//! correlation matrix and categorical frequency tables.

use crate::dataset::{ColumnClassification, Dataset};
use crate::numeric::{self, Quartiles};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// column -> column -> Pearson r
pub type CorrelationMatrix = IndexMap<String, IndexMap<String, Option<f64>>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    /// (rows, columns)
    pub shape: (usize, usize),
    pub columns: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
    pub missing_values: IndexMap<String, usize>,
}

impl BasicInfo {
    pub fn total_missing(&self) -> usize {
        self.missing_values.values().sum()
    }
}

/// Descriptive statistics of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub p25: Option<f64>,
    #[serde(rename = "50%")]
    pub p50: Option<f64>,
    #[serde(rename = "75%")]
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

impl NumericSummary {
    pub fn of(values: &[Option<f64>]) -> Self {
        let data = numeric::sorted_present(values);
        let quartiles = Quartiles::of_sorted(&data);

        Self {
            count: data.len(),
            mean: numeric::mean(&data),
            std: numeric::sample_std(&data),
            min: data.first().copied(),
            p25: quartiles.map(|q| q.q1),
            p50: quartiles.map(|q| q.median),
            p75: quartiles.map(|q| q.q3),
            max: data.last().copied(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub unique_values: usize,
    /// Ordered by descending count, ties in order of first appearance
    pub value_counts: IndexMap<String, usize>,
    pub most_frequent: Option<String>,
}

impl CategoricalSummary {
    pub fn of(values: &[Option<String>]) -> Self {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for value in values.iter().flatten() {
            *counts.entry(value.clone()).or_insert(0) += 1;
        }

        // stable sort keeps first-appearance order among ties
        counts.sort_by(|_, a, _, b| b.cmp(a));

        let most_frequent = counts.keys().next().cloned();
        Self {
            unique_values: counts.len(),
            value_counts: counts,
            most_frequent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub basic_info: BasicInfo,
    pub numeric_stats: IndexMap<String, NumericSummary>,
    /// Absent when the dataset has no numeric column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_matrix: Option<CorrelationMatrix>,
    pub categorical_stats: IndexMap<String, CategoricalSummary>,
}

/// Pearson correlation for every pair of numeric columns.
///
/// The diagonal is pinned to 1.0 and the lower triangle mirrors the upper one,
/// so the result is symmetric even for constant columns. Returns `None` when
/// there is no numeric column.
pub fn correlation_matrix(
    dataset: &Dataset,
    classification: &ColumnClassification,
) -> Option<CorrelationMatrix> {
    if classification.numeric.is_empty() {
        return None;
    }

    let columns: Vec<(&str, &[Option<f64>])> = classification
        .numeric
        .iter()
        .filter_map(|name| dataset.numeric(name).map(|v| (name.as_str(), v)))
        .collect();

    let n = columns.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        values[i][i] = Some(1.0);
        for j in (i + 1)..n {
            let r = numeric::pearson(columns[i].1, columns[j].1);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    let matrix = columns
        .iter()
        .enumerate()
        .map(|(i, (row_name, _))| {
            let row: IndexMap<String, Option<f64>> = columns
                .iter()
                .enumerate()
                .map(|(j, (col_name, _))| (col_name.to_string(), values[i][j]))
                .collect();
            (row_name.to_string(), row)
        })
        .collect();

    Some(matrix)
}

pub fn generate_statistics(
    dataset: &Dataset,
    classification: &ColumnClassification,
) -> StatisticsReport {
    let missing_values: IndexMap<String, usize> = dataset
        .columns()
        .iter()
        .map(|c| (c.name().to_string(), c.missing_count()))
        .collect();

    let basic_info = BasicInfo {
        shape: dataset.shape(),
        columns: dataset.column_names(),
        numeric_columns: classification.numeric.clone(),
        categorical_columns: classification.categorical.clone(),
        missing_values,
    };

    let numeric_stats: IndexMap<String, NumericSummary> = classification
        .numeric
        .iter()
        .filter_map(|name| {
            let values = dataset.numeric(name)?;
            Some((name.clone(), NumericSummary::of(values)))
        })
        .collect();

    let correlation_matrix = correlation_matrix(dataset, classification);

    let categorical_stats: IndexMap<String, CategoricalSummary> = classification
        .categorical
        .iter()
        .filter_map(|name| {
            let values = dataset.categorical(name)?;
            let summary = CategoricalSummary::of(values);
            debug!("Column '{}': {} unique values", name, summary.unique_values);
            Some((name.clone(), summary))
        })
        .collect();

    info!(
        "Statistics generated for {} numeric and {} categorical columns",
        numeric_stats.len(),
        categorical_stats.len()
    );

    StatisticsReport {
        basic_info,
        numeric_stats,
        correlation_matrix,
        categorical_stats,
    }
}
