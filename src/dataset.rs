//! Dataset - immutable in-memory table with explicitly tagged column kinds
//!
//! A `Dataset` is built once at load time and only ever shared by reference
//! afterwards. Column kinds are decided by a single classification pass that
//! every downstream stage reuses.

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Kind of a column, as decided by the classification pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
    /// Booleans and anything else neither summarized nor plotted
    Unsupported,
}

/// Values of a single column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
    Unsupported {
        type_name: String,
        len: usize,
        missing: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: ColumnValues,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Numeric(values),
        }
    }

    pub fn categorical<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<S>>,
    ) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Categorical(
                values.into_iter().map(|v| v.map(Into::into)).collect(),
            ),
        }
    }

    pub fn unsupported(
        name: impl Into<String>,
        type_name: impl Into<String>,
        len: usize,
        missing: usize,
    ) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Unsupported {
                type_name: type_name.into(),
                len,
                missing,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    pub fn kind(&self) -> ColumnKind {
        match self.values {
            ColumnValues::Numeric(_) => ColumnKind::Numeric,
            ColumnValues::Categorical(_) => ColumnKind::Categorical,
            ColumnValues::Unsupported { .. } => ColumnKind::Unsupported,
        }
    }

    pub fn len(&self) -> usize {
        match &self.values {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Categorical(v) => v.len(),
            ColumnValues::Unsupported { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of absent entries
    pub fn missing_count(&self) -> usize {
        match &self.values {
            ColumnValues::Numeric(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnValues::Categorical(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnValues::Unsupported { missing, .. } => *missing,
        }
    }

    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match &self.values {
            ColumnValues::Numeric(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&[Option<String>]> {
        match &self.values {
            ColumnValues::Categorical(v) => Some(v),
            _ => None,
        }
    }
}

/// Ordered collection of equally long named columns
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Build a dataset, rejecting ragged or duplicated columns
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);

        let mut seen = HashSet::new();
        for column in &columns {
            if column.len() != row_count {
                return Err(AnalysisError::InvalidDataset(format!(
                    "column '{}' has {} rows, expected {}",
                    column.name(),
                    column.len(),
                    row_count
                )));
            }
            if !seen.insert(column.name()) {
                return Err(AnalysisError::InvalidDataset(format!(
                    "duplicate column name '{}'",
                    column.name()
                )));
            }
        }

        Ok(Self { columns, row_count })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count, self.columns.len())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn numeric(&self, name: &str) -> Option<&[Option<f64>]> {
        self.column(name).and_then(Column::as_numeric)
    }

    pub fn categorical(&self, name: &str) -> Option<&[Option<String>]> {
        self.column(name).and_then(Column::as_categorical)
    }
}

/// Numeric and categorical column names in natural column order.
/// Unsupported columns appear in neither list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnClassification {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

impl ColumnClassification {
    pub fn kind_of(&self, name: &str) -> ColumnKind {
        if self.numeric.iter().any(|c| c == name) {
            ColumnKind::Numeric
        } else if self.categorical.iter().any(|c| c == name) {
            ColumnKind::Categorical
        } else {
            ColumnKind::Unsupported
        }
    }
}

/// The single classification pass over a loaded dataset
pub fn classify(dataset: &Dataset) -> ColumnClassification {
    let mut classification = ColumnClassification::default();
    for column in dataset.columns() {
        match column.kind() {
            ColumnKind::Numeric => classification.numeric.push(column.name().to_string()),
            ColumnKind::Categorical => classification.categorical.push(column.name().to_string()),
            ColumnKind::Unsupported => {}
        }
    }
    classification
}
