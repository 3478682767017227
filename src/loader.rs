//! Loader - reads one CSV file into a tagged `Dataset`
//!
//! Type inference is delegated to polars with a full-file schema scan, so a
//! column is numeric only when every non-missing value parses as a number.
//! Dates are left as text. Empty fields and the usual NA tokens are missing.

use crate::dataset::{Column, Dataset};
use crate::error::{AnalysisError, Result};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Tokens read as missing in every column, besides the empty field
pub const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Load a delimited file with a header row
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(AnalysisError::Load(format!(
            "file not found: {}",
            path.display()
        )));
    }

    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_null_values(Some(NullValues::AllColumns(
            NA_TOKENS.iter().map(|t| t.to_string()).collect(),
        )))
        .finish()
        .and_then(|lf| lf.collect())
        .map_err(|e| AnalysisError::Load(format!("{}: {}", path.display(), e)))?;

    let dataset = dataset_from_frame(&df)
        .map_err(|e| AnalysisError::Load(format!("{}: {}", path.display(), e)))?;

    info!(
        "Loaded {} rows x {} columns from {}",
        dataset.row_count(),
        dataset.column_count(),
        path.display()
    );

    Ok(dataset)
}

/// Convert a polars frame into the tagged column model.
///
/// NaN and infinite floats are treated as missing so no report value can
/// carry a non-finite number.
pub fn dataset_from_frame(df: &DataFrame) -> Result<Dataset> {
    let mut columns = Vec::with_capacity(df.width());

    for series in df.get_columns() {
        let name = series.name().to_string();
        let dtype = series.dtype();

        let column = if dtype.is_numeric() {
            let floats = series.cast(&DataType::Float64)?;
            let values = floats
                .f64()?
                .into_iter()
                .map(|v| v.filter(|x| x.is_finite()))
                .collect();
            Column::numeric(name, values)
        } else if matches!(dtype, DataType::String) {
            let values: Vec<Option<String>> = series
                .str()?
                .into_iter()
                .map(|v| v.map(str::to_string))
                .collect();
            Column::categorical(name, values)
        } else {
            debug!("Column '{}' has unsupported type {}", name, dtype);
            Column::unsupported(name, dtype.to_string(), series.len(), series.null_count())
        };

        columns.push(column);
    }

    Dataset::new(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{classify, ColumnKind};
    use std::fs;

    fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_infers_numeric_and_categorical() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "people.csv", "age,city\n31,Oslo\n45,Bergen\n28,Oslo\n");

        let dataset = load_dataset(&path).unwrap();
        assert_eq!(dataset.shape(), (3, 2));

        let classification = classify(&dataset);
        assert_eq!(classification.numeric, vec!["age"]);
        assert_eq!(classification.categorical, vec!["city"]);
        assert_eq!(dataset.numeric("age").unwrap(), &[Some(31.0), Some(45.0), Some(28.0)]);
    }

    #[test]
    fn test_empty_fields_are_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "gaps.csv", "score,label\n1.5,a\n,b\n2.5,\n");

        let dataset = load_dataset(&path).unwrap();
        assert_eq!(dataset.numeric("score").unwrap(), &[Some(1.5), None, Some(2.5)]);
        assert_eq!(dataset.column("label").unwrap().missing_count(), 1);
    }

    #[test]
    fn test_mixed_column_is_categorical() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "mixed.csv", "code\n1\n2\nx3\n");

        let dataset = load_dataset(&path).unwrap();
        assert_eq!(dataset.column("code").unwrap().kind(), ColumnKind::Categorical);
    }

    #[test]
    fn test_date_column_is_categorical() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "dates.csv",
            "day,value\n2024-01-01,1\n2024-01-02,2\n2024-01-01,3\n",
        );

        let dataset = load_dataset(&path).unwrap();
        assert_eq!(dataset.column("day").unwrap().kind(), ColumnKind::Categorical);

        let classification = classify(&dataset);
        assert_eq!(classification.numeric, vec!["value"]);
        assert_eq!(classification.categorical, vec!["day"]);
    }

    #[test]
    fn test_na_tokens_are_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "na.csv",
            "score,label\n1,a\n2,NA\nNA,b\n4,null\nN/A,c\n",
        );

        let dataset = load_dataset(&path).unwrap();
        let classification = classify(&dataset);
        assert_eq!(classification.numeric, vec!["score"]);
        assert_eq!(classification.categorical, vec!["label"]);

        assert_eq!(
            dataset.numeric("score").unwrap(),
            &[Some(1.0), Some(2.0), None, Some(4.0), None]
        );
        assert_eq!(dataset.column("score").unwrap().missing_count(), 2);
        assert_eq!(dataset.column("label").unwrap().missing_count(), 2);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_dataset(dir.path().join("nope.csv"));
        assert!(matches!(result, Err(AnalysisError::Load(_))));
    }

    #[test]
    fn test_frame_conversion() {
        let df = df![
            "x" => [1i64, 2, 3],
            "name" => ["a", "b", "c"],
            "flag" => [true, false, true]
        ]
        .unwrap();

        let dataset = dataset_from_frame(&df).unwrap();
        assert_eq!(dataset.numeric("x").unwrap(), &[Some(1.0), Some(2.0), Some(3.0)]);
        assert_eq!(dataset.column("flag").unwrap().kind(), ColumnKind::Unsupported);
        assert_eq!(dataset.column("name").unwrap().kind(), ColumnKind::Categorical);
    }
}
