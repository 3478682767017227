use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Load error: {0}")]
    Load(String),

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Polars error: {0}")]
    Polars(String),
}

impl From<polars::prelude::PolarsError> for AnalysisError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        AnalysisError::Polars(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
