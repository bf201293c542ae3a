use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce a complete [`Dataset`](super::model::Dataset).
///
/// Every variant is fatal at startup: the dashboard never opens over a
/// partially loaded table.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed parquet: {0}")]
    Parquet(String),

    #[error("unsupported file extension: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("required column '{column}' is missing")]
    MissingColumn { column: &'static str },

    #[error("row {row}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
}

impl From<parquet::errors::ParquetError> for DataLoadError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        DataLoadError::Parquet(e.to_string())
    }
}

impl From<arrow::error::ArrowError> for DataLoadError {
    fn from(e: arrow::error::ArrowError) -> Self {
        DataLoadError::Parquet(e.to_string())
    }
}
