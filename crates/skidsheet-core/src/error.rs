use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("malformed dataset: {0}")]
    MalformedDataset(String),

    #[error("upstream query failed: {0}")]
    Upstream(String),

    #[error("failed to load rows from {path}: {reason}")]
    SourceLoad { path: PathBuf, reason: String },

    #[error("unsupported input format: {0}. Expected a .json, .csv or .xlsx file.")]
    UnsupportedFormat(String),

    #[error("invalid query template: {0}")]
    InvalidQueryTemplate(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
