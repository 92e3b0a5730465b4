use skidsheet_core::error::ReportError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("failed to load config from {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("invalid declaration file {path}: {reason}")]
    Declaration { path: PathBuf, reason: String },

    #[error("unknown output format '{0}' (expected 'table' or 'json')")]
    OutputFormat(String),

    #[error("no SQL template configured. Pass --template or set sql_template in the config")]
    MissingTemplate,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
