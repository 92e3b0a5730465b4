use crate::error::ReportError;
use crate::model::RawRow;
use crate::parsing::rows_from_json;
use crate::source::RowSource;
use std::path::{Path, PathBuf};

/// Rows saved as JSON: either a plain array of row objects or the raw
/// response of the upstream query API.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        JsonFileSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RowSource for JsonFileSource {
    fn load_rows(&self) -> Result<Vec<RawRow>, ReportError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| ReportError::SourceLoad {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        rows_from_json(&text).map_err(|e| match e {
            ReportError::Json(e) => ReportError::SourceLoad {
                path: self.path.clone(),
                reason: format!("invalid JSON: {e}"),
            },
            other => other,
        })
    }

    fn source_name(&self) -> &str {
        "json"
    }
}
