pub mod csv_file;
pub mod json_file;
pub mod xlsx_file;

use crate::error::ReportError;
use crate::model::RawRow;
use std::path::Path;

pub use csv_file::CsvFileSource;
pub use json_file::JsonFileSource;
pub use xlsx_file::XlsxFileSource;

/// Trait for backends that produce the raw query rows of one report.
///
/// A source yields the full dataset or fails; there are no partial results.
pub trait RowSource: Send + Sync {
    fn load_rows(&self) -> Result<Vec<RawRow>, ReportError>;

    /// Name of this source (for diagnostics).
    fn source_name(&self) -> &str;
}

/// Pick a file source by extension: `.json`, `.csv` or `.xlsx`.
pub fn source_for_path(path: &Path) -> Result<Box<dyn RowSource>, ReportError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "json" => Ok(Box::new(JsonFileSource::new(path))),
        "csv" => Ok(Box::new(CsvFileSource::new(path))),
        "xlsx" => Ok(Box::new(XlsxFileSource::new(path))),
        _ => Err(ReportError::UnsupportedFormat(path.display().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_by_extension() {
        assert_eq!(
            source_for_path(Path::new("rows.json")).unwrap().source_name(),
            "json"
        );
        assert_eq!(
            source_for_path(Path::new("rows.CSV")).unwrap().source_name(),
            "csv"
        );
        assert_eq!(
            source_for_path(Path::new("rows.xlsx")).unwrap().source_name(),
            "xlsx"
        );
    }

    #[test]
    fn test_unknown_extension() {
        assert!(matches!(
            source_for_path(Path::new("rows.pdf")),
            Err(ReportError::UnsupportedFormat(_))
        ));
        assert!(source_for_path(Path::new("rows")).is_err());
    }
}
