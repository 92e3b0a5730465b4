use crate::error::ReportError;
use crate::model::{Cell, RawRow};
use crate::source::RowSource;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Rows exported as CSV. The header record names the columns; every cell
/// is read as text, so numeric columns are coerced downstream.
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        CsvFileSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RowSource for CsvFileSource {
    fn load_rows(&self) -> Result<Vec<RawRow>, ReportError> {
        let file = std::fs::File::open(&self.path).map_err(|e| ReportError::SourceLoad {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        read_csv_rows(file).map_err(|e| match e {
            ReportError::Csv(e) => ReportError::SourceLoad {
                path: self.path.clone(),
                reason: format!("invalid CSV: {e}"),
            },
            other => other,
        })
    }

    fn source_name(&self) -> &str {
        "csv"
    }
}

/// Read CSV rows from any reader. Blank lines are skipped; short records
/// leave their trailing columns unset.
pub fn read_csv_rows<R: Read>(reader: R) -> Result<Vec<RawRow>, ReportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, field)| (header.clone(), Cell::from(field)))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}
