use calamine::{Data, Range, Reader, Xlsx};

use crate::error::ReportError;
use crate::model::{Cell, RawRow};
use crate::source::RowSource;
use std::path::{Path, PathBuf};

/// Rows from a spreadsheet export of the query. The first row of the sheet
/// holds the column names.
pub struct XlsxFileSource {
    path: PathBuf,
    sheet: Option<String>,
}

impl XlsxFileSource {
    /// Read the first worksheet of the workbook.
    pub fn new(path: impl AsRef<Path>) -> Self {
        XlsxFileSource {
            path: path.as_ref().to_path_buf(),
            sheet: None,
        }
    }

    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    fn load_error(&self, reason: impl ToString) -> ReportError {
        ReportError::SourceLoad {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

impl RowSource for XlsxFileSource {
    fn load_rows(&self) -> Result<Vec<RawRow>, ReportError> {
        let mut workbook: Xlsx<_> = calamine::open_workbook(&self.path)
            .map_err(|e| self.load_error(format!("failed to open xlsx: {e}")))?;

        let sheet_name = match &self.sheet {
            Some(name) => name.clone(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| self.load_error("workbook has no worksheets"))?,
        };

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| self.load_error(format!("sheet '{sheet_name}' not readable: {e}")))?;

        Ok(rows_from_range(&range))
    }

    fn source_name(&self) -> &str {
        "xlsx"
    }
}

/// Turn a worksheet range into rows, using its first row as column names.
/// Rows where every cell is empty are skipped, as are unnamed columns.
pub fn rows_from_range(range: &Range<Data>) -> Vec<RawRow> {
    let mut sheet_rows = range.rows();
    let Some(header_row) = sheet_rows.next() else {
        return Vec::new();
    };
    let headers: Vec<Option<String>> = header_row.iter().map(header_name).collect();

    sheet_rows
        .filter(|cells| cells.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|cells| {
            headers
                .iter()
                .zip(cells.iter())
                .filter_map(|(header, data)| {
                    header.as_ref().map(|h| (h.clone(), cell_from_data(data)))
                })
                .collect()
        })
        .collect()
}

fn header_name(data: &Data) -> Option<String> {
    match cell_from_data(data) {
        Cell::Null => None,
        Cell::Text(s) if s.is_empty() => None,
        other => Some(other.to_string()),
    }
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Null,
        Data::String(s) => Cell::Text(s.trim().to_string()),
        Data::Int(i) => Cell::from(*i),
        // Spreadsheets store every number as a float; keep whole values integral.
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Cell::from(*f as i64),
        Data::Float(f) => Cell::from(*f),
        Data::Bool(b) => Cell::Bool(*b),
        _ => Cell::Text(format!("{data}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_from_range() {
        let mut range = Range::new((0, 0), (3, 2));
        range.set_value((0, 0), Data::String("PART".into()));
        range.set_value((0, 1), Data::String("SKIDS".into()));
        range.set_value((0, 2), Data::String("QTY1".into()));
        range.set_value((1, 0), Data::String("KWS001".into()));
        range.set_value((1, 1), Data::Float(1.0));
        range.set_value((1, 2), Data::Float(2.5));
        // row 2 left empty
        range.set_value((3, 0), Data::String(" PALLET-STD ".into()));

        let rows = rows_from_range(&range);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("PART"), Some(&Cell::from("KWS001")));
        assert_eq!(rows[0].get("SKIDS"), Some(&Cell::from(1i64)));
        assert_eq!(rows[0].get("QTY1"), Some(&Cell::from(2.5)));
        assert_eq!(rows[1].get("PART"), Some(&Cell::from("PALLET-STD")));
        assert_eq!(rows[1].get("SKIDS"), Some(&Cell::Null));
    }

    #[test]
    fn test_unnamed_columns_dropped() {
        let mut range = Range::new((0, 0), (1, 1));
        range.set_value((0, 0), Data::String("PART".into()));
        range.set_value((1, 0), Data::String("KW1".into()));
        range.set_value((1, 1), Data::String("stray".into()));

        let rows = rows_from_range(&range);
        assert_eq!(rows[0].len(), 1);
    }

    #[test]
    fn test_empty_range() {
        let range: Range<Data> = Range::empty();
        assert!(rows_from_range(&range).is_empty());
    }

    fn fixture() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/shipment.xlsx")
    }

    #[test]
    fn test_first_sheet_by_default() {
        let rows = XlsxFileSource::new(fixture()).load_rows().unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].get("PART"), Some(&Cell::from("KWS001")));
        assert_eq!(rows[0].get("SKIDS"), Some(&Cell::from(1i64)));
        assert_eq!(rows[1].get("CTNS"), Some(&Cell::from("B")));
        assert_eq!(rows[2].get("PART"), Some(&Cell::from("PALLET-STD")));
        assert_eq!(rows[2].get("SKIDS"), Some(&Cell::Null));
    }

    #[test]
    fn test_named_sheet() {
        let rows = XlsxFileSource::new(fixture())
            .with_sheet("Other")
            .load_rows()
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("PART"), Some(&Cell::from("KW9")));
        assert_eq!(rows[0].get("QTY1"), Some(&Cell::from(7i64)));
    }

    #[test]
    fn test_unknown_sheet() {
        let err = XlsxFileSource::new(fixture())
            .with_sheet("nope")
            .load_rows()
            .unwrap_err();
        match err {
            ReportError::SourceLoad { path, reason } => {
                assert_eq!(path, fixture());
                assert!(reason.contains("'nope'"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_workbook() {
        let err = XlsxFileSource::new("/nonexistent/rows.xlsx")
            .load_rows()
            .unwrap_err();
        assert!(matches!(err, ReportError::SourceLoad { .. }));
    }
}
