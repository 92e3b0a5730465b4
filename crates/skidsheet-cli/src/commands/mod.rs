pub mod classify;
pub mod query;
pub mod report;

use skidsheet_core::error::ReportError;
use skidsheet_core::source::{self, RowSource, XlsxFileSource};
use std::path::Path;

/// Open the rows file, honouring `--sheet` for workbooks.
fn open_source(path: &Path, sheet: Option<String>) -> Result<Box<dyn RowSource>, ReportError> {
    match sheet {
        Some(sheet) if is_xlsx(path) => Ok(Box::new(XlsxFileSource::new(path).with_sheet(sheet))),
        Some(_) => {
            tracing::warn!("--sheet ignored for non-XLSX input {}", path.display());
            source::source_for_path(path)
        }
        None => source::source_for_path(path),
    }
}

fn is_xlsx(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false)
}
