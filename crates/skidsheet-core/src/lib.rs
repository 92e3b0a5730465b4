pub mod classify;
pub mod error;
pub mod model;
pub mod parsing;
pub mod query;
pub mod report;
pub mod source;

use classify::Classification;
use error::ReportError;
use model::{RawRow, Report, ReportHeader};
use source::RowSource;

pub use report::build_report;

/// Main API entry point: build a report from rows produced by a source.
///
/// Loading is all-or-nothing; a failing source yields no report.
pub fn build_report_from_source(
    header: ReportHeader,
    source: &dyn RowSource,
) -> Result<Report, ReportError> {
    let rows = source.load_rows()?;
    tracing::debug!(
        source = source.source_name(),
        rows = rows.len(),
        "loaded rows"
    );
    Ok(build_report(header, &rows))
}

/// Build a report from an already-decoded JSON dataset (a row array or an
/// upstream response envelope).
pub fn build_report_from_value(
    header: ReportHeader,
    dataset: &serde_json::Value,
) -> Result<Report, ReportError> {
    let rows = parsing::rows_from_value(dataset)?;
    Ok(build_report(header, &rows))
}

/// Classify the rows of a source without building a report.
pub fn classify_source(source: &dyn RowSource) -> Result<Classification, ReportError> {
    let rows = source.load_rows()?;
    Ok(classify_rows(&rows))
}

pub fn classify_rows(rows: &[RawRow]) -> Classification {
    classify::classify_packaging(rows)
}
