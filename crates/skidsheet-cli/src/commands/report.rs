use serde_json::Value;
use skidsheet_core::model::{Declaration, Report, ReportHeader};
use skidsheet_core::parsing::rows_from_value;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::CliError;
use crate::output::{self, Format};

pub struct ReportArgs {
    pub input_file: PathBuf,
    pub declaration: Option<PathBuf>,
    pub client: Option<String>,
    pub shipment: Option<String>,
    pub export_date: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub sheet: Option<String>,
    pub output: Option<String>,
    pub out: Option<PathBuf>,
}

pub fn run(config: &Config, args: ReportArgs) -> Result<(), CliError> {
    let format = Format::resolve(args.output.as_deref(), config)?;
    let header = build_header(config, &args)?;

    let source = super::open_source(&args.input_file, args.sheet.clone())?;
    let report = skidsheet_core::build_report_from_source(header, source.as_ref())?;

    if let Some(out) = &args.out {
        write_report(&report, out)?;
        eprintln!(
            "Wrote {} line items and {} packaging rows to {}",
            report.line_items.len(),
            report.packaging_section.len(),
            out.display()
        );
        return Ok(());
    }

    match format {
        Format::Json => output::json::print(&report)?,
        Format::Table => output::table::print_report(&report),
    }

    Ok(())
}

/// Header fields come from the declaration file, then command-line flags
/// override them. Origin and destination fall back to the config.
fn build_header(config: &Config, args: &ReportArgs) -> Result<ReportHeader, CliError> {
    let from = args
        .from
        .as_deref()
        .or(config.from.as_deref())
        .unwrap_or_default();
    let to = args
        .to
        .as_deref()
        .or(config.to.as_deref())
        .unwrap_or_default();

    let mut header = match &args.declaration {
        Some(path) => ReportHeader::from_declaration(&load_declaration(path)?, from, to),
        None => ReportHeader {
            from: from.to_string(),
            to: to.to_string(),
            ..ReportHeader::default()
        },
    };

    if let Some(client) = &args.client {
        header.client_name = client.clone();
    }
    if let Some(shipment) = &args.shipment {
        header.shipment_number = shipment.clone();
    }
    if let Some(export_date) = &args.export_date {
        header.export_date = export_date.clone();
    }

    Ok(header)
}

fn load_declaration(path: &Path) -> Result<Declaration, CliError> {
    let invalid = |reason: String| CliError::Declaration {
        path: path.to_path_buf(),
        reason,
    };

    let text = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    declaration_from_json(&text).map_err(invalid)
}

/// Accepts a single declaration object or a listing, whose first row is used.
fn declaration_from_json(text: &str) -> Result<Declaration, String> {
    let value: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
    let value = match value {
        Value::Object(_) if value.get("status").is_none() => Value::Array(vec![value]),
        other => other,
    };

    let rows = rows_from_value(&value).map_err(|e| e.to_string())?;
    let first = rows.first().ok_or("declaration listing is empty")?;
    Declaration::from_row(first).ok_or_else(|| "declaration has no id".to_string())
}

fn write_report(report: &Report, path: &Path) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ReportArgs {
        ReportArgs {
            input_file: PathBuf::from("rows.json"),
            declaration: None,
            client: None,
            shipment: None,
            export_date: None,
            from: None,
            to: None,
            sheet: None,
            output: None,
            out: None,
        }
    }

    #[test]
    fn test_declaration_object() {
        let declaration = declaration_from_json(
            r#"{"id": 42, "visa": "V-42", "company_name": "Acme", "export_at": "2024-05-02"}"#,
        )
        .unwrap();
        assert_eq!(declaration.id, "42");
        assert_eq!(declaration.visa, "V-42");
    }

    #[test]
    fn test_declaration_listing_uses_first_row() {
        let declaration = declaration_from_json(
            r#"[{"ID": "7", "VISA": "V-7"}, {"ID": "8", "VISA": "V-8"}]"#,
        )
        .unwrap();
        assert_eq!(declaration.id, "7");
        assert_eq!(declaration.visa, "V-7");
    }

    #[test]
    fn test_declaration_errors() {
        assert!(declaration_from_json("[]").is_err());
        assert!(declaration_from_json(r#"{"visa": "V-1"}"#).is_err());
        assert!(declaration_from_json("not json").is_err());
    }

    #[test]
    fn test_header_flags_override_config() {
        let config = Config {
            from: Some("Juarez".into()),
            to: Some("El Paso".into()),
            ..Config::default()
        };
        let mut args = args();
        args.to = Some("Laredo".into());
        args.client = Some("Acme".into());
        args.shipment = Some("V-9".into());

        let header = build_header(&config, &args).unwrap();
        assert_eq!(header.from, "Juarez");
        assert_eq!(header.to, "Laredo");
        assert_eq!(header.client_name, "Acme");
        assert_eq!(header.shipment_number, "V-9");
        assert_eq!(header.export_date, "");
    }

    #[test]
    fn test_write_report_json() {
        let report = skidsheet_core::build_report(ReportHeader::default(), &[]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        write_report(&report, &path).unwrap();
        let value: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["packagingSection"][0]["part"], "Total");
    }
}
