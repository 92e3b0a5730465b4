use std::path::PathBuf;

use crate::config::Config;
use crate::error::CliError;
use crate::output::{self, Format};

pub fn run(
    config: &Config,
    input_file: PathBuf,
    sheet: Option<String>,
    output_format: Option<String>,
) -> Result<(), CliError> {
    let format = Format::resolve(output_format.as_deref(), config)?;
    let source = super::open_source(&input_file, sheet)?;
    let classification = skidsheet_core::classify_source(source.as_ref())?;

    match format {
        Format::Json => output::json::print(&classification)?,
        Format::Table => output::table::print_classification(&classification),
    }

    Ok(())
}
