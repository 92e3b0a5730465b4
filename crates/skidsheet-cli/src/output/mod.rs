pub mod json;
pub mod table;

use crate::config::Config;
use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Table,
    Json,
}

impl Format {
    /// Resolve the output format: the flag wins over the configured default.
    pub fn resolve(flag: Option<&str>, config: &Config) -> Result<Self, CliError> {
        match flag.unwrap_or_else(|| config.format()) {
            "table" => Ok(Format::Table),
            "json" => Ok(Format::Json),
            other => Err(CliError::OutputFormat(other.to_string())),
        }
    }
}
