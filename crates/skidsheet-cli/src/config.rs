//! Configuration with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// skidsheet configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Report SQL with an {ID_FROM_TABLE} placeholder for the declaration id
    pub sql_template: Option<String>,

    /// Shipment origin printed in the report header
    pub from: Option<String>,

    /// Shipment destination printed in the report header
    pub to: Option<String>,

    /// Default output format (table or json)
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        Self::load_layers(
            Self::global_config_path().as_deref(),
            explicit,
            |key| std::env::var(key).ok(),
        )
    }

    fn load_layers(
        global: Option<&Path>,
        explicit: Option<&Path>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CliError> {
        let mut config = Config::default();

        // 1. Global user config (~/.config/skidsheet/config.yaml); unreadable files are skipped
        if let Some(global_path) = global.filter(|path| path.exists()) {
            match Self::read_file(global_path) {
                Ok(global) => config.merge(global),
                Err(e) => tracing::warn!("ignoring global config: {e}"),
            }
        }

        // 2. Config file given on the command line
        if let Some(path) = explicit {
            config.merge(Self::read_file(path)?);
        }

        // 3. Environment variables
        config.merge(Self::from_env(var));

        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Config, CliError> {
        let contents = std::fs::read_to_string(path).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&contents).map_err(|reason| CliError::Config {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn parse(contents: &str) -> Result<Config, String> {
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yml::from_str(contents).map_err(|e| e.to_string())
    }

    fn from_env(var: impl Fn(&str) -> Option<String>) -> Config {
        Config {
            sql_template: var("SKIDSHEET_SQL_TEMPLATE"),
            from: var("SKIDSHEET_FROM"),
            to: var("SKIDSHEET_TO"),
            default_format: var("SKIDSHEET_FORMAT"),
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "skidsheet")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.sql_template.is_some() {
            self.sql_template = other.sql_template;
        }
        if other.from.is_some() {
            self.from = other.from;
        }
        if other.to.is_some() {
            self.to = other.to;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Output format, falling back to a table
    pub fn format(&self) -> &str {
        self.default_format.as_deref().unwrap_or("table")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_yaml() {
        let config = Config::parse(
            "sql_template: \"select * from t where id = {ID_FROM_TABLE}\"\nfrom: Juarez\n",
        )
        .unwrap();
        assert_eq!(
            config.sql_template.as_deref(),
            Some("select * from t where id = {ID_FROM_TABLE}")
        );
        assert_eq!(config.from.as_deref(), Some("Juarez"));
        assert_eq!(config.to, None);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = Config::parse("  \n").unwrap();
        assert!(config.sql_template.is_none());
        assert_eq!(config.format(), "table");
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(Config::parse("from: [unclosed").is_err());
    }

    #[test]
    fn test_merge_prefers_later_layer() {
        let mut config = Config::parse("from: Juarez\nto: El Paso\n").unwrap();
        config.merge(Config::from_env(|key| {
            (key == "SKIDSHEET_TO").then(|| "Laredo".to_string())
        }));
        assert_eq!(config.from.as_deref(), Some("Juarez"));
        assert_eq!(config.to.as_deref(), Some("Laredo"));
    }

    fn yaml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_broken_global_config_is_skipped() {
        let global = yaml_file("from: [unclosed");
        let explicit = yaml_file("to: El Paso\n");

        let config =
            Config::load_layers(Some(global.path()), Some(explicit.path()), |_| None).unwrap();
        assert_eq!(config.from, None);
        assert_eq!(config.to.as_deref(), Some("El Paso"));

        let config = Config::load_layers(Some(global.path()), None, |_| None).unwrap();
        assert!(config.sql_template.is_none());
    }

    #[test]
    fn test_layers_in_priority_order() {
        let global = yaml_file("from: Juarez\nto: El Paso\ndefault_format: json\n");
        let explicit = yaml_file("to: Laredo\n");

        let config = Config::load_layers(Some(global.path()), Some(explicit.path()), |key| {
            (key == "SKIDSHEET_FORMAT").then(|| "table".to_string())
        })
        .unwrap();
        assert_eq!(config.from.as_deref(), Some("Juarez"));
        assert_eq!(config.to.as_deref(), Some("Laredo"));
        assert_eq!(config.format(), "table");
    }

    #[test]
    fn test_broken_explicit_config_fails() {
        let explicit = yaml_file("from: [unclosed");
        let err = Config::load_layers(None, Some(explicit.path()), |_| None).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn test_explicit_file_errors_surface() {
        let err = Config::read_file(Path::new("/nonexistent/skidsheet.yaml")).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }
}
