//! Reading and writing configuration files.

use std::fs;
use std::path::Path;

use crate::analysis::AnalysisConfig;
use crate::error::{ConfigError, ConfigResult, Validate};

/// File format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML document.
    Toml,
    /// JSON document.
    Json,
}

impl ConfigFormat {
    /// Format implied by the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl AnalysisConfig {
    /// Parses a configuration document without validating it.
    pub fn from_str_as(content: &str, format: ConfigFormat) -> ConfigResult<Self> {
        match format {
            ConfigFormat::Toml => Ok(toml::from_str(content)?),
            ConfigFormat::Json => Ok(serde_json::from_str(content)?),
        }
    }

    /// Renders the configuration as a document.
    pub fn to_string_as(&self, format: ConfigFormat) -> ConfigResult<String> {
        match format {
            ConfigFormat::Toml => Ok(toml::to_string_pretty(self)?),
            ConfigFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// Loads and validates a configuration file.
    ///
    /// The format follows the extension: `.toml` or `.json`.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_str_as(&content, format)?;
        config.validate_or_error()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Writes the configuration to `path` in the format its extension names.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let content = self.to_string_as(ConfigFormat::from_path(path)?)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termstruct_curves::{BasketOrdering, DateErrorPolicy};
    use termstruct_math::solvers::SolverKind;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.toml")).unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.JSON")).unwrap(), ConfigFormat::Json);
        assert!(matches!(
            ConfigFormat::from_path(Path::new("a.yaml")),
            Err(ConfigError::UnsupportedFormat { .. })
        ));
        assert!(ConfigFormat::from_path(Path::new("config")).is_err());
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = AnalysisConfig::from_str_as("", ConfigFormat::Toml).unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let content = r#"
pillars = [1.0, 2.0, 3.0, 5.0, 7.0]
basket_ordering = "strict"
on_date_error = "skip"

[solver]
kind = "newton"
"#;
        let config = AnalysisConfig::from_str_as(content, ConfigFormat::Toml).unwrap();

        assert_eq!(config.pillars, vec![1.0, 2.0, 3.0, 5.0, 7.0]);
        assert_eq!(config.basket_ordering, BasketOrdering::Strict);
        assert_eq!(config.on_date_error, DateErrorPolicy::Skip);
        assert_eq!(config.solver.kind, SolverKind::Newton);
        assert_eq!(config.solver.max_iterations, 100);
        assert_eq!(config.date_column, "Dates");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = AnalysisConfig::from_str_as(r#"{"pilars": [1.0]}"#, ConfigFormat::Json);
        assert!(matches!(result, Err(ConfigError::Deserialization(_))));
    }

    #[test]
    fn test_unknown_solver_rejected() {
        let result = AnalysisConfig::from_str_as("[solver]\nkind = \"secant\"\n", ConfigFormat::Toml);
        assert!(matches!(result, Err(ConfigError::Deserialization(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AnalysisConfig::new()
            .with_instruments(["CAN 2.25 Mar 24", "CAN 1.5 Sep 24"])
            .with_solver(SolverKind::Brent);
        let text = config.to_string_as(ConfigFormat::Toml).unwrap();
        let back = AnalysisConfig::from_str_as(&text, ConfigFormat::Toml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_load_or_default_without_path() {
        assert_eq!(
            AnalysisConfig::load_or_default(None).unwrap(),
            AnalysisConfig::default()
        );
    }
}
