//! Config command implementation.
//!
//! Shows the effective analysis configuration or validates a file.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};

use termstruct_config::{AnalysisConfig, ConfigFormat, Validate, ValidationError};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_csv, print_error, print_header, print_json, print_success, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration (defaults merged with --config)
    Show,

    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Arguments for validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// File to validate; defaults to --config
    pub file: Option<PathBuf>,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat, config_path: Option<&Path>) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(format, config_path),
        ConfigCommand::Validate(validate_args) => {
            let path = validate_args
                .file
                .as_deref()
                .or(config_path)
                .ok_or_else(|| CliError::MissingArgument("FILE or --config".into()))?;
            validate(path, format)
        }
    }
}

fn show(format: OutputFormat, config_path: Option<&Path>) -> Result<()> {
    let config = crate::commands::load_config(config_path)?;

    match format {
        OutputFormat::Table => {
            print_header("Effective configuration");
            if let Some(path) = config_path {
                println!("# from {}", path.display());
            }
            print!("{}", config.to_string_as(ConfigFormat::Toml)?);
            Ok(())
        }
        OutputFormat::Json => print_json(&config),
        OutputFormat::Csv => print_csv(&key_values(&config)),
    }
}

fn key_values(config: &AnalysisConfig) -> Vec<KeyValue> {
    let join = |values: Vec<String>| values.join(" ");
    vec![
        KeyValue::new(
            "pillars",
            join(config.pillars.iter().map(ToString::to_string).collect()),
        ),
        KeyValue::new("basket_ordering", format!("{:?}", config.basket_ordering).to_lowercase()),
        KeyValue::new("on_date_error", format!("{:?}", config.on_date_error).to_lowercase()),
        KeyValue::new("date_column", &config.date_column),
        KeyValue::new("instruments", config.instruments.join("; ")),
        KeyValue::new("solver.kind", config.solver.kind.as_str()),
        KeyValue::new("solver.tolerance", config.solver.tolerance.to_string()),
        KeyValue::new("solver.max_iterations", config.solver.max_iterations.to_string()),
    ]
}

fn validate(path: &Path, format: OutputFormat) -> Result<()> {
    let format_of_file = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
    let config = AnalysisConfig::from_str_as(&content, format_of_file)?;
    let errors = config.validate();

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "file": path.display().to_string(),
            "valid": errors.is_empty(),
            "errors": errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
        }))?,
        OutputFormat::Csv => print_csv(&error_rows(&errors))?,
        OutputFormat::Table => {
            if errors.is_empty() {
                print_success(&format!("{} is valid", path.display()));
            }
            for error in &errors {
                print_error(&error.to_string());
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(CliError::InvalidConfig(errors.len()).into())
    }
}

fn error_rows(errors: &[ValidationError]) -> Vec<KeyValue> {
    errors
        .iter()
        .map(|e| KeyValue::new(&e.field, &e.message))
        .collect()
}
