//! Termstruct CLI - government bond term-structure analytics.
//!
//! # Usage
//!
//! ```bash
//! # Decode an identifier and solve its yield
//! termstruct parse "CAN 2.25 Mar 24" --reference-date 2024-01-02 --price 100.34
//!
//! # Yield, spot and forward curves for one date of a price file
//! termstruct curves --input demos/bond_prices.csv --date 2024-01-02
//!
//! # Covariance and PCA of curve log-returns, as JSON
//! termstruct risk --input demos/bond_prices.csv --format json
//!
//! # Effective configuration
//! termstruct --config analysis.toml config show
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG overrides -v. Logs go to stderr so that
    // JSON and CSV output stay clean.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_level())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Parse(args) => {
            commands::parse::execute(args, format, &commands::load_config(config_path)?)?;
        }
        Commands::Curves(args) => {
            commands::curves::execute(args, format, &commands::load_config(config_path)?)?;
        }
        Commands::Risk(args) => {
            commands::risk::execute(args, format, &commands::load_config(config_path)?)?;
        }
        Commands::Config(args) => commands::config::execute(args, format, config_path)?,
    }

    Ok(())
}
