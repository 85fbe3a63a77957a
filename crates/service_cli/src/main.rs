//! neutryx-mc - constant versus term-structure Monte Carlo comparison
//!
//! # Commands
//!
//! - `neutryx-mc compare` - Price the scenario's European, Asian and barrier
//!   options with the closed form, the term-structure engine and the
//!   constant-parameter engine
//! - `neutryx-mc scenario` - Print the effective scenario as TOML
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate turns a dated scenario into
//! year fractions, builds the pricer_models instruments and drives the
//! pricer_pricing engines.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod market;

pub use error::{CliError, Result};

use commands::compare::{OutputFormat, Recorded};
use config::{Overrides, Scenario};

/// Monte Carlo engine comparison CLI
#[derive(Parser)]
#[command(name = "neutryx-mc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log filter used when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "NEUTRYX_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Scenario file (TOML); the built-in scenario when omitted
    #[arg(short, long, global = true, env = "NEUTRYX_SCENARIO")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare reference, term-structure and constant-parameter prices
    Compare {
        /// Time steps for the European and barrier engines
        #[arg(long)]
        steps: Option<usize>,

        /// Samples per engine
        #[arg(short, long)]
        samples: Option<usize>,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Use antithetic variates
        #[arg(long)]
        antithetic: bool,

        /// Split samples into parallel chunks
        #[arg(long)]
        parallel: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Append one result row to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Instrument recorded in the CSV file
        #[arg(long, value_enum, default_value = "european")]
        record: Recorded,
    },

    /// Print the effective scenario as TOML
    Scenario,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_scenario(path: Option<&PathBuf>) -> anyhow::Result<Scenario> {
    match path {
        Some(path) => Scenario::from_file(path)
            .with_context(|| format!("loading scenario {}", path.display())),
        None => Ok(Scenario::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(if cli.verbose { "debug" } else { &cli.log_level });

    let mut scenario = load_scenario(cli.config.as_ref())?;

    match cli.command {
        Commands::Compare {
            steps,
            samples,
            seed,
            antithetic,
            parallel,
            format,
            csv,
            record,
        } => {
            scenario.merge_with_cli(&Overrides {
                steps,
                samples,
                seed,
                antithetic,
                parallel,
            });
            scenario.validate()?;
            debug!(?scenario, "effective scenario");
            commands::compare::run(&scenario, format, csv.as_deref(), record)?;
        }
        Commands::Scenario => commands::scenario::run(&scenario)?,
    }
    Ok(())
}
