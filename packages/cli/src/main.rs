#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the property ledger reconciler.

mod inspect;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use property_ledger_reconcile::reconcile_with_report;
use property_ledger_source::config::{SourceConfig, load_source_config};
use property_ledger_source::load_records;

/// Environment variable naming a default source config file.
const CONFIG_ENV_VAR: &str = "PROPERTY_LEDGER_CONFIG";

#[derive(Parser)]
#[command(name = "property_ledger", about = "Property ledger reconciliation tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deduplicate a ledger export and write the kept records as JSON
    Reconcile {
        /// Ledger export to read (`.csv` or `.json`)
        #[arg(long)]
        input: PathBuf,
        /// Source config TOML (overrides `PROPERTY_LEDGER_CONFIG` env var)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Where to write the kept records. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Where to write the list of dropped records
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Show how individual labels are keyed and scored
    Inspect {
        /// Labels to inspect
        #[arg(required = true)]
        labels: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Reconcile {
            input,
            config,
            output,
            report,
        } => {
            let config = resolve_config(config)?;
            let records = load_records(&input, &config)?;
            let result = reconcile_with_report(&records);

            write_json(output.as_deref(), &serde_json::to_value(&result.records)?)?;
            if let Some(path) = &output {
                log::info!(
                    "Wrote {} records to {}",
                    result.records.len(),
                    path.display()
                );
            }

            if let Some(path) = report {
                write_json(Some(path.as_path()), &serde_json::to_value(&result.dropped)?)?;
                log::info!(
                    "Wrote {} dropped records to {}",
                    result.dropped.len(),
                    path.display()
                );
            }
        }
        Commands::Inspect { labels } => {
            for (i, label) in labels.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print!("{}", inspect::Inspection::of(label));
            }
        }
    }

    Ok(())
}

/// Loads the config named on the command line or in the environment,
/// falling back to the defaults.
fn resolve_config(path: Option<PathBuf>) -> Result<SourceConfig, Box<dyn std::error::Error>> {
    let path = path.or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));
    match path {
        Some(path) => Ok(load_source_config(&path)?),
        None => {
            log::debug!("No source config given, using default column names");
            Ok(SourceConfig::default())
        }
    }
}

/// Writes `value` as pretty JSON to `path`, or to stdout when `None`.
fn write_json(path: Option<&Path>, value: &serde_json::Value) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => std::fs::write(path, json + "\n")?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}
