//! Pricer CLI - command line front end for the option pricing models
//!
//! # Commands
//!
//! - `pricer price --model <model> --instrument <contract>` - Price one contract
//! - `pricer calibrate --model <model> --quote strike=price ...` - Fit a model to quotes
//! - `pricer params --model <model>` - Print a model's default parameters
//!
//! Results are written to stdout as JSON; logs go to stderr. `RUST_LOG`
//! takes precedence over the `log_level` set in the config file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::{calibrate::CalibrateArgs, params::ParamsArgs, price::PriceArgs};
use config::CliConfig;

/// Option pricing and calibration CLI
#[derive(Parser)]
#[command(name = "pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a contract under a model
    Price(PriceArgs),

    /// Calibrate model parameters to market quotes
    Calibrate(CalibrateArgs),

    /// Print the default parameters of a model
    Params(ParamsArgs),
}

fn init_tracing(verbose: bool, config: &CliConfig) {
    let fallback = if verbose { "debug" } else { config.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    init_tracing(cli.verbose, &config);
    debug!("Effective config: {:?}", config);

    match cli.command {
        Commands::Price(args) => commands::price::run(&args, &config)?,
        Commands::Calibrate(args) => commands::calibrate::run(&args, &config)?,
        Commands::Params(args) => commands::params::run(&args, &config)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use commands::{InstrumentKind, ModelKind};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_price() {
        let cli = Cli::parse_from([
            "pricer",
            "price",
            "--model",
            "rough-heston",
            "--strike",
            "95",
            "--param",
            "alpha=0.7",
            "--param",
            "rho=-0.5",
        ]);
        match cli.command {
            Commands::Price(args) => {
                assert_eq!(args.model, ModelKind::RoughHeston);
                assert_eq!(args.instrument, InstrumentKind::Call);
                assert_eq!(args.terms.strike, 95.0);
                assert_eq!(args.params, vec!["alpha=0.7", "rho=-0.5"]);
            }
            _ => panic!("Expected price command"),
        }
    }

    #[test]
    fn test_parse_calibrate_with_global_config() {
        let cli = Cli::parse_from([
            "pricer",
            "calibrate",
            "--model",
            "sabr",
            "--instrument",
            "caplet",
            "--quote",
            "0.02=0.004",
            "--seed",
            "9",
            "--config",
            "pricer.toml",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("pricer.toml")));
        match cli.command {
            Commands::Calibrate(args) => {
                assert_eq!(args.model, ModelKind::Sabr);
                assert_eq!(args.instrument, InstrumentKind::Caplet);
                assert_eq!(args.seed, Some(9));
                assert_eq!(args.max_evaluations, None);
            }
            _ => panic!("Expected calibrate command"),
        }
    }

    #[test]
    fn test_calibrate_requires_quotes() {
        let result = Cli::try_parse_from(["pricer", "calibrate", "--model", "black-scholes"]);
        assert!(result.is_err());
    }
}
