//! CLI error types.

use std::path::PathBuf;

use pricer_core::types::PricingError;
use pricer_models::models::ModelError;
use pricer_optimiser::OptimiserError;
use thiserror::Error;

/// Errors raised by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be read.
    #[error("Cannot read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`CliConfig`](crate::config::CliConfig).
    #[error("Invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Malformed command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The model has no pricer for the requested instrument.
    #[error("{model} cannot price a {instrument}")]
    Unsupported {
        model: &'static str,
        instrument: &'static str,
    },

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Optimiser(#[from] OptimiserError),

    #[error("Failed to serialise output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result type for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_message() {
        let err = CliError::Unsupported {
            model: "Bachelier",
            instrument: "call",
        };
        assert_eq!(err.to_string(), "Bachelier cannot price a call");
    }

    #[test]
    fn test_pricing_error_is_transparent() {
        let inner = PricingError::NotImplemented("swaption pricing".to_string());
        let expected = inner.to_string();
        let err: CliError = inner.into();
        assert_eq!(err.to_string(), expected);
    }
}
