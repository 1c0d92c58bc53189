//! TOML configuration for the CLI.
//!
//! Every section is optional; missing keys take their library defaults.
//!
//! ```toml
//! log_level = "debug"
//! seed = 42
//!
//! [fourier]
//! upper_bound = 150.0
//! steps = 2000
//!
//! [rough_heston]
//! time_steps = 400
//!
//! [optimiser]
//! max_evaluations = 20000
//! tolerance = 1e-12
//! ```

use std::path::Path;

use pricer_models::models::{FourierConfig, RoughHestonConfig};
use pricer_optimiser::calibration::DifferentialEvolutionConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{CliError, Result};

/// Settings read from `--config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Calibration seed used when `--seed` is not given.
    pub seed: Option<u64>,
    /// Fourier integration settings for Heston.
    pub fourier: FourierConfig,
    /// Discretisation settings for Rough Heston.
    pub rough_heston: RoughHestonConfig,
    /// Differential evolution settings.
    pub optimiser: DifferentialEvolutionConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            seed: None,
            fourier: FourierConfig::default(),
            rough_heston: RoughHestonConfig::default(),
            optimiser: DifferentialEvolutionConfig::default(),
        }
    }
}

impl CliConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Loads the configuration at `path`, or the defaults if no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Checks the numeric sections.
    pub fn validate(&self) -> Result<()> {
        self.fourier.validate()?;
        self.rough_heston.validate()?;
        self.optimiser.validate()?;
        Ok(())
    }
}
