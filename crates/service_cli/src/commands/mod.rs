//! CLI command implementations
//!
//! Each submodule implements one subcommand. The shared pieces here turn
//! command-line choices into configured models and contracts.

pub mod calibrate;
pub mod params;
pub mod price;

use clap::{Args, ValueEnum};
use pricer_models::instruments::{
    EuropeanCall, EuropeanCaplet, EuropeanPayerSwaption, EuropeanPut, OptionTerms,
    PathIndependentOption,
};
use pricer_models::models::{
    Bachelier, BlackScholes, EquityModel, Heston, InterestRateModel, Model, RoughHeston, Sabr,
};

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Model selectable with `--model`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelKind {
    BlackScholes,
    Bachelier,
    Sabr,
    Heston,
    RoughHeston,
}

/// Contract selectable with `--instrument`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InstrumentKind {
    Call,
    Put,
    Caplet,
    Swaption,
}

impl InstrumentKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Put => "put",
            Self::Caplet => "caplet",
            Self::Swaption => "swaption",
        }
    }
}

/// Contract inputs shared by `price` and `calibrate`.
///
/// Defaults match [`OptionTerms::default`].
#[derive(Debug, Clone, Args)]
pub struct TermsArgs {
    /// Current underlying level
    #[arg(long, default_value_t = 110.0)]
    pub spot: f64,

    /// Strike
    #[arg(long, default_value_t = 100.0)]
    pub strike: f64,

    /// Forward level (caplets and swaptions)
    #[arg(long, default_value_t = 105.0)]
    pub forward: f64,

    /// Continuously compounded risk-free rate
    #[arg(long, default_value_t = 0.01)]
    pub rate: f64,

    /// Time to expiry in years
    #[arg(long, default_value_t = 1.0)]
    pub expiry: f64,
}

impl TermsArgs {
    pub fn terms(&self) -> Result<OptionTerms> {
        Ok(OptionTerms::new(
            self.spot,
            self.strike,
            self.forward,
            self.rate,
            self.expiry,
        )?)
    }
}

/// Splits a `name=value` argument.
pub fn parse_assignment(arg: &str) -> Result<(String, f64)> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| CliError::InvalidArgument(format!("Expected name=value, got '{}'", arg)))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidArgument(format!("Missing name in '{}'", arg)));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| CliError::InvalidArgument(format!("'{}' is not a number", value.trim())))?;
    Ok((name.to_string(), value))
}

/// A model built from command-line and config settings.
#[derive(Debug, Clone)]
pub enum ConfiguredModel {
    BlackScholes(BlackScholes),
    Bachelier(Bachelier),
    Sabr(Sabr),
    Heston(Heston),
    RoughHeston(RoughHeston),
}

impl ConfiguredModel {
    /// Default-parameter model carrying the numerical settings from `config`.
    pub fn from_config(kind: ModelKind, config: &CliConfig) -> Result<Self> {
        Ok(match kind {
            ModelKind::BlackScholes => Self::BlackScholes(BlackScholes::default()),
            ModelKind::Bachelier => Self::Bachelier(Bachelier::default()),
            ModelKind::Sabr => Self::Sabr(Sabr::default()),
            ModelKind::Heston => {
                Self::Heston(Heston::default().with_fourier_config(config.fourier)?)
            }
            ModelKind::RoughHeston => {
                Self::RoughHeston(RoughHeston::default().with_config(config.rough_heston)?)
            }
        })
    }

    pub fn as_model(&self) -> &dyn Model {
        match self {
            Self::BlackScholes(m) => m,
            Self::Bachelier(m) => m,
            Self::Sabr(m) => m,
            Self::Heston(m) => m,
            Self::RoughHeston(m) => m,
        }
    }

    pub fn as_model_mut(&mut self) -> &mut dyn Model {
        match self {
            Self::BlackScholes(m) => m,
            Self::Bachelier(m) => m,
            Self::Sabr(m) => m,
            Self::Heston(m) => m,
            Self::RoughHeston(m) => m,
        }
    }

    fn as_equity(&self) -> Option<&dyn EquityModel> {
        match self {
            Self::BlackScholes(m) => Some(m as &dyn EquityModel),
            Self::Heston(m) => Some(m),
            Self::RoughHeston(m) => Some(m),
            Self::Bachelier(_) | Self::Sabr(_) => None,
        }
    }

    fn as_interest_rate(&self) -> Option<&dyn InterestRateModel> {
        match self {
            Self::BlackScholes(m) => Some(m as &dyn InterestRateModel),
            Self::Bachelier(m) => Some(m),
            Self::Sabr(m) => Some(m),
            Self::Heston(_) | Self::RoughHeston(_) => None,
        }
    }

    fn unsupported(&self, instrument: InstrumentKind) -> CliError {
        CliError::Unsupported {
            model: self.as_model().name(),
            instrument: instrument.label(),
        }
    }

    /// Prices `instrument` on `terms`; swaptions use `tenor` and `payments_per_year`.
    pub fn price(
        &self,
        instrument: InstrumentKind,
        terms: OptionTerms,
        tenor: f64,
        payments_per_year: u32,
    ) -> Result<f64> {
        let price = match instrument {
            InstrumentKind::Call => {
                let model = self.as_equity().ok_or_else(|| self.unsupported(instrument))?;
                EuropeanCall::from_terms(terms).price(model)?
            }
            InstrumentKind::Put => match self {
                Self::BlackScholes(model) => EuropeanPut::from_terms(terms).price(model)?,
                _ => return Err(self.unsupported(instrument)),
            },
            InstrumentKind::Caplet => {
                let model = self
                    .as_interest_rate()
                    .ok_or_else(|| self.unsupported(instrument))?;
                EuropeanCaplet::from_terms(terms).price(model)?
            }
            InstrumentKind::Swaption => {
                let model = self
                    .as_interest_rate()
                    .ok_or_else(|| self.unsupported(instrument))?;
                EuropeanPayerSwaption::new(terms, tenor, payments_per_year)?.price(model)?
            }
        };
        Ok(price)
    }
}
