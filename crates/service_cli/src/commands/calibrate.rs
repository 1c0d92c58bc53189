//! Calibrate command implementation
//!
//! Calibrates a model to a strip of quotes sharing the contract terms given
//! on the command line, one `--quote strike=price` per market price.

use clap::Args;
use pricer_core::math::random::PricerRng;
use pricer_models::calibration::{CalibrationTargets, Quote};
use pricer_models::instruments::{EuropeanCall, EuropeanCaplet, OptionTerms};
use pricer_models::models::{Model, ParameterSet};
use pricer_optimiser::calibration::{
    CalibrationReport, DifferentialEvolution, DifferentialEvolutionConfig,
};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::{parse_assignment, ConfiguredModel, InstrumentKind, ModelKind, TermsArgs};
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Seed used when neither `--seed` nor the config sets one.
const DEFAULT_SEED: u64 = 0;

/// Budget for Rough Heston when neither `--max-evaluations` nor the config
/// changes the library default; every evaluation runs a fractional Adams
/// solve per quote.
const ROUGH_HESTON_DEFAULT_EVALUATIONS: usize = 2_000;

/// Arguments of `calibrate`.
#[derive(Debug, Clone, Args)]
pub struct CalibrateArgs {
    /// Model to calibrate
    #[arg(short, long, value_enum)]
    pub model: ModelKind,

    /// Quoted contract type (call or caplet)
    #[arg(short, long, value_enum, default_value = "call")]
    pub instrument: InstrumentKind,

    /// Market quote as `strike=price`; may be repeated
    #[arg(short, long = "quote", value_name = "STRIKE=PRICE", required = true)]
    pub quotes: Vec<String>,

    #[command(flatten)]
    pub terms: TermsArgs,

    /// Random seed for the initial population
    #[arg(long)]
    pub seed: Option<u64>,

    /// Evaluation budget, overriding the config
    #[arg(long)]
    pub max_evaluations: Option<usize>,
}

/// Parses `strike=price` quotes against `base` terms.
pub fn parse_quotes(quotes: &[String], base: OptionTerms) -> Result<Vec<(OptionTerms, f64)>> {
    quotes
        .iter()
        .map(|arg| {
            let (strike, price) = parse_assignment(arg)?;
            let strike: f64 = strike.parse().map_err(|_| {
                CliError::InvalidArgument(format!("'{}' is not a numeric strike", strike))
            })?;
            if !price.is_finite() {
                return Err(CliError::InvalidArgument(format!(
                    "Quote price must be finite, got {}",
                    price
                )));
            }
            Ok((base.with_strike(strike)?, price))
        })
        .collect()
}

fn call_targets(quotes: &[(OptionTerms, f64)]) -> CalibrationTargets<EuropeanCall> {
    quotes
        .iter()
        .map(|(terms, price)| Quote::new(EuropeanCall::from_terms(*terms), *price))
        .collect()
}

fn caplet_targets(quotes: &[(OptionTerms, f64)]) -> CalibrationTargets<EuropeanCaplet> {
    quotes
        .iter()
        .map(|(terms, price)| Quote::new(EuropeanCaplet::from_terms(*terms), *price))
        .collect()
}

/// Attaches the quotes to a default model of the requested kind.
pub fn model_with_targets(
    model: ConfiguredModel,
    instrument: InstrumentKind,
    quotes: &[(OptionTerms, f64)],
) -> Result<ConfiguredModel> {
    let model = match (model, instrument) {
        (ConfiguredModel::BlackScholes(m), InstrumentKind::Call) => {
            ConfiguredModel::BlackScholes(m.with_call_targets(call_targets(quotes)))
        }
        (ConfiguredModel::BlackScholes(m), InstrumentKind::Caplet) => {
            ConfiguredModel::BlackScholes(m.with_caplet_targets(caplet_targets(quotes)))
        }
        (ConfiguredModel::Heston(m), InstrumentKind::Call) => {
            ConfiguredModel::Heston(m.with_call_targets(call_targets(quotes)))
        }
        (ConfiguredModel::RoughHeston(m), InstrumentKind::Call) => {
            ConfiguredModel::RoughHeston(m.with_call_targets(call_targets(quotes)))
        }
        (ConfiguredModel::Bachelier(m), InstrumentKind::Caplet) => {
            ConfiguredModel::Bachelier(m.with_caplet_targets(caplet_targets(quotes)))
        }
        (ConfiguredModel::Sabr(m), InstrumentKind::Caplet) => {
            ConfiguredModel::Sabr(m.with_caplet_targets(caplet_targets(quotes)))
        }
        (other, instrument) => {
            return Err(CliError::Unsupported {
                model: other.as_model().name(),
                instrument: instrument.label(),
            })
        }
    };
    Ok(model)
}

/// Evaluation budget for a run of `kind`.
///
/// `--max-evaluations` wins, then a budget set in the config. Rough Heston
/// left on the library default is capped at
/// [`ROUGH_HESTON_DEFAULT_EVALUATIONS`].
pub fn evaluation_budget(kind: ModelKind, requested: Option<usize>, config: &CliConfig) -> usize {
    if let Some(max_evaluations) = requested {
        return max_evaluations;
    }
    let configured = config.optimiser.max_evaluations;
    let library_default = DifferentialEvolutionConfig::default().max_evaluations;
    if kind == ModelKind::RoughHeston && configured == library_default {
        warn!(
            "Rough Heston calibration capped at {} evaluations; pass --max-evaluations to change",
            ROUGH_HESTON_DEFAULT_EVALUATIONS
        );
        return ROUGH_HESTON_DEFAULT_EVALUATIONS;
    }
    configured
}

/// JSON summary of a finished run.
pub fn summary(model: &dyn Model, report: &CalibrationReport) -> Result<Value> {
    let parameters = ParameterSet::from_vector(model.parameter_names(), &report.best)?;
    Ok(json!({
        "model": model.name(),
        "best": report.best,
        "parameters": parameters,
        "best_error": report.best_error,
        "evaluations": report.evaluations,
        "function_calls": report.function_calls(),
        "generations": report.generations,
        "stopped_early": report.stopped_early,
    }))
}

/// Run the calibrate command
pub fn run(args: &CalibrateArgs, config: &CliConfig) -> Result<()> {
    let quotes = parse_quotes(&args.quotes, args.terms.terms()?)?;
    let model = ConfiguredModel::from_config(args.model, config)?;
    let model = model_with_targets(model, args.instrument, &quotes)?;

    let de_config = config.optimiser.with_max_evaluations(evaluation_budget(
        args.model,
        args.max_evaluations,
        config,
    ));
    let seed = args.seed.or(config.seed).unwrap_or(DEFAULT_SEED);
    info!(
        "Calibrating {} to {} {} quote(s), seed {}",
        model.as_model().name(),
        quotes.len(),
        args.instrument.label(),
        seed
    );

    let report = DifferentialEvolution::new(model.as_model(), PricerRng::from_seed(seed))
        .with_config(de_config)
        .calibrate_with_report()?;
    if !report.best_error.is_finite() {
        warn!("No candidate produced a finite calibration error");
    }

    let output = summary(model.as_model(), &report)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use pricer_models::instruments::PathIndependentOption;
    use pricer_models::models::BlackScholes;

    #[test]
    fn test_parse_quotes() {
        let quotes = parse_quotes(
            &["90=21.5".to_string(), "110=8.25".to_string()],
            OptionTerms::default(),
        )
        .unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].0.strike(), 90.0);
        assert_eq!(quotes[0].1, 21.5);
        assert_eq!(quotes[1].0.spot(), OptionTerms::default().spot());

        assert!(parse_quotes(&["x=1".to_string()], OptionTerms::default()).is_err());
        assert!(parse_quotes(&["-5=1".to_string()], OptionTerms::default()).is_err());
    }

    #[test]
    fn test_rough_heston_default_budget_is_capped() {
        let config = CliConfig::default();
        assert_eq!(
            evaluation_budget(ModelKind::RoughHeston, None, &config),
            ROUGH_HESTON_DEFAULT_EVALUATIONS
        );
        assert_eq!(
            evaluation_budget(ModelKind::RoughHeston, Some(50_000), &config),
            50_000
        );
        assert_eq!(
            evaluation_budget(ModelKind::BlackScholes, None, &config),
            config.optimiser.max_evaluations
        );

        let mut configured = CliConfig::default();
        configured.optimiser.max_evaluations = 8_000;
        assert_eq!(
            evaluation_budget(ModelKind::RoughHeston, None, &configured),
            8_000
        );
    }

    #[test]
    fn test_unsupported_pairing() {
        let model = ConfiguredModel::from_config(ModelKind::Sabr, &CliConfig::default()).unwrap();
        let result = model_with_targets(model, InstrumentKind::Call, &[]);
        assert!(matches!(result, Err(CliError::Unsupported { .. })));
    }

    #[test]
    fn test_black_scholes_calibration_summary() {
        let terms = OptionTerms::default();
        let market = EuropeanCall::from_terms(terms)
            .price(&BlackScholes::new(0.3).unwrap())
            .unwrap();
        let model = ConfiguredModel::from_config(ModelKind::BlackScholes, &CliConfig::default())
            .unwrap();
        let model = model_with_targets(model, InstrumentKind::Call, &[(terms, market)]).unwrap();

        let report = DifferentialEvolution::new(model.as_model(), PricerRng::from_seed(5))
            .with_config(DifferentialEvolutionConfig::default().with_max_evaluations(2_000))
            .calibrate_with_report()
            .unwrap();
        let output = summary(model.as_model(), &report).unwrap();

        assert_eq!(output["model"], "BlackScholes");
        assert_eq!(output["evaluations"], 2_000);
        let sigma = output["parameters"]["sigma"].as_f64().unwrap();
        assert_abs_diff_eq!(sigma, 0.3, epsilon = 1e-4);
    }
}
