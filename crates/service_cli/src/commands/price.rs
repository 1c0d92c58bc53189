//! Price command implementation
//!
//! Prices one contract under one model, optionally overriding the model's
//! default parameters with `--param name=value`.

use clap::Args;
use serde_json::json;
use tracing::{debug, info};

use super::{parse_assignment, ConfiguredModel, InstrumentKind, ModelKind, TermsArgs};
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Arguments of `price`.
#[derive(Debug, Clone, Args)]
pub struct PriceArgs {
    /// Pricing model
    #[arg(short, long, value_enum)]
    pub model: ModelKind,

    /// Contract to price
    #[arg(short, long, value_enum, default_value = "call")]
    pub instrument: InstrumentKind,

    #[command(flatten)]
    pub terms: TermsArgs,

    /// Swap tenor in years (swaptions)
    #[arg(long, default_value_t = 5.0)]
    pub tenor: f64,

    /// Fixed-leg payments per year (swaptions)
    #[arg(long, default_value_t = 2)]
    pub payments_per_year: u32,

    /// Parameter override, e.g. `--param sigma=0.3`; may be repeated
    #[arg(short, long = "param", value_name = "NAME=VALUE")]
    pub params: Vec<String>,
}

/// Builds the model with overrides applied.
///
/// Overrides are merged into the model's current parameters and applied as
/// one full update, so an unknown name or an invalid value leaves nothing
/// half-applied.
pub fn configured_model(
    kind: ModelKind,
    overrides: &[String],
    config: &CliConfig,
) -> Result<ConfiguredModel> {
    let mut model = ConfiguredModel::from_config(kind, config)?;
    if overrides.is_empty() {
        return Ok(model);
    }

    let mut params = model.as_model().parameters();
    for arg in overrides {
        let (name, value) = parse_assignment(arg)?;
        if !params.contains(&name) {
            return Err(CliError::InvalidArgument(format!(
                "{} has no parameter '{}' (expected one of: {})",
                model.as_model().name(),
                name,
                model.as_model().parameter_names().join(", ")
            )));
        }
        params.insert(name, value);
    }
    model.as_model_mut().set_parameters(&params)?;
    debug!("Parameters after overrides: {:?}", params);
    Ok(model)
}

/// Run the price command
pub fn run(args: &PriceArgs, config: &CliConfig) -> Result<()> {
    let model = configured_model(args.model, &args.params, config)?;
    let terms = args.terms.terms()?;
    info!(
        "Pricing {} under {}",
        args.instrument.label(),
        model.as_model().name()
    );

    let price = model.price(args.instrument, terms, args.tenor, args.payments_per_year)?;

    let output = json!({
        "model": model.as_model().name(),
        "instrument": args.instrument.label(),
        "parameters": model.as_model().parameters(),
        "price": price,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::instruments::{EuropeanCall, PathIndependentOption};
    use pricer_models::models::BlackScholes;

    #[test]
    fn test_overrides_are_applied() {
        let model = configured_model(
            ModelKind::BlackScholes,
            &["sigma=0.3".to_string()],
            &CliConfig::default(),
        )
        .unwrap();
        assert_eq!(model.as_model().parameter_vector(), vec![0.3]);

        let price = model
            .price(
                InstrumentKind::Call,
                pricer_models::instruments::OptionTerms::default(),
                5.0,
                2,
            )
            .unwrap();
        let expected = EuropeanCall::default()
            .price(&BlackScholes::new(0.3).unwrap())
            .unwrap();
        assert_relative_eq!(price, expected, epsilon = 1e-14);
    }

    #[test]
    fn test_unknown_override_is_rejected() {
        let result = configured_model(
            ModelKind::Sabr,
            &["sigma=0.3".to_string()],
            &CliConfig::default(),
        );
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_invalid_override_value_is_rejected() {
        let result = configured_model(
            ModelKind::Heston,
            &["kappa=-1".to_string()],
            &CliConfig::default(),
        );
        assert!(matches!(result, Err(CliError::Model(_))));
    }
}
