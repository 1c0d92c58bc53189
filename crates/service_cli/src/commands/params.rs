//! Params command implementation

use clap::Args;
use serde_json::{json, Value};

use super::{ConfiguredModel, ModelKind};
use crate::config::CliConfig;
use crate::Result;

/// Arguments of `params`.
#[derive(Debug, Clone, Args)]
pub struct ParamsArgs {
    /// Model whose defaults to print
    #[arg(short, long, value_enum)]
    pub model: ModelKind,
}

/// Default parameters of `kind` with their canonical order.
pub fn describe(kind: ModelKind, config: &CliConfig) -> Result<Value> {
    let model = ConfiguredModel::from_config(kind, config)?;
    let model = model.as_model();
    Ok(json!({
        "model": model.name(),
        "order": model.parameter_names(),
        "parameters": model.parameters(),
    }))
}

/// Run the params command
pub fn run(args: &ParamsArgs, config: &CliConfig) -> Result<()> {
    let output = describe(args.model, config)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heston_defaults() {
        let value = describe(ModelKind::Heston, &CliConfig::default()).unwrap();
        assert_eq!(value["model"], "Heston");
        assert_eq!(
            value["order"],
            json!(["sigma", "kappa", "theta", "volvol", "rho"])
        );
        assert_eq!(value["parameters"]["rho"], -0.7);
    }

    #[test]
    fn test_rough_heston_has_six_parameters() {
        let value = describe(ModelKind::RoughHeston, &CliConfig::default()).unwrap();
        assert_eq!(value["order"].as_array().map(Vec::len), Some(6));
    }
}
