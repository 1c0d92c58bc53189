//! Pricing models and their capability traits.
//!
//! This module provides:
//! - [`Model`]: parameter access, parameter updates, and the calibration
//!   error function every model exposes
//! - [`EquityModel`]: models with a European call pricer
//! - [`InterestRateModel`]: models with a European caplet pricer
//! - Concrete models: [`BlackScholes`] (both capabilities), [`Bachelier`],
//!   [`Sabr`], [`Heston`], [`RoughHeston`]
//! - [`ParameterSet`]: the name → value parameter view
//! - [`fourier`]: characteristic-function inversion shared by Heston-type models
//!
//! ## Parameter discipline
//!
//! Each model stores its parameters as typed fields. [`Model::parameters`]
//! derives the [`ParameterSet`] from them on every call, so the two views
//! cannot drift apart. Updates through [`Model::set_parameters`] are atomic:
//! on any error the model is left untouched.
//!
//! ## Example
//!
//! ```
//! use pricer_models::models::{Heston, Model, ModelError, ParameterSet};
//!
//! let mut model = Heston::default();
//! assert_eq!(model.dimension(), 5);
//!
//! // A partial update is rejected and changes nothing
//! let before = model.parameters();
//! let partial = ParameterSet::new().with("sigma", 0.3);
//! assert!(matches!(
//!     model.set_parameters(&partial),
//!     Err(ModelError::ParameterMismatch { .. })
//! ));
//! assert_eq!(model.parameters(), before);
//! ```

pub mod bachelier;
pub mod black_scholes;
pub mod error;
pub mod fourier;
pub mod heston;
pub mod parameters;
pub mod rough_heston;
pub mod sabr;

use std::fmt::Debug;

use pricer_core::types::PricingError;
use tracing::warn;

use crate::instruments::{EuropeanCall, EuropeanCaplet};

pub use bachelier::Bachelier;
pub use black_scholes::BlackScholes;
pub use error::ModelError;
pub use fourier::FourierConfig;
pub use heston::Heston;
pub use parameters::ParameterSet;
pub use rough_heston::{AdamsWeights, RoughHeston, RoughHestonConfig};
pub use sabr::Sabr;

/// Capabilities shared by every model.
///
/// Parameter vectors passed to [`Model::calibration_error`] and
/// [`Model::set_parameter_vector`] follow the order of
/// [`Model::parameter_names`].
pub trait Model: Debug {
    /// Short model name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Canonical parameter ordering.
    fn parameter_names(&self) -> &'static [&'static str];

    /// Current parameters in canonical order.
    fn parameter_vector(&self) -> Vec<f64>;

    /// Replaces all parameters from a vector in canonical order.
    ///
    /// # Errors
    /// - [`ModelError::DimensionMismatch`] for a vector of the wrong length
    /// - [`ModelError::InvalidParameter`] for a value outside its range
    ///
    /// The model is unchanged on error.
    fn set_parameter_vector(&mut self, values: &[f64]) -> Result<(), ModelError>;

    /// Calibration loss for a candidate parameter vector.
    ///
    /// Non-negative, lower is better. Models without calibration targets
    /// return `0.0` for every candidate. Candidates outside the admissible
    /// parameter region score `f64::INFINITY`.
    fn calibration_error(&self, candidate: &[f64]) -> f64;

    /// Number of parameters.
    fn dimension(&self) -> usize {
        self.parameter_names().len()
    }

    /// Current parameters as a name → value mapping.
    fn parameters(&self) -> ParameterSet {
        self.parameter_names()
            .iter()
            .copied()
            .zip(self.parameter_vector())
            .collect()
    }

    /// Replaces all parameters.
    ///
    /// The key set of `update` must equal [`Model::parameter_names`] exactly.
    ///
    /// # Errors
    /// - [`ModelError::ParameterMismatch`] naming missing and unexpected keys
    /// - [`ModelError::InvalidParameter`] for a value outside its range
    ///
    /// The model is unchanged on error.
    fn set_parameters(&mut self, update: &ParameterSet) -> Result<(), ModelError> {
        let result = update
            .ordered_values(self.parameter_names())
            .and_then(|values| self.set_parameter_vector(&values));
        if let Err(err) = &result {
            warn!(model = self.name(), error = %err, "Rejected parameter update");
        }
        result
    }
}

/// Models with a European call pricer.
pub trait EquityModel: Model {
    /// Prices a European call.
    ///
    /// # Errors
    /// [`PricingError`] if the price is undefined or cannot be computed.
    fn price_call(&self, call: &EuropeanCall) -> Result<f64, PricingError>;
}

/// Models with a European caplet pricer.
pub trait InterestRateModel: Model {
    /// Prices a European caplet.
    ///
    /// # Errors
    /// [`PricingError`] if the price is undefined or cannot be computed.
    fn price_caplet(&self, caplet: &EuropeanCaplet) -> Result<f64, PricingError>;
}
