//! Bachelier (normal) model for caplets.
//!
//! ## Mathematical Formulas
//!
//! **Caplet Price**: C = e^(-rT)·σ√T·(D·N(D) + φ(D))
//!
//! Where D = (F - K) / (σ√T), N is the standard normal CDF and φ its density.
//! `σ` is an absolute (normal) volatility.

use pricer_core::math::distributions::{norm_cdf, norm_pdf};
use pricer_core::types::PricingError;

use super::error::{require_positive, ModelError};
use super::parameters::fixed_vector;
use super::{InterestRateModel, Model};
use crate::calibration::CalibrationTargets;
use crate::instruments::EuropeanCaplet;

const PARAMETER_NAMES: &[&str] = &["sigma"];

/// Bachelier model.
///
/// Parameters: `sigma` (normal volatility, > 0). Default `sigma = 0.25`.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{EuropeanCaplet, PathIndependentOption};
/// use pricer_models::models::Bachelier;
///
/// // At the money: C = e^(-rT)·σ√T/√(2π)
/// let caplet = EuropeanCaplet::new(100.0, 0.03, 0.03, 0.0, 1.0).unwrap();
/// let price = caplet.price(&Bachelier::new(0.01).unwrap()).unwrap();
/// assert!((price - 0.01 / (2.0 * std::f64::consts::PI).sqrt()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Bachelier {
    sigma: f64,
    caplet_targets: CalibrationTargets<EuropeanCaplet>,
}

impl Default for Bachelier {
    fn default() -> Self {
        Self {
            sigma: 0.25,
            caplet_targets: CalibrationTargets::default(),
        }
    }
}

impl Bachelier {
    /// Creates a model with the given normal volatility.
    ///
    /// # Errors
    /// [`ModelError::InvalidParameter`] unless `sigma > 0`.
    pub fn new(sigma: f64) -> Result<Self, ModelError> {
        require_positive("sigma", sigma)?;
        Ok(Self {
            sigma,
            ..Self::default()
        })
    }

    /// Attaches caplet quotes used by [`Model::calibration_error`].
    pub fn with_caplet_targets(mut self, targets: CalibrationTargets<EuropeanCaplet>) -> Self {
        self.caplet_targets = targets;
        self
    }

    /// Normal volatility.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl Model for Bachelier {
    fn name(&self) -> &'static str {
        "Bachelier"
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        PARAMETER_NAMES
    }

    fn parameter_vector(&self) -> Vec<f64> {
        vec![self.sigma]
    }

    fn set_parameter_vector(&mut self, values: &[f64]) -> Result<(), ModelError> {
        let [sigma] = fixed_vector(values)?;
        require_positive("sigma", sigma)?;
        self.sigma = sigma;
        Ok(())
    }

    fn calibration_error(&self, candidate: &[f64]) -> f64 {
        if self.caplet_targets.is_empty() {
            return 0.0;
        }
        match fixed_vector(candidate).and_then(|[sigma]| Self::new(sigma)) {
            Ok(trial) => self
                .caplet_targets
                .squared_error(|caplet| trial.price_caplet(caplet)),
            Err(_) => f64::INFINITY,
        }
    }
}

impl InterestRateModel for Bachelier {
    fn price_caplet(&self, caplet: &EuropeanCaplet) -> Result<f64, PricingError> {
        let t = caplet.terms();
        let vol_sqrt_t = self.sigma * t.expiry().sqrt();
        let d = (t.forward() - t.strike()) / vol_sqrt_t;
        let price = t.discount_factor() * vol_sqrt_t * (norm_cdf(d) * d + norm_pdf(d));
        PricingError::ensure_finite(price, "Bachelier caplet")
    }
}
