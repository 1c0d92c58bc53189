//! Black-Scholes model.
//!
//! Log-normal dynamics with a single volatility parameter. Prices European
//! calls and caplets (the caplet reuses the call formula on the shared
//! option inputs) and, for parity checks, European puts.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use pricer_core::math::distributions::norm_cdf;
use pricer_core::types::PricingError;

use super::error::{require_positive, ModelError};
use super::parameters::fixed_vector;
use super::{EquityModel, InterestRateModel, Model};
use crate::calibration::CalibrationTargets;
use crate::instruments::{EuropeanCall, EuropeanCaplet, EuropeanPut};

const PARAMETER_NAMES: &[&str] = &["sigma"];

fn check_inputs(spot: f64, strike: f64, expiry: f64, sigma: f64) -> Result<(), PricingError> {
    for (name, value) in [
        ("spot", spot),
        ("strike", strike),
        ("expiry", expiry),
        ("sigma", sigma),
    ] {
        if !(value > 0.0 && value.is_finite()) {
            return Err(PricingError::domain(name, value, "must be positive and finite"));
        }
    }
    Ok(())
}

fn d1_d2(spot: f64, strike: f64, rate: f64, expiry: f64, sigma: f64) -> (f64, f64) {
    let vol_sqrt_t = sigma * expiry.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * sigma * sigma) * expiry) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Black-Scholes European call price.
///
/// # Errors
/// [`PricingError::Domain`] unless spot, strike, expiry and sigma are positive.
///
/// # Examples
/// ```
/// use pricer_models::models::black_scholes::black_scholes_call;
///
/// let price = black_scholes_call(100.0, 100.0, 0.05, 1.0, 0.2).unwrap();
/// assert!((price - 10.4506).abs() < 1e-3);
/// assert!(black_scholes_call(100.0, 100.0, 0.05, 1.0, 0.0).is_err());
/// ```
pub fn black_scholes_call(
    spot: f64,
    strike: f64,
    rate: f64,
    expiry: f64,
    sigma: f64,
) -> Result<f64, PricingError> {
    check_inputs(spot, strike, expiry, sigma)?;
    let (d1, d2) = d1_d2(spot, strike, rate, expiry, sigma);
    let price = spot * norm_cdf(d1) - strike * (-rate * expiry).exp() * norm_cdf(d2);
    PricingError::ensure_finite(price, "Black-Scholes call")
}

/// Black-Scholes European put price.
///
/// # Errors
/// [`PricingError::Domain`] unless spot, strike, expiry and sigma are positive.
pub fn black_scholes_put(
    spot: f64,
    strike: f64,
    rate: f64,
    expiry: f64,
    sigma: f64,
) -> Result<f64, PricingError> {
    check_inputs(spot, strike, expiry, sigma)?;
    let (d1, d2) = d1_d2(spot, strike, rate, expiry, sigma);
    let price = strike * (-rate * expiry).exp() * norm_cdf(-d2) - spot * norm_cdf(-d1);
    PricingError::ensure_finite(price, "Black-Scholes put")
}

/// Black-Scholes model.
///
/// Parameters: `sigma` (volatility, > 0). Default `sigma = 0.25`.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{EuropeanCall, EuropeanCaplet, PathIndependentOption};
/// use pricer_models::models::{BlackScholes, Model};
///
/// let model = BlackScholes::new(0.2).unwrap();
/// let call = EuropeanCall::default().price(&model).unwrap();
/// let caplet = EuropeanCaplet::default().price(&model).unwrap();
/// assert_eq!(call, caplet);
/// assert_eq!(model.parameter_vector(), vec![0.2]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BlackScholes {
    sigma: f64,
    call_targets: CalibrationTargets<EuropeanCall>,
    caplet_targets: CalibrationTargets<EuropeanCaplet>,
}

impl Default for BlackScholes {
    fn default() -> Self {
        Self {
            sigma: 0.25,
            call_targets: CalibrationTargets::default(),
            caplet_targets: CalibrationTargets::default(),
        }
    }
}

impl BlackScholes {
    /// Creates a model with the given volatility.
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

    /// Attaches call quotes used by [`Model::calibration_error`].
    pub fn with_call_targets(mut self, targets: CalibrationTargets<EuropeanCall>) -> Self {
        self.call_targets = targets;
        self
    }

    /// Attaches caplet quotes used by [`Model::calibration_error`].
    pub fn with_caplet_targets(mut self, targets: CalibrationTargets<EuropeanCaplet>) -> Self {
        self.caplet_targets = targets;
        self
    }

    /// Volatility.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Prices a European put.
    ///
    /// # Errors
    /// [`PricingError::Domain`] for degenerate inputs.
    pub fn price_put(&self, put: &EuropeanPut) -> Result<f64, PricingError> {
        let t = put.terms();
        black_scholes_put(t.spot(), t.strike(), t.rate(), t.expiry(), self.sigma)
    }
}

impl Model for BlackScholes {
    fn name(&self) -> &'static str {
        "BlackScholes"
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
        if self.call_targets.is_empty() && self.caplet_targets.is_empty() {
            return 0.0;
        }
        let trial = match fixed_vector(candidate).and_then(|[sigma]| Self::new(sigma)) {
            Ok(trial) => trial,
            Err(_) => return f64::INFINITY,
        };
        self.call_targets.squared_error(|call| trial.price_call(call))
            + self
                .caplet_targets
                .squared_error(|caplet| trial.price_caplet(caplet))
    }
}

impl EquityModel for BlackScholes {
    fn price_call(&self, call: &EuropeanCall) -> Result<f64, PricingError> {
        let t = call.terms();
        black_scholes_call(t.spot(), t.strike(), t.rate(), t.expiry(), self.sigma)
    }
}

impl InterestRateModel for BlackScholes {
    fn price_caplet(&self, caplet: &EuropeanCaplet) -> Result<f64, PricingError> {
        let t = caplet.terms();
        black_scholes_call(t.spot(), t.strike(), t.rate(), t.expiry(), self.sigma)
    }
}
