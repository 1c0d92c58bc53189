//! Fourier inversion of characteristic functions into call prices.
//!
//! Shared by the Heston and Rough Heston pricers.
//!
//! ## Mathematical Formulas
//!
//! With φ the characteristic function of `ln S_T` under the pricing measure:
//! ```text
//! C = ½(S − K·e^{−rT}) + (e^{−rT}/π)·∫₀^U Re[(φ(s − i) − K·φ(s)) / (i·s·e^{i·s·ln K})] ds
//! ```
//! The integral is truncated at `U` and evaluated with the midpoint rule on
//! `n` cells, `s_j = (j + ½)·U/n`. Truncation and step count are both
//! tunable through [`FourierConfig`]; neither has a derived error bound, so
//! convergence should be checked empirically for new parameter regimes.

use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use pricer_core::math::complex::Complex;
use pricer_core::types::PricingError;

use crate::instruments::OptionTerms;

/// Integration settings for Fourier pricing.
///
/// # Examples
/// ```
/// use pricer_models::models::FourierConfig;
///
/// let config = FourierConfig::default();
/// assert_eq!(config.upper_bound, 100.0);
/// assert_eq!(config.steps, 1000);
///
/// assert!(FourierConfig::new(50.0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct FourierConfig {
    /// Truncation point `U` of the frequency integral.
    pub upper_bound: f64,
    /// Number of midpoint cells.
    pub steps: usize,
}

impl Default for FourierConfig {
    fn default() -> Self {
        Self {
            upper_bound: 100.0,
            steps: 1000,
        }
    }
}

impl FourierConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    /// [`PricingError::Configuration`] unless `upper_bound > 0` (finite) and `steps > 0`.
    pub fn new(upper_bound: f64, steps: usize) -> Result<Self, PricingError> {
        let config = Self { upper_bound, steps };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`PricingError::Configuration`] unless `upper_bound > 0` (finite) and `steps > 0`.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.upper_bound.is_finite() && self.upper_bound > 0.0) {
            return Err(PricingError::Configuration(format!(
                "Fourier upper bound must be positive and finite, got {}",
                self.upper_bound
            )));
        }
        if self.steps == 0 {
            return Err(PricingError::Configuration(
                "Fourier step count must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Cell width `U / n`.
    #[inline]
    pub fn step_size(&self) -> f64 {
        self.upper_bound / self.steps as f64
    }
}

/// Prices a European call from the characteristic function of `ln S_T`.
///
/// `characteristic_function(u)` must return `E[exp(i·u·ln S_T)]` including
/// the drift `ln S + rT`, for complex `u`.
///
/// # Errors
/// - [`PricingError::Configuration`] for an invalid `config`
/// - Any error from `characteristic_function`
/// - [`PricingError::NumericalInstability`] if the result is not finite
///
/// # Examples
/// ```
/// use pricer_core::math::complex::Complex;
/// use pricer_models::instruments::OptionTerms;
/// use pricer_models::models::fourier::{fourier_call_price, FourierConfig};
///
/// // Log-normal characteristic function reproduces Black-Scholes
/// let terms = OptionTerms::new(100.0, 100.0, 100.0, 0.0, 1.0).unwrap();
/// let sigma: f64 = 0.2;
/// let price = fourier_call_price(&terms, &FourierConfig::default(), |u| {
///     let drift = 100.0_f64.ln() - 0.5 * sigma * sigma;
///     Ok((Complex::I * u * drift - u * u * (0.5 * sigma * sigma)).exp())
/// })
/// .unwrap();
/// assert!((price - 7.9656).abs() < 1e-3);
/// ```
pub fn fourier_call_price<F>(
    terms: &OptionTerms,
    config: &FourierConfig,
    mut characteristic_function: F,
) -> Result<f64, PricingError>
where
    F: FnMut(Complex) -> Result<Complex, PricingError>,
{
    config.validate()?;

    let spot = terms.spot();
    let strike = terms.strike();
    let discount = terms.discount_factor();
    let ln_strike = strike.ln();
    let ds = config.step_size();

    let mut integral = 0.0;
    for j in 0..config.steps {
        let s = (j as f64 + 0.5) * ds;
        let shifted = characteristic_function(Complex::new(s, -1.0))?;
        let plain = characteristic_function(Complex::from_real(s))?;
        let numerator = shifted - plain * strike;
        let denominator = Complex::I * s * Complex::new(0.0, s * ln_strike).exp();
        integral += numerator.try_div(denominator)?.re();
    }

    let price = 0.5 * (spot - strike * discount) + discount / PI * integral * ds;
    PricingError::ensure_finite(price, "Fourier inversion")
}
