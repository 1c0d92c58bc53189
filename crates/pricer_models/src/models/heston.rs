//! Heston stochastic volatility model.
//!
//! The Heston model is described by the SDEs:
//! ```text
//! dS = r * S * dt + sqrt(V) * S * dW_S
//! dV = kappa * (theta - V) * dt + volvol * sqrt(V) * dW_V
//! E[dW_S * dW_V] = rho * dt
//! ```
//! where:
//! - S = asset price
//! - V = instantaneous variance, starting at `V0 = sigma²`
//! - kappa = mean reversion speed
//! - theta = long-run variance
//! - volvol = volatility of variance
//! - rho = asset/variance correlation
//!
//! ## Feller Condition
//!
//! Sufficient for the variance to stay strictly positive:
//! ```text
//! 2 * kappa * theta > volvol^2
//! ```
//! It is reported by [`Heston::satisfies_feller`] but not enforced.
//!
//! ## Characteristic Function
//!
//! Calls are priced by Fourier inversion ([`super::fourier`]) of the
//! characteristic function of `ln S_T`, written in the form that avoids the
//! branch-cut discontinuity of the complex logarithm:
//! ```text
//! β = κ - iuρξ
//! d = √(β² + ξ²(iu + u²))
//! g = (β - d) / (β + d)
//! C = iu(ln S + rT) + κθ/ξ²·[(β - d)T - 2 ln((1 - g·e^(-dT)) / (1 - g))]
//! D = (β - d)/ξ²·(1 - e^(-dT)) / (1 - g·e^(-dT))
//! φ(u) = exp(C + D·V0)
//! ```

use pricer_core::math::complex::Complex;
use pricer_core::types::PricingError;

use super::error::{require_in_range, require_non_negative, require_positive, ModelError};
use super::fourier::{fourier_call_price, FourierConfig};
use super::parameters::fixed_vector;
use super::{EquityModel, Model};
use crate::calibration::CalibrationTargets;
use crate::instruments::{EuropeanCall, OptionTerms};

const PARAMETER_NAMES: &[&str] = &["sigma", "kappa", "theta", "volvol", "rho"];

/// Heston model.
///
/// Parameters (canonical order):
/// - `sigma` (> 0): initial volatility, so `V0 = sigma²`; default 0.5
/// - `kappa` (> 0): mean reversion speed; default 0.1
/// - `theta` (≥ 0): long-run variance; default 0.01
/// - `volvol` (> 0): volatility of variance; default 0.02
/// - `rho` (in [-1, 1]): correlation; default -0.7
///
/// # Examples
/// ```
/// use pricer_models::instruments::{EuropeanCall, PathIndependentOption};
/// use pricer_models::models::{Heston, Model};
///
/// let model = Heston::new(0.2, 1.5, 0.04, 0.3, -0.7).unwrap();
/// assert!((model.v0() - 0.04).abs() < 1e-15);
/// assert!(model.satisfies_feller());
///
/// let price = EuropeanCall::default().price(&model).unwrap();
/// assert!(price > 10.0 && price < 20.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Heston {
    sigma: f64,
    kappa: f64,
    theta: f64,
    volvol: f64,
    rho: f64,
    fourier: FourierConfig,
    call_targets: CalibrationTargets<EuropeanCall>,
}

impl Default for Heston {
    fn default() -> Self {
        Self {
            sigma: 0.5,
            kappa: 0.1,
            theta: 0.01,
            volvol: 0.02,
            rho: -0.7,
            fourier: FourierConfig::default(),
            call_targets: CalibrationTargets::default(),
        }
    }
}

fn validate(sigma: f64, kappa: f64, theta: f64, volvol: f64, rho: f64) -> Result<(), ModelError> {
    require_positive("sigma", sigma)?;
    require_positive("kappa", kappa)?;
    require_non_negative("theta", theta)?;
    require_positive("volvol", volvol)?;
    require_in_range("rho", rho, -1.0, 1.0)
}

impl Heston {
    /// Creates a Heston model with the default Fourier settings.
    ///
    /// # Errors
    /// [`ModelError::InvalidParameter`] for the first parameter outside its range.
    pub fn new(
        sigma: f64,
        kappa: f64,
        theta: f64,
        volvol: f64,
        rho: f64,
    ) -> Result<Self, ModelError> {
        validate(sigma, kappa, theta, volvol, rho)?;
        Ok(Self {
            sigma,
            kappa,
            theta,
            volvol,
            rho,
            ..Self::default()
        })
    }

    /// Replaces the Fourier integration settings.
    ///
    /// # Errors
    /// [`PricingError::Configuration`] for an invalid configuration.
    pub fn with_fourier_config(mut self, fourier: FourierConfig) -> Result<Self, PricingError> {
        fourier.validate()?;
        self.fourier = fourier;
        Ok(self)
    }

    /// Attaches call quotes used by [`Model::calibration_error`].
    pub fn with_call_targets(mut self, targets: CalibrationTargets<EuropeanCall>) -> Self {
        self.call_targets = targets;
        self
    }

    /// Initial volatility.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Initial variance `sigma²`.
    #[inline]
    pub fn v0(&self) -> f64 {
        self.sigma * self.sigma
    }

    /// Mean reversion speed.
    #[inline]
    pub fn kappa(&self) -> f64 {
        self.kappa
    }

    /// Long-run variance.
    #[inline]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Volatility of variance.
    #[inline]
    pub fn volvol(&self) -> f64 {
        self.volvol
    }

    /// Correlation.
    #[inline]
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Fourier integration settings.
    #[inline]
    pub fn fourier_config(&self) -> &FourierConfig {
        &self.fourier
    }

    /// Feller ratio `2κθ / volvol²`.
    pub fn feller_ratio(&self) -> f64 {
        2.0 * self.kappa * self.theta / (self.volvol * self.volvol)
    }

    /// Returns `true` if `2κθ > volvol²`.
    pub fn satisfies_feller(&self) -> bool {
        self.feller_ratio() > 1.0
    }

    /// Characteristic function of `ln S_T` at complex frequency `u`.
    ///
    /// # Errors
    /// [`PricingError::Math`] if an intermediate division or logarithm is singular.
    pub fn characteristic_function(
        &self,
        terms: &OptionTerms,
        u: Complex,
    ) -> Result<Complex, PricingError> {
        let t = terms.expiry();
        let xi = self.volvol;
        let xi2 = xi * xi;
        let iu = Complex::I * u;

        let beta = self.kappa - iu * (self.rho * xi);
        let d = (beta * beta + (iu + u * u) * xi2).sqrt();
        let g1 = beta - d;
        let g = g1.try_div(beta + d)?;
        let e = (-d * t).exp();
        let one_minus_ge = 1.0 - g * e;

        let log_term = one_minus_ge.try_div(1.0 - g)?.ln()?;
        let c = iu * (terms.spot().ln() + terms.rate() * t)
            + (g1 * t - 2.0 * log_term) * (self.kappa * self.theta / xi2);
        let d_term = (g1 * (1.0 - e)).try_div(one_minus_ge * xi2)?;

        Ok((c + d_term * self.v0()).exp())
    }

    fn with_parameters(&self, [sigma, kappa, theta, volvol, rho]: [f64; 5]) -> Result<Self, ModelError> {
        validate(sigma, kappa, theta, volvol, rho)?;
        Ok(Self {
            sigma,
            kappa,
            theta,
            volvol,
            rho,
            fourier: self.fourier,
            call_targets: CalibrationTargets::default(),
        })
    }
}

impl Model for Heston {
    fn name(&self) -> &'static str {
        "Heston"
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        PARAMETER_NAMES
    }

    fn parameter_vector(&self) -> Vec<f64> {
        vec![self.sigma, self.kappa, self.theta, self.volvol, self.rho]
    }

    fn set_parameter_vector(&mut self, values: &[f64]) -> Result<(), ModelError> {
        let [sigma, kappa, theta, volvol, rho] = fixed_vector(values)?;
        validate(sigma, kappa, theta, volvol, rho)?;
        self.sigma = sigma;
        self.kappa = kappa;
        self.theta = theta;
        self.volvol = volvol;
        self.rho = rho;
        Ok(())
    }

    fn calibration_error(&self, candidate: &[f64]) -> f64 {
        if self.call_targets.is_empty() {
            return 0.0;
        }
        match fixed_vector(candidate).and_then(|values| self.with_parameters(values)) {
            Ok(trial) => self.call_targets.squared_error(|call| trial.price_call(call)),
            Err(_) => f64::INFINITY,
        }
    }
}

impl EquityModel for Heston {
    fn price_call(&self, call: &EuropeanCall) -> Result<f64, PricingError> {
        let terms = call.terms();
        fourier_call_price(terms, &self.fourier, |u| {
            self.characteristic_function(terms, u)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::Quote;
    use crate::instruments::PathIndependentOption;
    use crate::models::black_scholes::black_scholes_call;
    use approx::assert_abs_diff_eq;

    // ==========================================================
    // Parameter validation
    // ==========================================================

    #[test]
    fn test_default_parameters() {
        let model = Heston::default();
        assert_eq!(model.parameter_vector(), vec![0.5, 0.1, 0.01, 0.02, -0.7]);
        assert_abs_diff_eq!(model.v0(), 0.25, epsilon = 1e-15);
        assert_eq!(model.fourier_config(), &FourierConfig::default());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(Heston::new(0.0, 1.0, 0.04, 0.3, 0.0).is_err());
        assert!(Heston::new(0.2, 0.0, 0.04, 0.3, 0.0).is_err());
        assert!(Heston::new(0.2, 1.0, -0.01, 0.3, 0.0).is_err());
        assert!(Heston::new(0.2, 1.0, 0.04, 0.0, 0.0).is_err());
        assert!(Heston::new(0.2, 1.0, 0.04, 0.3, -1.01).is_err());
        assert!(Heston::new(0.2, 1.0, 0.0, 0.3, -1.0).is_ok());
    }

    #[test]
    fn test_feller_condition() {
        let model = Heston::new(0.2, 1.5, 0.04, 0.3, -0.7).unwrap();
        assert_abs_diff_eq!(model.feller_ratio(), 0.12 / 0.09, epsilon = 1e-12);
        assert!(model.satisfies_feller());
        let model = Heston::new(0.2, 0.5, 0.04, 0.5, -0.7).unwrap();
        assert!(!model.satisfies_feller());
    }

    #[test]
    fn test_invalid_fourier_config_rejected() {
        let bad = FourierConfig {
            upper_bound: 100.0,
            steps: 0,
        };
        assert!(Heston::default().with_fourier_config(bad).is_err());
    }

    // ==========================================================
    // Characteristic function
    // ==========================================================

    #[test]
    fn test_characteristic_function_at_zero_is_one() {
        let model = Heston::new(0.2, 1.5, 0.04, 0.3, -0.7).unwrap();
        let phi = model
            .characteristic_function(&OptionTerms::default(), Complex::new(1e-12, 0.0))
            .unwrap();
        assert_abs_diff_eq!(phi.re(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(phi.im(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_characteristic_function_martingale() {
        // φ(-i) = E[S_T] = S·e^(rT)
        let model = Heston::new(0.2, 1.5, 0.04, 0.3, -0.7).unwrap();
        let terms = OptionTerms::default();
        let phi = model
            .characteristic_function(&terms, Complex::new(1e-12, -1.0))
            .unwrap();
        let forward = terms.spot() * (terms.rate() * terms.expiry()).exp();
        assert_abs_diff_eq!(phi.re(), forward, epsilon = 1e-6);
    }

    // ==========================================================
    // Pricing
    // ==========================================================

    #[test]
    fn test_default_price_is_positive() {
        let price = EuropeanCall::default().price(&Heston::default()).unwrap();
        assert!(price > 0.0 && price.is_finite());
    }

    #[test]
    fn test_black_scholes_limit() {
        let model = Heston::new(0.2, 1.5, 0.04, 1e-3, 0.0).unwrap();
        let call = EuropeanCall::default();
        let t = call.terms();
        let expected = black_scholes_call(t.spot(), t.strike(), t.rate(), t.expiry(), 0.2).unwrap();
        assert_abs_diff_eq!(call.price(&model).unwrap(), expected, epsilon = 5e-3);
    }

    #[test]
    fn test_negative_correlation_cheapens_upside_calls() {
        let call = EuropeanCall::new(100.0, 130.0, 100.0, 0.0, 1.0).unwrap();
        let negative = Heston::new(0.2, 1.5, 0.04, 0.5, -0.7).unwrap();
        let neutral = Heston::new(0.2, 1.5, 0.04, 0.5, 0.0).unwrap();
        assert!(call.price(&negative).unwrap() < call.price(&neutral).unwrap());
    }

    #[test]
    fn test_price_decreases_with_strike() {
        let model = Heston::new(0.2, 1.5, 0.04, 0.3, -0.7).unwrap();
        let mut prev = f64::INFINITY;
        for strike in [80.0, 90.0, 100.0, 110.0, 120.0] {
            let call = EuropeanCall::new(100.0, strike, 100.0, 0.01, 1.0).unwrap();
            let price = call.price(&model).unwrap();
            assert!(price < prev);
            prev = price;
        }
    }

    #[test]
    fn test_finer_integration_agrees() {
        let call = EuropeanCall::default();
        let coarse = Heston::new(0.2, 1.5, 0.04, 0.3, -0.7).unwrap();
        let fine = coarse
            .clone()
            .with_fourier_config(FourierConfig::new(200.0, 4000).unwrap())
            .unwrap();
        assert_abs_diff_eq!(
            call.price(&coarse).unwrap(),
            call.price(&fine).unwrap(),
            epsilon = 1e-3
        );
    }

    // ==========================================================
    // Calibration error
    // ==========================================================

    #[test]
    fn test_calibration_error_at_truth_is_zero() {
        let truth = Heston::new(0.2, 1.5, 0.04, 0.3, -0.7).unwrap();
        let targets: CalibrationTargets<EuropeanCall> = [90.0, 100.0, 110.0]
            .into_iter()
            .map(|strike| {
                let call = EuropeanCall::new(100.0, strike, 100.0, 0.01, 1.0).unwrap();
                Quote::new(call, call.price(&truth).unwrap())
            })
            .collect();
        let model = Heston::default().with_call_targets(targets);

        assert_abs_diff_eq!(
            model.calibration_error(&truth.parameter_vector()),
            0.0,
            epsilon = 1e-20
        );
        assert!(model.calibration_error(&[0.3, 1.5, 0.04, 0.3, -0.7]) > 1e-4);
        assert_eq!(
            model.calibration_error(&[0.2, -1.5, 0.04, 0.3, -0.7]),
            f64::INFINITY
        );
    }
}
