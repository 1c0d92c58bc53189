//! SABR model for caplets.
//!
//! SABR (Stochastic Alpha, Beta, Rho) is a stochastic volatility model:
//! ```text
//! dF = alpha * F^beta * dW_F
//! d(alpha) = nu * alpha * dW_alpha
//! E[dW_F * dW_alpha] = rho * dt
//! ```
//! where:
//! - F = forward
//! - alpha = instantaneous volatility
//! - beta = CEV exponent (0: normal, 1: lognormal)
//! - nu = volatility of volatility
//! - rho = forward/volatility correlation
//!
//! ## Hagan Formula
//!
//! The Black implied volatility follows Hagan et al. (2002):
//! ```text
//! σ_B(K,F) = α / [(FK)^((1-β)/2) · D] × (z/x(z)) × [1 + expansion · T]
//! ```
//! with
//! - D = 1 + (1-β)²/24·ln²(F/K) + (1-β)⁴/1920·ln⁴(F/K)
//! - z = ν/α·(FK)^((1-β)/2)·ln(F/K)
//! - x(z) = ln[(√(1 - 2ρz + z²) + z - ρ) / (1 - ρ)]
//! - expansion = (1-β)²/24·α²/(FK)^(1-β) + ρβνα/(4(FK)^((1-β)/2)) + (2-3ρ²)/24·ν²
//!
//! `z/x(z)` tends to 1 as `z → 0`, which covers both the at-the-money case
//! and `ν = 0`. The caplet is then priced with the Black-Scholes call formula
//! at that volatility.

use pricer_core::types::PricingError;

use super::black_scholes::black_scholes_call;
use super::error::{require_in_range, require_non_negative, require_positive, ModelError};
use super::parameters::fixed_vector;
use super::{InterestRateModel, Model};
use crate::calibration::CalibrationTargets;
use crate::instruments::EuropeanCaplet;

const PARAMETER_NAMES: &[&str] = &["alpha", "beta", "rho", "nu"];

/// Below this `|z|` the ratio `z/x(z)` is taken as exactly 1.
const SMALL_Z_THRESHOLD: f64 = 1e-7;

/// SABR model.
///
/// Parameters (canonical order):
/// - `alpha` (> 0), default 0.1
/// - `beta` (in [0, 1]), default 0.01
/// - `rho` (in (-1, 1)), default -0.7
/// - `nu` (≥ 0), default 0.5
///
/// # Examples
/// ```
/// use pricer_models::models::Sabr;
///
/// // Lognormal with no vol-of-vol collapses to a flat alpha
/// let model = Sabr::new(0.2, 1.0, -0.5, 0.0).unwrap();
/// let vol = model.implied_vol(100.0, 80.0, 2.0).unwrap();
/// assert!((vol - 0.2).abs() < 1e-15);
///
/// assert!(Sabr::new(0.2, 0.5, 1.0, 0.3).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Sabr {
    alpha: f64,
    beta: f64,
    rho: f64,
    nu: f64,
    caplet_targets: CalibrationTargets<EuropeanCaplet>,
}

impl Default for Sabr {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            beta: 0.01,
            rho: -0.7,
            nu: 0.5,
            caplet_targets: CalibrationTargets::default(),
        }
    }
}

fn validate(alpha: f64, beta: f64, rho: f64, nu: f64) -> Result<(), ModelError> {
    require_positive("alpha", alpha)?;
    require_in_range("beta", beta, 0.0, 1.0)?;
    if !(rho > -1.0 && rho < 1.0) {
        return Err(ModelError::invalid("rho", rho, "must lie in (-1, 1)"));
    }
    require_non_negative("nu", nu)
}

impl Sabr {
    /// Creates a SABR model.
    ///
    /// # Errors
    /// [`ModelError::InvalidParameter`] for the first parameter outside its range.
    pub fn new(alpha: f64, beta: f64, rho: f64, nu: f64) -> Result<Self, ModelError> {
        validate(alpha, beta, rho, nu)?;
        Ok(Self {
            alpha,
            beta,
            rho,
            nu,
            caplet_targets: CalibrationTargets::default(),
        })
    }

    /// Attaches caplet quotes used by [`Model::calibration_error`].
    pub fn with_caplet_targets(mut self, targets: CalibrationTargets<EuropeanCaplet>) -> Self {
        self.caplet_targets = targets;
        self
    }

    /// Initial volatility.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// CEV exponent.
    #[inline]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Correlation.
    #[inline]
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Volatility of volatility.
    #[inline]
    pub fn nu(&self) -> f64 {
        self.nu
    }

    /// Hagan lognormal implied volatility.
    ///
    /// # Errors
    /// - [`PricingError::Domain`] unless `forward` and `strike` are positive
    /// - [`PricingError::NumericalInstability`] for a non-finite result
    pub fn implied_vol(&self, forward: f64, strike: f64, expiry: f64) -> Result<f64, PricingError> {
        if !(forward > 0.0 && forward.is_finite()) {
            return Err(PricingError::domain("forward", forward, "must be positive for SABR"));
        }
        if !(strike > 0.0 && strike.is_finite()) {
            return Err(PricingError::domain("strike", strike, "must be positive for SABR"));
        }

        let (alpha, beta, rho, nu) = (self.alpha, self.beta, self.rho, self.nu);
        let one_minus_beta = 1.0 - beta;
        let log_fk = (forward / strike).ln();
        let fk = forward * strike;
        let fk_pow_half = fk.powf(0.5 * one_minus_beta);

        let log_fk_2 = log_fk * log_fk;
        let one_minus_beta_2 = one_minus_beta * one_minus_beta;
        let d = 1.0
            + one_minus_beta_2 / 24.0 * log_fk_2
            + one_minus_beta_2 * one_minus_beta_2 / 1920.0 * log_fk_2 * log_fk_2;

        let z = nu / alpha * fk_pow_half * log_fk;
        let z_over_x = if z.abs() < SMALL_Z_THRESHOLD {
            1.0
        } else {
            z / x_of_z(z, rho)
        };

        let term1 = one_minus_beta_2 / 24.0 * alpha * alpha / fk.powf(one_minus_beta);
        let term2 = rho * beta * nu * alpha / (4.0 * fk_pow_half);
        let term3 = (2.0 - 3.0 * rho * rho) / 24.0 * nu * nu;
        let expansion = 1.0 + (term1 + term2 + term3) * expiry;

        let vol = alpha / (fk_pow_half * d) * z_over_x * expansion;
        PricingError::ensure_finite(vol, "SABR implied volatility")
    }

    fn with_parameters(&self, [alpha, beta, rho, nu]: [f64; 4]) -> Result<Self, ModelError> {
        Self::new(alpha, beta, rho, nu)
    }
}

/// x(z) = ln[(√(1 - 2ρz + z²) + z - ρ) / (1 - ρ)]
fn x_of_z(z: f64, rho: f64) -> f64 {
    let sqrt_term = (1.0 - 2.0 * rho * z + z * z).sqrt();
    ((sqrt_term + z - rho) / (1.0 - rho)).ln()
}

impl Model for Sabr {
    fn name(&self) -> &'static str {
        "SABR"
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        PARAMETER_NAMES
    }

    fn parameter_vector(&self) -> Vec<f64> {
        vec![self.alpha, self.beta, self.rho, self.nu]
    }

    fn set_parameter_vector(&mut self, values: &[f64]) -> Result<(), ModelError> {
        let [alpha, beta, rho, nu] = fixed_vector(values)?;
        validate(alpha, beta, rho, nu)?;
        self.alpha = alpha;
        self.beta = beta;
        self.rho = rho;
        self.nu = nu;
        Ok(())
    }

    fn calibration_error(&self, candidate: &[f64]) -> f64 {
        if self.caplet_targets.is_empty() {
            return 0.0;
        }
        match fixed_vector(candidate).and_then(|values| self.with_parameters(values)) {
            Ok(trial) => self
                .caplet_targets
                .squared_error(|caplet| trial.price_caplet(caplet)),
            Err(_) => f64::INFINITY,
        }
    }
}

impl InterestRateModel for Sabr {
    fn price_caplet(&self, caplet: &EuropeanCaplet) -> Result<f64, PricingError> {
        let t = caplet.terms();
        let vol = self.implied_vol(t.forward(), t.strike(), t.expiry())?;
        black_scholes_call(t.spot(), t.strike(), t.rate(), t.expiry(), vol)
    }
}
