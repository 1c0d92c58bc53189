//! Rough Heston model.
//!
//! The variance follows a Volterra equation with a fractional kernel of
//! order `alpha ∈ (1/2, 1]`:
//! ```text
//! V_t = V0 + 1/Γ(α)·∫₀ᵗ (t - s)^(α-1)·λ(θ - V_s) ds
//!          + 1/Γ(α)·∫₀ᵗ (t - s)^(α-1)·λν·√V_s dW_s
//! ```
//! and `alpha = 1` recovers Heston with `kappa = λ`, `volvol = λν`.
//!
//! ## Characteristic Function
//!
//! With `h(u, ·)` the solution of the fractional Riccati equation
//! ```text
//! D^α h = F(u, h),  h(u, 0) = 0
//! F(u, h) = ½(-u² - iu) + λ(iuρν - 1)·h + (λν)²/2·h²
//! ```
//! the characteristic function of `ln S_T` is
//! ```text
//! φ(u) = exp(iu(ln S + rT) + θλ·∫₀ᵀ h ds + V0·∫₀ᵀ F(u, h) ds)
//! ```
//!
//! ## Fractional Adams Scheme
//!
//! On the grid `t_k = kΔ`, `Δ = T/N`, the Riccati equation is solved by
//! predictor-corrector:
//! ```text
//! predictor: h^P_{k+1} = Σ_{j=0..k} b_{j,k+1}·F(h_j)
//! corrector: h_{k+1}   = Σ_{j=0..k} a_{j,k+1}·F(h_j) + a_{k+1,k+1}·F(h^P_{k+1})
//! ```
//! with weights
//! ```text
//! a_{0,k+1}   = Δ^α/Γ(α+2)·(k^(α+1) - (k - α)(k+1)^α)
//! a_{j,k+1}   = Δ^α/Γ(α+2)·((k-j+2)^(α+1) + (k-j)^(α+1) - 2(k-j+1)^(α+1)),  1 ≤ j ≤ k
//! a_{k+1,k+1} = Δ^α/Γ(α+2)
//! b_{j,k+1}   = Δ^α/Γ(α+1)·((k-j+1)^α - (k-j)^α)
//! ```
//! Both time integrals use the trapezoid rule on the same grid.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use pricer_core::math::complex::Complex;
use pricer_core::math::special::gamma;
use pricer_core::types::PricingError;

use super::error::{require_in_range, require_non_negative, require_positive, ModelError};
use super::fourier::{fourier_call_price, FourierConfig};
use super::parameters::fixed_vector;
use super::{EquityModel, Model};
use crate::calibration::CalibrationTargets;
use crate::instruments::{EuropeanCall, OptionTerms};

const PARAMETER_NAMES: &[&str] = &["lambda", "gamma", "theta", "v0", "rho", "alpha"];

/// Numerical settings for Rough Heston pricing.
///
/// # Examples
/// ```
/// use pricer_models::models::RoughHestonConfig;
///
/// let config = RoughHestonConfig::default();
/// assert_eq!(config.time_steps, 200);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct RoughHestonConfig {
    /// Number of Adams steps `N` over `[0, T]`.
    pub time_steps: usize,
    /// Fourier integration settings.
    pub fourier: FourierConfig,
}

impl Default for RoughHestonConfig {
    fn default() -> Self {
        Self {
            time_steps: 200,
            fourier: FourierConfig::default(),
        }
    }
}

impl RoughHestonConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    /// [`PricingError::Configuration`] for zero time steps or an invalid
    /// Fourier configuration.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.time_steps == 0 {
            return Err(PricingError::Configuration(
                "Rough Heston time step count must be positive".to_string(),
            ));
        }
        self.fourier.validate()
    }
}

/// Fractional Adams predictor and corrector weights for one grid.
///
/// Row `k` holds the weights producing `h_{k+1}`: `a(k, j)` for
/// `j ∈ 0..=k+1` and `b(k, j)` for `j ∈ 0..=k`.
#[derive(Debug, Clone, PartialEq)]
pub struct AdamsWeights {
    a: Vec<Vec<f64>>,
    b: Vec<Vec<f64>>,
    step_size: f64,
}

impl AdamsWeights {
    /// Computes the weights for order `alpha` on `steps` cells over `[0, expiry]`.
    ///
    /// # Errors
    /// - [`PricingError::Configuration`] for zero steps or a non-positive expiry
    /// - [`PricingError::Math`] if `alpha` is outside the gamma function domain
    pub fn new(alpha: f64, expiry: f64, steps: usize) -> Result<Self, PricingError> {
        if steps == 0 {
            return Err(PricingError::Configuration(
                "Adams step count must be positive".to_string(),
            ));
        }
        if !(expiry > 0.0 && expiry.is_finite()) {
            return Err(PricingError::Configuration(format!(
                "Adams horizon must be positive and finite, got {}",
                expiry
            )));
        }

        let step_size = expiry / steps as f64;
        let dt_alpha = step_size.powf(alpha);
        let corrector_scale = dt_alpha / gamma(alpha + 2.0)?;
        let predictor_scale = dt_alpha / gamma(alpha + 1.0)?;
        let pow_a1 = |x: f64| x.powf(alpha + 1.0);

        let mut a = Vec::with_capacity(steps);
        let mut b = Vec::with_capacity(steps);
        for k in 0..steps {
            let kf = k as f64;
            let mut a_row = Vec::with_capacity(k + 2);
            a_row.push(corrector_scale * (pow_a1(kf) - (kf - alpha) * (kf + 1.0).powf(alpha)));
            for j in 1..=k {
                let m = (k - j) as f64;
                a_row.push(
                    corrector_scale * (pow_a1(m + 2.0) + pow_a1(m) - 2.0 * pow_a1(m + 1.0)),
                );
            }
            a_row.push(corrector_scale);

            let b_row = (0..=k)
                .map(|j| {
                    let m = (k - j) as f64;
                    predictor_scale * ((m + 1.0).powf(alpha) - m.powf(alpha))
                })
                .collect();

            a.push(a_row);
            b.push(b_row);
        }

        Ok(Self { a, b, step_size })
    }

    /// Number of steps `N`.
    #[inline]
    pub fn steps(&self) -> usize {
        self.a.len()
    }

    /// Grid spacing `Δ`.
    #[inline]
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Corrector weight `a_{j,k+1}`.
    #[inline]
    pub fn a(&self, k: usize, j: usize) -> f64 {
        self.a[k][j]
    }

    /// Predictor weight `b_{j,k+1}`.
    #[inline]
    pub fn b(&self, k: usize, j: usize) -> f64 {
        self.b[k][j]
    }
}

/// Rough Heston model.
///
/// Parameters (canonical order):
/// - `lambda` (> 0): mean reversion speed; default 0.1
/// - `gamma` (> 0): volatility of variance scale ν; default 0.331
/// - `theta` (≥ 0): long-run variance; default 0.3156
/// - `v0` (> 0): initial variance; default 0.0392
/// - `rho` (in [-1, 1]): correlation; default -0.681
/// - `alpha` (in (1/2, 1]): kernel order, `H = alpha - 1/2`; default 0.62
///
/// # Examples
/// ```
/// use pricer_models::models::{Model, RoughHeston};
///
/// let model = RoughHeston::default();
/// assert_eq!(model.dimension(), 6);
/// assert!(RoughHeston::new(0.1, 0.3, 0.04, 0.04, -0.7, 0.5).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RoughHeston {
    lambda: f64,
    gamma: f64,
    theta: f64,
    v0: f64,
    rho: f64,
    alpha: f64,
    config: RoughHestonConfig,
    call_targets: CalibrationTargets<EuropeanCall>,
}

impl Default for RoughHeston {
    fn default() -> Self {
        Self {
            lambda: 0.1,
            gamma: 0.331,
            theta: 0.3156,
            v0: 0.0392,
            rho: -0.681,
            alpha: 0.62,
            config: RoughHestonConfig::default(),
            call_targets: CalibrationTargets::default(),
        }
    }
}

fn validate(params: [f64; 6]) -> Result<(), ModelError> {
    let [lambda, gamma, theta, v0, rho, alpha] = params;
    require_positive("lambda", lambda)?;
    require_positive("gamma", gamma)?;
    require_non_negative("theta", theta)?;
    require_positive("v0", v0)?;
    require_in_range("rho", rho, -1.0, 1.0)?;
    if !(alpha > 0.5 && alpha <= 1.0) {
        return Err(ModelError::invalid("alpha", alpha, "must lie in (0.5, 1]"));
    }
    Ok(())
}

impl RoughHeston {
    /// Creates a Rough Heston model with default numerical settings.
    ///
    /// # Errors
    /// [`ModelError::InvalidParameter`] for the first parameter outside its range.
    pub fn new(
        lambda: f64,
        gamma: f64,
        theta: f64,
        v0: f64,
        rho: f64,
        alpha: f64,
    ) -> Result<Self, ModelError> {
        Self::default().with_parameters([lambda, gamma, theta, v0, rho, alpha])
    }

    /// Replaces the numerical settings.
    ///
    /// # Errors
    /// [`PricingError::Configuration`] for an invalid configuration.
    pub fn with_config(mut self, config: RoughHestonConfig) -> Result<Self, PricingError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Attaches call quotes used by [`Model::calibration_error`].
    pub fn with_call_targets(mut self, targets: CalibrationTargets<EuropeanCall>) -> Self {
        self.call_targets = targets;
        self
    }

    /// Mean reversion speed.
    #[inline]
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Volatility of variance scale.
    #[inline]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Long-run variance.
    #[inline]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Initial variance.
    #[inline]
    pub fn v0(&self) -> f64 {
        self.v0
    }

    /// Correlation.
    #[inline]
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Kernel order.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Hurst exponent `alpha - 1/2`.
    #[inline]
    pub fn hurst(&self) -> f64 {
        self.alpha - 0.5
    }

    /// Numerical settings.
    #[inline]
    pub fn config(&self) -> &RoughHestonConfig {
        &self.config
    }

    /// Adams weights for this model's kernel order over `[0, expiry]`.
    ///
    /// # Errors
    /// See [`AdamsWeights::new`].
    pub fn adams_weights(&self, expiry: f64) -> Result<AdamsWeights, PricingError> {
        AdamsWeights::new(self.alpha, expiry, self.config.time_steps)
    }

    fn riccati(&self, u: Complex, h: Complex) -> Complex {
        let iu = Complex::I * u;
        let lambda_nu = self.lambda * self.gamma;
        (-(u * u) - iu) * 0.5
            + (iu * (self.rho * self.gamma) - 1.0) * h * self.lambda
            + h * h * (0.5 * lambda_nu * lambda_nu)
    }

    /// Characteristic function of `ln S_T` at complex frequency `u`.
    ///
    /// `weights` must come from [`RoughHeston::adams_weights`] for the same
    /// expiry as `terms`.
    ///
    /// # Errors
    /// [`PricingError::NumericalInstability`] if the Riccati solution is not finite.
    pub fn characteristic_function(
        &self,
        terms: &OptionTerms,
        weights: &AdamsWeights,
        u: Complex,
    ) -> Result<Complex, PricingError> {
        let n = weights.steps();
        let mut h = Vec::with_capacity(n + 1);
        let mut f = Vec::with_capacity(n + 1);
        h.push(Complex::ZERO);
        f.push(self.riccati(u, Complex::ZERO));

        for k in 0..n {
            let predictor = f
                .iter()
                .enumerate()
                .fold(Complex::ZERO, |acc, (j, &fj)| acc + fj * weights.b(k, j));
            let corrected = f
                .iter()
                .enumerate()
                .fold(Complex::ZERO, |acc, (j, &fj)| acc + fj * weights.a(k, j))
                + self.riccati(u, predictor) * weights.a(k, k + 1);
            h.push(corrected);
            f.push(self.riccati(u, corrected));
        }

        let dt = weights.step_size();
        let exponent = Complex::I * u * (terms.spot().ln() + terms.rate() * terms.expiry())
            + trapezoid(&h, dt) * (self.theta * self.lambda)
            + trapezoid(&f, dt) * self.v0;
        if !exponent.is_finite() {
            return Err(PricingError::NumericalInstability(format!(
                "Rough Heston Riccati solution diverged at u = {}",
                u
            )));
        }
        Ok(exponent.exp())
    }

    fn with_parameters(&self, params: [f64; 6]) -> Result<Self, ModelError> {
        validate(params)?;
        let [lambda, gamma, theta, v0, rho, alpha] = params;
        Ok(Self {
            lambda,
            gamma,
            theta,
            v0,
            rho,
            alpha,
            config: self.config,
            call_targets: CalibrationTargets::default(),
        })
    }
}

fn trapezoid(values: &[Complex], dt: f64) -> Complex {
    match values {
        [] | [_] => Complex::ZERO,
        [first, .., last] => {
            let interior = values[1..values.len() - 1]
                .iter()
                .fold(Complex::ZERO, |acc, &v| acc + v);
            (interior + (*first + *last) * 0.5) * dt
        }
    }
}

impl Model for RoughHeston {
    fn name(&self) -> &'static str {
        "RoughHeston"
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        PARAMETER_NAMES
    }

    fn parameter_vector(&self) -> Vec<f64> {
        vec![
            self.lambda,
            self.gamma,
            self.theta,
            self.v0,
            self.rho,
            self.alpha,
        ]
    }

    fn set_parameter_vector(&mut self, values: &[f64]) -> Result<(), ModelError> {
        let updated = self.with_parameters(fixed_vector(values)?)?;
        *self = Self {
            call_targets: std::mem::take(&mut self.call_targets),
            ..updated
        };
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

impl EquityModel for RoughHeston {
    fn price_call(&self, call: &EuropeanCall) -> Result<f64, PricingError> {
        let terms = call.terms();
        let weights = self.adams_weights(terms.expiry())?;
        fourier_call_price(terms, &self.config.fourier, |u| {
            self.characteristic_function(terms, &weights, u)
        })
    }
}
