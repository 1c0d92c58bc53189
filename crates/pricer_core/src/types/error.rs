//! Error types for structured error handling.
//!
//! This module provides:
//! - `MathError`: Domain violations raised by the numeric kernel
//! - `PricingError`: Errors from pricing operations

use thiserror::Error;

/// Domain errors raised by the numeric kernel.
///
/// Each variant identifies the mathematical precondition that was violated.
/// The kernel never returns NaN or infinity in place of one of these.
///
/// # Examples
/// ```
/// use pricer_core::types::MathError;
///
/// let err = MathError::GammaDomain { z: -1.0 };
/// assert_eq!(format!("{}", err), "Gamma function undefined for z = -1 (requires z > 0)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MathError {
    /// Division by a complex (or real) number with zero magnitude.
    #[error("Division by zero-magnitude value")]
    DivisionByZero,

    /// Logarithm (or a power defined through it) evaluated at zero.
    #[error("Logarithm of zero is undefined")]
    LogOfZero,

    /// Gamma function evaluated outside its supported domain.
    #[error("Gamma function undefined for z = {z} (requires z > 0)")]
    GammaDomain {
        /// Offending argument
        z: f64,
    },

    /// Gamma function value exceeds the `f64` range.
    #[error("Gamma function overflows for z = {z}")]
    GammaOverflow {
        /// Offending argument
        z: f64,
    },

    /// Gaussian density requested with a non-positive standard deviation.
    #[error("Invalid standard deviation: sigma = {sigma} (must be positive)")]
    InvalidStandardDeviation {
        /// Offending standard deviation
        sigma: f64,
    },
}

/// Categorised pricing errors.
///
/// # Variants
/// - `Domain`: An input violates a mathematical precondition (σ ≤ 0, T ≤ 0, ...)
/// - `Math`: A kernel operation failed (complex division, logarithm, Gamma)
/// - `NumericalInstability`: Computation produced a non-finite result
/// - `NotImplemented`: The contract or model has no working pricer
/// - `Configuration`: A tuning parameter (grid size, bound) is unusable
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::domain("expiry", 0.0, "must be positive");
/// assert_eq!(format!("{}", err), "Domain error: expiry = 0 (must be positive)");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Mathematically undefined input
    #[error("Domain error: {parameter} = {value} ({constraint})")]
    Domain {
        /// Name of the violated input
        parameter: String,
        /// Supplied value
        value: f64,
        /// Human-readable constraint
        constraint: String,
    },

    /// Numeric kernel failure
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Numerical instability during computation
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// Pricer not implemented for this contract or model
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Invalid numerical configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PricingError {
    /// Builds a [`PricingError::Domain`] from its parts.
    pub fn domain(parameter: impl Into<String>, value: f64, constraint: impl Into<String>) -> Self {
        PricingError::Domain {
            parameter: parameter.into(),
            value,
            constraint: constraint.into(),
        }
    }

    /// Returns `Ok(value)` if `value` is finite, otherwise a
    /// [`PricingError::NumericalInstability`] mentioning `context`.
    pub fn ensure_finite(value: f64, context: &str) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(PricingError::NumericalInstability(format!(
                "{} produced non-finite value {}",
                context, value
            )))
        }
    }
}
