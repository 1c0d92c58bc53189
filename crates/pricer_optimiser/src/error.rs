//! Calibration error types.
//!
//! Every variant is raised before the optimisation loop starts; a running
//! calibration always completes its evaluation budget.

use thiserror::Error;

/// Errors that prevent a calibration from starting.
///
/// # Variants
///
/// - `EmptyParameterSpace`: The model has no parameters to calibrate
/// - `InvalidConfig`: A configuration value is outside its admissible range
///
/// # Examples
///
/// ```
/// use pricer_optimiser::OptimiserError;
///
/// let err = OptimiserError::invalid_config("crossover_rate", 1.5, "must lie in [0, 1]");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid calibrator configuration: crossover_rate = 1.5 (must lie in [0, 1])"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimiserError {
    /// The model exposes zero parameters.
    #[error("Cannot calibrate a model with no parameters")]
    EmptyParameterSpace,

    /// A configuration value is outside its admissible range.
    #[error("Invalid calibrator configuration: {field} = {value} ({reason})")]
    InvalidConfig {
        /// Configuration field name
        field: &'static str,
        /// Supplied value
        value: f64,
        /// Human-readable constraint
        reason: &'static str,
    },
}

impl OptimiserError {
    /// Create an invalid configuration error.
    pub fn invalid_config(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidConfig {
            field,
            value,
            reason,
        }
    }
}
