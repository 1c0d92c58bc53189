//! Error types for model parameter handling.
//!
//! This module provides:
//! - `ModelError`: Rejected parameter updates and invalid parameter values

use pricer_core::types::PricingError;
use thiserror::Error;

/// Model parameter errors.
///
/// Every variant is raised before any state is changed, so a model that
/// returns one of these still holds its previous parameters.
///
/// # Variants
/// - `ParameterMismatch`: Update key set differs from the model's key set
/// - `InvalidParameter`: A value violates the model's constraints
/// - `DimensionMismatch`: A parameter vector has the wrong length
///
/// # Examples
/// ```
/// use pricer_models::models::ModelError;
///
/// let err = ModelError::ParameterMismatch {
///     missing: vec!["sigma".to_string()],
///     unexpected: vec!["vol".to_string()],
/// };
/// assert_eq!(
///     format!("{}", err),
///     "Parameter key mismatch: missing [sigma], unexpected [vol]"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Update key set does not equal the model's key set.
    #[error(
        "Parameter key mismatch: missing [{}], unexpected [{}]",
        .missing.join(", "),
        .unexpected.join(", ")
    )]
    ParameterMismatch {
        /// Keys the model expects but the update lacks
        missing: Vec<String>,
        /// Keys the update carries but the model does not know
        unexpected: Vec<String>,
    },

    /// Parameter value outside its admissible range.
    #[error("Invalid parameter: {name} = {value} ({constraint})")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// Supplied value
        value: f64,
        /// Human-readable constraint
        constraint: String,
    },

    /// Parameter vector length differs from the model dimension.
    #[error("Parameter vector has length {actual}, expected {expected}")]
    DimensionMismatch {
        /// Model dimension
        expected: usize,
        /// Supplied length
        actual: usize,
    },
}

impl ModelError {
    /// Builds a [`ModelError::InvalidParameter`] from its parts.
    pub fn invalid(name: &str, value: f64, constraint: &str) -> Self {
        ModelError::InvalidParameter {
            name: name.to_string(),
            value,
            constraint: constraint.to_string(),
        }
    }
}

impl From<ModelError> for PricingError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::InvalidParameter {
                name,
                value,
                constraint,
            } => PricingError::Domain {
                parameter: name,
                value,
                constraint,
            },
            other => PricingError::Configuration(other.to_string()),
        }
    }
}

/// Checks `value > 0` (NaN fails).
pub(crate) fn require_positive(name: &str, value: f64) -> Result<(), ModelError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ModelError::invalid(name, value, "must be positive and finite"))
    }
}

/// Checks `value ≥ 0` (NaN fails).
pub(crate) fn require_non_negative(name: &str, value: f64) -> Result<(), ModelError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ModelError::invalid(name, value, "must be non-negative and finite"))
    }
}

/// Checks `lower ≤ value ≤ upper` (NaN fails).
pub(crate) fn require_in_range(
    name: &str,
    value: f64,
    lower: f64,
    upper: f64,
) -> Result<(), ModelError> {
    if (lower..=upper).contains(&value) {
        Ok(())
    } else {
        Err(ModelError::invalid(
            name,
            value,
            &format!("must lie in [{}, {}]", lower, upper),
        ))
    }
}
