//! Named model parameters.
//!
//! A [`ParameterSet`] is the name → value view of a model's parameters. It is
//! what [`Model::parameters`](super::Model::parameters) returns and what
//! [`Model::set_parameters`](super::Model::set_parameters) consumes. Keys are
//! unique and kept sorted, so iteration order does not depend on insertion
//! order.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::ModelError;

/// Mapping from parameter name to value.
///
/// # Examples
/// ```
/// use pricer_models::models::ParameterSet;
///
/// let params = ParameterSet::new().with("kappa", 1.5).with("theta", 0.04);
/// assert_eq!(params.get("kappa"), Some(1.5));
/// assert_eq!(params.names().collect::<Vec<_>>(), vec!["kappa", "theta"]);
///
/// let ordered = params.ordered_values(&["theta", "kappa"]).unwrap();
/// assert_eq!(ordered, vec![0.04, 1.5]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct ParameterSet {
    values: BTreeMap<String, f64>,
}

impl ParameterSet {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a parameter set from names in `order` paired with `values`.
    ///
    /// # Errors
    /// [`ModelError::DimensionMismatch`] if the lengths differ.
    pub fn from_vector(order: &[&str], values: &[f64]) -> Result<Self, ModelError> {
        if order.len() != values.len() {
            return Err(ModelError::DimensionMismatch {
                expected: order.len(),
                actual: values.len(),
            });
        }
        Ok(order.iter().copied().zip(values.iter().copied()).collect())
    }

    /// Returns the set with `name` set to `value`.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets `name` to `value`, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(name.into(), value)
    }

    /// Removes `name`, returning its value if present.
    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.values.remove(name)
    }

    /// Value of `name`, if present.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Returns `true` if `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parameter names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// `(name, value)` pairs in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Checks that the key set equals `expected` exactly.
    ///
    /// # Errors
    /// [`ModelError::ParameterMismatch`] naming every missing and every
    /// unexpected key.
    pub fn check_keys(&self, expected: &[&str]) -> Result<(), ModelError> {
        let missing: Vec<String> = expected
            .iter()
            .filter(|name| !self.contains(name))
            .map(|name| name.to_string())
            .collect();
        let unexpected: Vec<String> = self
            .names()
            .filter(|name| !expected.contains(name))
            .map(str::to_string)
            .collect();

        if missing.is_empty() && unexpected.is_empty() {
            Ok(())
        } else {
            Err(ModelError::ParameterMismatch {
                missing,
                unexpected,
            })
        }
    }

    /// Values in the given `order` after an exact key check.
    ///
    /// # Errors
    /// [`ModelError::ParameterMismatch`] if the key sets differ.
    pub fn ordered_values(&self, order: &[&str]) -> Result<Vec<f64>, ModelError> {
        self.check_keys(order)?;
        Ok(order
            .iter()
            .filter_map(|name| self.get(name))
            .collect())
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Converts a slice into a fixed-size array of model parameters.
///
/// # Errors
/// [`ModelError::DimensionMismatch`] if `values.len() != N`.
pub(crate) fn fixed_vector<const N: usize>(values: &[f64]) -> Result<[f64; N], ModelError> {
    <[f64; N]>::try_from(values).map_err(|_| ModelError::DimensionMismatch {
        expected: N,
        actual: values.len(),
    })
}
