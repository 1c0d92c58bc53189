//! Differential evolution configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::OptimiserError;

/// Configuration for differential evolution.
///
/// The defaults run a fixed evaluation budget with no early stopping.
///
/// # Examples
///
/// ```
/// use pricer_optimiser::calibration::DifferentialEvolutionConfig;
///
/// let config = DifferentialEvolutionConfig::default();
/// assert_eq!(config.crossover_rate, 0.4);
/// assert_eq!(config.mutation_factor, 0.5);
/// assert_eq!(config.max_evaluations, 100_000);
/// assert_eq!(config.population_size(3), 30);
///
/// let config = DifferentialEvolutionConfig::default()
///     .with_max_evaluations(5_000)
///     .with_tolerance(1e-12);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct DifferentialEvolutionConfig {
    /// Probability `CR` of taking a mutated coordinate.
    ///
    /// Must lie in [0, 1]. Default: 0.4
    pub crossover_rate: f64,

    /// Differential weight `F` applied to `b - c`.
    ///
    /// Must be finite. Default: 0.5
    pub mutation_factor: f64,

    /// Evaluation budget `MAXITER`.
    ///
    /// The counter advances by the population size per generation and the
    /// run stops once it reaches this value. Default: 100 000
    pub max_evaluations: usize,

    /// Population size per parameter, `NP = population_multiplier · D`.
    ///
    /// Default: 10
    pub population_multiplier: usize,

    /// Optional early stop once the best error is at or below this value.
    ///
    /// Default: `None` (fixed budget)
    pub tolerance: Option<f64>,
}

impl Default for DifferentialEvolutionConfig {
    fn default() -> Self {
        Self {
            crossover_rate: 0.4,
            mutation_factor: 0.5,
            max_evaluations: 100_000,
            population_multiplier: 10,
            tolerance: None,
        }
    }
}

impl DifferentialEvolutionConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the crossover rate.
    pub fn with_crossover_rate(mut self, crossover_rate: f64) -> Self {
        self.crossover_rate = crossover_rate;
        self
    }

    /// Set the mutation factor.
    pub fn with_mutation_factor(mut self, mutation_factor: f64) -> Self {
        self.mutation_factor = mutation_factor;
        self
    }

    /// Set the evaluation budget.
    pub fn with_max_evaluations(mut self, max_evaluations: usize) -> Self {
        self.max_evaluations = max_evaluations;
        self
    }

    /// Set the population size per parameter.
    pub fn with_population_multiplier(mut self, population_multiplier: usize) -> Self {
        self.population_multiplier = population_multiplier;
        self
    }

    /// Enable early stopping at the given error level.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Population size for a model of `dimension` parameters.
    #[inline]
    pub fn population_size(&self, dimension: usize) -> usize {
        self.population_multiplier * dimension
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// [`OptimiserError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), OptimiserError> {
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(OptimiserError::invalid_config(
                "crossover_rate",
                self.crossover_rate,
                "must lie in [0, 1]",
            ));
        }
        if !self.mutation_factor.is_finite() {
            return Err(OptimiserError::invalid_config(
                "mutation_factor",
                self.mutation_factor,
                "must be finite",
            ));
        }
        if self.max_evaluations == 0 {
            return Err(OptimiserError::invalid_config(
                "max_evaluations",
                0.0,
                "must be positive",
            ));
        }
        if self.population_multiplier == 0 {
            return Err(OptimiserError::invalid_config(
                "population_multiplier",
                0.0,
                "must be positive",
            ));
        }
        if let Some(tolerance) = self.tolerance {
            if tolerance.is_nan() || tolerance < 0.0 {
                return Err(OptimiserError::invalid_config(
                    "tolerance",
                    tolerance,
                    "must be non-negative",
                ));
            }
        }
        Ok(())
    }
}
