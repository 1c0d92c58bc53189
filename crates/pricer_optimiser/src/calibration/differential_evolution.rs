//! Differential evolution over a model's parameter vector.
//!
//! ## Algorithm
//!
//! With `D` the model dimension and `NP = population_multiplier · D`:
//!
//! 1. Draw `NP` candidates of dimension `D` from the standard normal
//!    distribution and score each with [`Model::calibration_error`].
//! 2. Each generation, for every member `i`:
//!    - draw indices `a, b, c` uniformly from the population (they may
//!      coincide with each other and with `i`) and a forced dimension `R`
//!    - build the trial coordinate-wise: `a[j] + F·(b[j] - c[j])` when a
//!      fresh uniform is `≤ CR` or `j == R`, otherwise the member's own value
//!    - replace member `i` immediately if the trial error is strictly lower
//! 3. Advance the evaluation counter by `NP` and stop once it reaches the
//!    budget.
//!
//! Every evaluated candidate is recorded, and the result is the lowest-error
//! vector over that whole history, first occurrence winning ties.

use std::ops::ControlFlow;

use pricer_core::math::random::PricerRng;
use pricer_models::models::Model;
use tracing::{debug, info, trace};

use super::config::DifferentialEvolutionConfig;
use super::report::{CalibrationReport, Evaluation, GenerationSummary};
use crate::OptimiserError;

/// Fits a parameter vector.
pub trait Calibrator {
    /// Returns the best parameter vector found, in the model's canonical order.
    ///
    /// # Errors
    /// [`OptimiserError`] if the run cannot start.
    fn calibrate(&mut self) -> Result<Vec<f64>, OptimiserError>;
}

/// Differential evolution calibrator bound to one model.
///
/// The model is borrowed immutably: calibration only scores candidates and
/// never changes the model's parameters. Apply the result with
/// [`Model::set_parameter_vector`].
///
/// # Examples
///
/// ```
/// use pricer_core::math::random::PricerRng;
/// use pricer_models::models::{BlackScholes, Model};
/// use pricer_optimiser::calibration::{
///     Calibrator, DifferentialEvolution, DifferentialEvolutionConfig,
/// };
///
/// // Without calibration targets every candidate scores zero, so the first
/// // member of the initial population is returned.
/// let model = BlackScholes::default();
/// let config = DifferentialEvolutionConfig::default().with_max_evaluations(100);
/// let mut calibrator =
///     DifferentialEvolution::new(&model, PricerRng::from_seed(7)).with_config(config);
/// let report = calibrator.calibrate_with_report().unwrap();
///
/// assert_eq!(report.best_error, 0.0);
/// assert_eq!(report.best, report.history[0].candidate);
/// assert_eq!(report.evaluations, 100);
/// ```
#[derive(Debug)]
pub struct DifferentialEvolution<'m, M: Model + ?Sized> {
    model: &'m M,
    config: DifferentialEvolutionConfig,
    rng: PricerRng,
}

impl<'m, M: Model + ?Sized> DifferentialEvolution<'m, M> {
    /// Creates a calibrator with the default configuration.
    pub fn new(model: &'m M, rng: PricerRng) -> Self {
        Self {
            model,
            config: DifferentialEvolutionConfig::default(),
            rng,
        }
    }

    /// Replaces the configuration. Validation happens when a run starts.
    pub fn with_config(mut self, config: DifferentialEvolutionConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &DifferentialEvolutionConfig {
        &self.config
    }

    /// Model being calibrated.
    pub fn model(&self) -> &M {
        self.model
    }

    /// Runs the full budget and returns the detailed report.
    ///
    /// # Errors
    /// - [`OptimiserError::EmptyParameterSpace`] for a model without parameters
    /// - [`OptimiserError::InvalidConfig`] for an invalid configuration
    pub fn calibrate_with_report(&mut self) -> Result<CalibrationReport, OptimiserError> {
        self.calibrate_with_observer(|_| ControlFlow::Continue(()))
    }

    /// Runs the calibration, consulting `observer` after every generation.
    ///
    /// Returning [`ControlFlow::Break`] from the observer ends the run after
    /// the current generation, which is how callers impose deadlines or
    /// cancellation.
    ///
    /// # Errors
    /// - [`OptimiserError::EmptyParameterSpace`] for a model without parameters
    /// - [`OptimiserError::InvalidConfig`] for an invalid configuration
    pub fn calibrate_with_observer<F>(
        &mut self,
        mut observer: F,
    ) -> Result<CalibrationReport, OptimiserError>
    where
        F: FnMut(&GenerationSummary) -> ControlFlow<()>,
    {
        let dimension = self.model.dimension();
        if dimension == 0 {
            return Err(OptimiserError::EmptyParameterSpace);
        }
        self.config.validate()?;

        let config = self.config;
        let np = config.population_size(dimension);
        info!(
            model = self.model.name(),
            dimension,
            population = np,
            max_evaluations = config.max_evaluations,
            seed = self.rng.seed(),
            "Starting differential evolution"
        );

        let mut history = History::default();
        let mut population = self.rng.gaussian_matrix(np, dimension);
        let mut errors = Vec::with_capacity(np);
        for member in &population {
            let error = self.score(member);
            errors.push(error);
            history.record(member.clone(), error);
        }

        let mut evaluations = 0;
        let mut generations = 0;
        let mut stopped_early = false;
        while evaluations < config.max_evaluations {
            if config
                .tolerance
                .is_some_and(|tolerance| history.best_error() <= tolerance)
            {
                stopped_early = true;
                break;
            }

            let mut accepted = 0;
            for i in 0..np {
                let trial = self.trial(&population, i, &config);
                let error = self.score(&trial);
                if error < errors[i] {
                    population[i].clone_from(&trial);
                    errors[i] = error;
                    accepted += 1;
                }
                history.record(trial, error);
            }

            evaluations += np;
            generations += 1;
            let summary = GenerationSummary {
                generation: generations,
                evaluations,
                accepted,
                best_error: history.best_error(),
            };
            trace!(
                generation = summary.generation,
                evaluations = summary.evaluations,
                accepted = summary.accepted,
                best_error = summary.best_error,
                "Generation complete"
            );
            if observer(&summary).is_break() {
                stopped_early = evaluations < config.max_evaluations;
                break;
            }
        }

        let report = history.into_report(evaluations, generations, stopped_early);
        info!(
            model = self.model.name(),
            best_error = report.best_error,
            evaluations = report.evaluations,
            generations = report.generations,
            stopped_early = report.stopped_early,
            "Differential evolution finished"
        );
        Ok(report)
    }

    fn trial(
        &mut self,
        population: &[Vec<f64>],
        i: usize,
        config: &DifferentialEvolutionConfig,
    ) -> Vec<f64> {
        let np = population.len();
        let a = &population[self.rng.uniform_index(np)];
        let b = &population[self.rng.uniform_index(np)];
        let c = &population[self.rng.uniform_index(np)];
        let member = &population[i];
        let forced = self.rng.uniform_index(member.len());

        (0..member.len())
            .map(|j| {
                if self.rng.uniform() <= config.crossover_rate || j == forced {
                    a[j] + config.mutation_factor * (b[j] - c[j])
                } else {
                    member[j]
                }
            })
            .collect()
    }

    /// Calibration error with non-finite values mapped to `+∞`.
    fn score(&self, candidate: &[f64]) -> f64 {
        let error = self.model.calibration_error(candidate);
        if error.is_finite() {
            error
        } else {
            f64::INFINITY
        }
    }
}

impl<M: Model + ?Sized> Calibrator for DifferentialEvolution<'_, M> {
    fn calibrate(&mut self) -> Result<Vec<f64>, OptimiserError> {
        self.calibrate_with_report().map(|report| report.best)
    }
}

#[derive(Default)]
struct History {
    evaluations: Vec<Evaluation>,
    best: usize,
}

impl History {
    fn record(&mut self, candidate: Vec<f64>, error: f64) {
        if !self.evaluations.is_empty() && error < self.best_error() {
            self.best = self.evaluations.len();
            debug!(error, candidate = ?candidate, "New best candidate");
        }
        self.evaluations.push(Evaluation { candidate, error });
    }

    fn best_error(&self) -> f64 {
        self.evaluations
            .get(self.best)
            .map_or(f64::INFINITY, |best| best.error)
    }

    fn into_report(
        self,
        evaluations: usize,
        generations: usize,
        stopped_early: bool,
    ) -> CalibrationReport {
        let best = &self.evaluations[self.best];
        CalibrationReport {
            best: best.candidate.clone(),
            best_error: best.error,
            evaluations,
            generations,
            stopped_early,
            history: self.evaluations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_models::models::ModelError;

    /// Sum of squared distances to `(1, -2)`.
    #[derive(Debug)]
    struct Bowl;

    impl Model for Bowl {
        fn name(&self) -> &'static str {
            "Bowl"
        }

        fn parameter_names(&self) -> &'static [&'static str] {
            &["x", "y"]
        }

        fn parameter_vector(&self) -> Vec<f64> {
            vec![0.0, 0.0]
        }

        fn set_parameter_vector(&mut self, _values: &[f64]) -> Result<(), ModelError> {
            Ok(())
        }

        fn calibration_error(&self, candidate: &[f64]) -> f64 {
            (candidate[0] - 1.0).powi(2) + (candidate[1] + 2.0).powi(2)
        }
    }

    fn short_run() -> DifferentialEvolutionConfig {
        DifferentialEvolutionConfig::default().with_max_evaluations(1_000)
    }

    #[test]
    fn test_budget_and_history_size() {
        let mut de = DifferentialEvolution::new(&Bowl, PricerRng::from_seed(1)).with_config(short_run());
        let report = de.calibrate_with_report().unwrap();
        // NP = 20: 50 generations, plus the initial population in the history
        assert_eq!(report.generations, 50);
        assert_eq!(report.evaluations, 1_000);
        assert_eq!(report.function_calls(), 1_020);
        assert!(!report.stopped_early);
    }

    #[test]
    fn test_budget_not_multiple_of_population() {
        let config = DifferentialEvolutionConfig::default().with_max_evaluations(45);
        let mut de = DifferentialEvolution::new(&Bowl, PricerRng::from_seed(1)).with_config(config);
        let report = de.calibrate_with_report().unwrap();
        assert_eq!(report.generations, 3);
        assert_eq!(report.evaluations, 60);
    }

    #[test]
    fn test_best_is_minimum_of_history() {
        let mut de = DifferentialEvolution::new(&Bowl, PricerRng::from_seed(3)).with_config(short_run());
        let report = de.calibrate_with_report().unwrap();
        let minimum = report
            .history
            .iter()
            .map(|e| e.error)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(report.best_error, minimum);
        let first = report
            .history
            .iter()
            .find(|e| e.error == minimum)
            .unwrap();
        assert_eq!(report.best, first.candidate);
    }

    #[test]
    fn test_observer_can_stop_the_run() {
        let mut de = DifferentialEvolution::new(&Bowl, PricerRng::from_seed(5)).with_config(short_run());
        let mut seen = Vec::new();
        let report = de
            .calibrate_with_observer(|summary| {
                seen.push(summary.generation);
                if summary.generation == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();
        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(report.generations, 3);
        assert!(report.stopped_early);
    }

    #[test]
    fn test_tolerance_stops_early() {
        let config = DifferentialEvolutionConfig::default().with_tolerance(1e-6);
        let mut de = DifferentialEvolution::new(&Bowl, PricerRng::from_seed(9)).with_config(config);
        let report = de.calibrate_with_report().unwrap();
        assert!(report.stopped_early);
        assert!(report.best_error <= 1e-6);
        assert!(report.evaluations < 100_000);
    }

    #[test]
    fn test_invalid_config_rejected_before_sampling() {
        let config = DifferentialEvolutionConfig::default().with_crossover_rate(2.0);
        let mut de = DifferentialEvolution::new(&Bowl, PricerRng::from_seed(1)).with_config(config);
        assert!(matches!(
            de.calibrate(),
            Err(OptimiserError::InvalidConfig {
                field: "crossover_rate",
                ..
            })
        ));
    }
}
