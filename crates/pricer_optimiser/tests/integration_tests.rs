//! Integration tests for differential evolution calibration.
//!
//! These tests exercise the calibrator end to end against synthetic error
//! surfaces and against real models carrying market quotes.

use std::ops::ControlFlow;

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use pricer_core::math::random::PricerRng;
use pricer_models::calibration::{CalibrationTargets, Quote};
use pricer_models::instruments::{EuropeanCall, EuropeanCaplet, OptionTerms, PathIndependentOption};
use pricer_models::models::{Bachelier, BlackScholes, Model, ModelError};
use pricer_optimiser::calibration::{Calibrator, DifferentialEvolution, DifferentialEvolutionConfig};
use pricer_optimiser::OptimiserError;

// ============================================================================
// Synthetic models
// ============================================================================

/// Convex quadratic with a known minimum.
#[derive(Debug)]
struct Quadratic {
    minimum: [f64; 3],
}

impl Model for Quadratic {
    fn name(&self) -> &'static str {
        "Quadratic"
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["a", "b", "c"]
    }

    fn parameter_vector(&self) -> Vec<f64> {
        self.minimum.to_vec()
    }

    fn set_parameter_vector(&mut self, _values: &[f64]) -> Result<(), ModelError> {
        Ok(())
    }

    fn calibration_error(&self, candidate: &[f64]) -> f64 {
        candidate
            .iter()
            .zip(&self.minimum)
            .enumerate()
            .map(|(i, (x, m))| (i + 1) as f64 * (x - m).powi(2))
            .sum()
    }
}

/// Error function that is zero everywhere.
#[derive(Debug)]
struct Flat;

impl Model for Flat {
    fn name(&self) -> &'static str {
        "Flat"
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["p", "q"]
    }

    fn parameter_vector(&self) -> Vec<f64> {
        vec![0.0, 0.0]
    }

    fn set_parameter_vector(&mut self, _values: &[f64]) -> Result<(), ModelError> {
        Ok(())
    }

    fn calibration_error(&self, _candidate: &[f64]) -> f64 {
        0.0
    }
}

/// Model without parameters.
#[derive(Debug)]
struct Empty;

impl Model for Empty {
    fn name(&self) -> &'static str {
        "Empty"
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &[]
    }

    fn parameter_vector(&self) -> Vec<f64> {
        Vec::new()
    }

    fn set_parameter_vector(&mut self, _values: &[f64]) -> Result<(), ModelError> {
        Ok(())
    }

    fn calibration_error(&self, _candidate: &[f64]) -> f64 {
        0.0
    }
}

/// NaN for negative first coordinate, quadratic otherwise.
#[derive(Debug)]
struct PartlyUndefined;

impl Model for PartlyUndefined {
    fn name(&self) -> &'static str {
        "PartlyUndefined"
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["x"]
    }

    fn parameter_vector(&self) -> Vec<f64> {
        vec![1.0]
    }

    fn set_parameter_vector(&mut self, _values: &[f64]) -> Result<(), ModelError> {
        Ok(())
    }

    fn calibration_error(&self, candidate: &[f64]) -> f64 {
        if candidate[0] < 0.0 {
            f64::NAN
        } else {
            (candidate[0] - 0.7).powi(2)
        }
    }
}

// ============================================================================
// Algorithm properties
// ============================================================================

#[test]
fn test_quadratic_minimum_is_found() {
    let model = Quadratic {
        minimum: [0.5, -1.2, 2.0],
    };
    for seed in [1, 2, 3] {
        let config = DifferentialEvolutionConfig::default().with_max_evaluations(30_000);
        let best = DifferentialEvolution::new(&model, PricerRng::from_seed(seed))
            .with_config(config)
            .calibrate()
            .unwrap();
        for (x, m) in best.iter().zip(&model.minimum) {
            assert_abs_diff_eq!(*x, *m, epsilon = 1e-4);
        }
    }
}

#[test]
fn test_constant_zero_returns_first_initial_member() {
    let seed = 11;
    let config = DifferentialEvolutionConfig::default().with_max_evaluations(200);
    let report = DifferentialEvolution::new(&Flat, PricerRng::from_seed(seed))
        .with_config(config)
        .calibrate_with_report()
        .unwrap();

    let initial = PricerRng::from_seed(seed).gaussian_matrix(20, 2);
    assert_eq!(report.best, initial[0]);
    assert_eq!(report.best_error, 0.0);
    assert_eq!(report.history.len(), 220);
    for (recorded, sampled) in report.history.iter().zip(&initial) {
        assert_eq!(&recorded.candidate, sampled);
    }
}

#[test]
fn test_empty_parameter_space_rejected() {
    let result = DifferentialEvolution::new(&Empty, PricerRng::from_seed(0)).calibrate();
    assert_eq!(result, Err(OptimiserError::EmptyParameterSpace));
}

#[test]
fn test_zero_budget_rejected() {
    let config = DifferentialEvolutionConfig::default().with_max_evaluations(0);
    let result = DifferentialEvolution::new(&Flat, PricerRng::from_seed(0))
        .with_config(config)
        .calibrate();
    assert!(matches!(
        result,
        Err(OptimiserError::InvalidConfig {
            field: "max_evaluations",
            ..
        })
    ));
}

#[test]
fn test_same_seed_same_result() {
    let model = Quadratic {
        minimum: [0.1, 0.2, 0.3],
    };
    let config = DifferentialEvolutionConfig::default().with_max_evaluations(3_000);
    let run = |seed| {
        DifferentialEvolution::new(&model, PricerRng::from_seed(seed))
            .with_config(config)
            .calibrate_with_report()
            .unwrap()
    };
    let first = run(42);
    let second = run(42);
    assert_eq!(first, second);

    let other = run(43);
    assert_ne!(first.history, other.history);
}

#[test]
fn test_non_finite_errors_never_win() {
    let config = DifferentialEvolutionConfig::default().with_max_evaluations(2_000);
    let report = DifferentialEvolution::new(&PartlyUndefined, PricerRng::from_seed(8))
        .with_config(config)
        .calibrate_with_report()
        .unwrap();
    assert!(report.best_error.is_finite());
    assert!(report
        .history
        .iter()
        .all(|e| !e.error.is_nan()));
    assert_abs_diff_eq!(report.best[0], 0.7, epsilon = 1e-4);
}

#[test]
fn test_trait_object_model() {
    let model: Box<dyn Model> = Box::new(Quadratic {
        minimum: [1.0, 1.0, 1.0],
    });
    let config = DifferentialEvolutionConfig::default().with_max_evaluations(300);
    let report = DifferentialEvolution::new(model.as_ref(), PricerRng::from_seed(4))
        .with_config(config)
        .calibrate_with_report()
        .unwrap();
    assert_eq!(report.best.len(), 3);
    assert_eq!(report.generations, 10);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_history_covers_initial_population_and_every_generation(
        seed in any::<u64>(),
        crossover_rate in 0.0..=1.0_f64,
        mutation_factor in -1.0..2.0_f64,
        max_evaluations in 1usize..600,
    ) {
        let model = Quadratic { minimum: [0.5, -1.2, 2.0] };
        let config = DifferentialEvolutionConfig::default()
            .with_crossover_rate(crossover_rate)
            .with_mutation_factor(mutation_factor)
            .with_max_evaluations(max_evaluations);
        let np = config.population_size(3);
        let report = DifferentialEvolution::new(&model, PricerRng::from_seed(seed))
            .with_config(config)
            .calibrate_with_report()
            .unwrap();

        prop_assert_eq!(report.history.len(), np + report.evaluations);
        prop_assert_eq!(report.evaluations, report.generations * np);
        prop_assert!(report.evaluations >= max_evaluations);
        prop_assert!(report.evaluations < max_evaluations + np);
        prop_assert!(!report.stopped_early);
    }

    #[test]
    fn prop_best_error_never_increases(
        seed in any::<u64>(),
        crossover_rate in 0.0..=1.0_f64,
        mutation_factor in 0.1..1.5_f64,
    ) {
        let model = Quadratic { minimum: [0.1, 0.2, 0.3] };
        let config = DifferentialEvolutionConfig::default()
            .with_crossover_rate(crossover_rate)
            .with_mutation_factor(mutation_factor)
            .with_max_evaluations(900);
        let mut best_errors = Vec::new();
        let report = DifferentialEvolution::new(&model, PricerRng::from_seed(seed))
            .with_config(config)
            .calibrate_with_observer(|summary| {
                best_errors.push(summary.best_error);
                ControlFlow::Continue(())
            })
            .unwrap();

        prop_assert_eq!(best_errors.len(), report.generations);
        for pair in best_errors.windows(2) {
            prop_assert!(pair[1] <= pair[0]);
        }

        let history_min = report
            .history
            .iter()
            .map(|e| e.error)
            .fold(f64::INFINITY, f64::min);
        prop_assert_eq!(report.best_error, history_min);
        prop_assert_eq!(best_errors.last().copied(), Some(report.best_error));
    }
}

// ============================================================================
// Calibration against market quotes
// ============================================================================

#[test]
fn test_black_scholes_sigma_recovery() {
    let call = EuropeanCall::default();
    let market_price = call.price(&BlackScholes::new(0.3).unwrap()).unwrap();
    let mut model = BlackScholes::default()
        .with_call_targets(CalibrationTargets::new().with_quote(Quote::new(call, market_price)));

    let config = DifferentialEvolutionConfig::default().with_max_evaluations(2_000);
    let best = DifferentialEvolution::new(&model, PricerRng::from_seed(2024))
        .with_config(config)
        .calibrate()
        .unwrap();
    assert_abs_diff_eq!(best[0], 0.3, epsilon = 1e-4);

    model.set_parameter_vector(&best).unwrap();
    assert_abs_diff_eq!(call.price(&model).unwrap(), market_price, epsilon = 1e-4);
}

#[test]
fn test_bachelier_recovery_from_caplet_strip() {
    let truth = Bachelier::new(0.012).unwrap();
    let targets: CalibrationTargets<EuropeanCaplet> = [0.02, 0.025, 0.03, 0.035]
        .into_iter()
        .map(|strike| {
            let caplet =
                EuropeanCaplet::from_terms(OptionTerms::new(1.0, strike, 0.028, 0.01, 2.0).unwrap());
            Quote::new(caplet, caplet.price(&truth).unwrap())
        })
        .collect();
    let model = Bachelier::default().with_caplet_targets(targets);

    let config = DifferentialEvolutionConfig::default()
        .with_max_evaluations(5_000)
        .with_tolerance(1e-20);
    let report = DifferentialEvolution::new(&model, PricerRng::from_seed(17))
        .with_config(config)
        .calibrate_with_report()
        .unwrap();
    assert_abs_diff_eq!(report.best[0], 0.012, epsilon = 1e-6);
}
