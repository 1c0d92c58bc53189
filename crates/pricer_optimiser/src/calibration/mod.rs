//! Model calibration.
//!
//! This module provides:
//! - [`DifferentialEvolution`]: population-based global search over a model's
//!   parameter vector, scored by [`Model::calibration_error`](pricer_models::models::Model::calibration_error)
//! - [`Calibrator`]: the `calibrate()` entry point
//! - [`DifferentialEvolutionConfig`]: population, crossover, mutation, and budget settings
//! - [`CalibrationReport`]: best vector, full evaluation history, and run statistics
//!
//! The random generator is passed in explicitly, so a run is reproducible
//! from its seed and independent runs use independent streams.

mod config;
mod differential_evolution;
mod report;

pub use config::DifferentialEvolutionConfig;
pub use differential_evolution::{Calibrator, DifferentialEvolution};
pub use report::{CalibrationReport, Evaluation, GenerationSummary};
