//! Calibration run results.

/// One evaluated candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Parameter vector in the model's canonical order.
    pub candidate: Vec<f64>,
    /// Calibration error; non-finite model errors are recorded as `f64::INFINITY`.
    pub error: f64,
}

/// Progress after one generation, passed to calibration observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSummary {
    /// Generation number, starting at 1.
    pub generation: usize,
    /// Evaluation counter after this generation.
    pub evaluations: usize,
    /// Trials accepted into the population during this generation.
    pub accepted: usize,
    /// Lowest error seen so far, including the initial population.
    pub best_error: f64,
}

/// Outcome of a calibration run.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationReport {
    /// Lowest-error vector over the whole history (first occurrence on ties).
    pub best: Vec<f64>,
    /// Error of `best`.
    pub best_error: f64,
    /// Evaluation counter at termination (generations × population size).
    pub evaluations: usize,
    /// Generations completed.
    pub generations: usize,
    /// Every evaluated candidate in evaluation order, initial population first.
    pub history: Vec<Evaluation>,
    /// `true` if the run ended before the budget was used up.
    pub stopped_early: bool,
}

impl CalibrationReport {
    /// Number of model error evaluations performed, including the initial population.
    pub fn function_calls(&self) -> usize {
        self.history.len()
    }
}
