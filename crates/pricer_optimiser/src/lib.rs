//! # pricer_optimiser
//!
//! Calibration of pricing models against market quotes.
//!
//! This crate sits on top of Models (L2) in the architecture, solving the
//! inverse problem of finding model parameters that minimise a model's
//! calibration error.
//!
//! ## Architecture Position
//!
//! Layer 2.5 of the pricer stack.
//! Depends on `pricer_core` (L1) for seeded random sampling and on
//! `pricer_models` (L2) for the [`Model`](pricer_models::models::Model)
//! capability.
//!
//! ## Modules
//!
//! - `calibration`: Differential evolution over a model's parameter vector,
//!   its configuration, and the run report
//!
//! ## Example
//!
//! ```rust
//! use pricer_core::math::random::PricerRng;
//! use pricer_models::calibration::{CalibrationTargets, Quote};
//! use pricer_models::instruments::{EuropeanCall, PathIndependentOption};
//! use pricer_models::models::BlackScholes;
//! use pricer_optimiser::calibration::{
//!     Calibrator, DifferentialEvolution, DifferentialEvolutionConfig,
//! };
//!
//! let call = EuropeanCall::default();
//! let market_price = call.price(&BlackScholes::new(0.3).unwrap()).unwrap();
//! let model = BlackScholes::default()
//!     .with_call_targets(CalibrationTargets::new().with_quote(Quote::new(call, market_price)));
//!
//! let config = DifferentialEvolutionConfig::default().with_max_evaluations(2_000);
//! let mut calibrator = DifferentialEvolution::new(&model, PricerRng::from_seed(42))
//!     .with_config(config);
//! let best = calibrator.calibrate().unwrap();
//! assert!((best[0] - 0.3).abs() < 1e-4);
//! ```

#![deny(missing_docs)]

pub mod calibration;

mod error;

pub use error::OptimiserError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::calibration::*;
    pub use crate::OptimiserError;
}
