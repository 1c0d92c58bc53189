//! Calibration targets.
//!
//! This module provides the market data a model is calibrated against:
//! - [`Quote`]: a contract with its observed market price and a weight
//! - [`CalibrationTargets`]: a set of quotes scored by weighted squared error
//!
//! # Calibration Flow
//!
//! ```text
//!  Market quotes → CalibrationTargets → Model::calibration_error → optimiser
//!                        │                        │
//!                        ▼                        ▼
//!                 Σ w·(model − market)²    trial model per candidate
//! ```
//!
//! The optimiser itself lives in `pricer_optimiser`; it only sees
//! [`Model::calibration_error`](crate::models::Model::calibration_error).
//!
//! # Example
//!
//! ```
//! use pricer_models::calibration::{CalibrationTargets, Quote};
//! use pricer_models::instruments::{EuropeanCall, OptionTerms, PathIndependentOption};
//! use pricer_models::models::{BlackScholes, Model};
//!
//! let terms = OptionTerms::default();
//! let market = EuropeanCall::from_terms(terms)
//!     .price(&BlackScholes::new(0.3).unwrap())
//!     .unwrap();
//!
//! let targets: CalibrationTargets<EuropeanCall> =
//!     vec![Quote::new(EuropeanCall::from_terms(terms), market)].into_iter().collect();
//! let model = BlackScholes::default().with_call_targets(targets);
//!
//! assert!(model.calibration_error(&[0.3]) < 1e-20);
//! assert!(model.calibration_error(&[0.2]) > 0.0);
//! ```

mod targets;

pub use targets::{CalibrationTargets, Quote};
