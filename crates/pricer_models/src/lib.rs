//! # Pricer Models (L2: Business Logic)
//!
//! Option contracts, pricing models, and calibration targets.
//!
//! This crate provides:
//! - The model capability hierarchy: [`models::Model`], specialised into
//!   [`models::EquityModel`] (call pricer) and [`models::InterestRateModel`]
//!   (caplet pricer)
//! - Concrete models: Black-Scholes, Bachelier, SABR, Heston, Rough Heston
//! - Option contracts priced against the model capability they require
//!   ([`instruments::PathIndependentOption`])
//! - Market quotes used as calibration targets ([`calibration`])
//!
//! ## Design Principles
//!
//! - **Capability traits** so that an equity contract cannot be priced
//!   against a rate-only model (a compile error, not a runtime check)
//! - **Typed parameters are authoritative**; the name → value
//!   [`models::ParameterSet`] view is derived from them
//! - **Builder pattern** for ergonomic API with sensible defaults
//!
//! ## Example
//!
//! ```
//! use pricer_models::instruments::{EuropeanCall, PathIndependentOption};
//! use pricer_models::models::{BlackScholes, Model};
//!
//! let model = BlackScholes::new(0.2).unwrap();
//! let call = EuropeanCall::new(100.0, 100.0, 100.0, 0.05, 1.0).unwrap();
//!
//! let price = call.price(&model).unwrap();
//! assert!((price - 10.4506).abs() < 1e-3);
//! assert_eq!(model.parameters().get("sigma"), Some(0.2));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod calibration;
pub mod instruments;
pub mod models;
