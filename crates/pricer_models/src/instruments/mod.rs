//! Option contract definitions.
//!
//! Every contract is an immutable bundle of market inputs that is priced
//! against a model through [`PathIndependentOption::price`]. The trait is
//! implemented only for the model capability a contract needs, so pricing a
//! call against a rate-only model does not compile:
//!
//! ```compile_fail
//! use pricer_models::instruments::{EuropeanCall, PathIndependentOption};
//! use pricer_models::models::Bachelier;
//!
//! let _ = EuropeanCall::default().price(&Bachelier::default());
//! ```
//!
//! # Contracts
//!
//! - [`EuropeanCall`]: equity call, priced by any [`EquityModel`](crate::models::EquityModel)
//! - [`EuropeanPut`]: equity put, priced by [`BlackScholes`](crate::models::BlackScholes)
//! - [`EuropeanCaplet`]: rate caplet, priced by any
//!   [`InterestRateModel`](crate::models::InterestRateModel)
//! - [`EuropeanPayerSwaption`]: rate swaption without a pricer
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{EuropeanCaplet, PathIndependentOption};
//! use pricer_models::models::{Bachelier, Sabr};
//!
//! let caplet = EuropeanCaplet::default();
//! let normal = caplet.price(&Bachelier::default()).unwrap();
//! let sabr = caplet.price(&Sabr::default()).unwrap();
//! assert!(normal > 0.0 && sabr > 0.0);
//! ```

mod params;
mod traits;
mod vanilla;

pub mod rates;

pub use params::OptionTerms;
pub use rates::{EuropeanCaplet, EuropeanPayerSwaption};
pub use traits::PathIndependentOption;
pub use vanilla::{EuropeanCall, EuropeanPut};
