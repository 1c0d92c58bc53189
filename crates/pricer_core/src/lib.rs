//! # pricer_core: Numeric Foundation for the Pricing Kernel
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the pricer stack, providing:
//! - An immutable complex number value type (`math::complex`)
//! - Normal density and distribution functions built on an error-function
//!   approximation (`math::distributions`)
//! - The Gamma function via the Lanczos approximation (`math::special`)
//! - An explicit, seedable random number generator with Gaussian and uniform
//!   sampling in scalar, array, and matrix forms (`math::random`)
//! - Error types: `MathError`, `PricingError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - rand: Pseudo-random number generation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::complex::Complex;
//! use pricer_core::math::distributions::norm_cdf;
//! use pricer_core::math::random::PricerRng;
//!
//! let z = Complex::new(1.0, 2.0);
//! let w = (z * Complex::I).exp();
//! assert!(w.is_finite());
//!
//! assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-9);
//!
//! let mut rng = PricerRng::from_seed(42);
//! let sample = rng.gaussian_array(8);
//! assert_eq!(sample.len(), 8);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for error and value types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
