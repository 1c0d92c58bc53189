//! Mathematical building blocks for semi-analytic pricers.
//!
//! This module provides:
//! - [`complex`]: Immutable complex arithmetic with principal-branch `ln`, `exp` and `powf`
//! - [`distributions`]: Standard normal PDF/CDF and the error-function approximation
//! - [`special`]: Gamma function (Lanczos, g = 5)
//! - [`random`]: Seedable uniform and Gaussian sampling

pub mod complex;
pub mod distributions;
pub mod random;
pub mod special;

pub use complex::Complex;
pub use distributions::{erf, norm_cdf, norm_pdf, norm_pdf_general};
pub use random::PricerRng;
pub use special::gamma;
