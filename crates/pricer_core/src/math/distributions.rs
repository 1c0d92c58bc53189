//! Normal distribution functions.
//!
//! This module provides:
//! - `erf`: Error function, Abramowitz and Stegun formula 7.1.26
//! - `norm_cdf`: Standard normal cumulative distribution function
//! - `norm_pdf`: Standard normal density
//! - `norm_pdf_general`: Gaussian density with mean `mu` and deviation `sigma`
//!
//! `erf`, `norm_cdf` and `norm_pdf` are generic over `T: Float`.
//!
//! ## Mathematical Formulas
//!
//! ```text
//! t      = 1 / (1 + p·|x|)
//! erf(x) = sign(x)·(1 − (a1·t + a2·t² + a3·t³ + a4·t⁴ + a5·t⁵)·e^{−x²})
//! Φ(z)   = ½·(1 + sign(z)·erf(|z|/√2))
//! φ(x)   = e^{−x²/2} / √(2π)
//! ```
//!
//! The approximation has absolute error below 1.5e-7. `Φ(0)` evaluates to
//! `0.5 + 5e-10` and `Φ(z) + Φ(−z) = 1` holds exactly for `z ≠ 0`.

use num_traits::Float;

use crate::types::MathError;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

// Abramowitz and Stegun 7.1.26
const ERF_P: f64 = 0.327_591_1;
const ERF_A1: f64 = 0.254_829_592;
const ERF_A2: f64 = -0.284_496_736;
const ERF_A3: f64 = 1.421_413_741;
const ERF_A4: f64 = -1.453_152_027;
const ERF_A5: f64 = 1.061_405_429;

#[inline]
fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Error function approximation.
///
/// The quintic in `t` is evaluated with Horner's method. Odd extension is
/// used for negative arguments.
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::erf;
///
/// assert!((erf(1.0_f64) - 0.842_700_79).abs() < 2e-7);
/// assert!((erf(-1.0_f64) + 0.842_700_79).abs() < 2e-7);
/// ```
#[inline]
pub fn erf<T: Float>(x: T) -> T {
    let one = T::one();
    let abs_x = x.abs();
    let t = one / (one + constant::<T>(ERF_P) * abs_x);

    let poly = t
        * (constant::<T>(ERF_A1)
            + t * (constant::<T>(ERF_A2)
                + t * (constant::<T>(ERF_A3)
                    + t * (constant::<T>(ERF_A4) + t * constant::<T>(ERF_A5)))));

    let value = one - poly * (-abs_x * abs_x).exp();
    if x < T::zero() {
        -value
    } else {
        value
    }
}

/// Standard normal cumulative distribution function.
///
/// # Arguments
/// * `z` - Input value
///
/// # Returns
/// `P(X ≤ z)` for standard normal `X`, in `[0, 1]`.
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-9);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(z: T) -> T {
    let half = constant::<T>(0.5);
    let e = erf(z.abs() / constant::<T>(std::f64::consts::SQRT_2));
    if z < T::zero() {
        half * (T::one() - e)
    } else {
        half * (T::one() + e)
    }
}

/// Standard normal probability density function.
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::norm_pdf;
///
/// // φ(0) = 1 / sqrt(2π)
/// assert!((norm_pdf(0.0_f64) - 0.398_942_280_4).abs() < 1e-10);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    constant::<T>(FRAC_1_SQRT_2PI) * (-constant::<T>(0.5) * x * x).exp()
}

/// Gaussian density with mean `mu` and standard deviation `sigma`.
///
/// # Errors
/// [`MathError::InvalidStandardDeviation`] unless `sigma > 0`.
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::{norm_pdf, norm_pdf_general};
///
/// let density = norm_pdf_general(1.0, 1.0, 2.0).unwrap();
/// assert!((density - norm_pdf(0.0) / 2.0).abs() < 1e-15);
/// assert!(norm_pdf_general(0.0, 0.0, 0.0).is_err());
/// ```
pub fn norm_pdf_general(x: f64, mu: f64, sigma: f64) -> Result<f64, MathError> {
    if sigma.is_nan() || sigma <= 0.0 {
        return Err(MathError::InvalidStandardDeviation { sigma });
    }
    Ok(norm_pdf((x - mu) / sigma) / sigma)
}
