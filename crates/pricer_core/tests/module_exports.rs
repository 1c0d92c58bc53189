//! Integration tests for module exports and cross-module behaviour.

use approx::assert_relative_eq;
use pricer_core::math::{erf, gamma, norm_cdf, norm_pdf, norm_pdf_general, Complex, PricerRng};
use pricer_core::types::{MathError, PricingError};

/// Test that the numeric kernel is reachable from the `math` re-exports.
#[test]
fn test_math_reexports() {
    let _ = erf(0.5_f64);
    let _ = norm_cdf(0.5_f64);
    let _ = norm_pdf(0.5_f64);
    let _ = norm_pdf_general(0.5, 0.0, 1.0).unwrap();
    let _ = gamma(2.5).unwrap();
    let _ = Complex::I;
    let _ = PricerRng::from_seed(0).uniform();
}

/// Kernel errors convert into pricing errors with `?`.
#[test]
fn test_error_propagation() {
    fn log_of(z: Complex) -> Result<Complex, PricingError> {
        Ok(z.ln()?)
    }

    assert!(log_of(Complex::ONE).is_ok());
    assert_eq!(
        log_of(Complex::ZERO),
        Err(PricingError::Math(MathError::LogOfZero))
    );
}

/// The CDF integrates the PDF: a central difference of Φ recovers φ.
#[test]
fn test_cdf_derivative_matches_pdf() {
    let h = 1e-3;
    for z in [-2.0, -0.5, 0.7, 1.9] {
        let derivative = (norm_cdf(z + h) - norm_cdf(z - h)) / (2.0 * h);
        assert_relative_eq!(derivative, norm_pdf(z), epsilon = 5e-4);
    }
}

/// Gamma at the fractional kernel arguments used by rough volatility.
#[test]
fn test_gamma_at_fractional_orders() {
    for alpha in [0.55, 0.62, 0.8, 1.0] {
        let g1 = gamma(alpha + 1.0).unwrap();
        let g2 = gamma(alpha + 2.0).unwrap();
        assert_relative_eq!(g2, (alpha + 1.0) * g1, max_relative = 1e-9);
    }
}

/// The empirical CDF of Box–Muller samples tracks Φ.
#[test]
fn test_gaussian_samples_follow_norm_cdf() {
    let mut rng = PricerRng::from_seed(314);
    let samples = rng.gaussian_array(100_000);
    for threshold in [-1.0, 0.0, 1.5] {
        let fraction =
            samples.iter().filter(|&&x| x <= threshold).count() as f64 / samples.len() as f64;
        assert!((fraction - norm_cdf(threshold)).abs() < 0.01);
    }
}
