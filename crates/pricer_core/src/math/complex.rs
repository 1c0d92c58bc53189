//! Immutable complex number value type.
//!
//! `Complex` is `Copy`: every operation consumes its operands by value and
//! returns a fresh result, so shared constants such as [`Complex::I`] can be
//! reused across formula evaluations without being corrupted.
//!
//! ## Mathematical Formulas
//!
//! Principal logarithm:
//! ```text
//! ln z = ln|z| + i·atan2(Im z, Re z)
//! ```
//!
//! Exponential:
//! ```text
//! exp z = e^{Re z}·(cos(Im z) + i·sin(Im z))
//! ```
//!
//! Real power:
//! ```text
//! z^c = exp(c·ln z)
//! ```
//!
//! Operations that are undefined at zero (`try_div`, `ln`, `powf`) return
//! [`MathError`] instead of producing NaN.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::types::MathError;

/// Complex number `re + i·im` over `f64`.
///
/// # Examples
/// ```
/// use pricer_core::math::complex::Complex;
///
/// let z = Complex::new(3.0, 4.0);
/// assert_eq!(z.re(), 3.0);
/// assert_eq!(z.im(), 4.0);
/// assert_eq!(z.norm(), 5.0);
///
/// let w = z * Complex::I;
/// assert_eq!(w, Complex::new(-4.0, 3.0));
/// // `z` itself is unchanged
/// assert_eq!(z, Complex::new(3.0, 4.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Complex {
    re: f64,
    im: f64,
}

impl Complex {
    /// `0 + 0i`
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };
    /// `1 + 0i`
    pub const ONE: Complex = Complex { re: 1.0, im: 0.0 };
    /// The imaginary unit `0 + 1i`
    pub const I: Complex = Complex { re: 0.0, im: 1.0 };

    /// Creates a complex number from its real and imaginary parts.
    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Creates a purely real complex number.
    #[inline]
    pub const fn from_real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    /// Real part.
    #[inline]
    pub fn re(self) -> f64 {
        self.re
    }

    /// Imaginary part.
    #[inline]
    pub fn im(self) -> f64 {
        self.im
    }

    /// Squared modulus `re² + im²`.
    #[inline]
    pub fn norm_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Modulus `|z|`, computed without intermediate overflow.
    #[inline]
    pub fn norm(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Argument in `(-π, π]`.
    #[inline]
    pub fn arg(self) -> f64 {
        self.im.atan2(self.re)
    }

    /// Complex conjugate.
    #[inline]
    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// Returns `true` if both parts are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    /// Returns `true` if both parts are exactly zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }

    /// Divides by a complex or real divisor.
    ///
    /// # Errors
    /// [`MathError::DivisionByZero`] if the divisor has zero magnitude.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::math::complex::Complex;
    ///
    /// let z = Complex::new(1.0, 1.0);
    /// assert_eq!(z.try_div(2.0).unwrap(), Complex::new(0.5, 0.5));
    /// assert!(z.try_div(Complex::ZERO).is_err());
    /// ```
    pub fn try_div(self, rhs: impl Into<Complex>) -> Result<Complex, MathError> {
        let rhs = rhs.into();
        let denom = rhs.norm_sqr();
        if denom == 0.0 {
            return Err(MathError::DivisionByZero);
        }
        Ok(Self::new(
            (self.re * rhs.re + self.im * rhs.im) / denom,
            (self.im * rhs.re - self.re * rhs.im) / denom,
        ))
    }

    /// Reciprocal `1 / z`.
    ///
    /// # Errors
    /// [`MathError::DivisionByZero`] at zero.
    #[inline]
    pub fn try_recip(self) -> Result<Complex, MathError> {
        Complex::ONE.try_div(self)
    }

    /// Principal natural logarithm.
    ///
    /// # Errors
    /// [`MathError::LogOfZero`] at zero.
    pub fn ln(self) -> Result<Complex, MathError> {
        if self.is_zero() {
            return Err(MathError::LogOfZero);
        }
        Ok(Self::new(self.norm().ln(), self.arg()))
    }

    /// Complex exponential.
    pub fn exp(self) -> Complex {
        let scale = self.re.exp();
        Self::new(scale * self.im.cos(), scale * self.im.sin())
    }

    /// Real power `exp(c·ln z)` on the principal branch.
    ///
    /// Discontinuous across the negative real axis.
    ///
    /// # Errors
    /// [`MathError::LogOfZero`] at zero.
    pub fn powf(self, c: f64) -> Result<Complex, MathError> {
        Ok((self.ln()? * c).exp())
    }

    /// Principal square root (defined at zero).
    pub fn sqrt(self) -> Complex {
        if self.is_zero() {
            return Complex::ZERO;
        }
        let r = self.norm().sqrt();
        let half_theta = 0.5 * self.arg();
        Self::new(r * half_theta.cos(), r * half_theta.sin())
    }
}

impl From<f64> for Complex {
    #[inline]
    fn from(re: f64) -> Self {
        Complex::from_real(re)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im < 0.0 {
            write!(f, "{}-{}i", self.re, -self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}

impl Add for Complex {
    type Output = Complex;
    #[inline]
    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Complex;
    #[inline]
    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Complex;
    #[inline]
    fn mul(self, rhs: Complex) -> Complex {
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Neg for Complex {
    type Output = Complex;
    #[inline]
    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

impl Add<f64> for Complex {
    type Output = Complex;
    #[inline]
    fn add(self, rhs: f64) -> Complex {
        Complex::new(self.re + rhs, self.im)
    }
}

impl Sub<f64> for Complex {
    type Output = Complex;
    #[inline]
    fn sub(self, rhs: f64) -> Complex {
        Complex::new(self.re - rhs, self.im)
    }
}

impl Mul<f64> for Complex {
    type Output = Complex;
    #[inline]
    fn mul(self, rhs: f64) -> Complex {
        Complex::new(self.re * rhs, self.im * rhs)
    }
}

impl Add<Complex> for f64 {
    type Output = Complex;
    #[inline]
    fn add(self, rhs: Complex) -> Complex {
        rhs + self
    }
}

impl Sub<Complex> for f64 {
    type Output = Complex;
    #[inline]
    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self - rhs.re, -rhs.im)
    }
}

impl Mul<Complex> for f64 {
    type Output = Complex;
    #[inline]
    fn mul(self, rhs: Complex) -> Complex {
        rhs * self
    }
}
