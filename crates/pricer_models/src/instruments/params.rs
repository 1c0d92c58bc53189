//! Common option market inputs.
//!
//! This module provides the shared input bundle for option contracts with
//! validation.

use pricer_core::types::PricingError;

/// Market inputs shared by option contracts.
///
/// Contains spot, strike, forward, risk-free rate and time to expiry.
/// Spot, strike and expiry must be positive; the forward and the rate are
/// unconstrained (normal models admit negative forwards).
///
/// Defaults: spot 110, strike 100, forward 105, rate 0.01, expiry 1.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionTerms;
///
/// let terms = OptionTerms::new(110.0, 100.0, 105.0, 0.01, 1.0).unwrap();
/// assert_eq!(terms, OptionTerms::default());
/// assert!((terms.discount_factor() - (-0.01_f64).exp()).abs() < 1e-15);
///
/// assert!(OptionTerms::new(110.0, 100.0, 105.0, 0.01, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionTerms {
    spot: f64,
    strike: f64,
    forward: f64,
    rate: f64,
    expiry: f64,
}

impl Default for OptionTerms {
    fn default() -> Self {
        Self {
            spot: 110.0,
            strike: 100.0,
            forward: 105.0,
            rate: 0.01,
            expiry: 1.0,
        }
    }
}

impl OptionTerms {
    /// Creates validated option inputs.
    ///
    /// # Arguments
    /// * `spot` - Current underlying level (must be positive)
    /// * `strike` - Strike (must be positive)
    /// * `forward` - Forward level (finite)
    /// * `rate` - Continuously compounded risk-free rate (finite)
    /// * `expiry` - Time to expiry in years (must be positive)
    ///
    /// # Errors
    /// [`PricingError::Domain`] naming the first violated input.
    pub fn new(
        spot: f64,
        strike: f64,
        forward: f64,
        rate: f64,
        expiry: f64,
    ) -> Result<Self, PricingError> {
        let terms = Self {
            spot,
            strike,
            forward,
            rate,
            expiry,
        };
        terms.validate()?;
        Ok(terms)
    }

    fn validate(&self) -> Result<(), PricingError> {
        for (name, value) in [
            ("spot", self.spot),
            ("strike", self.strike),
            ("expiry", self.expiry),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(PricingError::domain(name, value, "must be positive and finite"));
            }
        }
        for (name, value) in [("forward", self.forward), ("rate", self.rate)] {
            if !value.is_finite() {
                return Err(PricingError::domain(name, value, "must be finite"));
            }
        }
        Ok(())
    }

    /// Returns a copy with a different strike.
    ///
    /// # Errors
    /// [`PricingError::Domain`] unless `strike` is positive.
    pub fn with_strike(self, strike: f64) -> Result<Self, PricingError> {
        Self::new(self.spot, strike, self.forward, self.rate, self.expiry)
    }

    /// Returns a copy with a different expiry.
    ///
    /// # Errors
    /// [`PricingError::Domain`] unless `expiry` is positive.
    pub fn with_expiry(self, expiry: f64) -> Result<Self, PricingError> {
        Self::new(self.spot, self.strike, self.forward, self.rate, expiry)
    }

    /// Spot level.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Forward level.
    #[inline]
    pub fn forward(&self) -> f64 {
        self.forward
    }

    /// Risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Time to expiry in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Discount factor `e^{−rT}`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.expiry).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid_terms() {
        let terms = OptionTerms::new(100.0, 95.0, -0.01, -0.005, 0.5).unwrap();
        assert_eq!(terms.spot(), 100.0);
        assert_eq!(terms.strike(), 95.0);
        assert_eq!(terms.forward(), -0.01);
        assert_eq!(terms.rate(), -0.005);
        assert_eq!(terms.expiry(), 0.5);
    }

    #[test]
    fn test_new_invalid_strike() {
        match OptionTerms::new(100.0, 0.0, 100.0, 0.0, 1.0) {
            Err(PricingError::Domain { parameter, value, .. }) => {
                assert_eq!(parameter, "strike");
                assert_eq!(value, 0.0);
            }
            other => panic!("Expected Domain error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_invalid_spot_and_expiry() {
        assert!(OptionTerms::new(-1.0, 100.0, 100.0, 0.0, 1.0).is_err());
        assert!(OptionTerms::new(100.0, 100.0, 100.0, 0.0, -1.0).is_err());
        assert!(OptionTerms::new(100.0, 100.0, 100.0, 0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_new_non_finite_forward_or_rate() {
        assert!(OptionTerms::new(100.0, 100.0, f64::INFINITY, 0.0, 1.0).is_err());
        assert!(OptionTerms::new(100.0, 100.0, 100.0, f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_with_strike_revalidates() {
        let terms = OptionTerms::default();
        assert_eq!(terms.with_strike(120.0).unwrap().strike(), 120.0);
        assert!(terms.with_strike(-5.0).is_err());
        assert_eq!(terms.with_expiry(2.0).unwrap().expiry(), 2.0);
        // original is unchanged
        assert_eq!(terms.strike(), 100.0);
    }
}
