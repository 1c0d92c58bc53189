//! European payer swaption.
//!
//! The contract shape is defined but neither the forward swap rate nor the
//! price is implemented: both return [`PricingError::NotImplemented`] rather
//! than a placeholder value.

use pricer_core::types::PricingError;

use crate::instruments::params::OptionTerms;
use crate::instruments::traits::PathIndependentOption;
use crate::models::InterestRateModel;

/// Option to enter a payer swap at expiry.
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
/// use pricer_models::instruments::{EuropeanPayerSwaption, PathIndependentOption};
/// use pricer_models::models::Bachelier;
///
/// let swaption = EuropeanPayerSwaption::default();
/// assert!(matches!(
///     swaption.price(&Bachelier::default()),
///     Err(PricingError::NotImplemented(_))
/// ));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EuropeanPayerSwaption {
    terms: OptionTerms,
    tenor: f64,
    payments_per_year: u32,
}

impl Default for EuropeanPayerSwaption {
    fn default() -> Self {
        Self {
            terms: OptionTerms::default(),
            tenor: 5.0,
            payments_per_year: 2,
        }
    }
}

impl EuropeanPayerSwaption {
    /// Creates a swaption on a swap of `tenor` years starting at expiry.
    ///
    /// # Errors
    /// [`PricingError::Domain`] for a non-positive tenor or payment frequency.
    pub fn new(
        terms: OptionTerms,
        tenor: f64,
        payments_per_year: u32,
    ) -> Result<Self, PricingError> {
        if !(tenor > 0.0 && tenor.is_finite()) {
            return Err(PricingError::domain("tenor", tenor, "must be positive and finite"));
        }
        if payments_per_year == 0 {
            return Err(PricingError::domain(
                "payments_per_year",
                0.0,
                "must be positive",
            ));
        }
        Ok(Self {
            terms,
            tenor,
            payments_per_year,
        })
    }

    /// Market inputs; the strike is the fixed rate.
    #[inline]
    pub fn terms(&self) -> &OptionTerms {
        &self.terms
    }

    /// Underlying swap tenor in years.
    #[inline]
    pub fn tenor(&self) -> f64 {
        self.tenor
    }

    /// Fixed-leg payments per year.
    #[inline]
    pub fn payments_per_year(&self) -> u32 {
        self.payments_per_year
    }

    /// Forward par rate of the underlying swap.
    ///
    /// # Errors
    /// Always [`PricingError::NotImplemented`]: no discount curve is available
    /// to build the annuity.
    pub fn forward_swap_rate(&self) -> Result<f64, PricingError> {
        Err(PricingError::NotImplemented(
            "forward swap rate of a payer swaption".to_string(),
        ))
    }
}

impl<M: InterestRateModel + ?Sized> PathIndependentOption<M> for EuropeanPayerSwaption {
    fn price(&self, model: &M) -> Result<f64, PricingError> {
        Err(PricingError::NotImplemented(format!(
            "payer swaption pricing under {}",
            model.name()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlackScholes, Sabr};

    #[test]
    fn test_stub_never_returns_a_price() {
        let swaption = EuropeanPayerSwaption::default();
        assert!(matches!(
            swaption.forward_swap_rate(),
            Err(PricingError::NotImplemented(_))
        ));
        match swaption.price(&Sabr::default()) {
            Err(PricingError::NotImplemented(msg)) => assert!(msg.contains("SABR")),
            other => panic!("Expected NotImplemented, got {:?}", other),
        }
        assert!(swaption.price(&BlackScholes::default()).is_err());
    }

    #[test]
    fn test_new_validation() {
        let terms = OptionTerms::default();
        assert!(EuropeanPayerSwaption::new(terms, 0.0, 2).is_err());
        assert!(EuropeanPayerSwaption::new(terms, 5.0, 0).is_err());
        let swaption = EuropeanPayerSwaption::new(terms, 10.0, 4).unwrap();
        assert_eq!(swaption.tenor(), 10.0);
        assert_eq!(swaption.payments_per_year(), 4);
    }
}
