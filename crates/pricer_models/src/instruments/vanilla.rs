//! European equity options.
//!
//! This module provides:
//! - [`EuropeanCall`]: priced by any [`EquityModel`]
//! - [`EuropeanPut`]: priced by [`BlackScholes`]

use pricer_core::types::PricingError;

use super::params::OptionTerms;
use super::traits::PathIndependentOption;
use crate::models::{BlackScholes, EquityModel};

/// European call on an equity underlying.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{EuropeanCall, PathIndependentOption};
/// use pricer_models::models::{BlackScholes, Heston};
///
/// let call = EuropeanCall::new(110.0, 100.0, 105.0, 0.01, 1.0).unwrap();
/// let bs = call.price(&BlackScholes::default()).unwrap();
/// let heston = call.price(&Heston::default()).unwrap();
/// assert!(bs > call.payoff(110.0) - 100.0 * 0.01 && heston > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EuropeanCall {
    terms: OptionTerms,
}

impl EuropeanCall {
    /// Creates a call from validated inputs.
    ///
    /// # Errors
    /// [`PricingError::Domain`] for a non-positive spot, strike or expiry.
    pub fn new(
        spot: f64,
        strike: f64,
        forward: f64,
        rate: f64,
        expiry: f64,
    ) -> Result<Self, PricingError> {
        Ok(Self::from_terms(OptionTerms::new(
            spot, strike, forward, rate, expiry,
        )?))
    }

    /// Creates a call from already validated inputs.
    pub fn from_terms(terms: OptionTerms) -> Self {
        Self { terms }
    }

    /// Market inputs.
    #[inline]
    pub fn terms(&self) -> &OptionTerms {
        &self.terms
    }

    /// Payoff `max(S_T − K, 0)` at expiry.
    #[inline]
    pub fn payoff(&self, terminal: f64) -> f64 {
        (terminal - self.terms.strike()).max(0.0)
    }
}

impl<M: EquityModel + ?Sized> PathIndependentOption<M> for EuropeanCall {
    fn price(&self, model: &M) -> Result<f64, PricingError> {
        model.price_call(self)
    }
}

/// European put on an equity underlying.
///
/// Priced in closed form under Black-Scholes only.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{EuropeanCall, EuropeanPut, OptionTerms, PathIndependentOption};
/// use pricer_models::models::BlackScholes;
///
/// let terms = OptionTerms::default();
/// let model = BlackScholes::default();
/// let call = EuropeanCall::from_terms(terms).price(&model).unwrap();
/// let put = EuropeanPut::from_terms(terms).price(&model).unwrap();
///
/// // Put-call parity
/// let parity = terms.spot() - terms.strike() * terms.discount_factor();
/// assert!((call - put - parity).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EuropeanPut {
    terms: OptionTerms,
}

impl EuropeanPut {
    /// Creates a put from validated inputs.
    ///
    /// # Errors
    /// [`PricingError::Domain`] for a non-positive spot, strike or expiry.
    pub fn new(
        spot: f64,
        strike: f64,
        forward: f64,
        rate: f64,
        expiry: f64,
    ) -> Result<Self, PricingError> {
        Ok(Self::from_terms(OptionTerms::new(
            spot, strike, forward, rate, expiry,
        )?))
    }

    /// Creates a put from already validated inputs.
    pub fn from_terms(terms: OptionTerms) -> Self {
        Self { terms }
    }

    /// Market inputs.
    #[inline]
    pub fn terms(&self) -> &OptionTerms {
        &self.terms
    }

    /// Payoff `max(K − S_T, 0)` at expiry.
    #[inline]
    pub fn payoff(&self, terminal: f64) -> f64 {
        (self.terms.strike() - terminal).max(0.0)
    }
}

impl PathIndependentOption<BlackScholes> for EuropeanPut {
    fn price(&self, model: &BlackScholes) -> Result<f64, PricingError> {
        model.price_put(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payoffs() {
        let call = EuropeanCall::default();
        let put = EuropeanPut::default();
        assert_eq!(call.payoff(120.0), 20.0);
        assert_eq!(call.payoff(80.0), 0.0);
        assert_eq!(put.payoff(80.0), 20.0);
        assert_eq!(put.payoff(120.0), 0.0);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(EuropeanCall::new(110.0, -100.0, 105.0, 0.01, 1.0).is_err());
        assert!(EuropeanPut::new(110.0, 100.0, 105.0, 0.01, 0.0).is_err());
    }

    #[test]
    fn test_reusable_across_models() {
        let call = EuropeanCall::default();
        let low = call.price(&BlackScholes::new(0.1).unwrap()).unwrap();
        let high = call.price(&BlackScholes::new(0.4).unwrap()).unwrap();
        assert!(high > low);
        assert_eq!(call, EuropeanCall::default());
    }
}
