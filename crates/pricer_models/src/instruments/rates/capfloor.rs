//! European caplet.
//!
//! A caplet pays `max(F_T − K, 0)` on a single forward rate. The rate
//! models price it in closed form from the shared [`OptionTerms`].

use pricer_core::types::PricingError;

use crate::instruments::params::OptionTerms;
use crate::instruments::traits::PathIndependentOption;
use crate::models::InterestRateModel;

/// European caplet on a forward rate.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{EuropeanCaplet, PathIndependentOption};
/// use pricer_models::models::{Bachelier, BlackScholes};
///
/// let caplet = EuropeanCaplet::new(110.0, 100.0, 105.0, 0.01, 1.0).unwrap();
/// assert!(caplet.price(&Bachelier::default()).unwrap() > 0.0);
/// assert!(caplet.price(&BlackScholes::default()).unwrap() > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EuropeanCaplet {
    terms: OptionTerms,
}

impl EuropeanCaplet {
    /// Creates a caplet from validated inputs.
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

    /// Creates a caplet from already validated inputs.
    pub fn from_terms(terms: OptionTerms) -> Self {
        Self { terms }
    }

    /// Market inputs.
    #[inline]
    pub fn terms(&self) -> &OptionTerms {
        &self.terms
    }

    /// Payoff `max(F_T − K, 0)` at expiry.
    #[inline]
    pub fn payoff(&self, fixing: f64) -> f64 {
        (fixing - self.terms.strike()).max(0.0)
    }
}

impl<M: InterestRateModel + ?Sized> PathIndependentOption<M> for EuropeanCaplet {
    fn price(&self, model: &M) -> Result<f64, PricingError> {
        model.price_caplet(self)
    }
}
