//! Calibration target types.
//!
//! This module defines the quotes a model is fitted to and the loss used to
//! score a trial model against them.

use pricer_core::types::PricingError;

/// A contract with its observed market price.
///
/// # Examples
/// ```
/// use pricer_models::calibration::Quote;
/// use pricer_models::instruments::EuropeanCaplet;
///
/// let quote = Quote::new(EuropeanCaplet::default(), 4.2).with_weight(2.0);
/// assert_eq!(quote.market_price, 4.2);
/// assert_eq!(quote.weight, 2.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Quote<O> {
    /// Contract
    pub option: O,
    /// Observed market price
    pub market_price: f64,
    /// Weight of this quote in the loss
    pub weight: f64,
}

impl<O> Quote<O> {
    /// Create a quote with unit weight.
    pub fn new(option: O, market_price: f64) -> Self {
        Self {
            option,
            market_price,
            weight: 1.0,
        }
    }

    /// Set the weight for this quote.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// Set of market quotes for one contract type.
#[derive(Clone, Debug, PartialEq)]
pub struct CalibrationTargets<O> {
    quotes: Vec<Quote<O>>,
}

impl<O> Default for CalibrationTargets<O> {
    fn default() -> Self {
        Self { quotes: Vec::new() }
    }
}

impl<O> CalibrationTargets<O> {
    /// Empty target set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a quote.
    pub fn push(&mut self, quote: Quote<O>) {
        self.quotes.push(quote);
    }

    /// Builder form of [`CalibrationTargets::push`].
    pub fn with_quote(mut self, quote: Quote<O>) -> Self {
        self.push(quote);
        self
    }

    /// Number of quotes.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Returns `true` if there are no quotes.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Iterate over the quotes.
    pub fn iter(&self) -> std::slice::Iter<'_, Quote<O>> {
        self.quotes.iter()
    }

    /// Weighted sum of squared pricing errors.
    ///
    /// `Σ w·(pricer(option) − market)²` over all quotes. A failed or
    /// non-finite model price scores `f64::INFINITY`, so such candidates
    /// never beat a finite one. An empty set scores `0.0`.
    pub fn squared_error<F>(&self, mut pricer: F) -> f64
    where
        F: FnMut(&O) -> Result<f64, PricingError>,
    {
        let mut total = 0.0;
        for quote in &self.quotes {
            match pricer(&quote.option) {
                Ok(price) if price.is_finite() => {
                    let diff = price - quote.market_price;
                    total += quote.weight * diff * diff;
                }
                _ => return f64::INFINITY,
            }
        }
        total
    }
}

impl<O> FromIterator<Quote<O>> for CalibrationTargets<O> {
    fn from_iter<I: IntoIterator<Item = Quote<O>>>(iter: I) -> Self {
        Self {
            quotes: iter.into_iter().collect(),
        }
    }
}

impl<'a, O> IntoIterator for &'a CalibrationTargets<O> {
    type Item = &'a Quote<O>;
    type IntoIter = std::slice::Iter<'a, Quote<O>>;

    fn into_iter(self) -> Self::IntoIter {
        self.quotes.iter()
    }
}
