//! Pricing trait for path-independent contracts.

use pricer_core::types::PricingError;

/// A contract whose price depends only on the terminal distribution of its
/// underlying, priced against model type `M`.
///
/// Implementations delegate to the closed-form or semi-analytic pricer of
/// the model capability they are bound to. A contract is not consumed by
/// pricing and may be priced repeatedly against different models.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::{EuropeanCall, PathIndependentOption};
/// use pricer_models::models::{BlackScholes, EquityModel};
///
/// fn price_all<M: EquityModel>(model: &M, calls: &[EuropeanCall]) -> Vec<f64> {
///     calls.iter().filter_map(|c| c.price(model).ok()).collect()
/// }
///
/// let calls = [EuropeanCall::default(), EuropeanCall::default()];
/// let prices = price_all(&BlackScholes::default(), &calls);
/// assert_eq!(prices[0], prices[1]);
/// ```
pub trait PathIndependentOption<M: ?Sized> {
    /// Present value of the contract under `model`.
    ///
    /// # Errors
    /// [`PricingError`] if the model cannot price the contract.
    fn price(&self, model: &M) -> Result<f64, PricingError>;
}
