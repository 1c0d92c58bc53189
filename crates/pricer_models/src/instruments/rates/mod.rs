//! Interest rate option contracts.
//!
//! This module provides:
//! - [`EuropeanCaplet`]: option on a single forward rate
//! - [`EuropeanPayerSwaption`]: option to pay fixed on a forward-starting swap

mod capfloor;
mod swaption;

pub use capfloor::EuropeanCaplet;
pub use swaption::EuropeanPayerSwaption;
