//! Core error types.
//!
//! This module provides:
//! - `error`: Structured error types for numeric kernel and pricing operations
//!
//! # Re-exports
//!
//! - [`MathError`], [`PricingError`] from `error`

pub mod error;

pub use error::{MathError, PricingError};
