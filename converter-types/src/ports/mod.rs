//! Port traits (interfaces for adapters).
//!
//! These are the contracts that rate adapters must implement.
//! The conversion service depends on these traits, not concrete implementations.

mod rates;

pub use rates::RateProvider;
