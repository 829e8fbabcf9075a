//! # Converter Hex
//!
//! Application service layer for the currency converter.
//!
//! The service is generic over `P: RateProvider`, allowing different rate
//! sources (HTTP, static tables, mocks) to be injected.

pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::{ConversionService, parse_request};
