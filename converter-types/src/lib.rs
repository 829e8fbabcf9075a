//! # Converter Types
//!
//! Domain types and port traits for the currency converter.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (CurrencyCode, Amount, Rate, ConversionResult)
//! - `ports/` - Trait definitions that rate adapters must implement
//! - `dto/` - Data Transfer Objects for the rates service and CLI output
//! - `error/` - Domain, provider and conversion error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{Amount, ConversionRequest, ConversionResult, CurrencyCode, CurrencyInfo, Rate};
pub use dto::*;
pub use error::{ConversionError, DomainError, ProviderError};
pub use ports::RateProvider;
