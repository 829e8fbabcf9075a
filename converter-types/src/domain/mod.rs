//! Domain models for the currency converter.

pub mod amount;
pub mod conversion;
pub mod currency;

pub use amount::{Amount, Rate};
pub use conversion::{ConversionRequest, ConversionResult};
pub use currency::{CurrencyCode, CurrencyInfo};
