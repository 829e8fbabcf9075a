//! Rate provider port.
//!
//! This trait defines the interface for exchange rate sources.
//! Implementations can be HTTP clients, static tables, mock providers, etc.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::domain::{CurrencyCode, Rate};
use crate::error::ProviderError;

/// Port trait for exchange rate providers.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync {
    /// Get the exchange rate from one currency to another.
    /// Returns how many units of `to` you get for 1 unit of `from`.
    async fn get_rate(&self, from: &CurrencyCode, to: &CurrencyCode)
    -> Result<Rate, ProviderError>;

    /// Get the display symbol for a currency (e.g. `$` for USD).
    async fn get_symbol(&self, code: &CurrencyCode) -> Result<String, ProviderError>;

    /// List every code the provider can quote against `base`.
    ///
    /// Only the presentation layer needs this; conversion never calls it.
    async fn list_supported_currencies(
        &self,
        base: &CurrencyCode,
    ) -> Result<BTreeSet<CurrencyCode>, ProviderError>;

    /// Get the rate that applied on a given day.
    async fn get_historical_rate(
        &self,
        _from: &CurrencyCode,
        _to: &CurrencyCode,
        _date: NaiveDate,
    ) -> Result<Rate, ProviderError> {
        Err(ProviderError::HistoryUnsupported)
    }
}
