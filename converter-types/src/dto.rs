//! Data Transfer Objects (DTOs) for the rates service and CLI output.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{CurrencyCode, Rate};

// ─────────────────────────────────────────────────────────────────────────────
// Rates service wire format
// ─────────────────────────────────────────────────────────────────────────────

/// Body returned by `/latest` and `/{date}` on a ratesapi-compatible service.
///
/// ```json
/// {"amount": 1.0, "base": "USD", "date": "2024-05-02", "rates": {"EUR": 0.92}}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatesResponse {
    pub base: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub rates: BTreeMap<String, f64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Output DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// A single quoted rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateQuote {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub rate: Rate,
    /// Day the rate applied to, when a historical rate was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// One row of a currency listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyListing {
    pub code: CurrencyCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}
