//! Conversion request and result.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::{Amount, Rate};
use super::currency::CurrencyCode;
use crate::error::DomainError;

/// Decimal places shown when a result is displayed.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// A single conversion asked for by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub amount: Amount,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    /// Use the rate of a past day instead of the latest one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on: Option<NaiveDate>,
}

impl ConversionRequest {
    /// Builds a request from raw codes, normalizing them.
    pub fn new(amount: Amount, from: &str, to: &str) -> Result<Self, DomainError> {
        Ok(Self {
            amount,
            from: CurrencyCode::new(from)?,
            to: CurrencyCode::new(to)?,
            on: None,
        })
    }

    /// Pins the request to a historical rate.
    pub fn as_of(mut self, date: Option<NaiveDate>) -> Self {
        self.on = date;
        self
    }
}

/// Outcome of a conversion, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub amount: Amount,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub rate: Rate,
    /// Exact product of amount and rate, unrounded.
    pub converted_amount: Decimal,
    /// Display symbol of the target currency.
    pub symbol: String,
}

impl ConversionResult {
    /// The converted amount rounded for display (half away from zero).
    pub fn rounded(&self) -> Decimal {
        self.converted_amount.round_dp_with_strategy(
            DISPLAY_DECIMAL_PLACES,
            RoundingStrategy::MidpointAwayFromZero,
        )
    }
}

impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.rounded();
        let sign = if value.is_sign_negative() && !value.is_zero() {
            "-"
        } else {
            ""
        };
        write!(
            f,
            "{}{}{:.prec$}",
            sign,
            self.symbol,
            value.abs(),
            prec = DISPLAY_DECIMAL_PLACES as usize
        )
    }
}
