//! Decimal amounts and exchange rates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// A quantity in the source currency.
///
/// Backed by `Decimal`, so it is always finite. Negative amounts are
/// accepted and passed through conversion unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Wraps an existing decimal.
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Parses user input such as `"100"`, `" 12.50 "` or `"1e3"`.
    ///
    /// Blank input is rejected rather than read as zero.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidAmount("amount is blank".into()));
        }

        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Self)
            .map_err(|_| DomainError::InvalidAmount(format!("'{}' is not a number", trimmed)))
    }

    /// Converts a float, rejecting NaN and infinities.
    pub fn from_f64(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::InvalidAmount(format!(
                "{} is not a finite number",
                value
            )));
        }
        Decimal::try_from(value)
            .map(Self)
            .map_err(|e| DomainError::InvalidAmount(e.to_string()))
    }

    /// Returns the underlying decimal.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl FromStr for Amount {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Units of the target currency per one unit of the source currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(Decimal);

impl Rate {
    /// The identity rate used for same-currency pairs.
    pub const ONE: Rate = Rate(Decimal::ONE);

    /// Creates a rate, rejecting negative values.
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::InvalidRate(format!("{} is negative", value)));
        }
        Ok(Self(value))
    }

    /// Converts a float as returned by most rate services.
    pub fn from_f64(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::InvalidRate(format!(
                "{} is not a finite number",
                value
            )));
        }
        let decimal =
            Decimal::try_from(value).map_err(|e| DomainError::InvalidRate(e.to_string()))?;
        Self::new(decimal)
    }

    /// Returns the underlying decimal.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Multiplies `amount` by this rate. `None` on decimal overflow.
    pub fn apply(&self, amount: Amount) -> Option<Decimal> {
        amount.value().checked_mul(self.0)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
