//! Error types for the currency converter.

use crate::domain::CurrencyCode;

/// Domain-level errors (malformed values).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid currency code: '{0}' (expected three letters, e.g. USD)")]
    InvalidCurrencyCode(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid rate: {0}")]
    InvalidRate(String),
}

/// Errors returned by rate provider adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error(transparent)]
    InvalidData(#[from] DomainError),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Rate not available for {0} -> {1}")]
    RateNotAvailable(CurrencyCode, CurrencyCode),

    #[error("Historical rates are not supported by this provider")]
    HistoryUnsupported,
}

/// Failures surfaced by the conversion service to the presentation layer.
///
/// Each kind is kept distinct so callers can choose their own wording.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Rate unavailable for {from} -> {to}: {reason}")]
    RateUnavailable {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

impl ConversionError {
    /// Builds a `RateUnavailable` for the given pair and cause.
    pub fn rate_unavailable(from: &str, to: &str, reason: impl ToString) -> Self {
        ConversionError::RateUnavailable {
            from: from.to_string(),
            to: to.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<DomainError> for ConversionError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidAmount(msg) => ConversionError::InvalidAmount(msg),
            DomainError::InvalidCurrencyCode(code) => ConversionError::UnknownCurrency(code),
            DomainError::InvalidRate(msg) => ConversionError::InvalidAmount(msg),
        }
    }
}
