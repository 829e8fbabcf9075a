//! Human-readable output for the terminal.

use converter_types::{ConversionError, CurrencyListing, RateQuote};

/// Message shown to the user for each failure kind.
pub fn error_message(err: &ConversionError) -> String {
    match err {
        ConversionError::InvalidAmount(detail) => {
            format!("Please enter a valid amount ({})", detail)
        }
        ConversionError::RateUnavailable { from, to, reason } => {
            format!("No exchange rate available for {} -> {} ({})", from, to, reason)
        }
        ConversionError::UnknownCurrency(code) => format!("Unknown currency: {}", code),
    }
}

/// `1 USD = 0.92 EUR`, with the day appended for historical rates.
pub fn rate_line(quote: &RateQuote) -> String {
    match quote.date {
        Some(day) => format!("1 {} = {} {} on {}", quote.from, quote.rate, quote.to, day),
        None => format!("1 {} = {} {}", quote.from, quote.rate, quote.to),
    }
}

/// `EUR  €     Euro`; codes outside the catalog print alone.
pub fn listing_line(listing: &CurrencyListing) -> String {
    match (&listing.symbol, &listing.name) {
        (Some(symbol), Some(name)) => format!("{}  {:<5} {}", listing.code, symbol, name),
        _ => listing.code.to_string(),
    }
}
