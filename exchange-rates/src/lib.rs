//! Currency Catalog and Offline Exchange Rates
//!
//! This library carries the static knowledge the converter needs without a
//! network: the display name and symbol of each currency, and a reference
//! rate (units per one US dollar) used by [`StaticRateProvider`].
//! Currencies are defined declaratively with a macro that generates the table.
//!
//! # Adding a New Currency
//! Simply add a line to the `define_currencies!` invocation:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     ISK => ("Icelandic Krona", "kr", 138.5),
//! }
//! ```
//!
//! # Example
//! ```
//! use exchange_rates::{symbol, name};
//!
//! assert_eq!(symbol("usd"), Some("$"));
//! assert_eq!(name("EUR"), Some("Euro"));
//! ```

mod provider;

pub use provider::StaticRateProvider;

use converter_types::{CurrencyCode, CurrencyInfo, DomainError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ─────────────────────────────────────────────────────────────────────────────
// Catalog Entry
// ─────────────────────────────────────────────────────────────────────────────

/// Static metadata for one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyEntry {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    /// Reference value: how many units of this currency buy one US dollar.
    pub per_usd: Decimal,
}

impl CurrencyEntry {
    /// Returns the entry as a domain `CurrencyInfo`.
    pub fn to_info(&self) -> Result<CurrencyInfo, DomainError> {
        Ok(CurrencyInfo {
            code: CurrencyCode::new(self.code)?,
            name: self.name.to_string(),
            symbol: self.symbol.to_string(),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines the catalog table
// ─────────────────────────────────────────────────────────────────────────────

/// Defines the catalog from `CODE => ("Name", "symbol", units_per_usd)` lines.
macro_rules! define_currencies {
    (
        $(
            $code:ident => ($name:literal, $symbol:literal, $per_usd:tt)
        ),* $(,)?
    ) => {
        static CURRENCIES: &[CurrencyEntry] = &[
            $(
                CurrencyEntry {
                    code: stringify!($code),
                    name: $name,
                    symbol: $symbol,
                    per_usd: dec!($per_usd),
                }
            ),*
        ];
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS - Add new currencies here!
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    AUD => ("Australian Dollar", "A$", 1.52),
    BGN => ("Bulgarian Lev", "BGN", 1.80),
    BRL => ("Brazilian Real", "R$", 5.08),
    CAD => ("Canadian Dollar", "C$", 1.37),
    CHF => ("Swiss Franc", "CHF", 0.91),
    CNY => ("Chinese Yuan", "¥", 7.24),
    CZK => ("Czech Koruna", "Kč", 23.1),
    DKK => ("Danish Krone", "Kr", 6.87),
    EUR => ("Euro", "€", 0.92),
    GBP => ("British Pound", "£", 0.79),
    HKD => ("Hong Kong Dollar", "HK$", 7.82),
    HUF => ("Hungarian Forint", "Ft", 362.0),
    IDR => ("Indonesian Rupiah", "Rp", 16050.0),
    ILS => ("Israeli New Shekel", "₪", 3.72),
    INR => ("Indian Rupee", "₹", 83.12),
    ISK => ("Icelandic Krona", "kr", 138.5),
    JPY => ("Japanese Yen", "¥", 155.2),
    KRW => ("South Korean Won", "₩", 1370.0),
    MXN => ("Mexican Peso", "Mex$", 16.9),
    MYR => ("Malaysian Ringgit", "RM", 4.75),
    NOK => ("Norwegian Krone", "kr", 10.9),
    NZD => ("New Zealand Dollar", "NZ$", 1.66),
    PHP => ("Philippine Peso", "₱", 57.4),
    PLN => ("Polish Zloty", "zł", 3.98),
    RON => ("Romanian Leu", "L", 4.58),
    SEK => ("Swedish Krona", "kr", 10.8),
    SGD => ("Singapore Dollar", "S$", 1.35),
    THB => ("Thai Baht", "฿", 36.8),
    TRY => ("Turkish Lira", "₺", 32.3),
    USD => ("United States Dollar", "$", 1.0),
    ZAR => ("South African Rand", "R", 18.6),
}

// ─────────────────────────────────────────────────────────────────────────────
// Lookups
// ─────────────────────────────────────────────────────────────────────────────

/// Finds a catalog entry, ignoring case and surrounding whitespace.
pub fn lookup(code: &str) -> Option<&'static CurrencyEntry> {
    let code = code.trim();
    CURRENCIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Display symbol for a code, if the catalog knows it.
pub fn symbol(code: &str) -> Option<&'static str> {
    lookup(code).map(|c| c.symbol)
}

/// English name for a code, if the catalog knows it.
pub fn name(code: &str) -> Option<&'static str> {
    lookup(code).map(|c| c.name)
}

/// Every catalog entry, sorted by code.
pub fn all() -> &'static [CurrencyEntry] {
    CURRENCIES
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
