//! Conversion Application Service
//!
//! Orchestrates conversions through the rate provider port.
//! Contains NO infrastructure logic - pure orchestration and error mapping.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use converter_types::{
    Amount, ConversionError, ConversionRequest, ConversionResult, CurrencyCode, DomainError,
    ProviderError, Rate, RateProvider,
};

/// Application service for currency conversion.
///
/// Generic over `P: RateProvider` - the adapter is injected at compile time.
/// This enables:
/// - Swapping live and offline rate sources without code changes
/// - Testing with a mock provider
/// - Compile-time checks for port implementation
///
/// The service holds no state between calls; every operation is a single
/// request/response against the provider.
pub struct ConversionService<P: RateProvider> {
    provider: P,
}

impl<P: RateProvider> ConversionService<P> {
    /// Creates a new conversion service with the given rate provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Returns a reference to the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts `amount` from one currency to another at the current rate.
    ///
    /// Codes are normalized to uppercase. The result is the exact product
    /// `amount * rate`; rounding is left to display.
    pub async fn convert(
        &self,
        amount: Amount,
        from: &str,
        to: &str,
    ) -> Result<Decimal, ConversionError> {
        let rate = self.get_rate(from, to, None).await?;
        multiply(amount, rate)
    }

    /// Converts `amount` at the rate that applied on `date`.
    pub async fn convert_on(
        &self,
        amount: Amount,
        from: &str,
        to: &str,
        date: NaiveDate,
    ) -> Result<Decimal, ConversionError> {
        let rate = self.get_rate(from, to, Some(date)).await?;
        multiply(amount, rate)
    }

    /// Looks up the rate for a pair, today or on a given day.
    ///
    /// Any provider failure, including a malformed code, becomes
    /// `RateUnavailable`.
    pub async fn get_rate(
        &self,
        from: &str,
        to: &str,
        on: Option<NaiveDate>,
    ) -> Result<Rate, ConversionError> {
        let (from_code, to_code) = parse_pair(from, to)?;
        self.rate_for(&from_code, &to_code, on).await
    }

    /// Returns the display symbol for a currency (e.g. `$` for USD).
    pub async fn get_symbol(&self, currency: &str) -> Result<String, ConversionError> {
        let code = CurrencyCode::new(currency)
            .map_err(|_| ConversionError::UnknownCurrency(currency.trim().to_string()))?;
        self.symbol_for(&code).await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Presentation-facing flow
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts a request and attaches the target currency's symbol.
    pub async fn quote(
        &self,
        request: &ConversionRequest,
    ) -> Result<ConversionResult, ConversionError> {
        let rate = self
            .rate_for(&request.from, &request.to, request.on)
            .await?;
        let converted_amount = multiply(request.amount, rate)?;
        let symbol = self.symbol_for(&request.to).await?;

        tracing::debug!(
            amount = %request.amount,
            from = %request.from,
            to = %request.to,
            %rate,
            %converted_amount,
            "converted"
        );

        Ok(ConversionResult {
            amount: request.amount,
            from: request.from.clone(),
            to: request.to.clone(),
            rate,
            converted_amount,
            symbol,
        })
    }

    /// Parses raw form input and quotes it. Blank amounts are rejected.
    pub async fn quote_input(
        &self,
        raw_amount: &str,
        from: &str,
        to: &str,
    ) -> Result<ConversionResult, ConversionError> {
        let request = parse_request(raw_amount, from, to)?;
        self.quote(&request).await
    }

    /// Lists the codes the provider can quote against `base`, sorted.
    ///
    /// Used to populate selection lists; conversion never depends on it.
    pub async fn supported_currencies(
        &self,
        base: &str,
    ) -> Result<Vec<CurrencyCode>, ConversionError> {
        let code = CurrencyCode::new(base)
            .map_err(|_| ConversionError::UnknownCurrency(base.trim().to_string()))?;

        self.provider
            .list_supported_currencies(&code)
            .await
            .map(|codes| codes.into_iter().collect())
            .map_err(|e| match e {
                ProviderError::UnsupportedCurrency(_) | ProviderError::InvalidData(_) => {
                    ConversionError::UnknownCurrency(code.to_string())
                }
                other => ConversionError::rate_unavailable(code.as_str(), "*", other),
            })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Provider calls
    // ─────────────────────────────────────────────────────────────────────────────

    async fn rate_for(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
        on: Option<NaiveDate>,
    ) -> Result<Rate, ConversionError> {
        let result = match on {
            Some(date) => self.provider.get_historical_rate(from, to, date).await,
            None => self.provider.get_rate(from, to).await,
        };

        result.map_err(|e| {
            tracing::debug!(%from, %to, error = %e, "rate lookup failed");
            ConversionError::rate_unavailable(from.as_str(), to.as_str(), e)
        })
    }

    async fn symbol_for(&self, code: &CurrencyCode) -> Result<String, ConversionError> {
        self.provider.get_symbol(code).await.map_err(|e| {
            tracing::debug!(%code, error = %e, "symbol lookup failed");
            ConversionError::UnknownCurrency(code.to_string())
        })
    }
}

/// Builds a request from raw form input.
///
/// The amount is validated first, so a blank amount reports
/// `InvalidAmount` even when a code is also bad. Malformed codes report
/// `RateUnavailable`, as they would from the provider.
pub fn parse_request(
    raw_amount: &str,
    from: &str,
    to: &str,
) -> Result<ConversionRequest, ConversionError> {
    let amount = Amount::parse(raw_amount)?;
    let (from, to) = parse_pair(from, to)?;
    Ok(ConversionRequest {
        amount,
        from,
        to,
        on: None,
    })
}

fn parse_pair(from: &str, to: &str) -> Result<(CurrencyCode, CurrencyCode), ConversionError> {
    let unavailable = |e: DomainError| ConversionError::rate_unavailable(from.trim(), to.trim(), e);
    let from_code = CurrencyCode::new(from).map_err(unavailable)?;
    let to_code = CurrencyCode::new(to).map_err(unavailable)?;
    Ok((from_code, to_code))
}

fn multiply(amount: Amount, rate: Rate) -> Result<Decimal, ConversionError> {
    rate.apply(amount).ok_or_else(|| {
        ConversionError::InvalidAmount(format!("{} x {} is out of range", amount, rate))
    })
}
