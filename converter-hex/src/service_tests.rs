//! ConversionService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::{BTreeSet, HashMap};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use converter_types::{
        Amount, ConversionError, ConversionRequest, CurrencyCode, ProviderError, Rate,
        RateProvider,
    };

    use crate::{ConversionService, parse_request};

    /// Simple in-memory provider for testing the service layer.
    pub struct MockProvider {
        rates: HashMap<(String, String), Rate>,
        historical: HashMap<(String, String, NaiveDate), Rate>,
        symbols: HashMap<String, String>,
        offline_pairs: Vec<(String, String)>,
        calls: Mutex<Vec<String>>,
    }

    impl MockProvider {
        pub fn new() -> Self {
            let mut symbols = HashMap::new();
            symbols.insert("USD".to_string(), "$".to_string());
            symbols.insert("EUR".to_string(), "€".to_string());
            symbols.insert("GBP".to_string(), "£".to_string());

            Self {
                rates: HashMap::new(),
                historical: HashMap::new(),
                symbols,
                offline_pairs: Vec::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn with_rate(mut self, from: &str, to: &str, rate: Decimal) -> Self {
            self.rates
                .insert((from.into(), to.into()), Rate::new(rate).unwrap());
            self
        }

        pub fn with_historical(mut self, from: &str, to: &str, day: NaiveDate, rate: Decimal) -> Self {
            self.historical
                .insert((from.into(), to.into(), day), Rate::new(rate).unwrap());
            self
        }

        /// Makes the pair fail as if the upstream service were unreachable.
        pub fn with_network_failure(mut self, from: &str, to: &str) -> Self {
            self.offline_pairs.push((from.into(), to.into()));
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl RateProvider for MockProvider {
        async fn get_rate(
            &self,
            from: &CurrencyCode,
            to: &CurrencyCode,
        ) -> Result<Rate, ProviderError> {
            self.record(format!("rate {}->{}", from, to));
            let key = (from.to_string(), to.to_string());
            if self.offline_pairs.contains(&key) {
                return Err(ProviderError::ServiceUnavailable("connection refused".into()));
            }
            self.rates
                .get(&key)
                .copied()
                .ok_or_else(|| ProviderError::RateNotAvailable(from.clone(), to.clone()))
        }

        async fn get_symbol(&self, code: &CurrencyCode) -> Result<String, ProviderError> {
            self.record(format!("symbol {}", code));
            self.symbols
                .get(code.as_str())
                .cloned()
                .ok_or_else(|| ProviderError::UnsupportedCurrency(code.to_string()))
        }

        async fn list_supported_currencies(
            &self,
            base: &CurrencyCode,
        ) -> Result<BTreeSet<CurrencyCode>, ProviderError> {
            self.record(format!("list {}", base));
            if !self.symbols.contains_key(base.as_str()) {
                return Err(ProviderError::UnsupportedCurrency(base.to_string()));
            }
            Ok(self
                .symbols
                .keys()
                .map(|c| CurrencyCode::new(c).unwrap())
                .collect())
        }

        async fn get_historical_rate(
            &self,
            from: &CurrencyCode,
            to: &CurrencyCode,
            date: NaiveDate,
        ) -> Result<Rate, ProviderError> {
            self.record(format!("historical {}->{} {}", from, to, date));
            self.historical
                .get(&(from.to_string(), to.to_string(), date))
                .copied()
                .ok_or_else(|| ProviderError::RateNotAvailable(from.clone(), to.clone()))
        }
    }

    fn amount(value: Decimal) -> Amount {
        Amount::new(value)
    }

    fn service() -> ConversionService<MockProvider> {
        ConversionService::new(
            MockProvider::new()
                .with_rate("USD", "EUR", dec!(0.92))
                .with_rate("EUR", "EUR", dec!(1))
                .with_rate("USD", "USD", dec!(1))
                .with_rate("GBP", "USD", dec!(1.27))
                .with_network_failure("USD", "XYZ"),
        )
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // convert
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_convert_multiplies_by_rate() {
        let service = service();
        let result = service.convert(amount(dec!(100)), "USD", "EUR").await;
        assert_eq!(result.unwrap(), dec!(92.00));
    }

    #[tokio::test]
    async fn test_convert_is_exact() {
        let service = service();
        let result = service
            .convert(amount(dec!(12.345)), "GBP", "USD")
            .await
            .unwrap();
        assert_eq!(result, dec!(15.67815));
    }

    #[tokio::test]
    async fn test_convert_zero_is_zero() {
        let service = service();
        let result = service.convert(Amount::ZERO, "USD", "EUR").await.unwrap();
        assert!(result.is_zero());
    }

    #[tokio::test]
    async fn test_convert_same_currency_is_identity() {
        let service = service();
        let result = service.convert(amount(dec!(50)), "EUR", "EUR").await;
        assert_eq!(result.unwrap(), dec!(50));
    }

    #[tokio::test]
    async fn test_convert_normalizes_codes() {
        let service = service();
        let result = service.convert(amount(dec!(10)), "usd", " eur ").await;
        assert_eq!(result.unwrap(), dec!(9.2));
        assert_eq!(service.provider().calls(), vec!["rate USD->EUR"]);
    }

    #[tokio::test]
    async fn test_convert_passes_negative_amounts_through() {
        let service = service();
        let result = service.convert(amount(dec!(-5)), "USD", "EUR").await;
        assert_eq!(result.unwrap(), dec!(-4.60));
    }

    #[tokio::test]
    async fn test_convert_unsupported_code_is_rate_unavailable() {
        let service = service();
        let result = service.convert(amount(dec!(1)), "USD", "JPY").await;
        assert!(matches!(
            result,
            Err(ConversionError::RateUnavailable { ref from, ref to, .. })
                if from == "USD" && to == "JPY"
        ));
    }

    #[tokio::test]
    async fn test_convert_malformed_code_is_rate_unavailable() {
        let service = service();
        let result = service.convert(amount(dec!(1)), "USD", "EURO").await;
        assert!(matches!(
            result,
            Err(ConversionError::RateUnavailable { .. })
        ));
        // Malformed codes never reach the provider
        assert!(service.provider().calls().is_empty());
    }

    #[tokio::test]
    async fn test_convert_network_failure_is_rate_unavailable() {
        let service = service();
        let original = amount(dec!(100));

        let err = service
            .convert(original, "USD", "XYZ")
            .await
            .unwrap_err();

        match err {
            ConversionError::RateUnavailable { from, to, reason } => {
                assert_eq!(from, "USD");
                assert_eq!(to, "XYZ");
                assert!(reason.contains("connection refused"));
            }
            other => panic!("expected RateUnavailable, got {:?}", other),
        }
        assert_eq!(original.value(), dec!(100));
    }

    #[tokio::test]
    async fn test_convert_overflow_is_invalid_amount() {
        let service = ConversionService::new(
            MockProvider::new().with_rate("USD", "EUR", Decimal::MAX),
        );
        let result = service.convert(amount(dec!(10)), "USD", "EUR").await;
        assert!(matches!(result, Err(ConversionError::InvalidAmount(_))));
    }

    #[tokio::test]
    async fn test_convert_never_lists_currencies() {
        let service = service();
        service.convert(amount(dec!(1)), "USD", "EUR").await.unwrap();
        service.get_symbol("EUR").await.unwrap();
        assert!(
            service
                .provider()
                .calls()
                .iter()
                .all(|c| !c.starts_with("list"))
        );
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // convert_on
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_convert_on_uses_historical_rate() {
        let day = NaiveDate::from_ymd_opt(2020, 3, 4).unwrap();
        let service = ConversionService::new(
            MockProvider::new()
                .with_rate("USD", "EUR", dec!(0.92))
                .with_historical("USD", "EUR", day, dec!(0.89)),
        );

        let result = service.convert_on(amount(dec!(100)), "USD", "EUR", day).await;
        assert_eq!(result.unwrap(), dec!(89));
        assert_eq!(service.provider().calls(), vec!["historical USD->EUR 2020-03-04"]);
    }

    #[tokio::test]
    async fn test_convert_on_missing_day_is_rate_unavailable() {
        let day = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        let service = service();
        let result = service.convert_on(amount(dec!(1)), "USD", "EUR", day).await;
        assert!(matches!(result, Err(ConversionError::RateUnavailable { .. })));
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // get_symbol
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_get_symbol_success() {
        let service = service();
        assert_eq!(service.get_symbol("USD").await.unwrap(), "$");
        assert_eq!(service.get_symbol("eur").await.unwrap(), "€");
    }

    #[tokio::test]
    async fn test_get_symbol_unknown_currency() {
        let service = service();
        assert_eq!(
            service.get_symbol("ZZZ").await,
            Err(ConversionError::UnknownCurrency("ZZZ".into()))
        );
        assert_eq!(
            service.get_symbol("Z1").await,
            Err(ConversionError::UnknownCurrency("Z1".into()))
        );
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // quote / quote_input
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_quote_formats_with_target_symbol() {
        let service = service();
        let request = ConversionRequest::new(amount(dec!(100)), "USD", "EUR").unwrap();

        let result = service.quote(&request).await.unwrap();

        assert_eq!(result.converted_amount, dec!(92.00));
        assert_eq!(result.symbol, "€");
        assert_eq!(result.rate.value(), dec!(0.92));
        assert_eq!(result.to_string(), "€92.00");
    }

    #[tokio::test]
    async fn test_quote_same_currency() {
        let service = service();
        let result = service.quote_input("50", "EUR", "EUR").await.unwrap();
        assert_eq!(result.to_string(), "€50.00");
    }

    #[tokio::test]
    async fn test_quote_unknown_symbol_is_unknown_currency() {
        let service = ConversionService::new(
            MockProvider::new().with_rate("USD", "CHF", dec!(0.91)),
        );
        let result = service.quote_input("1", "USD", "CHF").await;
        assert_eq!(result, Err(ConversionError::UnknownCurrency("CHF".into())));
    }

    #[tokio::test]
    async fn test_quote_input_rejects_blank_amount() {
        let service = service();
        let result = service.quote_input("  ", "USD", "EUR").await;
        assert!(matches!(result, Err(ConversionError::InvalidAmount(_))));
        assert!(service.provider().calls().is_empty());
    }

    #[tokio::test]
    async fn test_quote_input_rejects_garbage_amount() {
        let service = service();
        let result = service.quote_input("ten", "USD", "EUR").await;
        assert!(matches!(result, Err(ConversionError::InvalidAmount(_))));
    }

    #[tokio::test]
    async fn test_quote_with_historical_request() {
        let day = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
        let service = ConversionService::new(
            MockProvider::new().with_historical("GBP", "USD", day, dec!(1.41)),
        );
        let request = parse_request("10", "gbp", "usd").unwrap().as_of(Some(day));

        let result = service.quote(&request).await.unwrap();
        assert_eq!(result.to_string(), "$14.10");
    }

    #[test]
    fn test_parse_request_checks_amount_first() {
        let err = parse_request("", "??", "EUR").unwrap_err();
        assert!(matches!(err, ConversionError::InvalidAmount(_)));

        let err = parse_request("1", "??", "EUR").unwrap_err();
        assert!(matches!(err, ConversionError::RateUnavailable { .. }));
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // supported_currencies
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_supported_currencies_sorted() {
        let service = service();
        let codes = service.supported_currencies("usd").await.unwrap();
        let codes: Vec<&str> = codes.iter().map(|c| c.as_str()).collect();
        assert_eq!(codes, vec!["EUR", "GBP", "USD"]);
    }

    #[tokio::test]
    async fn test_supported_currencies_unknown_base() {
        let service = service();
        assert_eq!(
            service.supported_currencies("ZZZ").await,
            Err(ConversionError::UnknownCurrency("ZZZ".into()))
        );
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Logging
    // ─────────────────────────────────────────────────────────────────────────────

    /// Records the level of every event emitted while installed.
    struct LevelRecorder(Arc<Mutex<Vec<Level>>>);

    impl<S: Subscriber> Layer<S> for LevelRecorder {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    #[tokio::test]
    async fn test_user_errors_stay_below_warn() {
        let levels = Arc::new(Mutex::new(Vec::new()));
        let _guard = tracing::subscriber::set_default(
            tracing_subscriber::registry().with(LevelRecorder(levels.clone())),
        );

        let service = service();
        assert!(service.get_symbol("ZZZ").await.is_err());
        assert!(
            service
                .convert(amount(dec!(1)), "USD", "XYZ")
                .await
                .is_err()
        );
        assert!(service.convert(amount(dec!(1)), "USD", "GBP").await.is_err());

        let levels = levels.lock().unwrap();
        assert!(!levels.is_empty(), "failures should still be logged");
        assert!(
            levels.iter().all(|level| *level > Level::WARN),
            "unexpected levels: {:?}",
            *levels
        );
    }
}
