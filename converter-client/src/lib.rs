//! # Converter Client
//!
//! A `RateProvider` backed by a ratesapi-compatible HTTP service
//! (Frankfurter, exchangerate.host and friends).
//!
//! Symbols are not served by these APIs, so they come from the local
//! `exchange-rates` catalog.

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use converter_types::{CurrencyCode, ProviderError, Rate, RateProvider, RatesResponse};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

/// Public Frankfurter endpoint, backed by ECB reference rates.
pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";

/// Applied to every request unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ClientError> for ProviderError {
    fn from(err: ClientError) -> Self {
        ProviderError::ServiceUnavailable(err.to_string())
    }
}

/// Exchange rates over HTTP.
pub struct HttpRateProvider {
    base_url: String,
    timeout: Duration,
    http: Client,
}

impl HttpRateProvider {
    /// Creates a new provider for the given service root.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            http: Client::new(),
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetches rates quoted against `base`, optionally restricted to one
    /// target and optionally for a past day.
    pub async fn fetch_rates(
        &self,
        base: &CurrencyCode,
        target: Option<&CurrencyCode>,
        date: Option<NaiveDate>,
    ) -> Result<RatesResponse, ClientError> {
        let path = match date {
            Some(day) => format!("/{}", day.format("%Y-%m-%d")),
            None => "/latest".to_string(),
        };

        let mut query = vec![("base", base.as_str())];
        if let Some(target) = target {
            query.push(("symbols", target.as_str()));
        }

        self.get(&path, &query).await
    }

    async fn rate_from_service(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
        date: Option<NaiveDate>,
    ) -> Result<Rate, ProviderError> {
        if from == to {
            return Ok(Rate::ONE);
        }

        let body = match self.fetch_rates(from, Some(to), date).await {
            Ok(body) => body,
            Err(ClientError::Api { status, message })
                if status == StatusCode::NOT_FOUND.as_u16()
                    || status == StatusCode::UNPROCESSABLE_ENTITY.as_u16() =>
            {
                tracing::debug!(%from, %to, status, %message, "pair rejected by rates service");
                return Err(ProviderError::RateNotAvailable(from.clone(), to.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        let value = body
            .rates
            .get(to.as_str())
            .copied()
            .ok_or_else(|| ProviderError::RateNotAvailable(from.clone(), to.clone()))?;

        Ok(Rate::from_f64(value)?)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, ?query, "requesting rates");

        let resp = self
            .http
            .get(&url)
            .query(query)
            .timeout(self.timeout)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| {
                    v.get("message")
                        .or_else(|| v.get("error"))
                        .and_then(|e| e.as_str())
                        .map(String::from)
                })
                .unwrap_or(body);
            tracing::warn!(status = status.as_u16(), %message, "rates service returned an error");
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    async fn get_rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Rate, ProviderError> {
        self.rate_from_service(from, to, None).await
    }

    async fn get_symbol(&self, code: &CurrencyCode) -> Result<String, ProviderError> {
        exchange_rates::symbol(code.as_str())
            .map(String::from)
            .ok_or_else(|| ProviderError::UnsupportedCurrency(code.to_string()))
    }

    async fn list_supported_currencies(
        &self,
        base: &CurrencyCode,
    ) -> Result<BTreeSet<CurrencyCode>, ProviderError> {
        let body = match self.fetch_rates(base, None, None).await {
            Ok(body) => body,
            Err(ClientError::Api { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                return Err(ProviderError::UnsupportedCurrency(base.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut codes: BTreeSet<CurrencyCode> = body
            .rates
            .keys()
            .filter_map(|key| match CurrencyCode::new(key) {
                Ok(code) => Some(code),
                Err(e) => {
                    tracing::warn!(%key, error = %e, "skipping malformed currency code");
                    None
                }
            })
            .collect();
        codes.insert(base.clone());
        Ok(codes)
    }

    async fn get_historical_rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
        date: NaiveDate,
    ) -> Result<Rate, ProviderError> {
        self.rate_from_service(from, to, Some(date)).await
    }
}
