//! Offline rate provider backed by the catalog's reference rates.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use converter_types::{CurrencyCode, ProviderError, Rate, RateProvider};

use crate::{CurrencyEntry, lookup};

/// Rate provider that never touches the network.
///
/// Cross rates are derived through USD from the catalog. Individual pairs
/// can be pinned with [`StaticRateProvider::with_rate`], which also makes
/// codes outside the catalog quotable.
#[derive(Debug, Clone, Default)]
pub struct StaticRateProvider {
    overrides: HashMap<(CurrencyCode, CurrencyCode), Rate>,
}

impl StaticRateProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the rate for one direction of a pair.
    pub fn with_rate(mut self, from: CurrencyCode, to: CurrencyCode, rate: Rate) -> Self {
        self.overrides.insert((from, to), rate);
        self
    }

    /// Synchronous rate lookup shared by the trait methods.
    pub fn rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> Result<Rate, ProviderError> {
        if let Some(rate) = self.overrides.get(&(from.clone(), to.clone())) {
            return Ok(*rate);
        }

        let from_entry = catalog_entry(from)?;
        let to_entry = catalog_entry(to)?;

        if from == to {
            return Ok(Rate::ONE);
        }

        to_entry
            .per_usd
            .checked_div(from_entry.per_usd)
            .and_then(|value| Rate::new(value).ok())
            .ok_or_else(|| ProviderError::RateNotAvailable(from.clone(), to.clone()))
    }

    fn knows(&self, code: &CurrencyCode) -> bool {
        lookup(code.as_str()).is_some()
            || self
                .overrides
                .keys()
                .any(|(from, to)| from == code || to == code)
    }
}

fn catalog_entry(code: &CurrencyCode) -> Result<&'static CurrencyEntry, ProviderError> {
    lookup(code.as_str()).ok_or_else(|| ProviderError::UnsupportedCurrency(code.to_string()))
}

#[async_trait]
impl RateProvider for StaticRateProvider {
    async fn get_rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Rate, ProviderError> {
        let rate = self.rate(from, to)?;
        tracing::debug!(%from, %to, %rate, "static rate");
        Ok(rate)
    }

    async fn get_symbol(&self, code: &CurrencyCode) -> Result<String, ProviderError> {
        catalog_entry(code).map(|entry| entry.symbol.to_string())
    }

    async fn list_supported_currencies(
        &self,
        base: &CurrencyCode,
    ) -> Result<BTreeSet<CurrencyCode>, ProviderError> {
        if !self.knows(base) {
            return Err(ProviderError::UnsupportedCurrency(base.to_string()));
        }

        let mut codes = crate::all()
            .iter()
            .map(|entry| CurrencyCode::new(entry.code))
            .collect::<Result<BTreeSet<_>, _>>()?;
        for (from, to) in self.overrides.keys() {
            codes.insert(from.clone());
            codes.insert(to.clone());
        }
        Ok(codes)
    }
}
