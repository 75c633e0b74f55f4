//! Fixed price provider.
//!
//! Serves prices from an in-memory table keyed by catalog identifier. Used
//! for manually entered prices and for running without network access.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::{ProviderInstrument, Quote, QuoteKind};
use crate::provider::{MarketDataProvider, RateLimit};

pub const PROVIDER_ID: &str = "MANUAL";

/// Provider backed by a fixed price table.
pub struct FixedPriceProvider {
    prices: RwLock<HashMap<String, Decimal>>,
    currency: String,
}

impl FixedPriceProvider {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            prices: RwLock::new(HashMap::new()),
            currency: currency.into(),
        }
    }

    /// Build a provider from `(identifier, price)` pairs.
    ///
    /// Prices that cannot be represented as a decimal are skipped.
    pub fn from_prices<I, K>(currency: impl Into<String>, prices: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let table = prices
            .into_iter()
            .filter_map(|(id, price)| Decimal::from_f64(price).map(|p| (id.into(), p)))
            .collect();
        Self {
            prices: RwLock::new(table),
            currency: currency.into(),
        }
    }

    pub async fn set_price(&self, identifier: impl Into<String>, price: Decimal) {
        self.prices.write().await.insert(identifier.into(), price);
    }

    pub async fn remove_price(&self, identifier: &str) {
        self.prices.write().await.remove(identifier);
    }
}

#[async_trait]
impl MarketDataProvider for FixedPriceProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn rate_limit(&self) -> RateLimit {
        RateLimit {
            max_concurrency: 32,
            request_timeout: Duration::from_secs(1),
        }
    }

    async fn get_latest_quote(
        &self,
        instrument: &ProviderInstrument,
    ) -> Result<Quote, MarketDataError> {
        let symbol = instrument.symbol.as_ref();
        let close = self
            .prices
            .read()
            .await
            .get(symbol)
            .copied()
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        if close <= Decimal::ZERO {
            return Err(MarketDataError::ValidationFailed {
                message: format!("Non-positive price {} for {}", close, symbol),
            });
        }

        debug!("Serving fixed price {} for {}", close, symbol);
        Ok(Quote::new(
            Utc::now(),
            close,
            self.currency.clone(),
            PROVIDER_ID.to_string(),
            QuoteKind::Manual,
        ))
    }
}
