//! Quote service - facade for the market-data crate.
//!
//! Turns catalog identifiers into provider symbols, fetches every price
//! concurrently and folds failures into "unavailable" entries.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use log::{debug, warn};

use pension_market_data::errors::MarketDataError;
use pension_market_data::{
    InstrumentId, MarketDataProvider, ProviderId, RulesResolver, SymbolResolver,
};

use super::model::PriceSnapshot;

#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
    /// Fetch the current price of every identifier.
    ///
    /// Never fails as a whole: an identifier whose lookup fails maps to `None`.
    async fn fetch_prices(&self, ids: &[String]) -> PriceSnapshot;

    /// Fetch one price, surfacing the failure.
    async fn fetch_price(&self, id: &str) -> Result<f64, MarketDataError>;
}

pub struct QuoteService {
    provider: Arc<dyn MarketDataProvider>,
    resolver: Arc<dyn SymbolResolver>,
    timeout: Duration,
}

impl QuoteService {
    /// Lookups are bounded by the provider's own `request_timeout` until
    /// [`QuoteService::with_timeout`] overrides it.
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        let timeout = provider.rate_limit().request_timeout;
        Self {
            provider,
            resolver: Arc::new(RulesResolver::new()),
            timeout,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn lookup(&self, id: &str) -> Result<f64, MarketDataError> {
        let instrument =
            InstrumentId::parse(id).ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Invalid instrument identifier '{}'", id),
            })?;
        let provider_id: ProviderId = Cow::Borrowed(self.provider.id());
        let provider_instrument = self.resolver.resolve(&provider_id, &instrument)?;

        let quote = tokio::time::timeout(
            self.timeout,
            self.provider.get_latest_quote(&provider_instrument),
        )
        .await
        .map_err(|_| MarketDataError::Timeout {
            provider: provider_id.to_string(),
        })??;

        let price = quote.price().ok_or_else(|| MarketDataError::ValidationFailed {
            message: format!("Non-positive price {} for {}", quote.close, id),
        })?;

        debug!(
            "Price for {} ({}) from {}: {} {:?}",
            id, provider_instrument.symbol, quote.source, price, quote.kind
        );
        Ok(price)
    }
}

#[async_trait]
impl QuoteServiceTrait for QuoteService {
    async fn fetch_prices(&self, ids: &[String]) -> PriceSnapshot {
        let concurrency = self.provider.rate_limit().max_concurrency.max(1);

        let results: Vec<(String, Option<f64>)> = stream::iter(ids.iter().cloned())
            .map(|id| async move {
                match self.lookup(&id).await {
                    Ok(price) => (id, Some(price)),
                    Err(e) => {
                        warn!("Price unavailable for {}: {}", id, e);
                        (id, None)
                    }
                }
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        let snapshot: PriceSnapshot = results.into_iter().collect();
        debug!(
            "Fetched {} prices from {}, {} unavailable",
            snapshot.len(),
            self.provider.id(),
            snapshot.unavailable().len()
        );
        snapshot
    }

    async fn fetch_price(&self, id: &str) -> Result<f64, MarketDataError> {
        self.lookup(id).await
    }
}
