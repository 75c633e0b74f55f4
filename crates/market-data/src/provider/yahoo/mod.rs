//! Yahoo Finance market data provider.
//!
//! Fetches the current price of exchange-listed funds and equities
//! (e.g., `379800.KS`, `VTI`). The intraday chart is tried first; when the
//! market is closed or the chart is empty the most recent daily close is used.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{ProviderInstrument, Quote, QuoteKind};
use crate::provider::{MarketDataProvider, RateLimit};

pub const PROVIDER_ID: &str = "YAHOO";

/// Chart interval and range for the intraday lookup.
const INTRADAY_INTERVAL: &str = "1m";
const INTRADAY_RANGE: &str = "1d";

/// Chart interval and range for the previous-close lookup. Five days covers
/// weekends and single-day holidays.
const CLOSE_INTERVAL: &str = "1d";
const CLOSE_RANGE: &str = "5d";

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
    default_currency: String,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        Ok(Self {
            connector,
            default_currency: "USD".to_string(),
        })
    }

    /// Currency used when the exchange map doesn't know the listing's currency.
    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = currency.into();
        self
    }

    fn currency_for(&self, instrument: &ProviderInstrument) -> String {
        instrument
            .currency
            .as_ref()
            .map(|c| c.to_string())
            .unwrap_or_else(|| self.default_currency.clone())
    }

    fn map_yahoo_error(symbol: &str, e: yahoo::YahooError) -> MarketDataError {
        if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
            MarketDataError::SymbolNotFound(symbol.to_string())
        } else {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            }
        }
    }

    /// Convert the timestamp and close of a Yahoo quote to our Quote model.
    fn to_quote(
        unix_timestamp: i64,
        raw_close: f64,
        currency: String,
        kind: QuoteKind,
    ) -> Result<Quote, MarketDataError> {
        let timestamp: DateTime<Utc> = Utc
            .timestamp_opt(unix_timestamp, 0)
            .single()
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Invalid timestamp: {}", unix_timestamp),
            })?;

        let close = Decimal::from_f64_retain(raw_close)
            .filter(|close| *close > Decimal::ZERO)
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Invalid close price {}", raw_close),
            })?;

        Ok(Quote::new(
            timestamp,
            close,
            currency,
            PROVIDER_ID.to_string(),
            kind,
        ))
    }

    async fn fetch_chart_quote(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
        currency: String,
        kind: QuoteKind,
    ) -> Result<Quote, MarketDataError> {
        let response = self
            .connector
            .get_quote_range(symbol, interval, range)
            .await
            .map_err(|e| Self::map_yahoo_error(symbol, e))?;

        let yahoo_quote = response.last_quote().map_err(|e| {
            warn!("No quotes returned for {}: {}", symbol, e);
            MarketDataError::SymbolNotFound(symbol.to_string())
        })?;

        Self::to_quote(
            yahoo_quote.timestamp as i64,
            yahoo_quote.close,
            currency,
            kind,
        )
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn rate_limit(&self) -> RateLimit {
        RateLimit {
            max_concurrency: 10,
            request_timeout: Duration::from_secs(10),
        }
    }

    async fn get_latest_quote(
        &self,
        instrument: &ProviderInstrument,
    ) -> Result<Quote, MarketDataError> {
        let symbol = instrument.symbol.as_ref();
        let currency = self.currency_for(instrument);

        debug!("Fetching latest quote for {} from Yahoo", symbol);

        match self
            .fetch_chart_quote(
                symbol,
                INTRADAY_INTERVAL,
                INTRADAY_RANGE,
                currency.clone(),
                QuoteKind::Intraday,
            )
            .await
        {
            Ok(quote) => return Ok(quote),
            Err(e) => {
                debug!(
                    "Intraday quote fetch failed for {}: {}, trying previous close",
                    symbol, e
                );
            }
        }

        self.fetch_chart_quote(
            symbol,
            CLOSE_INTERVAL,
            CLOSE_RANGE,
            currency,
            QuoteKind::PreviousClose,
        )
        .await
    }
}
