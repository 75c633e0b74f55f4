//! Market data provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{ProviderInstrument, Quote};

use super::capabilities::RateLimit;

/// Trait for market data providers.
///
/// Implement this trait to add support for a new price source.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use pension_market_data::provider::{MarketDataProvider, RateLimit};
///
/// struct MyProvider {
///     api_key: String,
/// }
///
/// #[async_trait]
/// impl MarketDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     async fn get_latest_quote(
///         &self,
///         instrument: &ProviderInstrument,
///     ) -> Result<Quote, MarketDataError> {
///         // ...
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Used for logging and for symbol resolution.
    fn id(&self) -> &'static str;

    /// Rate limiting configuration.
    fn rate_limit(&self) -> RateLimit {
        RateLimit::default()
    }

    /// Fetch the best available current price for an instrument.
    ///
    /// Implementations prefer the intraday price and fall back to the most
    /// recent close. The returned quote must carry a positive price.
    async fn get_latest_quote(
        &self,
        instrument: &ProviderInstrument,
    ) -> Result<Quote, MarketDataError>;
}
