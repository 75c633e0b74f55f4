//! Resolution traits for the market data crate.
//!
//! Defines the abstraction for translating catalog identifiers to
//! provider-specific symbols.

use crate::errors::MarketDataError;
use crate::models::{InstrumentId, ProviderId, ProviderInstrument};

/// Main symbol resolver interface.
pub trait SymbolResolver: Send + Sync {
    /// Resolve a provider-specific instrument.
    ///
    /// # Arguments
    /// * `provider` - The provider ID to resolve for (e.g., "YAHOO")
    /// * `instrument` - The canonical instrument parsed from the catalog identifier
    ///
    /// # Returns
    /// The provider instrument, or `ResolutionFailed` when the exchange prefix
    /// has no mapping for this provider.
    fn resolve(
        &self,
        provider: &ProviderId,
        instrument: &InstrumentId,
    ) -> Result<ProviderInstrument, MarketDataError>;
}
