//! Rules resolver - deterministic exchange->suffix resolution.

use std::borrow::Cow;
use std::sync::Arc;

use crate::errors::MarketDataError;
use crate::models::{InstrumentId, ProviderId, ProviderInstrument};

use super::exchange_map::ExchangeMap;
use super::traits::SymbolResolver;

/// Resolves provider instruments from deterministic exchange->suffix rules.
///
/// Providers that take catalog identifiers as-is (the fixed price table)
/// are listed as pass-through and never consult the exchange map.
pub struct RulesResolver {
    exchange_map: ExchangeMap,
    passthrough: Vec<ProviderId>,
}

impl RulesResolver {
    /// Create a new RulesResolver with the default exchange map.
    pub fn new() -> Self {
        Self::with_exchange_map(ExchangeMap::new())
    }

    /// Create a RulesResolver with a custom exchange map.
    pub fn with_exchange_map(exchange_map: ExchangeMap) -> Self {
        Self {
            exchange_map,
            passthrough: vec![Cow::Borrowed(crate::provider::fixed::PROVIDER_ID)],
        }
    }

    fn resolve_equity(
        &self,
        provider: &ProviderId,
        instrument: &InstrumentId,
    ) -> Result<ProviderInstrument, MarketDataError> {
        let Some(exchange) = instrument.exchange.as_deref() else {
            // No exchange = assume the provider's home market, no suffix needed
            return Ok(ProviderInstrument::new(instrument.ticker.clone(), None));
        };

        let mapping = self.exchange_map.get(exchange, provider).ok_or_else(|| {
            MarketDataError::ResolutionFailed {
                provider: provider.to_string(),
                identifier: instrument.to_string(),
            }
        })?;

        Ok(ProviderInstrument::new(
            Arc::<str>::from(format!("{}{}", instrument.ticker, mapping.suffix)),
            Some(mapping.currency.clone()),
        ))
    }
}

impl Default for RulesResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolResolver for RulesResolver {
    fn resolve(
        &self,
        provider: &ProviderId,
        instrument: &InstrumentId,
    ) -> Result<ProviderInstrument, MarketDataError> {
        if self.passthrough.contains(provider) {
            return Ok(ProviderInstrument::new(
                Arc::<str>::from(instrument.to_string()),
                None,
            ));
        }
        self.resolve_equity(provider, instrument)
    }
}
