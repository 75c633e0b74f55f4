//! Exchange prefix to provider suffix mappings.
//!
//! Catalog identifiers carry the exchange as a prefix (`KRX:379800`). Both
//! the common exchange code and the ISO 10383 MIC are accepted as prefixes.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::models::ProviderId;

/// Provider-specific exchange suffix and currency.
#[derive(Clone, Debug)]
pub struct ExchangeSuffix {
    /// The suffix to append to the ticker (e.g., ".KS" for Yahoo KOSPI).
    pub suffix: Cow<'static, str>,
    /// The trading currency for this exchange (e.g., "KRW" for KOSPI).
    pub currency: Cow<'static, str>,
}

/// Exchange prefix to provider suffix mapping database.
pub struct ExchangeMap {
    mappings: HashMap<Cow<'static, str>, HashMap<ProviderId, ExchangeSuffix>>,
}

impl Default for ExchangeMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ExchangeMap {
    /// Create a new ExchangeMap with default mappings.
    pub fn new() -> Self {
        let mut map = Self::empty();
        map.load_defaults();
        map
    }

    /// Create a map with no entries.
    pub fn empty() -> Self {
        Self {
            mappings: HashMap::new(),
        }
    }

    /// Load all default exchange mappings.
    fn load_defaults(&mut self) {
        // ===== Korea =====
        self.add(&["KRX", "KOSPI", "KSC", "XKRX"], &[("YAHOO", ".KS", "KRW")]);
        self.add(&["KOSDAQ", "KOE", "XKOS"], &[("YAHOO", ".KQ", "KRW")]);

        // ===== North America =====
        self.add(&["NYSE", "XNYS"], &[("YAHOO", "", "USD")]);
        self.add(&["NASDAQ", "XNAS"], &[("YAHOO", "", "USD")]);
        self.add(&["AMEX", "NYSEARCA", "XASE", "ARCX"], &[("YAHOO", "", "USD")]);
        self.add(&["TSX", "XTSE"], &[("YAHOO", ".TO", "CAD")]);

        // ===== Asia =====
        self.add(&["TSE", "JPX", "XTKS"], &[("YAHOO", ".T", "JPY")]);
        self.add(&["HKEX", "XHKG"], &[("YAHOO", ".HK", "HKD")]);
        self.add(&["SSE", "XSHG"], &[("YAHOO", ".SS", "CNY")]);
        self.add(&["SZSE", "XSHE"], &[("YAHOO", ".SZ", "CNY")]);
        self.add(&["NSE", "XNSE"], &[("YAHOO", ".NS", "INR")]);
        self.add(&["TWSE", "XTAI"], &[("YAHOO", ".TW", "TWD")]);

        // ===== Europe =====
        self.add(&["LSE", "XLON"], &[("YAHOO", ".L", "GBP")]);
        self.add(&["XETRA", "XETR"], &[("YAHOO", ".DE", "EUR")]);
    }

    /// Register every alias of one exchange with the same provider suffixes.
    pub fn add(
        &mut self,
        aliases: &[&'static str],
        providers: &[(&'static str, &'static str, &'static str)],
    ) {
        let mut provider_map = HashMap::new();
        for (provider, suffix, currency) in providers {
            provider_map.insert(
                Cow::Borrowed(*provider),
                ExchangeSuffix {
                    suffix: Cow::Borrowed(*suffix),
                    currency: Cow::Borrowed(*currency),
                },
            );
        }
        for alias in aliases {
            self.mappings
                .insert(Cow::Borrowed(*alias), provider_map.clone());
        }
    }

    /// Get the suffix and currency for an exchange prefix and provider.
    ///
    /// The prefix is matched case-insensitively.
    pub fn get(&self, exchange: &str, provider: &ProviderId) -> Option<&ExchangeSuffix> {
        self.mappings
            .get(exchange.to_ascii_uppercase().as_str())?
            .get(provider)
    }

    /// Get the suffix for an exchange prefix and provider.
    pub fn get_suffix(&self, exchange: &str, provider: &ProviderId) -> Option<&str> {
        self.get(exchange, provider).map(|s| s.suffix.as_ref())
    }

    /// Get the currency for an exchange prefix and provider.
    pub fn get_currency(&self, exchange: &str, provider: &ProviderId) -> Option<&str> {
        self.get(exchange, provider).map(|s| s.currency.as_ref())
    }

    /// Check if an exchange prefix is known.
    pub fn has_exchange(&self, exchange: &str) -> bool {
        self.mappings
            .contains_key(exchange.to_ascii_uppercase().as_str())
    }
}
