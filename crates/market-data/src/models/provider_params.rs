use serde::{Deserialize, Serialize};

use super::types::{Currency, ProviderSymbol};

/// Provider-specific instrument parameters.
/// Produced by resolver, consumed by providers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInstrument {
    /// Symbol in the provider's own notation (Yahoo: "379800.KS")
    pub symbol: ProviderSymbol,

    /// Trading currency of the listing, when the exchange map knows it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

impl ProviderInstrument {
    pub fn new(symbol: impl Into<ProviderSymbol>, currency: Option<Currency>) -> Self {
        Self {
            symbol: symbol.into(),
            currency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    #[test]
    fn test_provider_instrument_serialization() {
        let instrument = ProviderInstrument::new("379800.KS", Some(Cow::Borrowed("KRW")));
        let json = serde_json::to_string(&instrument).unwrap();
        assert!(json.contains("379800.KS"));
        assert!(json.contains("KRW"));
    }

    #[test]
    fn test_currency_omitted_when_unknown() {
        let instrument = ProviderInstrument::new("VTI", None);
        let json = serde_json::to_string(&instrument).unwrap();
        assert!(!json.contains("currency"));
    }
}
