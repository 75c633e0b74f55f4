use std::fmt;
use std::sync::Arc;

/// Provider-agnostic instrument identifier.
///
/// Catalog identifiers are either exchange-qualified (`KRX:379800`) or bare
/// tickers (`VTI`). The exchange prefix is kept upper-cased so lookups in the
/// exchange map are case-insensitive.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct InstrumentId {
    pub exchange: Option<Arc<str>>,
    pub ticker: Arc<str>,
}

impl InstrumentId {
    /// Parse a catalog identifier.
    ///
    /// Returns `None` for blank input or a blank ticker after the prefix.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        match raw.split_once(':') {
            Some((exchange, ticker)) => {
                let exchange = exchange.trim();
                let ticker = ticker.trim();
                if ticker.is_empty() {
                    return None;
                }
                Some(Self {
                    exchange: (!exchange.is_empty())
                        .then(|| Arc::from(exchange.to_ascii_uppercase())),
                    ticker: Arc::from(ticker),
                })
            }
            None => Some(Self {
                exchange: None,
                ticker: Arc::from(raw),
            }),
        }
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.exchange {
            Some(exchange) => write!(f, "{}:{}", exchange, self.ticker),
            None => write!(f, "{}", self.ticker),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exchange_qualified() {
        let id = InstrumentId::parse("KRX:379800").unwrap();
        assert_eq!(id.exchange.as_deref(), Some("KRX"));
        assert_eq!(id.ticker.as_ref(), "379800");
        assert_eq!(id.to_string(), "KRX:379800");
    }

    #[test]
    fn test_parse_lowercase_exchange() {
        let id = InstrumentId::parse("krx:0072R0").unwrap();
        assert_eq!(id.exchange.as_deref(), Some("KRX"));
        assert_eq!(id.ticker.as_ref(), "0072R0");
    }

    #[test]
    fn test_parse_bare_ticker() {
        let id = InstrumentId::parse("VTI").unwrap();
        assert!(id.exchange.is_none());
        assert_eq!(id.to_string(), "VTI");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(InstrumentId::parse("").is_none());
        assert!(InstrumentId::parse("   ").is_none());
        assert!(InstrumentId::parse("KRX:").is_none());
    }
}
