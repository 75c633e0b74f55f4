use chrono::{DateTime, Utc};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which price a quote carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteKind {
    /// Last traded price of the current session
    Intraday,
    /// Close of the most recent completed session
    PreviousClose,
    /// Price supplied by the user or a fixed table
    Manual,
}

/// Market data quote
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Timestamp of the quote
    pub timestamp: DateTime<Utc>,

    /// Current price (intraday last or session close)
    pub close: Decimal,

    /// Quote currency
    pub currency: String,

    /// Source of the quote (MANUAL, YAHOO, ...)
    pub source: String,

    pub kind: QuoteKind,
}

impl Quote {
    /// Create a new quote
    pub fn new(
        timestamp: DateTime<Utc>,
        close: Decimal,
        currency: String,
        source: String,
        kind: QuoteKind,
    ) -> Self {
        Self {
            timestamp,
            close,
            currency,
            source,
            kind,
        }
    }

    /// The price as a float, or `None` when it is not a positive finite number.
    pub fn price(&self) -> Option<f64> {
        self.close
            .to_f64()
            .filter(|price| price.is_finite() && *price > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_new() {
        let quote = Quote::new(
            Utc::now(),
            dec!(50000),
            "KRW".to_string(),
            "YAHOO".to_string(),
            QuoteKind::Intraday,
        );
        assert_eq!(quote.close, dec!(50000));
        assert_eq!(quote.currency, "KRW");
        assert_eq!(quote.price(), Some(50000.0));
    }

    #[test]
    fn test_non_positive_close_is_not_a_price() {
        let zero = Quote::new(
            Utc::now(),
            Decimal::ZERO,
            "KRW".to_string(),
            "YAHOO".to_string(),
            QuoteKind::PreviousClose,
        );
        assert_eq!(zero.price(), None);

        let negative = Quote::new(
            Utc::now(),
            dec!(-1.5),
            "KRW".to_string(),
            "YAHOO".to_string(),
            QuoteKind::PreviousClose,
        );
        assert_eq!(negative.price(), None);
    }

    #[test]
    fn test_fractional_price() {
        let quote = Quote::new(
            Utc::now(),
            dec!(150.25),
            "USD".to_string(),
            "MANUAL".to_string(),
            QuoteKind::Manual,
        );
        assert_eq!(quote.price(), Some(150.25));
    }
}
