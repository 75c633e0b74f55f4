//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching a price.
///
/// Every variant is recoverable from the caller's point of view: a failed
/// lookup only makes one instrument's price unavailable.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The catalog identifier could not be translated for a provider.
    #[error("Resolution failed for provider {provider}: {identifier}")]
    ResolutionFailed {
        /// The provider that could not resolve the identifier
        provider: String,
        /// The catalog identifier
        identifier: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned data that failed validation checks.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns true when the provider never knew the symbol, as opposed to a
    /// transient failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::SymbolNotFound(_) | Self::ResolutionFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(MarketDataError::SymbolNotFound("INVALID".to_string()).is_not_found());
        assert!(MarketDataError::ResolutionFailed {
            provider: "YAHOO".to_string(),
            identifier: "XX:1".to_string(),
        }
        .is_not_found());
        assert!(!MarketDataError::Timeout {
            provider: "YAHOO".to_string(),
        }
        .is_not_found());
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert_eq!(format!("{}", error), "Symbol not found: INVALID");

        let error = MarketDataError::ProviderError {
            provider: "YAHOO".to_string(),
            message: "Internal server error".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Provider error: YAHOO - Internal server error"
        );

        let error = MarketDataError::ResolutionFailed {
            provider: "YAHOO".to_string(),
            identifier: "NOPE:123".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Resolution failed for provider YAHOO: NOPE:123"
        );
    }
}
