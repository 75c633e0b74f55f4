//! Symbol resolution for market data providers.
//!
//! Converts catalog identifiers (e.g., `KRX:379800`) to provider-specific
//! symbols (e.g., `379800.KS` for Yahoo).
//!
//! # Resolution Rules
//!
//! Given `(identifier, provider_id)`:
//!
//! 1. **Exchange-qualified** -> `ticker + suffix(exchange, provider_id)`
//! 2. **Bare ticker** -> passed through unchanged
//! 3. **Unknown exchange** -> `ResolutionFailed`
//!
//! # Example
//!
//! ```
//! use std::borrow::Cow;
//! use pension_market_data::{InstrumentId, RulesResolver, SymbolResolver};
//!
//! let resolver = RulesResolver::new();
//! let id = InstrumentId::parse("KRX:379800").unwrap();
//! let resolved = resolver.resolve(&Cow::Borrowed("YAHOO"), &id).unwrap();
//! assert_eq!(resolved.symbol.as_ref(), "379800.KS");
//! ```

mod exchange_map;
mod rules_resolver;
mod traits;

pub use exchange_map::{ExchangeMap, ExchangeSuffix};
pub use rules_resolver::RulesResolver;
pub use traits::SymbolResolver;
