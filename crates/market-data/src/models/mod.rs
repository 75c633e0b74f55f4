//! Market data models
//!
//! This module contains the core data types for price fetching:
//! - `types` - Type aliases for common identifiers (ProviderId, Currency, ProviderSymbol)
//! - `instrument` - Canonical instrument identity (InstrumentId)
//! - `provider_params` - Provider-specific instrument parameters (ProviderInstrument)
//! - `quote` - Quote data structures (Quote, QuoteKind)

mod instrument;
mod provider_params;
mod quote;
mod types;

pub use instrument::InstrumentId;
pub use provider_params::ProviderInstrument;
pub use quote::{Quote, QuoteKind};
pub use types::{Currency, ProviderId, ProviderSymbol};
