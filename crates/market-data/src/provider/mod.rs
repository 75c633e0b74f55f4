//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - Rate limiting configuration
//! - Concrete provider implementations (Yahoo, fixed price table)
//!
//! Providers receive pre-resolved `ProviderInstrument` parameters. The
//! translation from catalog identifier to provider symbol happens in the
//! resolver module, not in the providers themselves.

mod capabilities;
mod traits;

pub mod fixed;
pub mod yahoo;

pub use capabilities::RateLimit;
pub use traits::MarketDataProvider;
