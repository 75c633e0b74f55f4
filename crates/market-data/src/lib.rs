//! Pension Market Data Crate
//!
//! This crate provides provider-agnostic price fetching for the pension
//! rebalancer.
//!
//! # Overview
//!
//! The market data crate supports:
//! - Exchange-qualified catalog identifiers (e.g. `KRX:379800`)
//! - Deterministic translation to provider symbols (e.g. `379800.KS`)
//! - A Yahoo Finance provider with an intraday-then-close fallback
//! - A fixed price provider for manual prices and offline runs
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |   Catalog id     | --> |  InstrumentId    |  (exchange + ticker)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  RulesResolver   |  (exchange -> suffix)
//!                          +------------------+
//!                                  |
//!                                  v
//!                         +-------------------+
//!                         | ProviderInstrument|  (provider-specific)
//!                         +-------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    Provider      |  (Yahoo, Fixed)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |     Quote        |
//!                          +------------------+
//! ```

pub mod errors;
pub mod models;
pub mod provider;
pub mod resolver;

pub use models::{
    Currency, InstrumentId, ProviderId, ProviderInstrument, ProviderSymbol, Quote, QuoteKind,
};

pub use resolver::{ExchangeMap, ExchangeSuffix, RulesResolver, SymbolResolver};

pub use provider::fixed::FixedPriceProvider;
pub use provider::yahoo::YahooProvider;
pub use provider::{MarketDataProvider, RateLimit};
