//! Pension Core - allocation and rebalancing engine.
//!
//! Takes a model portfolio ([`catalog::Catalog`]), current prices
//! ([`quotes::PriceSnapshot`]) and the user's session inputs
//! ([`portfolio::PortfolioState`]) and works out how many shares of each
//! instrument to buy or sell.

pub mod catalog;
pub mod constants;
pub mod errors;
pub mod portfolio;
pub mod quotes;

pub use catalog::{Catalog, Instrument, Sleeve, SleeveKind, SubstitutionRole};
pub use errors::Error;
pub use errors::Result;
pub use portfolio::*;
pub use quotes::{PriceSnapshot, QuoteService, QuoteServiceTrait};
