//! Quote module: current prices for catalog instruments.
//!
//! - [`model`] - `PriceSnapshot`, the identifier to price mapping the engine consumes
//! - [`service`] - `QuoteService`, a facade over a market-data provider
//!
//! ```text
//! QuoteService → RulesResolver → MarketDataProvider (Yahoo, fixed table)
//!       ↓
//! PriceSnapshot (id → price | unavailable)
//! ```

pub mod model;
pub mod service;


pub use model::PriceSnapshot;
pub use service::{QuoteService, QuoteServiceTrait};
