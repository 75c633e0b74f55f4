//! Rebalance pass: one pure run of the engine over the whole catalog.

mod rebalance_model;
mod rebalance_service;


pub use rebalance_model::{InstrumentRow, RebalanceOutcome, RebalanceReport};
pub use rebalance_service::rebalance;
