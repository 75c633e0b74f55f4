//! Instrument catalog: the static model portfolio and its sleeves.

mod catalog_index;
mod catalog_model;


pub use catalog_index::Catalog;
pub use catalog_model::{
    AssetClassConfig, CatalogConfig, Instrument, InstrumentConfig, Sleeve, SleeveKind,
    SubstitutionRole,
};
