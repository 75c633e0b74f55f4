use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Current price per catalog identifier.
///
/// `None` marks a price that could not be fetched. Only positive finite
/// prices are ever returned from [`PriceSnapshot::price`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSnapshot {
    prices: BTreeMap<String, Option<f64>>,
}

impl PriceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, price: Option<f64>) {
        self.prices.insert(id.into(), price);
    }

    /// The usable price for an instrument, if any.
    pub fn price(&self, id: &str) -> Option<f64> {
        self.prices
            .get(id)
            .copied()
            .flatten()
            .filter(|p| p.is_finite() && *p > 0.0)
    }

    pub fn is_available(&self, id: &str) -> bool {
        self.price(id).is_some()
    }

    /// Identifiers without a usable price.
    pub fn unavailable(&self) -> Vec<&str> {
        self.prices
            .keys()
            .filter(|id| !self.is_available(id))
            .map(String::as_str)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.prices.iter().map(|(id, price)| (id.as_str(), *price))
    }
}

impl<K: Into<String>> FromIterator<(K, Option<f64>)> for PriceSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, Option<f64>)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().map(|(id, p)| (id.into(), p)).collect(),
        }
    }
}

impl From<HashMap<String, Option<f64>>> for PriceSnapshot {
    fn from(prices: HashMap<String, Option<f64>>) -> Self {
        prices.into_iter().collect()
    }
}
