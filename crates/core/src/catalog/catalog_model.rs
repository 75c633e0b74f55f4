//! Catalog domain models.

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, Result};

/// Catalog file schema as loaded from JSON.
///
/// The asset-class nesting is for display only; grouping is driven by the
/// explicit `group` field on each instrument.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogConfig {
    pub asset_classes: Vec<AssetClassConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetClassConfig {
    pub name: String,
    #[serde(default)]
    pub instruments: Vec<InstrumentConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentConfig {
    pub id: String,
    pub name: String,
    pub group: String,
    pub weight: f64,
    #[serde(default)]
    pub role: SubstitutionRole,
}

/// Role of an instrument inside a combined sleeve.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubstitutionRole {
    /// Existing holding that is kept but not topped up
    #[default]
    Legacy,
    /// Preferred vehicle for new purchases in the sleeve
    Substitute,
}

/// An investable instrument after the catalog has been flattened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub id: String,
    pub name: String,
    pub asset_class: String,
    pub group: String,
    /// Baseline target weight as a fraction of the total balance
    pub weight: f64,
    pub role: SubstitutionRole,
}

impl Instrument {
    pub fn is_substitute(&self) -> bool {
        self.role == SubstitutionRole::Substitute
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SleeveKind {
    /// One member whose own weight is used directly
    Simple,
    /// Two or more members sharing the weight held by the first member
    Combined,
}

/// Ordered set of instruments sharing a sleeve name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sleeve {
    pub name: String,
    /// Member identifiers in catalog declaration order
    pub members: Vec<String>,
}

impl Sleeve {
    pub fn kind(&self) -> SleeveKind {
        if self.members.len() > 1 {
            SleeveKind::Combined
        } else {
            SleeveKind::Simple
        }
    }

    pub fn is_combined(&self) -> bool {
        self.kind() == SleeveKind::Combined
    }

    /// The member holding the authoritative sleeve weight.
    pub fn first(&self) -> Result<&str> {
        self.members
            .first()
            .map(String::as_str)
            .ok_or_else(|| ConfigError::EmptySleeve(self.name.clone()).into())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.iter().any(|m| m == id)
    }
}
