use std::collections::{HashMap, HashSet};
use std::path::Path;

use log::{debug, warn};

use super::catalog_model::{CatalogConfig, Instrument, Sleeve};
use crate::constants::{WEIGHT_EPSILON, WEIGHT_SUM_TOLERANCE};
use crate::errors::{ConfigError, Result};

const BUILTIN_CATALOG: &str = include_str!("builtin_catalog.json");

/// Flattened, validated instrument catalog.
///
/// Instruments keep their declaration order. Sleeves appear in the order
/// their first member was declared.
#[derive(Debug, Clone)]
pub struct Catalog {
    instruments: Vec<Instrument>,
    index: HashMap<String, usize>,
    sleeves: Vec<Sleeve>,
    sleeve_index: HashMap<String, usize>,
}

impl Catalog {
    /// Collapse the nested catalog into one ordered lookup.
    ///
    /// Fails on duplicate or blank identifiers, weights outside `[0, 1]`, and
    /// combined sleeves with more than one substitute member.
    pub fn flatten(config: CatalogConfig) -> Result<Self> {
        let mut instruments = Vec::new();
        let mut index = HashMap::new();

        for asset_class in config.asset_classes {
            for entry in asset_class.instruments {
                let id = entry.id.trim().to_string();
                let group = entry.group.trim().to_string();
                if id.is_empty() {
                    return Err(ConfigError::InvalidInstrument(format!(
                        "blank identifier for '{}' in '{}'",
                        entry.name, asset_class.name
                    ))
                    .into());
                }
                if group.is_empty() {
                    return Err(
                        ConfigError::InvalidInstrument(format!("'{}' has no group", id)).into(),
                    );
                }
                if !entry.weight.is_finite() || !(0.0..=1.0).contains(&entry.weight) {
                    return Err(ConfigError::InvalidWeight {
                        id,
                        weight: entry.weight,
                    }
                    .into());
                }
                if index.contains_key(&id) {
                    return Err(ConfigError::DuplicateInstrument(id).into());
                }

                index.insert(id.clone(), instruments.len());
                instruments.push(Instrument {
                    id,
                    name: entry.name,
                    asset_class: asset_class.name.clone(),
                    group,
                    weight: entry.weight,
                    role: entry.role,
                });
            }
        }

        let mut sleeves: Vec<Sleeve> = Vec::new();
        let mut sleeve_index: HashMap<String, usize> = HashMap::new();
        for instrument in &instruments {
            match sleeve_index.get(&instrument.group) {
                Some(&pos) => sleeves[pos].members.push(instrument.id.clone()),
                None => {
                    sleeve_index.insert(instrument.group.clone(), sleeves.len());
                    sleeves.push(Sleeve {
                        name: instrument.group.clone(),
                        members: vec![instrument.id.clone()],
                    });
                }
            }
        }

        let catalog = Self {
            instruments,
            index,
            sleeves,
            sleeve_index,
        };
        catalog.validate_sleeves()?;
        debug!(
            "Loaded catalog with {} instruments in {} sleeves",
            catalog.instruments.len(),
            catalog.sleeves.len()
        );
        Ok(catalog)
    }

    fn validate_sleeves(&self) -> Result<()> {
        let mut total_weight = 0.0;

        for sleeve in &self.sleeves {
            let first = self.require(sleeve.first()?)?;
            total_weight += first.weight;

            if !sleeve.is_combined() {
                continue;
            }

            let substitutes: Vec<String> = self
                .members(sleeve)
                .filter(|i| i.is_substitute())
                .map(|i| i.id.clone())
                .collect();
            if substitutes.len() > 1 {
                return Err(ConfigError::MultipleSubstitutes {
                    group: sleeve.name.clone(),
                    members: substitutes,
                }
                .into());
            }
            if substitutes.is_empty() {
                warn!(
                    "Sleeve '{}' has no substitute member; its members will only hold",
                    sleeve.name
                );
            }

            for member in self.members(sleeve).skip(1) {
                if (member.weight - first.weight).abs() > WEIGHT_EPSILON {
                    warn!(
                        "'{}' declares weight {} but sleeve '{}' uses {} from '{}'",
                        member.id, member.weight, sleeve.name, first.weight, first.id
                    );
                }
            }
        }

        if !self.sleeves.is_empty() && (total_weight - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            warn!(
                "Catalog sleeve weights sum to {:.4}, expected 1.0",
                total_weight
            );
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: CatalogConfig = serde_json::from_str(json)?;
        Self::flatten(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// The model portfolio shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// Sleeves in order of first declaration.
    pub fn group_by(&self) -> &[Sleeve] {
        &self.sleeves
    }

    pub fn sleeve(&self, name: &str) -> Result<&Sleeve> {
        self.sleeve_index
            .get(name)
            .map(|&pos| &self.sleeves[pos])
            .ok_or_else(|| ConfigError::UnknownSleeve(name.to_string()).into())
    }

    pub fn sleeve_of(&self, id: &str) -> Result<&Sleeve> {
        let instrument = self.require(id)?;
        self.sleeve(&instrument.group)
    }

    pub fn get(&self, id: &str) -> Option<&Instrument> {
        self.index.get(id).map(|&pos| &self.instruments[pos])
    }

    /// Like [`Catalog::get`] but an unknown id is a [`ConfigError::UnknownInstrument`].
    pub fn require(&self, id: &str) -> Result<&Instrument> {
        self.get(id)
            .ok_or_else(|| ConfigError::UnknownInstrument(id.to_string()).into())
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn ids(&self) -> Vec<String> {
        self.instruments.iter().map(|i| i.id.clone()).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Members of a sleeve in declaration order. Unknown ids are skipped.
    pub fn members<'a>(&'a self, sleeve: &'a Sleeve) -> impl Iterator<Item = &'a Instrument> + 'a {
        sleeve.members.iter().filter_map(move |id| self.get(id))
    }

    /// Baseline weight of a sleeve: the first member's declared weight.
    pub fn sleeve_weight(&self, sleeve: &Sleeve) -> Result<f64> {
        Ok(self.require(sleeve.first()?)?.weight)
    }

    /// Distinct asset class names in declaration order.
    pub fn asset_classes(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.instruments
            .iter()
            .filter(|i| seen.insert(i.asset_class.as_str()))
            .map(|i| i.asset_class.as_str())
            .collect()
    }
}
