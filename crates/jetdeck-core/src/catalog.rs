// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use crate::JetDeckError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub first_flight: Option<String>,
    /// Enrichment key (a wiki page title). May be empty.
    #[serde(default)]
    pub wiki: String,
    /// Id of the model manifest entry, if this aircraft has a 3D model.
    #[serde(default)]
    pub model: Option<String>,
    /// Raw attribute values as they appear in the dataset.
    #[serde(default)]
    pub specs: BTreeMap<String, Value>,
}

impl Aircraft {
    /// Numeric value of an entry in `specs`.
    ///
    /// Numbers and numeric strings (`"2,414"`, `"1_200"`) are accepted.
    /// Anything else, including NaN and infinities, is treated as absent.
    pub fn attribute(&self, name: &str) -> Option<f64> {
        let value = match self.specs.get(name)? {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => {
                let cleaned: String = s
                    .trim()
                    .chars()
                    .filter(|c| *c != ',' && *c != '_')
                    .collect();
                cleaned.parse::<f64>().ok()?
            }
            _ => return None,
        };
        value.is_finite().then_some(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub path: String,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub position: [f64; 3],
    /// Euler angles in degrees.
    #[serde(default)]
    pub rotation: [f64; 3],
}

fn default_scale() -> f64 {
    1.0
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub search: Option<String>,
    pub role: Option<String>,
}

impl CatalogFilter {
    fn matches(&self, aircraft: &Aircraft) -> bool {
        if let Some(role) = &self.role {
            let same_role = aircraft
                .role
                .as_deref()
                .is_some_and(|r| r.eq_ignore_ascii_case(role));
            if !same_role {
                return false;
            }
        }

        match &self.search {
            Some(query) if !query.trim().is_empty() => {
                let needle = query.trim().to_lowercase();
                [
                    Some(aircraft.name.as_str()),
                    Some(aircraft.id.as_str()),
                    aircraft.manufacturer.as_deref(),
                    aircraft.country.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle))
            }
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub aircraft: Vec<Aircraft>,
    #[serde(default)]
    pub models: BTreeMap<String, ModelEntry>,
}

impl Catalog {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, JetDeckError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(JetDeckError::DatasetNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        info!(
            "Loaded catalog — path={} aircraft={} models={}",
            path.display(),
            catalog.aircraft.len(),
            catalog.models.len()
        );
        Ok(catalog)
    }

    pub fn from_json(content: &str) -> Result<Self, JetDeckError> {
        let catalog: Catalog = serde_json::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), JetDeckError> {
        let mut seen = HashSet::new();
        for aircraft in &self.aircraft {
            if aircraft.id.trim().is_empty() {
                return Err(JetDeckError::InvalidDataset(format!(
                    "aircraft '{}' has an empty id",
                    aircraft.name
                )));
            }
            if !seen.insert(aircraft.id.as_str()) {
                return Err(JetDeckError::InvalidDataset(format!(
                    "duplicate aircraft id '{}'",
                    aircraft.id
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Aircraft> {
        self.aircraft.iter().find(|a| a.id == id)
    }

    pub fn model_for(&self, aircraft: &Aircraft) -> Option<&ModelEntry> {
        self.models.get(aircraft.model.as_deref()?)
    }

    /// Aircraft matching the filter, in dataset order.
    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&Aircraft> {
        self.aircraft.iter().filter(|a| filter.matches(a)).collect()
    }

    pub fn roles(&self) -> Vec<String> {
        self.aircraft
            .iter()
            .filter_map(|a| a.role.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn enrichment_keys(aircraft: &[&Aircraft]) -> Vec<String> {
        aircraft.iter().map(|a| a.wiki.clone()).collect()
    }
}
