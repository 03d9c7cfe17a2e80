// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::JetDeckError;

/// Attribute used as the denominator of the value-for-cost view.
pub const COST_ATTRIBUTE: &str = "unit_cost_musd";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDescriptor {
    /// Attribute name in the aircraft `specs` map.
    pub name: String,
    pub label: String,
    pub unit: String,
    pub higher_is_better: bool,
    pub weight: f64,
}

impl MetricDescriptor {
    pub fn new(name: &str, label: &str, unit: &str, higher_is_better: bool, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            unit: unit.to_string(),
            higher_is_better,
            weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricSet {
    metrics: Vec<MetricDescriptor>,
}

impl MetricSet {
    pub fn new(metrics: Vec<MetricDescriptor>) -> Result<Self, JetDeckError> {
        let mut names = HashSet::new();
        for m in &metrics {
            if m.name.trim().is_empty() {
                return Err(JetDeckError::InvalidMetric("metric with empty name".to_string()));
            }
            if !names.insert(m.name.as_str()) {
                return Err(JetDeckError::InvalidMetric(format!(
                    "duplicate metric '{}'",
                    m.name
                )));
            }
            if !m.weight.is_finite() || m.weight < 0.0 {
                return Err(JetDeckError::InvalidMetric(format!(
                    "metric '{}' has invalid weight {}",
                    m.name, m.weight
                )));
            }
        }
        Ok(Self { metrics })
    }

    /// The fixed fighter comparison configuration.
    pub fn fighter_default() -> Self {
        Self {
            metrics: vec![
                MetricDescriptor::new("max_speed_kmh", "Max speed", "km/h", true, 1.2),
                MetricDescriptor::new("combat_range_km", "Combat range", "km", true, 1.0),
                MetricDescriptor::new("service_ceiling_m", "Service ceiling", "m", true, 0.8),
                MetricDescriptor::new("thrust_to_weight", "Thrust/weight", "ratio", true, 1.0),
                MetricDescriptor::new("payload_kg", "Payload", "kg", true, 0.9),
                MetricDescriptor::new(COST_ATTRIBUTE, "Unit cost", "M USD", false, 0.6),
            ],
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetricDescriptor> {
        self.metrics.iter()
    }

    pub fn get(&self, name: &str) -> Option<&MetricDescriptor> {
        self.metrics.iter().find(|m| m.name == name)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.metrics.iter().map(|m| m.weight).sum()
    }
}

impl Default for MetricSet {
    fn default() -> Self {
        Self::fighter_default()
    }
}

impl<'a> IntoIterator for &'a MetricSet {
    type Item = &'a MetricDescriptor;
    type IntoIter = std::slice::Iter<'a, MetricDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.metrics.iter()
    }
}
