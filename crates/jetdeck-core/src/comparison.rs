// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use log::warn;
use std::collections::BTreeSet;

use crate::catalog::{Aircraft, Catalog};
use crate::metrics::MetricSet;
use crate::radar::{Point, RadarError, RadarLayout};
use crate::scoring::ranking::{self, MetricLeader, RankedAircraft, ValueEntry};
use crate::scoring::{build_stats, normalized_vector, StatsTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
    /// The set is at its limit; nothing changed.
    Full,
}

/// Bounded set of aircraft ids under comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonSet {
    limit: usize,
    ids: BTreeSet<String>,
}

impl ComparisonSet {
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            ids: BTreeSet::new(),
        }
    }

    pub fn toggle(&mut self, id: &str) -> Toggle {
        if self.ids.remove(id) {
            return Toggle::Removed;
        }
        if self.ids.len() >= self.limit {
            return Toggle::Full;
        }
        self.ids.insert(id.to_string());
        Toggle::Added
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Member ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl Default for ComparisonSet {
    fn default() -> Self {
        Self::new(6)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AircraftProfile<'a> {
    pub aircraft: &'a Aircraft,
    pub score: u32,
    /// Normalized values in metric order.
    pub normalized: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarSeries<'a> {
    pub aircraft: &'a Aircraft,
    pub points: Vec<Point>,
}

/// Everything the comparison screen shows for one set of aircraft.
#[derive(Debug, Clone)]
pub struct ComparisonReport<'a> {
    pub metrics: &'a MetricSet,
    pub members: Vec<&'a Aircraft>,
    pub stats: StatsTable,
    pub leaderboard: Vec<RankedAircraft<'a>>,
    pub leaders: Vec<MetricLeader<'a>>,
    pub best_value: Vec<ValueEntry<'a>>,
    /// In leaderboard order.
    pub profiles: Vec<AircraftProfile<'a>>,
}

impl<'a> ComparisonReport<'a> {
    pub fn build(catalog: &'a Catalog, set: &ComparisonSet, metrics: &'a MetricSet) -> Self {
        let members: Vec<&'a Aircraft> = set
            .ids()
            .filter_map(|id| {
                let found = catalog.get(id);
                if found.is_none() {
                    warn!("Comparison set references unknown aircraft — id={}", id);
                }
                found
            })
            .collect();

        Self::for_aircraft(members, metrics)
    }

    pub fn for_aircraft(members: Vec<&'a Aircraft>, metrics: &'a MetricSet) -> Self {
        let stats = build_stats(&members, metrics);
        let leaderboard = ranking::rank(&members, metrics, &stats);
        let leaders = ranking::leaders(&members, metrics, &stats);
        let best_value = ranking::best_value_for_cost(&members, metrics, &stats);
        let profiles = leaderboard
            .iter()
            .map(|entry| AircraftProfile {
                aircraft: entry.aircraft,
                score: entry.score,
                normalized: normalized_vector(entry.aircraft, metrics, &stats),
            })
            .collect();

        Self {
            metrics,
            members,
            stats,
            leaderboard,
            leaders,
            best_value,
            profiles,
        }
    }

    pub fn radar_layout(&self, size: f64, margin: f64) -> RadarLayout {
        RadarLayout::square(self.metrics.len(), size, margin)
    }

    pub fn radar(&self, layout: &RadarLayout) -> Result<Vec<RadarSeries<'a>>, RadarError> {
        self.profiles
            .iter()
            .map(|profile| {
                Ok(RadarSeries {
                    aircraft: profile.aircraft,
                    points: layout.polygon(&profile.normalized)?,
                })
            })
            .collect()
    }
}
