// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use std::cmp::Ordering;

use crate::catalog::Aircraft;
use crate::metrics::{MetricDescriptor, MetricSet, COST_ATTRIBUTE};
use crate::scoring::{normalize, score, StatsTable};

#[derive(Debug, Clone, PartialEq)]
pub struct RankedAircraft<'a> {
    pub aircraft: &'a Aircraft,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueEntry<'a> {
    pub aircraft: &'a Aircraft,
    pub score: u32,
    /// Composite score per unit of cost.
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricLeader<'a> {
    pub metric: &'a MetricDescriptor,
    pub leader: Option<&'a Aircraft>,
}

// Descending by key, then ascending by display name. `sort_by` is stable,
// so aircraft that also share a name keep their input order.
fn by_key_then_name(key_a: f64, key_b: f64, a: &Aircraft, b: &Aircraft) -> Ordering {
    key_b
        .partial_cmp(&key_a)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.name.cmp(&b.name))
}

/// Leaderboard by composite score.
pub fn rank<'a>(
    aircraft: &[&'a Aircraft],
    metrics: &MetricSet,
    stats: &StatsTable,
) -> Vec<RankedAircraft<'a>> {
    let mut ranked: Vec<RankedAircraft<'a>> = aircraft
        .iter()
        .map(|a| RankedAircraft {
            aircraft: *a,
            score: score(a, metrics, stats),
        })
        .collect();

    ranked.sort_by(|a, b| {
        by_key_then_name(a.score as f64, b.score as f64, a.aircraft, b.aircraft)
    });
    ranked
}

/// The aircraft with the highest normalized value for a single metric.
pub fn leader_for<'a>(
    aircraft: &[&'a Aircraft],
    metric: &MetricDescriptor,
    stats: &StatsTable,
) -> Option<&'a Aircraft> {
    let metric_stats = stats.get(&metric.name);
    let mut scored: Vec<(&'a Aircraft, f64)> = aircraft
        .iter()
        .map(|a| (*a, normalize(a, metric, &metric_stats)))
        .collect();

    scored.sort_by(|(a, va), (b, vb)| by_key_then_name(*va, *vb, a, b));
    scored.first().map(|(a, _)| *a)
}

/// One leader per configured metric, in configuration order.
pub fn leaders<'a>(
    aircraft: &[&'a Aircraft],
    metrics: &'a MetricSet,
    stats: &StatsTable,
) -> Vec<MetricLeader<'a>> {
    metrics
        .iter()
        .map(|metric| MetricLeader {
            metric,
            leader: leader_for(aircraft, metric, stats),
        })
        .collect()
}

/// Ranks by `score / max(cost, 1)`; a missing cost counts as zero.
pub fn best_value_for_cost<'a>(
    aircraft: &[&'a Aircraft],
    metrics: &MetricSet,
    stats: &StatsTable,
) -> Vec<ValueEntry<'a>> {
    let mut entries: Vec<ValueEntry<'a>> = aircraft
        .iter()
        .map(|a| {
            let score = score(a, metrics, stats);
            let cost = a.attribute(COST_ATTRIBUTE).unwrap_or(0.0).max(1.0);
            ValueEntry {
                aircraft: *a,
                score,
                value: score as f64 / cost,
            }
        })
        .collect();

    entries.sort_by(|a, b| by_key_then_name(a.value, b.value, a.aircraft, b.aircraft));
    entries
}
