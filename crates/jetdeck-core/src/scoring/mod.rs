// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Metric normalization and composite scoring.
//!
//! Everything here is a pure function of its inputs. Stats are rebuilt
//! whenever the working set changes and never stored on the aircraft.

pub mod ranking;

use std::collections::HashMap;

use crate::catalog::Aircraft;
use crate::metrics::{MetricDescriptor, MetricSet};

/// Lower bound for `span` so normalization never divides by zero.
pub const SPAN_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricStats {
    pub min: f64,
    pub max: f64,
    pub span: f64,
}

impl MetricStats {
    pub fn from_range(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            span: (max - min).max(SPAN_EPSILON),
        }
    }

    fn is_tied(&self) -> bool {
        self.max == self.min
    }
}

impl Default for MetricStats {
    /// Stats of an empty working set.
    fn default() -> Self {
        Self::from_range(0.0, 1.0)
    }
}

/// Per-metric stats for one working set, keyed by metric name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsTable {
    stats: HashMap<String, MetricStats>,
}

impl StatsTable {
    /// Stats for `metric`, or the empty-set stats if it was never measured.
    pub fn get(&self, metric: &str) -> MetricStats {
        self.stats.get(metric).copied().unwrap_or_default()
    }
}

/// Raw value used for normalization. Missing values count as zero.
pub fn metric_value(aircraft: &Aircraft, metric: &MetricDescriptor) -> f64 {
    aircraft.attribute(&metric.name).unwrap_or(0.0)
}

/// Computes min/max/span for every metric over exactly `aircraft`.
pub fn build_stats(aircraft: &[&Aircraft], metrics: &MetricSet) -> StatsTable {
    let stats = metrics
        .iter()
        .map(|metric| {
            let stats = if aircraft.is_empty() {
                MetricStats::default()
            } else {
                let (min, max) = aircraft
                    .iter()
                    .map(|a| metric_value(a, metric))
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                        (lo.min(v), hi.max(v))
                    });
                MetricStats::from_range(min, max)
            };
            (metric.name.clone(), stats)
        })
        .collect();

    StatsTable { stats }
}

/// Rescales one metric of `aircraft` to `[0, 1]`, 1 being the best.
///
/// When every aircraft in the working set ties on the metric the result is
/// exactly 1 regardless of direction.
pub fn normalize(aircraft: &Aircraft, metric: &MetricDescriptor, stats: &MetricStats) -> f64 {
    if stats.is_tied() {
        return 1.0;
    }

    let value = metric_value(aircraft, metric);
    let baseline = if stats.span.is_finite() {
        (value - stats.min) / stats.span
    } else {
        // `max - min` overflowed; halve both ends first.
        (value / 2.0 - stats.min / 2.0) / (stats.max / 2.0 - stats.min / 2.0)
    };
    let normalized = if metric.higher_is_better {
        baseline
    } else {
        1.0 - baseline
    };
    if normalized.is_nan() {
        return 0.0;
    }
    normalized.clamp(0.0, 1.0)
}

/// Normalized values for every metric, in `metrics` order.
pub fn normalized_vector(aircraft: &Aircraft, metrics: &MetricSet, stats: &StatsTable) -> Vec<f64> {
    metrics
        .iter()
        .map(|m| normalize(aircraft, m, &stats.get(&m.name)))
        .collect()
}

/// Weighted composite score in `0..=100`. Zero total weight scores 0.
pub fn score(aircraft: &Aircraft, metrics: &MetricSet, stats: &StatsTable) -> u32 {
    let total_weight = metrics.total_weight();
    if total_weight <= 0.0 {
        return 0;
    }

    let weighted: f64 = metrics
        .iter()
        .map(|m| normalize(aircraft, m, &stats.get(&m.name)) * m.weight)
        .sum();

    (100.0 * weighted / total_weight).round().clamp(0.0, 100.0) as u32
}
