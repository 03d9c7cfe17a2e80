// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz
//
// Regression tests for composite scoring, leaderboards and the comparison report.

mod common;

use common::{aircraft, fighter_catalog, single_metric};
use jetdeck_core::metrics::MetricDescriptor;
use jetdeck_core::scoring::ranking::{best_value_for_cost, leader_for, rank};
use jetdeck_core::scoring::{build_stats, score};
use jetdeck_core::{ComparisonReport, ComparisonSet, MetricSet, Toggle};
use serde_json::json;

#[test]
fn test_score_is_weighted_average() {
    let metrics = MetricSet::new(vec![
        MetricDescriptor::new("speed", "Speed", "km/h", true, 3.0),
        MetricDescriptor::new("range", "Range", "km", true, 1.0),
    ])
    .unwrap();
    let fast = aircraft("fast", "Fast", json!({ "speed": 2000, "range": 500 }));
    let far = aircraft("far", "Far", json!({ "speed": 1000, "range": 1500 }));
    let stats = build_stats(&[&fast, &far], &metrics);

    assert_eq!(score(&fast, &metrics, &stats), 75);
    assert_eq!(score(&far, &metrics, &stats), 25);
}

#[test]
fn test_score_rounds_to_nearest() {
    let metrics = single_metric("speed", true, 1.0);
    let low = aircraft("low", "Low", json!({ "speed": 0 }));
    let mid = aircraft("mid", "Mid", json!({ "speed": 2 }));
    let high = aircraft("high", "High", json!({ "speed": 3 }));
    let stats = build_stats(&[&low, &mid, &high], &metrics);

    // 2/3 -> 66.67
    assert_eq!(score(&mid, &metrics, &stats), 67);
}

#[test]
fn test_score_is_deterministic() {
    let catalog = fighter_catalog();
    let metrics = MetricSet::fighter_default();
    let all: Vec<_> = catalog.aircraft.iter().collect();
    let stats = build_stats(&all, &metrics);

    for a in &all {
        let first = score(a, &metrics, &stats);
        assert_eq!(first, score(a, &metrics, &stats));
        assert!(first <= 100);
    }
}

#[test]
fn test_zero_weights_score_zero() {
    let metrics = MetricSet::new(vec![
        MetricDescriptor::new("speed", "Speed", "km/h", true, 0.0),
        MetricDescriptor::new("range", "Range", "km", true, 0.0),
    ])
    .unwrap();
    let catalog = fighter_catalog();
    let all: Vec<_> = catalog.aircraft.iter().collect();
    let stats = build_stats(&all, &metrics);

    for a in &all {
        assert_eq!(score(a, &metrics, &stats), 0);
    }
}

#[test]
fn test_rank_breaks_ties_by_name() {
    let metrics = single_metric("speed", true, 1.0);
    let zulu = aircraft("z", "Zulu", json!({ "speed": 2000 }));
    let alpha = aircraft("a", "Alpha", json!({ "speed": 2000 }));
    let slow = aircraft("s", "Slow", json!({ "speed": 1000 }));
    let set = [&zulu, &slow, &alpha];
    let stats = build_stats(&set, &metrics);

    let names: Vec<_> = rank(&set, &metrics, &stats)
        .iter()
        .map(|r| r.aircraft.name.as_str())
        .collect();
    assert_eq!(names, vec!["Alpha", "Zulu", "Slow"]);
}

#[test]
fn test_leader_uses_single_metric() {
    let metrics = MetricSet::new(vec![
        MetricDescriptor::new("speed", "Speed", "km/h", true, 1.0),
        MetricDescriptor::new("cost", "Cost", "M USD", false, 5.0),
    ])
    .unwrap();
    let cheap = aircraft("cheap", "Cheap", json!({ "speed": 1000, "cost": 10 }));
    let quick = aircraft("quick", "Quick", json!({ "speed": 2000, "cost": 90 }));
    let set = [&cheap, &quick];
    let stats = build_stats(&set, &metrics);

    assert_eq!(rank(&set, &metrics, &stats)[0].aircraft.id, "cheap");
    assert_eq!(
        leader_for(&set, metrics.get("speed").unwrap(), &stats).map(|a| a.id.as_str()),
        Some("quick")
    );
    assert_eq!(
        leader_for(&set, metrics.get("cost").unwrap(), &stats).map(|a| a.id.as_str()),
        Some("cheap")
    );
}

#[test]
fn test_leader_tie_and_empty() {
    let metrics = single_metric("speed", true, 1.0);
    let m = metrics.get("speed").unwrap();
    let bravo = aircraft("b", "Bravo", json!({ "speed": 1500 }));
    let alpha = aircraft("a", "Alpha", json!({ "speed": 1500 }));
    let set = [&bravo, &alpha];
    let stats = build_stats(&set, &metrics);

    assert_eq!(leader_for(&set, m, &stats).map(|a| a.name.as_str()), Some("Alpha"));
    assert!(leader_for(&[], m, &build_stats(&[], &metrics)).is_none());
}

#[test]
fn test_best_value_for_cost() {
    let metrics = single_metric("speed", true, 1.0);
    // Both score 100 on a tied metric; cost decides.
    let pricey = aircraft("p", "Pricey", json!({ "speed": 2000, "unit_cost_musd": 100 }));
    let bargain = aircraft("b", "Bargain", json!({ "speed": 2000, "unit_cost_musd": 20 }));
    let unpriced = aircraft("u", "Unpriced", json!({ "speed": 2000 }));
    let set = [&pricey, &bargain, &unpriced];
    let stats = build_stats(&set, &metrics);

    let value = best_value_for_cost(&set, &metrics, &stats);
    let ids: Vec<_> = value.iter().map(|v| v.aircraft.id.as_str()).collect();
    assert_eq!(ids, vec!["u", "b", "p"]);
    assert_eq!(value[0].value, 100.0);
    assert_eq!(value[1].value, 5.0);
    assert_eq!(value[2].value, 1.0);
}

#[test]
fn test_report_follows_comparison_set() {
    let catalog = fighter_catalog();
    let metrics = MetricSet::fighter_default();
    let mut set = ComparisonSet::new(6);
    assert_eq!(set.toggle("f22"), Toggle::Added);
    assert_eq!(set.toggle("f16"), Toggle::Added);
    assert_eq!(set.toggle("nonexistent"), Toggle::Added);

    let report = ComparisonReport::build(&catalog, &set, &metrics);
    assert_eq!(report.members.len(), 2);
    assert_eq!(report.leaderboard.len(), 2);
    assert_eq!(report.leaders.len(), metrics.len());
    assert_eq!(report.profiles.len(), 2);
    assert_eq!(report.stats.get("max_speed_kmh").min, 2120.0);
    assert_eq!(report.stats.get("max_speed_kmh").max, 2414.0);

    let speed = report
        .leaders
        .iter()
        .find(|l| l.metric.name == "max_speed_kmh")
        .and_then(|l| l.leader)
        .unwrap();
    assert_eq!(speed.id, "f22");

    // Adding the Su-27 changes the stats for everyone.
    set.toggle("su27");
    let wider = ComparisonReport::build(&catalog, &set, &metrics);
    assert_eq!(wider.stats.get("max_speed_kmh").max, 2500.0);
    assert_eq!(wider.profiles[0].normalized.len(), metrics.len());
}

#[test]
fn test_empty_report() {
    let catalog = fighter_catalog();
    let metrics = MetricSet::fighter_default();
    let report = ComparisonReport::build(&catalog, &ComparisonSet::new(6), &metrics);

    assert!(report.leaderboard.is_empty());
    assert!(report.leaders.iter().all(|l| l.leader.is_none()));
    assert!(report.best_value.is_empty());
}
