// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

mod common;

use common::fighter_catalog;
use jetdeck_core::{JetDeckError, Catalog, CatalogFilter};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("aircraft.json");
    fs::write(
        &path,
        r#"{ "aircraft": [ { "id": "mig29", "name": "MiG-29", "wiki": "Mikoyan_MiG-29",
              "specs": { "max_speed_kmh": 2400 } } ] }"#,
    )
    .unwrap();

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.aircraft.len(), 1);
    assert!(catalog.models.is_empty());
    assert_eq!(catalog.get("mig29").unwrap().attribute("max_speed_kmh"), Some(2400.0));
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let result = Catalog::load(dir.path().join("nope.json"));
    assert!(matches!(result, Err(JetDeckError::DatasetNotFound(_))));
}

#[test]
fn test_malformed_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("aircraft.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(Catalog::load(&path), Err(JetDeckError::Json(_))));
}

#[test]
fn test_empty_id_rejected() {
    let doc = r#"{ "aircraft": [ { "id": " ", "name": "Nameless" } ] }"#;
    assert!(matches!(
        Catalog::from_json(doc),
        Err(JetDeckError::InvalidDataset(_))
    ));
}

#[test]
fn test_model_manifest_lookup() {
    let catalog = fighter_catalog();
    let f22 = catalog.get("f22").unwrap();
    let model = catalog.model_for(f22).unwrap();
    assert_eq!(model.path, "/models/verified/f22.glb");
    assert_eq!(model.scale, 0.8);
    assert_eq!(model.rotation, [0.0, 180.0, 0.0]);
    assert_eq!(model.position, [0.0, 0.0, 0.0]);

    assert!(catalog.model_for(catalog.get("f16").unwrap()).is_none());
}

#[test]
fn test_filter_by_role_and_search() {
    let catalog = fighter_catalog();

    let multirole = CatalogFilter {
        role: Some("multirole".to_string()),
        ..CatalogFilter::default()
    };
    let ids: Vec<_> = catalog.filter(&multirole).iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["f16", "gripen"]);

    let usa = CatalogFilter {
        search: Some("usa".to_string()),
        ..CatalogFilter::default()
    };
    assert_eq!(catalog.filter(&usa).len(), 2);

    let both = CatalogFilter {
        search: Some("Sukhoi".to_string()),
        role: Some("Air superiority".to_string()),
    };
    let ids: Vec<_> = catalog.filter(&both).iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["su27"]);

    assert_eq!(catalog.filter(&CatalogFilter::default()).len(), 4);
}

#[test]
fn test_roles_are_sorted_and_distinct() {
    assert_eq!(
        fighter_catalog().roles(),
        vec!["Air superiority".to_string(), "Multirole".to_string()]
    );
}

#[test]
fn test_enrichment_keys() {
    let catalog = fighter_catalog();
    let all: Vec<_> = catalog.aircraft.iter().collect();
    let keys = Catalog::enrichment_keys(&all);
    assert_eq!(keys.len(), 4);
    assert!(keys.contains(&String::new()), "empty keys are left for the cache to drop");
}

#[test]
fn test_bundled_dataset_loads_and_compares() {
    use jetdeck_core::{ComparisonReport, ComparisonSet, MetricSet};

    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/aircraft.json");
    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.aircraft.len(), 8);

    // Every model reference resolves to a manifest entry.
    for aircraft in &catalog.aircraft {
        if aircraft.model.is_some() {
            assert!(catalog.model_for(aircraft).is_some(), "{}", aircraft.id);
        }
    }

    let metrics = MetricSet::fighter_default();
    let mut set = ComparisonSet::new(6);
    for aircraft in catalog.aircraft.iter().take(6) {
        set.toggle(&aircraft.id);
    }
    let report = ComparisonReport::build(&catalog, &set, &metrics);
    assert_eq!(report.leaderboard.len(), 6);
    assert!(report
        .leaderboard
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));
}
