// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz
#![allow(dead_code)]

use jetdeck_core::{Aircraft, Catalog, MetricDescriptor, MetricSet};
use serde_json::{json, Value};

pub fn aircraft(id: &str, name: &str, specs: Value) -> Aircraft {
    serde_json::from_value(json!({ "id": id, "name": name, "specs": specs }))
        .expect("valid aircraft fixture")
}

pub fn single_metric(name: &str, higher_is_better: bool, weight: f64) -> MetricSet {
    MetricSet::new(vec![MetricDescriptor::new(
        name,
        name,
        "",
        higher_is_better,
        weight,
    )])
    .expect("valid metric fixture")
}

/// Small fighter catalog used across the integration tests.
pub fn fighter_catalog() -> Catalog {
    Catalog::from_json(
        r#"{
        "aircraft": [
            {
                "id": "f22", "name": "F-22 Raptor", "manufacturer": "Lockheed Martin",
                "country": "USA", "role": "Air superiority", "wiki": "Lockheed_Martin_F-22_Raptor",
                "model": "f22",
                "specs": { "max_speed_kmh": 2414, "combat_range_km": 852, "service_ceiling_m": 19812,
                           "thrust_to_weight": 1.08, "payload_kg": 2270, "unit_cost_musd": 150 }
            },
            {
                "id": "f16", "name": "F-16 Fighting Falcon", "manufacturer": "General Dynamics",
                "country": "USA", "role": "Multirole", "wiki": "General_Dynamics_F-16_Fighting_Falcon",
                "specs": { "max_speed_kmh": 2120, "combat_range_km": 550, "service_ceiling_m": 15240,
                           "thrust_to_weight": 1.095, "payload_kg": 7700, "unit_cost_musd": 30 }
            },
            {
                "id": "gripen", "name": "Saab JAS 39 Gripen", "manufacturer": "Saab",
                "country": "Sweden", "role": "Multirole", "wiki": "Saab_JAS_39_Gripen",
                "specs": { "max_speed_kmh": "2,204", "combat_range_km": 800, "service_ceiling_m": 15240,
                           "thrust_to_weight": 0.97, "payload_kg": 5300, "unit_cost_musd": 85 }
            },
            {
                "id": "su27", "name": "Sukhoi Su-27", "manufacturer": "Sukhoi",
                "country": "Russia", "role": "Air superiority", "wiki": "",
                "specs": { "max_speed_kmh": 2500, "combat_range_km": 1340, "service_ceiling_m": 19000,
                           "thrust_to_weight": "classified", "payload_kg": 4430 }
            }
        ],
        "models": {
            "f22": { "path": "/models/verified/f22.glb", "scale": 0.8, "rotation": [0, 180, 0] }
        }
    }"#,
    )
    .expect("valid catalog fixture")
}
