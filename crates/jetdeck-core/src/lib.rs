// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod asset_probe;
pub mod catalog;
pub mod comparison;
pub mod config;
pub mod enrichment;
pub mod metrics;
pub mod radar;
pub mod scoring;

use std::path::PathBuf;
use thiserror::Error;

pub use catalog::{Aircraft, Catalog, CatalogFilter, ModelEntry};
pub use comparison::{ComparisonReport, ComparisonSet, Toggle};
pub use config::JetDeckConfig;
pub use metrics::{MetricDescriptor, MetricSet};

#[derive(Error, Debug)]
pub enum JetDeckError {
    #[error("Dataset not found: {0}")]
    DatasetNotFound(PathBuf),
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),
    #[error("Invalid metric configuration: {0}")]
    InvalidMetric(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Returns the per-user configuration directory, falling back to the
/// working directory when the platform exposes none.
pub fn get_config_root() -> PathBuf {
    directories::ProjectDirs::from("org", "jetdeck", "JetDeck")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".jetdeck"))
}
