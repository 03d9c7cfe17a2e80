// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::asset_probe::ModelLayout;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JetDeckConfig {
    /// Root of the summary REST endpoint; the url-encoded key is appended.
    pub summary_api_root: String,
    /// Used to build a page link when a summary carries none.
    pub page_root: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// Base URL (or directory) the model paths are resolved against.
    pub asset_root: String,
    pub verified_prefix: String,
    pub unverified_prefix: String,
    pub comparison_limit: usize,
    /// Keep `None` in the summary cache after a transport error.
    pub remember_failures: bool,
}

impl Default for JetDeckConfig {
    fn default() -> Self {
        Self {
            summary_api_root: "https://en.wikipedia.org/api/rest_v1/page/summary".to_string(),
            page_root: "https://en.wikipedia.org/wiki".to_string(),
            user_agent: format!(
                "jetdeck/{} (https://github.com/StarTuz/JetDeck)",
                env!("CARGO_PKG_VERSION")
            ),
            request_timeout_secs: 30,
            asset_root: "http://localhost:8080".to_string(),
            verified_prefix: "/models/verified/".to_string(),
            unverified_prefix: "/models/unverified/".to_string(),
            comparison_limit: 6,
            remember_failures: true,
        }
    }
}

impl JetDeckConfig {
    pub fn default_path() -> PathBuf {
        crate::get_config_root().join("config.json")
    }

    /// Loads the configuration at `path`, or the defaults if no file exists yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if config.comparison_limit == 0 {
            anyhow::bail!("comparison_limit must be at least 1");
        }

        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn model_layout(&self) -> ModelLayout {
        ModelLayout {
            verified_prefix: self.verified_prefix.clone(),
            unverified_prefix: self.unverified_prefix.clone(),
        }
    }
}
