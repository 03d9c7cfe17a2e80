// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use log::{debug, warn};
use std::future::Future;
use std::path::{Component, Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::config::JetDeckConfig;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Lightweight existence check, no body transfer.
pub trait AssetTransport: Send + Sync {
    /// Returns an HTTP-style status code for `path`.
    fn check(&self, path: &str) -> impl Future<Output = Result<u16, ProbeError>> + Send;
}

/// 2xx, or 405 (the file exists but HEAD is not allowed).
pub fn is_available(status: u16) -> bool {
    (200..300).contains(&status) || status == 405
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetResolution {
    Checking,
    Ready(String),
    /// No candidate answered. `path` is the primary path, if one was given.
    Missing { path: Option<String> },
}

impl AssetResolution {
    pub fn path(&self) -> Option<&str> {
        match self {
            AssetResolution::Checking => None,
            AssetResolution::Ready(path) => Some(path),
            AssetResolution::Missing { path } => path.as_deref(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, AssetResolution::Ready(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelLayout {
    pub verified_prefix: String,
    pub unverified_prefix: String,
}

impl Default for ModelLayout {
    fn default() -> Self {
        Self {
            verified_prefix: "/models/verified/".to_string(),
            unverified_prefix: "/models/unverified/".to_string(),
        }
    }
}

impl ModelLayout {
    /// Candidate paths in probe order.
    ///
    /// A verified path gets its unverified twin as the only fallback; any
    /// other path is its own single candidate.
    pub fn candidates(&self, primary: &str) -> Vec<String> {
        match primary.strip_prefix(&self.verified_prefix) {
            Some(rest) if !rest.is_empty() => {
                vec![
                    primary.to_string(),
                    format!("{}{}", self.unverified_prefix, rest),
                ]
            }
            _ => vec![primary.to_string()],
        }
    }
}

/// Checks the candidates for `primary` one after another.
///
/// Returns `None` if `token` is cancelled before a result is known.
pub async fn probe_candidates<T: AssetTransport>(
    transport: &T,
    layout: &ModelLayout,
    primary: &str,
    token: &CancellationToken,
) -> Option<AssetResolution> {
    for candidate in layout.candidates(primary) {
        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => return None,
            outcome = transport.check(&candidate) => outcome,
        };

        match outcome {
            Ok(status) if is_available(status) => {
                debug!("Asset available — path={} status={}", candidate, status);
                return Some(AssetResolution::Ready(candidate));
            }
            Ok(status) => debug!("Asset candidate rejected — path={} status={}", candidate, status),
            Err(e) => warn!("Asset check failed — path={} error={}", candidate, e),
        }
    }

    Some(AssetResolution::Missing {
        path: Some(primary.to_string()),
    })
}

pub struct HttpAssetTransport {
    client: reqwest::Client,
    base: String,
}

impl HttpAssetTransport {
    pub fn new(base: &str, config: &JetDeckConfig) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }
}

impl AssetTransport for HttpAssetTransport {
    async fn check(&self, path: &str) -> Result<u16, ProbeError> {
        let response = self.client.head(self.url_for(path)).send().await?;
        Ok(response.status().as_u16())
    }
}

/// Serves existence checks from a static directory on disk.
pub struct FsAssetTransport {
    root: PathBuf,
}

impl FsAssetTransport {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// `None` for paths that would escape the root.
    fn local_path(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
            .then(|| self.root.join(relative))
    }
}

impl AssetTransport for FsAssetTransport {
    async fn check(&self, path: &str) -> Result<u16, ProbeError> {
        let Some(local) = self.local_path(path) else {
            return Ok(404);
        };
        match tokio::fs::metadata(&local).await {
            Ok(meta) if meta.is_file() => Ok(200),
            Ok(_) => Ok(404),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(404),
            Err(e) => Err(e.into()),
        }
    }
}

/// Re-entrant probe for the model currently on screen.
///
/// Starting a new resolution supersedes the previous one; a superseded
/// probe never touches the published state.
pub struct AssetProbe<T> {
    transport: T,
    layout: ModelLayout,
    current: Mutex<CancellationToken>,
    state: watch::Sender<AssetResolution>,
}

impl<T: AssetTransport> AssetProbe<T> {
    pub fn new(transport: T, layout: ModelLayout) -> Self {
        let (state, _) = watch::channel(AssetResolution::Missing { path: None });
        Self {
            transport,
            layout,
            current: Mutex::new(CancellationToken::new()),
            state,
        }
    }

    fn replace_token(&self) -> CancellationToken {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        current.cancel();
        *current = CancellationToken::new();
        current.clone()
    }

    // Liveness check and publish happen under the same lock as `replace_token`.
    fn commit(&self, token: &CancellationToken, resolution: AssetResolution) -> bool {
        let _current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if token.is_cancelled() {
            return false;
        }
        self.state.send_replace(resolution);
        true
    }

    /// Resolves `primary` and publishes the result.
    ///
    /// Returns `None` if this resolution was superseded or cancelled.
    pub async fn resolve(&self, primary: Option<&str>) -> Option<AssetResolution> {
        let token = self.replace_token();

        let Some(primary) = primary.filter(|p| !p.trim().is_empty()) else {
            let missing = AssetResolution::Missing { path: None };
            return self.commit(&token, missing.clone()).then_some(missing);
        };

        if !self.commit(&token, AssetResolution::Checking) {
            return None;
        }

        let resolution = probe_candidates(&self.transport, &self.layout, primary, &token).await?;
        self.commit(&token, resolution.clone()).then_some(resolution)
    }

    pub fn state(&self) -> AssetResolution {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AssetResolution> {
        self.state.subscribe()
    }

    /// Abandons the running resolution. Call when the consumer goes away.
    pub fn cancel(&self) {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cancel();
    }
}
