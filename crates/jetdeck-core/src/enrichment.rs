// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Summary enrichment: fetches short descriptive records for aircraft and
//! memoizes them for the lifetime of the cache object.
//!
//! A key in the cache is never fetched again. `None` means "fetched, no data";
//! a key that is absent has not been fetched (or its fetch was cancelled).

use futures::future::join_all;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::config::JetDeckConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentRecord {
    pub text: String,
    pub image_url: Option<String>,
    pub source_url: String,
}

pub type EnrichmentMap = HashMap<String, Option<EnrichmentRecord>>;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid summary payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Returned instead of a result when the caller's token was cancelled.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("enrichment request cancelled")]
pub struct Cancelled;

/// Where summaries come from.
///
/// `Ok(None)` is a definitive "no data" (for HTTP, a non-success status).
/// `Err` is a transport failure.
pub trait SummarySource: Send + Sync {
    fn fetch_summary(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<EnrichmentRecord>, FetchError>> + Send;
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SummaryPayload {
    extract: Option<String>,
    originalimage: Option<ImageRef>,
    thumbnail: Option<ImageRef>,
    content_urls: Option<ContentUrls>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ImageRef {
    source: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContentUrls {
    desktop: Option<PageRef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PageRef {
    page: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Maps a summary response body onto an [`EnrichmentRecord`].
///
/// The original image wins over the thumbnail. A missing page link falls back
/// to `<page_root>/<key>`.
pub fn parse_summary(
    body: &str,
    key: &str,
    page_root: &str,
) -> Result<EnrichmentRecord, serde_json::Error> {
    let payload: SummaryPayload = serde_json::from_str(body)?;

    let image_url = non_empty(payload.originalimage.and_then(|i| i.source))
        .or_else(|| non_empty(payload.thumbnail.and_then(|i| i.source)));
    let source_url = non_empty(payload.content_urls.and_then(|c| c.desktop).and_then(|d| d.page))
        .unwrap_or_else(|| {
            format!(
                "{}/{}",
                page_root.trim_end_matches('/'),
                urlencoding::encode(key)
            )
        });

    Ok(EnrichmentRecord {
        text: payload.extract.unwrap_or_default().trim().to_string(),
        image_url,
        source_url,
    })
}

pub struct WikipediaSummarySource {
    client: reqwest::Client,
    api_root: String,
    page_root: String,
}

impl WikipediaSummarySource {
    pub fn new(config: &JetDeckConfig) -> Result<Self, FetchError> {
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| FetchError::Transport(format!("invalid user agent: {}", e)))?;
        let mut headers = HeaderMap::new();
        headers.insert("api-user-agent", agent);

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            api_root: config.summary_api_root.trim_end_matches('/').to_string(),
            page_root: config.page_root.clone(),
        })
    }

    pub fn summary_url(&self, key: &str) -> String {
        format!("{}/{}", self.api_root, urlencoding::encode(key))
    }
}

impl SummarySource for WikipediaSummarySource {
    async fn fetch_summary(&self, key: &str) -> Result<Option<EnrichmentRecord>, FetchError> {
        let url = self.summary_url(key);
        debug!("Fetching summary — key={} url={}", key, url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!("Summary unavailable — key={} status={}", key, status);
            return Ok(None);
        }

        let body = response.text().await?;
        Ok(Some(parse_summary(&body, key, &self.page_root)?))
    }
}

/// Drops blank keys and removes duplicates, keeping first-seen order.
///
/// Keys are otherwise used exactly as given, so results are keyed the way
/// the caller asked for them.
pub fn dedup_keys<I, K>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    let mut seen = HashSet::new();
    keys.into_iter()
        .map(|k| k.as_ref().to_string())
        .filter(|k| !k.trim().is_empty() && seen.insert(k.clone()))
        .collect()
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, Option<EnrichmentRecord>>,
    // Dropping the sender wakes every waiter for that key.
    in_flight: HashMap<String, watch::Sender<()>>,
}

enum Claim {
    Hit(Option<EnrichmentRecord>),
    Wait(watch::Receiver<()>),
    Owner,
}

struct InFlightGuard<'a, S> {
    cache: &'a EnrichmentCache<S>,
    key: &'a str,
}

impl<S> Drop for InFlightGuard<'_, S> {
    fn drop(&mut self) {
        self.cache.lock().in_flight.remove(self.key);
    }
}

/// Append-only summary cache shared by every consumer of the application.
pub struct EnrichmentCache<S> {
    source: S,
    remember_failures: bool,
    state: Mutex<CacheState>,
}

impl<S> EnrichmentCache<S> {
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: SummarySource> EnrichmentCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            remember_failures: true,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// When disabled, transport errors are reported as `None` but not cached.
    pub fn remember_failures(mut self, remember: bool) -> Self {
        self.remember_failures = remember;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// `None` if the key was never settled, `Some(None)` if it settled without data.
    pub fn get(&self, key: &str) -> Option<Option<EnrichmentRecord>> {
        self.lock().entries.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Number of callers parked on the in-flight fetch of `key`.
    pub fn waiters(&self, key: &str) -> usize {
        self.lock()
            .in_flight
            .get(key)
            .map_or(0, watch::Sender::receiver_count)
    }

    /// Forgets one key so the next lookup fetches it again.
    pub fn invalidate(&self, key: &str) -> bool {
        self.lock().entries.remove(key).is_some()
    }

    /// Forgets every negative entry. Returns how many were removed.
    pub fn purge_unavailable(&self) -> usize {
        let mut state = self.lock();
        let before = state.entries.len();
        state.entries.retain(|_, record| record.is_some());
        before - state.entries.len()
    }

    /// Resolves every non-empty key, fetching the ones not yet cached concurrently.
    ///
    /// If `token` is cancelled before all keys settle, nothing fetched by this
    /// call after the cancellation is written and `Err(Cancelled)` is returned.
    pub async fn get_or_fetch<I, K>(
        &self,
        keys: I,
        token: &CancellationToken,
    ) -> Result<EnrichmentMap, Cancelled>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let wanted = dedup_keys(keys);
        if wanted.is_empty() {
            return Ok(EnrichmentMap::new());
        }

        let settled = join_all(wanted.iter().map(|key| self.resolve_key(key, token))).await;
        if token.is_cancelled() {
            return Err(Cancelled);
        }

        wanted
            .into_iter()
            .zip(settled)
            .map(|(key, record)| record.map(|r| (key, r)).ok_or(Cancelled))
            .collect()
    }

    // Outer `None` means the token was cancelled.
    async fn resolve_key(
        &self,
        key: &str,
        token: &CancellationToken,
    ) -> Option<Option<EnrichmentRecord>> {
        loop {
            let claim = {
                let mut state = self.lock();
                if let Some(record) = state.entries.get(key) {
                    Claim::Hit(record.clone())
                } else if let Some(tx) = state.in_flight.get(key) {
                    Claim::Wait(tx.subscribe())
                } else {
                    let (tx, _) = watch::channel(());
                    state.in_flight.insert(key.to_string(), tx);
                    Claim::Owner
                }
            };

            match claim {
                Claim::Hit(record) => {
                    debug!("Summary cache hit — key={}", key);
                    return Some(record);
                }
                Claim::Wait(mut rx) => {
                    debug!("Summary already in flight, waiting — key={}", key);
                    tokio::select! {
                        _ = token.cancelled() => return None,
                        _ = rx.changed() => {}
                    }
                }
                Claim::Owner => return self.fetch_owned(key, token).await,
            }
        }
    }

    async fn fetch_owned(
        &self,
        key: &str,
        token: &CancellationToken,
    ) -> Option<Option<EnrichmentRecord>> {
        let _guard = InFlightGuard { cache: self, key };

        let fetched = tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!("Summary fetch cancelled — key={}", key);
                return None;
            }
            result = self.source.fetch_summary(key) => result,
        };

        let (record, cacheable) = match fetched {
            Ok(record) => (record, true),
            Err(e) => {
                warn!("Summary fetch failed — key={} error={}", key, e);
                (None, self.remember_failures)
            }
        };

        if token.is_cancelled() {
            return None;
        }
        if cacheable {
            self.lock()
                .entries
                .entry(key.to_string())
                .or_insert_with(|| record.clone());
        }
        Some(record)
    }
}

/// One consumer's view of a key set.
///
/// Showing a new key set cancels the previous one; only the latest live
/// request ever updates the visible result.
pub struct EnrichmentView<S> {
    cache: Arc<EnrichmentCache<S>>,
    current: Mutex<CancellationToken>,
    result: watch::Sender<EnrichmentMap>,
}

impl<S: SummarySource> EnrichmentView<S> {
    pub fn new(cache: Arc<EnrichmentCache<S>>) -> Self {
        let (result, _) = watch::channel(EnrichmentMap::new());
        Self {
            cache,
            current: Mutex::new(CancellationToken::new()),
            result,
        }
    }

    fn replace_token(&self) -> CancellationToken {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        current.cancel();
        *current = CancellationToken::new();
        current.clone()
    }

    pub async fn show<I, K>(&self, keys: I) -> Result<EnrichmentMap, Cancelled>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let token = self.replace_token();
        let map = self.cache.get_or_fetch(keys, &token).await?;

        let _current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if token.is_cancelled() {
            return Err(Cancelled);
        }
        self.result.send_replace(map.clone());
        Ok(map)
    }

    pub fn current(&self) -> EnrichmentMap {
        self.result.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<EnrichmentMap> {
        self.result.subscribe()
    }

    /// Cancels whatever is in flight. Call when the consumer goes away.
    pub fn teardown(&self) {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cancel();
    }
}
