// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Scheduled catalog refresh
//!
//! One long-lived background task drives fetch → extract → swap on a fixed
//! interval (default 24 h), independent of request traffic. Partial source
//! failures are tolerated and logged; a cycle that extracts zero fragments
//! skips the swap so the previous snapshot keeps serving. The scheduler
//! never terminates the process and the interval timer is unaffected by
//! cycle outcomes.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::env;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::{CatalogSnapshot, SnapshotCache};
use crate::catalog::{
    extract_fragments, CatalogConfig, ContentFragment, FetchError, PageFetcher, SourceDocument,
    SourcePage,
};

/// Configuration for the refresh scheduler
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Time between refresh cycles
    pub interval: Duration,
}

impl RefreshConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            interval: Duration::from_secs(
                env::var("CATALOG_REFRESH_INTERVAL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(86400),
            ),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.interval.as_secs() == 0 {
            return Err("refresh interval must be at least 1 second".to_string());
        }
        Ok(())
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(86400),
        }
    }
}

/// Scheduler state machine phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPhase {
    Idle,
    Fetching,
    Extracting,
    Swapping,
}

/// Result of one completed refresh cycle
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleOutcome {
    pub completed_at: DateTime<Utc>,
    pub duration_ms: u64,
    /// Pages fetched successfully
    pub pages_fetched: usize,
    /// Pages that failed to fetch
    pub pages_failed: usize,
    /// Fragments extracted across all pages
    pub fragments: usize,
    /// Whether a new snapshot was published
    pub swapped: bool,
    /// URLs that failed to fetch or extract this cycle
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_sources: Vec<String>,
}

/// Observable scheduler state, read by the health endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshStatus {
    pub phase: RefreshPhase,
    pub cycles_completed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_outcome: Option<CycleOutcome>,
}

/// Background refresh scheduler
///
/// Owns the write path of the snapshot cache. Request handlers only ever
/// read the cache; the scheduler is the single writer.
pub struct RefreshScheduler {
    pages: Vec<SourcePage>,
    fetcher: Arc<dyn PageFetcher>,
    cache: Arc<SnapshotCache>,
    catalog_config: CatalogConfig,
    config: RefreshConfig,
    status: RwLock<RefreshStatus>,
    trigger: Notify,
}

impl RefreshScheduler {
    pub fn new(
        pages: Vec<SourcePage>,
        fetcher: Arc<dyn PageFetcher>,
        cache: Arc<SnapshotCache>,
        catalog_config: CatalogConfig,
        config: RefreshConfig,
    ) -> Self {
        Self {
            pages,
            fetcher,
            cache,
            catalog_config,
            config,
            status: RwLock::new(RefreshStatus {
                phase: RefreshPhase::Idle,
                cycles_completed: 0,
                last_outcome: None,
            }),
            trigger: Notify::new(),
        }
    }

    /// Spawn the background refresh loop
    ///
    /// Runs one cycle immediately at startup, then one per interval tick.
    /// A manual [`trigger`](Self::trigger) also wakes the loop.
    pub fn spawn(self: &Arc<Self>) -> JoinHandle<()> {
        let scheduler = Arc::clone(self);

        tokio::spawn(async move {
            info!(
                "Catalog refresh scheduler started ({} pages, interval {:?})",
                scheduler.pages.len(),
                scheduler.config.interval
            );

            let mut ticker = interval(scheduler.config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = scheduler.trigger.notified() => {
                        debug!("Manual refresh trigger received");
                    }
                }

                scheduler.run_cycle().await;
            }
        })
    }

    /// Request an on-demand refresh; returns immediately
    pub fn trigger(&self) {
        self.trigger.notify_one();
    }

    /// Current scheduler status
    pub fn status(&self) -> RefreshStatus {
        match self.status.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Run one complete fetch → extract → swap cycle
    ///
    /// Absorbs all errors: per-source failures are logged and recorded in
    /// the outcome, and a zero-fragment cycle leaves the previous snapshot
    /// in place.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let start = Instant::now();

        self.set_phase(RefreshPhase::Fetching);

        let results: Vec<(usize, Result<SourceDocument, FetchError>)> =
            stream::iter(0..self.pages.len())
                .map(|idx| {
                    let fetcher = Arc::clone(&self.fetcher);
                    let url = self.pages[idx].url.clone();
                    async move {
                        let result = fetcher.fetch(&url).await;
                        (idx, result)
                    }
                })
                .buffered(self.catalog_config.max_concurrent_fetches.max(1))
                .collect()
                .await;

        let mut fetched = Vec::new();
        let mut failed_sources = Vec::new();
        for (idx, result) in results {
            let page = &self.pages[idx];
            match result {
                Ok(doc) => fetched.push((page, doc)),
                Err(e) => {
                    warn!("Fetch failed for {}: {}", page.url, e);
                    failed_sources.push(page.url.clone());
                }
            }
        }
        let pages_fetched = fetched.len();
        let pages_failed = failed_sources.len();

        self.set_phase(RefreshPhase::Extracting);

        let mut fragments: Vec<ContentFragment> = Vec::new();
        for (page, doc) in &fetched {
            match extract_fragments(doc, page, &self.catalog_config) {
                Ok(mut extracted) => fragments.append(&mut extracted),
                Err(e) => {
                    warn!("Extraction failed for {}: {}", doc.url, e);
                    failed_sources.push(page.url.clone());
                }
            }
        }

        self.set_phase(RefreshPhase::Swapping);

        let fragment_count = fragments.len();
        let swapped = if fragments.is_empty() {
            warn!(
                "Refresh cycle extracted zero fragments ({} pages failed); keeping previous snapshot",
                pages_failed
            );
            false
        } else {
            self.cache.replace(CatalogSnapshot::new(fragments));
            true
        };

        let outcome = CycleOutcome {
            completed_at: Utc::now(),
            duration_ms: start.elapsed().as_millis() as u64,
            pages_fetched,
            pages_failed,
            fragments: fragment_count,
            swapped,
            failed_sources,
        };

        info!(
            "Refresh cycle complete: {} fragments from {} pages ({} failed, swapped: {}) in {}ms",
            outcome.fragments,
            outcome.pages_fetched,
            outcome.pages_failed,
            outcome.swapped,
            outcome.duration_ms
        );

        self.finish_cycle(outcome.clone());
        outcome
    }

    fn set_phase(&self, phase: RefreshPhase) {
        if let Ok(mut status) = self.status.write() {
            status.phase = phase;
        }
    }

    fn finish_cycle(&self, outcome: CycleOutcome) {
        if let Ok(mut status) = self.status.write() {
            status.phase = RefreshPhase::Idle;
            status.cycles_completed += 1;
            status.last_outcome = Some(outcome);
        }
    }
}
