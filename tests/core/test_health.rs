// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Health reporting: pure derived state, never blocks, never fails

use async_trait::async_trait;
use posgrados_node::api::health_snapshot;
use posgrados_node::cache::{CatalogSnapshot, SnapshotCache};
use posgrados_node::catalog::{
    CatalogConfig, ContentFragment, FetchError, PageFetcher, PageKind, SourceDocument, SourcePage,
};
use posgrados_node::refresh::{RefreshConfig, RefreshPhase, RefreshScheduler, RefreshStatus};
use std::sync::Arc;
use std::time::Instant;

fn fragment(id: &str) -> ContentFragment {
    ContentFragment {
        id: id.to_string(),
        program: "mae_der_penal".to_string(),
        kind: PageKind::Overview,
        url: format!("https://example.com/{}.php", id),
        title: "Maestría en Derecho Penal".to_string(),
        text: "Contenido del programa".to_string(),
        extracted_at: Instant::now(),
    }
}

fn idle_status() -> RefreshStatus {
    RefreshStatus {
        phase: RefreshPhase::Idle,
        cycles_completed: 0,
        last_outcome: None,
    }
}

struct DarkFetcher;

#[async_trait]
impl PageFetcher for DarkFetcher {
    async fn fetch(&self, url: &str) -> Result<SourceDocument, FetchError> {
        Err(FetchError::Timeout {
            url: url.to_string(),
        })
    }
}

#[test]
fn test_health_on_cold_cache_never_fails() {
    let cache = SnapshotCache::new();
    let health = health_snapshot(&cache, false, idle_status());

    assert_eq!(health.status, "degraded");
    assert_eq!(health.cache_size, 0);
    assert!(!health.openai_configured);
}

#[test]
fn test_health_reports_fragment_count() {
    let cache = SnapshotCache::new();
    cache.replace(CatalogSnapshot::new(vec![
        fragment("a"),
        fragment("b"),
        fragment("c"),
    ]));

    let health = health_snapshot(&cache, true, idle_status());
    assert_eq!(health.status, "healthy");
    assert_eq!(health.cache_size, 3);
}

#[tokio::test]
async fn test_stale_but_serving_stays_healthy() {
    // Warm cache, then a refresh cycle where every source fails: the
    // service keeps serving the old snapshot and stays healthy.
    let cache = Arc::new(SnapshotCache::new());
    cache.replace(CatalogSnapshot::new(vec![fragment("a"), fragment("b")]));

    let pages = vec![SourcePage::new(
        "https://example.com",
        "mae_der_penal",
        PageKind::Overview,
    )];
    let scheduler = RefreshScheduler::new(
        pages,
        Arc::new(DarkFetcher),
        cache.clone(),
        CatalogConfig::default(),
        RefreshConfig::default(),
    );
    scheduler.run_cycle().await;

    let health = health_snapshot(&cache, true, scheduler.status());
    assert_eq!(health.status, "healthy");
    assert_eq!(health.cache_size, 2);

    // The failed cycle is still visible for observability
    let outcome = health.refresh.last_outcome.unwrap();
    assert!(!outcome.swapped);
    assert_eq!(outcome.pages_failed, 1);
}

#[test]
fn test_health_age_tracks_snapshot() {
    let cache = SnapshotCache::new();
    cache.replace(CatalogSnapshot::new(vec![fragment("a")]));

    let first = health_snapshot(&cache, true, idle_status());
    std::thread::sleep(std::time::Duration::from_millis(1100));
    let second = health_snapshot(&cache, true, idle_status());

    assert!(second.cache_age_secs >= first.cache_age_secs);
    assert!(second.cache_age_secs >= 1);
}
