// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Refresh cycle semantics: partial failure, total failure, atomic swap

use async_trait::async_trait;
use posgrados_node::cache::SnapshotCache;
use posgrados_node::catalog::{
    CatalogConfig, FetchError, PageFetcher, PageKind, SourceDocument, SourcePage,
};
use posgrados_node::refresh::{RefreshConfig, RefreshPhase, RefreshScheduler};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

const BASE: &str = "https://example.com/posgrados";

/// Fetcher serving canned HTML per URL; unknown URLs 404
struct StubFetcher {
    pages: HashMap<String, Result<String, FetchError>>,
}

impl StubFetcher {
    fn new() -> Self {
        Self {
            pages: HashMap::new(),
        }
    }

    fn ok(mut self, page: &SourcePage, title: &str, body: &str) -> Self {
        self.pages.insert(page.url.clone(), Ok(page_html(title, body)));
        self
    }

    fn failing(mut self, page: &SourcePage, error: FetchError) -> Self {
        self.pages.insert(page.url.clone(), Err(error));
        self
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<SourceDocument, FetchError> {
        match self.pages.get(url) {
            Some(Ok(html)) => Ok(SourceDocument {
                url: url.to_string(),
                html: html.clone(),
                fetched_at: Instant::now(),
            }),
            Some(Err(e)) => Err(e.clone()),
            None => Err(FetchError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}

fn page_html(title: &str, body: &str) -> String {
    format!(
        "<html><head><title>{title}</title></head><body>\
         <div id=\"contenido\"><h1>{title}</h1><p>{body}</p></div>\
         </body></html>"
    )
}

fn long_body(topic: &str) -> String {
    format!(
        "El programa de {topic} ofrece formación de posgrado con un cuerpo docente \
         integrado por profesores regulares e invitados. El plan articula teoría y \
         práctica a lo largo de ciclos anuales, con seminarios de actualización y \
         talleres de escritura académica orientados a la producción de la tesis."
    )
}

fn scheduler(
    pages: Vec<SourcePage>,
    fetcher: StubFetcher,
    cache: Arc<SnapshotCache>,
) -> RefreshScheduler {
    RefreshScheduler::new(
        pages,
        Arc::new(fetcher),
        cache,
        CatalogConfig::default(),
        RefreshConfig::default(),
    )
}

#[tokio::test]
async fn test_successful_cycle_publishes_snapshot() {
    let pages = vec![
        SourcePage::new(BASE, "mae_der_penal", PageKind::Overview),
        SourcePage::new(BASE, "mae_der_penal", PageKind::StudyPlan),
    ];
    let fetcher = StubFetcher::new()
        .ok(&pages[0], "Maestría en Derecho Penal", &long_body("derecho penal"))
        .ok(&pages[1], "Plan de estudios", &long_body("derecho penal"));

    let cache = Arc::new(SnapshotCache::new());
    let scheduler = scheduler(pages, fetcher, cache.clone());

    let outcome = scheduler.run_cycle().await;

    assert!(outcome.swapped);
    assert_eq!(outcome.pages_fetched, 2);
    assert_eq!(outcome.pages_failed, 0);
    assert_eq!(outcome.fragments, 2);

    let snapshot = cache.current();
    assert!(!snapshot.cold);
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.fragments[0].id, "mae_der_penal:overview");
    assert_eq!(snapshot.fragments[1].id, "mae_der_penal:plan");
}

#[tokio::test]
async fn test_partial_failure_keeps_successful_fragments() {
    // Source A yields 3 fragments; source B times out
    let pages = vec![
        SourcePage::new(BASE, "mae_der_penal", PageKind::Overview),
        SourcePage::new(BASE, "mae_der_penal", PageKind::StudyPlan),
        SourcePage::new(BASE, "mae_der_penal", PageKind::Requirements),
        SourcePage::new(BASE, "mae_energia", PageKind::Overview),
    ];
    let timeout_url = pages[3].url.clone();
    let fetcher = StubFetcher::new()
        .ok(&pages[0], "Maestría en Derecho Penal", &long_body("derecho penal"))
        .ok(&pages[1], "Plan de estudios", &long_body("derecho penal"))
        .ok(&pages[2], "Requisitos de admisión", &long_body("derecho penal"))
        .failing(
            &pages[3],
            FetchError::Timeout {
                url: timeout_url.clone(),
            },
        );

    let cache = Arc::new(SnapshotCache::new());
    let scheduler = scheduler(pages, fetcher, cache.clone());

    let outcome = scheduler.run_cycle().await;

    assert!(outcome.swapped);
    assert_eq!(outcome.pages_fetched, 3);
    assert_eq!(outcome.pages_failed, 1);
    assert_eq!(outcome.fragments, 3);
    // The failure is recorded for observability
    assert_eq!(outcome.failed_sources, vec![timeout_url]);

    assert_eq!(cache.current().len(), 3);
}

#[tokio::test]
async fn test_total_failure_retains_previous_snapshot() {
    let pages = vec![
        SourcePage::new(BASE, "mae_der_penal", PageKind::Overview),
        SourcePage::new(BASE, "mae_energia", PageKind::Overview),
    ];

    // First cycle succeeds and warms the cache
    let warm_fetcher = StubFetcher::new()
        .ok(&pages[0], "Maestría en Derecho Penal", &long_body("derecho penal"))
        .ok(&pages[1], "Maestría en Energía", &long_body("energía"));
    let cache = Arc::new(SnapshotCache::new());
    scheduler(pages.clone(), warm_fetcher, cache.clone())
        .run_cycle()
        .await;
    let before = cache.current();
    assert_eq!(before.len(), 2);

    // Second cycle: every source unreachable
    let failing = StubFetcher::new();
    let dark = scheduler(pages, failing, cache.clone());
    let outcome = dark.run_cycle().await;

    assert!(!outcome.swapped);
    assert_eq!(outcome.fragments, 0);
    assert_eq!(outcome.pages_failed, 2);

    // Stale is preferred over empty: the exact same snapshot keeps serving
    let after = cache.current();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(after.len(), 2);
}

#[tokio::test]
async fn test_cycle_returns_to_idle_regardless_of_outcome() {
    let pages = vec![SourcePage::new(BASE, "mae_der_penal", PageKind::Overview)];
    let cache = Arc::new(SnapshotCache::new());
    let failing = scheduler(pages, StubFetcher::new(), cache);

    failing.run_cycle().await;

    let status = failing.status();
    assert_eq!(status.phase, RefreshPhase::Idle);
    assert_eq!(status.cycles_completed, 1);
    assert!(!status.last_outcome.unwrap().swapped);
}

#[tokio::test]
async fn test_unparseable_page_degrades_not_fatal() {
    let pages = vec![
        SourcePage::new(BASE, "mae_der_penal", PageKind::Overview),
        SourcePage::new(BASE, "mae_energia", PageKind::Overview),
    ];
    let mut fetcher = StubFetcher::new().ok(
        &pages[0],
        "Maestría en Derecho Penal",
        &long_body("derecho penal"),
    );
    // Second page fetches fine but has no usable content
    fetcher
        .pages
        .insert(pages[1].url.clone(), Ok("<html><body></body></html>".to_string()));

    let cache = Arc::new(SnapshotCache::new());
    let scheduler = scheduler(pages, fetcher, cache.clone());
    let outcome = scheduler.run_cycle().await;

    // One fragment survives; the empty page is recorded, not fatal
    assert!(outcome.swapped);
    assert_eq!(outcome.fragments, 1);
    assert_eq!(outcome.failed_sources.len(), 1);
    assert_eq!(cache.current().len(), 1);
}

#[tokio::test]
async fn test_manual_trigger_wakes_loop() {
    let pages = vec![SourcePage::new(BASE, "mae_der_penal", PageKind::Overview)];
    let fetcher = StubFetcher::new().ok(
        &pages[0],
        "Maestría en Derecho Penal",
        &long_body("derecho penal"),
    );
    let cache = Arc::new(SnapshotCache::new());
    // Long interval so only the startup tick and the manual trigger fire
    let scheduler = Arc::new(RefreshScheduler::new(
        pages,
        Arc::new(fetcher),
        cache.clone(),
        CatalogConfig::default(),
        RefreshConfig::default(),
    ));

    let handle = scheduler.spawn();

    // Startup cycle
    let deadline = Instant::now() + std::time::Duration::from_secs(5);
    while scheduler.status().cycles_completed < 1 {
        assert!(Instant::now() < deadline, "startup cycle did not run");
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    scheduler.trigger();
    let deadline = Instant::now() + std::time::Duration::from_secs(5);
    while scheduler.status().cycles_completed < 2 {
        assert!(Instant::now() < deadline, "manual trigger did not run");
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    assert!(!cache.current().cold);
    handle.abort();
}
