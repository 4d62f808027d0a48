// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use posgrados_node::{
    answer::{AnswerConfig, AnswerService},
    api::{start_server, AppState},
    cache::SnapshotCache,
    catalog::{catalog_pages, CatalogConfig, HttpPageFetcher},
    refresh::{RefreshConfig, RefreshScheduler},
};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting Posgrados Catalog Node...");
    println!("📦 {}", posgrados_node::version::get_version_string());
    println!();

    let api_port = env::var("API_PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(8080);

    let catalog_config = CatalogConfig::from_env();
    catalog_config.validate().map_err(anyhow::Error::msg)?;

    let refresh_config = RefreshConfig::from_env();
    refresh_config.validate().map_err(anyhow::Error::msg)?;

    let answer_config = AnswerConfig::from_env();
    answer_config.validate().map_err(anyhow::Error::msg)?;

    if !answer_config.is_configured() {
        tracing::warn!(
            "OPENAI_API_KEY not set: /v1/ask will return not_configured until it is provided"
        );
    }

    let cache = Arc::new(SnapshotCache::new());
    let fetcher = Arc::new(HttpPageFetcher::new(&catalog_config));
    let pages = catalog_pages(&catalog_config.base_url);

    let scheduler = Arc::new(RefreshScheduler::new(
        pages,
        fetcher,
        cache.clone(),
        catalog_config,
        refresh_config,
    ));
    // Background refresh loop: first cycle runs immediately at startup
    let _refresh_task = scheduler.spawn();

    let answer_service = Arc::new(AnswerService::new(answer_config, cache.clone()));

    let state = AppState {
        answer_service,
        cache,
        refresh: scheduler,
    };

    start_server(state, api_port)
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {}", e))?;

    Ok(())
}
