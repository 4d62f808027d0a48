// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod answer;
pub mod api;
pub mod cache;
pub mod catalog;
pub mod refresh;
pub mod version;

// Re-export main types
pub use answer::{Answer, AnswerConfig, AnswerError, AnswerService, CompletionBackend};
pub use api::{AppState, HealthStatus};
pub use cache::{CatalogSnapshot, SnapshotCache};
pub use catalog::{
    CatalogConfig, ContentFragment, ExtractError, FetchError, HttpPageFetcher, PageFetcher,
    PageKind, SourceDocument, SourcePage,
};
pub use refresh::{CycleOutcome, RefreshConfig, RefreshPhase, RefreshScheduler, RefreshStatus};
