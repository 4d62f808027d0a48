// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Health reporting
//!
//! Pure derived read over cache metadata, scheduler status, and the
//! credential-configured flag. Never fails and never blocks on network or
//! refresh activity: the snapshot read is a pointer clone and the
//! scheduler status copy holds its lock only for the clone.

use serde::Serialize;

use crate::cache::SnapshotCache;
use crate::refresh::RefreshStatus;

/// Health status returned by `GET /health`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// "healthy" when serving extracted content with a configured
    /// credential; "degraded" otherwise. A stale-but-serving cache is
    /// still healthy.
    pub status: &'static str,
    /// Fragments in the current snapshot
    pub cache_size: usize,
    /// Age of the current snapshot in seconds
    pub cache_age_secs: u64,
    /// Whether the completion credential is configured
    pub openai_configured: bool,
    /// Scheduler state and last cycle outcome
    pub refresh: RefreshStatus,
}

/// Build the health status from current component state
pub fn health_snapshot(
    cache: &SnapshotCache,
    openai_configured: bool,
    refresh: RefreshStatus,
) -> HealthStatus {
    let snapshot = cache.current();

    let status = if openai_configured && !snapshot.cold {
        "healthy"
    } else {
        "degraded"
    };

    HealthStatus {
        status,
        cache_size: snapshot.len(),
        cache_age_secs: snapshot.age_secs(),
        openai_configured,
        refresh,
    }
}
