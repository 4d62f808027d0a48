// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Program listing endpoint
//!
//! Derived read over the current snapshot: one entry per program,
//! taken from its overview fragment.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::http_server::AppState;
use crate::catalog::PageKind;

/// One catalog program, as listed by `GET /v1/programs`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramEntry {
    /// Program slug
    pub program: String,
    /// Title from the overview page
    pub title: String,
    /// Overview page URL
    pub url: String,
}

/// Response body for GET /v1/programs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramsResponse {
    pub programs: Vec<ProgramEntry>,
    pub count: usize,
}

/// GET /v1/programs - List programs present in the current snapshot
///
/// Reads the cache without blocking; an empty list simply means the cache
/// is still cold.
pub async fn programs_handler(State(state): State<AppState>) -> Json<ProgramsResponse> {
    let snapshot = state.cache.current();

    let programs: Vec<ProgramEntry> = snapshot
        .fragments
        .iter()
        .filter(|f| f.kind == PageKind::Overview)
        .map(|f| ProgramEntry {
            program: f.program.clone(),
            title: f.title.clone(),
            url: f.url.clone(),
        })
        .collect();

    let count = programs.len();
    Json(ProgramsResponse { programs, count })
}
