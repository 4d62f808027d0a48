// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP API surface
//!
//! Routes: `GET /health`, `POST /v1/ask`, `GET /v1/programs`,
//! `POST /v1/refresh`.

pub mod ask;
pub mod errors;
pub mod health;
pub mod http_server;
pub mod programs;

pub use ask::{AskRequest, AskResponse};
pub use errors::{ApiError, ErrorResponse};
pub use health::{health_snapshot, HealthStatus};
pub use http_server::{build_router, start_server, AppState};
pub use programs::{ProgramEntry, ProgramsResponse};
