use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};

use crate::answer::AnswerService;
use crate::api::ask::ask_handler;
use crate::api::health::{health_snapshot, HealthStatus};
use crate::api::programs::programs_handler;
use crate::cache::SnapshotCache;
use crate::refresh::RefreshScheduler;

/// Shared state for all request handlers
#[derive(Clone)]
pub struct AppState {
    pub answer_service: Arc<AnswerService>,
    pub cache: Arc<SnapshotCache>,
    pub refresh: Arc<RefreshScheduler>,
}

/// Build the router with all routes and layers
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Question answering endpoint
        .route("/v1/ask", post(ask_handler))
        // Program listing from the current snapshot
        .route("/v1/programs", get(programs_handler))
        // Manual refresh trigger
        .route("/v1/refresh", post(refresh_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Start the HTTP server on the given port
pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(health_snapshot(
        &state.cache,
        state.answer_service.is_configured(),
        state.refresh.status(),
    ))
}

async fn refresh_handler(State(state): State<AppState>) -> impl IntoResponse {
    state.refresh.trigger();
    (StatusCode::ACCEPTED, Json(json!({ "status": "scheduled" })))
}
