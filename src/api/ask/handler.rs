// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Ask API endpoint handler

use axum::{extract::State, http::StatusCode, Json};
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::request::AskRequest;
use super::response::AskResponse;
use crate::api::errors::{ApiError, ErrorResponse};
use crate::api::http_server::AppState;

/// POST /v1/ask - Answer a question about the graduate catalog
///
/// # Request
/// - `question`: User question (required, 3-500 chars)
/// - `requestId`: Optional request ID for tracking
///
/// # Response
/// - `answer`: Generated answer text
/// - `program`: Best-matching program title, if any
/// - `fragmentsUsed`: Fragments supplied as grounding context
/// - `timeMs`: End-to-end handling time
/// - `requestId`: Provided or generated request ID
///
/// # Errors
/// - 400 Bad Request: Invalid question
/// - 502 Bad Gateway: Completion API failed after retry
/// - 503 Service Unavailable: Completion API key not configured
/// - 504 Gateway Timeout: Completion API timed out
pub async fn ask_handler(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, Json<ErrorResponse>)> {
    let start = Instant::now();
    let request_id = request
        .request_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    debug!("Ask request {}: {:?}", request_id, request.question);

    if let Err(e) = request.validate() {
        warn!("Ask validation failed: {}", e);
        return Err(error_reply(&ApiError::InvalidRequest(e), request_id));
    }

    match state.answer_service.answer(&request.question).await {
        Ok(answer) => {
            let time_ms = start.elapsed().as_millis() as u64;
            info!(
                "Question answered in {}ms using {} fragments (tokens: {:?})",
                time_ms, answer.fragments_used, answer.total_tokens
            );
            Ok(Json(AskResponse::new(answer, time_ms, request_id)))
        }
        Err(e) => {
            warn!("Answer failed: {}", e);
            Err(error_reply(&ApiError::from(&e), request_id))
        }
    }
}

fn error_reply(error: &ApiError, request_id: String) -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::from_u16(error.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(error.to_response(Some(request_id))))
}
