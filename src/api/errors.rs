// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::answer::AnswerError;

/// Error payload returned by all endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
}

/// API-level errors mapped to HTTP responses
#[derive(Debug, Clone)]
pub enum ApiError {
    InvalidRequest(String),
    /// Completion credential missing
    NotConfigured,
    /// External completion API failed
    Upstream { status: u16, message: String },
    Timeout,
    InternalError(String),
}

impl ApiError {
    pub fn to_response(&self, request_id: Option<String>) -> ErrorResponse {
        let (error_type, message, details) = match self {
            ApiError::InvalidRequest(msg) => ("invalid_request", msg.clone(), None),
            ApiError::NotConfigured => (
                "not_configured",
                "Completion API key not configured".to_string(),
                None,
            ),
            ApiError::Upstream { status, message } => {
                let mut details = HashMap::new();
                details.insert(
                    "upstream_status".to_string(),
                    serde_json::Value::Number((*status).into()),
                );
                ("upstream_error", message.clone(), Some(details))
            }
            ApiError::Timeout => ("timeout", "Request timed out".to_string(), None),
            ApiError::InternalError(msg) => ("internal_error", msg.clone(), None),
        };

        ErrorResponse {
            error_type: error_type.to_string(),
            message,
            request_id,
            details,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidRequest(_) => 400,
            ApiError::NotConfigured => 503,
            ApiError::Upstream { .. } => 502,
            ApiError::Timeout => 504,
            ApiError::InternalError(_) => 500,
        }
    }
}

impl From<&AnswerError> for ApiError {
    fn from(err: &AnswerError) -> Self {
        match err {
            AnswerError::NotConfigured => ApiError::NotConfigured,
            AnswerError::EmptyQuestion | AnswerError::QuestionTooLong { .. } => {
                ApiError::InvalidRequest(err.to_string())
            }
            AnswerError::Upstream {
                status, message, ..
            } => ApiError::Upstream {
                status: *status,
                message: message.clone(),
            },
            AnswerError::Timeout { .. } => ApiError::Timeout,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::NotConfigured => write!(f, "Completion API key not configured"),
            ApiError::Upstream { status, message } => {
                write!(f, "Upstream error {}: {}", status, message)
            }
            ApiError::Timeout => write!(f, "Request timed out"),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}
