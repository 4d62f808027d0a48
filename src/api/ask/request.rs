// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Ask API request types

use serde::{Deserialize, Serialize};

/// Request body for POST /v1/ask
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    /// User question (required, 3-500 chars)
    pub question: String,

    /// Optional request ID for tracking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl AskRequest {
    /// Validate the request
    pub fn validate(&self) -> Result<(), String> {
        let trimmed = self.question.trim();
        if trimmed.chars().count() < 3 {
            return Err("Question too short (min 3 characters)".to_string());
        }
        if trimmed.chars().count() > 500 {
            return Err("Question too long (max 500 characters)".to_string());
        }
        Ok(())
    }
}
