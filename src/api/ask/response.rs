// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Ask API response types

use serde::{Deserialize, Serialize};

use crate::answer::Answer;

/// Response body for POST /v1/ask
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    /// Generated answer text
    pub answer: String,

    /// Best-matching program title, if any fragment matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,

    /// Fragments supplied as grounding context
    pub fragments_used: usize,

    /// Total tokens reported by the completion API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u32>,

    /// End-to-end handling time in milliseconds
    pub time_ms: u64,

    /// Request ID (provided or generated)
    pub request_id: String,
}

impl AskResponse {
    pub fn new(answer: Answer, time_ms: u64, request_id: String) -> Self {
        Self {
            answer: answer.text,
            program: answer.program,
            fragments_used: answer.fragments_used,
            total_tokens: answer.total_tokens,
            time_ms,
            request_id,
        }
    }
}
