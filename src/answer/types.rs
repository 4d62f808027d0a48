// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for the answer service

use thiserror::Error;

/// A generated answer grounded in cached catalog content
#[derive(Debug, Clone)]
pub struct Answer {
    /// Generated response text
    pub text: String,
    /// Title of the best-matching program, if any fragment matched
    pub program: Option<String>,
    /// Number of fragments supplied as grounding context
    pub fragments_used: usize,
    /// Total tokens reported by the completion API
    pub total_tokens: Option<u32>,
}

/// A raw completion returned by the external API
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub total_tokens: Option<u32>,
}

/// Errors that can occur while answering a question
#[derive(Debug, Clone, Error)]
pub enum AnswerError {
    /// Completion API credential is absent; checkable without network I/O
    #[error("Completion API key not configured")]
    NotConfigured,

    /// Question was empty or too short
    #[error("Question cannot be empty")]
    EmptyQuestion,

    /// Question exceeded the accepted length
    #[error("Question too long (max {max} characters)")]
    QuestionTooLong { max: usize },

    /// Completion API failure
    #[error("Completion API error: {status} - {message}")]
    Upstream {
        /// HTTP status code (0 for transport errors)
        status: u16,
        message: String,
        /// Whether a retry may succeed
        retryable: bool,
    },

    /// Completion request timed out
    #[error("Completion timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },
}

impl AnswerError {
    /// Whether one bounded retry is worth attempting
    pub fn is_retryable(&self) -> bool {
        match self {
            AnswerError::Timeout { .. } => true,
            AnswerError::Upstream { retryable, .. } => *retryable,
            _ => false,
        }
    }
}
