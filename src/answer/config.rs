// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the answer service

use std::env;

/// Configuration for answering questions against the external completion API
#[derive(Debug, Clone)]
pub struct AnswerConfig {
    /// OpenAI API key; absence is reported via health, never fatal
    pub api_key: Option<String>,
    /// Completion model (default: gpt-4o-mini)
    pub model: String,
    /// API base URL (default: https://api.openai.com/v1)
    pub base_url: String,
    /// Maximum completion tokens (default: 800)
    pub max_tokens: u32,
    /// Sampling temperature (default: 0.3, deterministic-leaning)
    pub temperature: f32,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Backoff before the single retry, in milliseconds (default: 500)
    pub retry_backoff_ms: u64,
    /// Fragments selected as grounding context (default: 4)
    pub top_fragments: usize,
    /// Character budget for the composed context (default: 6000)
    pub max_context_chars: usize,
    /// Maximum accepted question length (default: 500)
    pub max_question_chars: usize,
}

impl AnswerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            max_tokens: env::var("OPENAI_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(800),
            temperature: env::var("OPENAI_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.3),
            timeout_secs: env::var("OPENAI_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            retry_backoff_ms: env::var("OPENAI_RETRY_BACKOFF_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
            top_fragments: env::var("ANSWER_TOP_FRAGMENTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4)
                .min(10),
            max_context_chars: env::var("ANSWER_MAX_CONTEXT_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(6000),
            max_question_chars: 500,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model cannot be empty".to_string());
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be at least 1".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be at least 1".to_string());
        }
        if self.top_fragments == 0 {
            return Err("top_fragments must be at least 1".to_string());
        }
        if self.max_context_chars < 500 {
            return Err("max_context_chars must be at least 500".to_string());
        }
        Ok(())
    }

    /// Check whether the completion credential is present
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().map_or(false, |k| !k.is_empty())
    }
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            max_tokens: 800,
            temperature: 0.3,
            timeout_secs: 30,
            retry_backoff_ms: 500,
            top_fragments: 4,
            max_context_chars: 6000,
            max_question_chars: 500,
        }
    }
}
