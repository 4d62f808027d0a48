// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Answer service orchestration
//!
//! Coordinates credential checks, snapshot reads, relevance selection,
//! prompt composition, and the external completion call. Reads the cache
//! without blocking and never mutates it.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::cache::SnapshotCache;

use super::completion::{CompletionBackend, OpenAiBackend};
use super::config::AnswerConfig;
use super::prompt::{build_prompt, SYSTEM_PROMPT};
use super::relevance::rank_fragments;
use super::types::{Answer, AnswerError};

/// Service answering questions against the cached catalog
pub struct AnswerService {
    config: AnswerConfig,
    cache: Arc<SnapshotCache>,
    backend: Option<Arc<dyn CompletionBackend>>,
}

impl AnswerService {
    /// Create the service; builds the OpenAI backend only when a
    /// credential is configured
    pub fn new(config: AnswerConfig, cache: Arc<SnapshotCache>) -> Self {
        let backend = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .map(|key| Arc::new(OpenAiBackend::new(&config, key)) as Arc<dyn CompletionBackend>);

        Self {
            config,
            cache,
            backend,
        }
    }

    /// Create the service with an explicit backend (used by tests)
    pub fn with_backend(
        config: AnswerConfig,
        cache: Arc<SnapshotCache>,
        backend: Arc<dyn CompletionBackend>,
    ) -> Self {
        Self {
            config,
            cache,
            backend: Some(backend),
        }
    }

    /// Whether the completion credential is present
    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Answer a question using the current catalog snapshot
    ///
    /// Fails with [`AnswerError::NotConfigured`] before any network I/O if
    /// the credential is absent. On retryable upstream failures, applies
    /// exactly one retry with backoff before surfacing the error.
    pub async fn answer(&self, question: &str) -> Result<Answer, AnswerError> {
        let backend = self.backend.as_ref().ok_or(AnswerError::NotConfigured)?;

        let question = question.trim();
        if question.chars().count() < 3 {
            return Err(AnswerError::EmptyQuestion);
        }
        if question.chars().count() > self.config.max_question_chars {
            return Err(AnswerError::QuestionTooLong {
                max: self.config.max_question_chars,
            });
        }

        let snapshot = self.cache.current();
        let selected = rank_fragments(&snapshot.fragments, question, self.config.top_fragments);

        debug!(
            "Answering with {} of {} fragments (snapshot age: {}s)",
            selected.len(),
            snapshot.len(),
            snapshot.age_secs()
        );

        let prompt = build_prompt(question, &selected, self.config.max_context_chars);

        let completion = match backend.complete(SYSTEM_PROMPT, &prompt).await {
            Ok(completion) => completion,
            Err(e) if e.is_retryable() => {
                warn!(
                    "Completion failed ({}), retrying once after {}ms",
                    e, self.config.retry_backoff_ms
                );
                sleep(Duration::from_millis(self.config.retry_backoff_ms)).await;
                backend.complete(SYSTEM_PROMPT, &prompt).await?
            }
            Err(e) => return Err(e),
        };

        Ok(Answer {
            text: completion.text,
            program: selected.first().map(|f| f.title.clone()),
            fragments_used: selected.len(),
            total_tokens: completion.total_tokens,
        })
    }
}
