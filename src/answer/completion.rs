// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! External completion API client
//!
//! Implements the chat-completions call against the OpenAI API. The
//! backend trait keeps the answer service testable without network access.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::config::AnswerConfig;
use super::types::{AnswerError, Completion};

/// Abstraction over the completion API
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Submit a system + user prompt pair, returning the completion text
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<Completion, AnswerError>;

    fn name(&self) -> &'static str;
}

/// OpenAI chat-completions backend
pub struct OpenAiBackend {
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: u32,
    temperature: f32,
    timeout_ms: u64,
    client: Client,
}

impl OpenAiBackend {
    /// Create a backend from answer configuration and a credential
    pub fn new(config: &AnswerConfig, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout_ms: config.timeout_secs * 1000,
            client,
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<Completion, AnswerError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnswerError::Timeout {
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    AnswerError::Upstream {
                        status: 0,
                        message: e.to_string(),
                        retryable: true,
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let code = status.as_u16();
            let message = response.text().await.unwrap_or_default();
            // 429 and 5xx are worth one retry; auth and request errors are not
            let retryable = code == 429 || code >= 500;
            return Err(AnswerError::Upstream {
                status: code,
                message,
                retryable,
            });
        }

        let data: ChatResponse = response.json().await.map_err(|e| AnswerError::Upstream {
            status: 0,
            message: format!("JSON parse error: {}", e),
            retryable: false,
        })?;

        let text = data
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AnswerError::Upstream {
                status: 0,
                message: "Empty completion response".to_string(),
                retryable: false,
            });
        }

        Ok(Completion {
            text,
            total_tokens: data.usage.map(|u| u.total_tokens),
        })
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}
