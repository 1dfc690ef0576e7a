// ABOUTME: Fail-soft motivational quote generation
// ABOUTME: One short provider call with a tight deadline and a fixed fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

//! Motivational quotes.
//!
//! Unlike plan generation, this path is fail-soft: one attempt, a 10 s
//! deadline, and any failure shape (provider error, timeout, empty content)
//! yields the fixed fallback string. Callers always get a quote.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, warn};

use crate::llm::{ChatMessage, ChatRequest, LlmProvider};

/// Deadline for the quote call
pub const QUOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Quote returned whenever the provider path fails
pub const FALLBACK_QUOTE: &str = "Believe in yourself and push your limits!";

/// System framing for the quote request
const QUOTE_SYSTEM_PROMPT: &str = "You are a motivational fitness coach. \
    Generate a short, powerful, inspiring fitness quote (max 20 words).";

/// Sampling temperature for quotes
const QUOTE_TEMPERATURE: f32 = 0.9;

/// Token cap for quotes
const QUOTE_MAX_TOKENS: u32 = 50;

/// Fail-soft quote generator over an [`LlmProvider`]
pub struct QuoteGenerator {
    provider: Arc<dyn LlmProvider>,
    deadline: Duration,
}

impl QuoteGenerator {
    /// Create a generator with the production deadline
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            deadline: QUOTE_TIMEOUT,
        }
    }

    /// Override the deadline
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Produce a motivational quote; never fails
    pub async fn daily_quote(&self) -> String {
        let request = ChatRequest::new(vec![
            ChatMessage::system(QUOTE_SYSTEM_PROMPT),
            ChatMessage::user("Give me a motivational fitness quote for today."),
        ])
        .with_temperature(QUOTE_TEMPERATURE)
        .with_max_tokens(QUOTE_MAX_TOKENS);

        match timeout(self.deadline, self.provider.complete(&request)).await {
            Ok(Ok(response)) => {
                let quote = response.content.trim();
                if quote.is_empty() {
                    debug!("Provider returned an empty quote, using fallback");
                    FALLBACK_QUOTE.to_owned()
                } else {
                    quote.to_owned()
                }
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Quote generation failed, using fallback");
                FALLBACK_QUOTE.to_owned()
            }
            Err(_) => {
                warn!("Quote generation timed out, using fallback");
                FALLBACK_QUOTE.to_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::llm::ChatResponse;
    use async_trait::async_trait;

    struct ScriptedProvider {
        outcome: Outcome,
    }

    enum Outcome {
        Text(&'static str),
        Error,
        Hang,
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn default_model(&self) -> &str {
            "test-model"
        }

        async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
            match self.outcome {
                Outcome::Text(text) => Ok(ChatResponse {
                    content: text.to_owned(),
                    model: "test-model".into(),
                    usage: None,
                    finish_reason: None,
                }),
                Outcome::Error => Err(AppError::external_service("scripted", "boom")),
                Outcome::Hang => {
                    std::future::pending::<()>().await;
                    unreachable!()
                }
            }
        }
    }

    fn generator(outcome: Outcome) -> QuoteGenerator {
        QuoteGenerator::new(Arc::new(ScriptedProvider { outcome }))
    }

    #[tokio::test]
    async fn test_returns_provider_quote() {
        let quote = generator(Outcome::Text("  Push harder.  ")).daily_quote().await;
        assert_eq!(quote, "Push harder.");
    }

    #[tokio::test]
    async fn test_fallback_on_error() {
        let quote = generator(Outcome::Error).daily_quote().await;
        assert_eq!(quote, FALLBACK_QUOTE);
    }

    #[tokio::test]
    async fn test_fallback_on_empty_content() {
        let quote = generator(Outcome::Text("   ")).daily_quote().await;
        assert_eq!(quote, FALLBACK_QUOTE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fallback_on_timeout() {
        let quote = generator(Outcome::Hang).daily_quote().await;
        assert_eq!(quote, FALLBACK_QUOTE);
    }
}
