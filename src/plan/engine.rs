// ABOUTME: Plan generation engine with per-attempt deadline and linear-backoff retry
// ABOUTME: Normalizes provider output and enforces the 7-day structural contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

//! # Generation Engine
//!
//! [`PlanEngine`] drives the external generation call to completion or a
//! typed failure.
//!
//! ## Policy
//!
//! - Each attempt races the provider call against a 120 s deadline; losing
//!   the race drops the in-flight future, which aborts the underlying HTTP
//!   request.
//! - Up to 3 attempts total. Before retry N the engine waits `N * 2000 ms`
//!   (2 s, then 4 s), linear rather than exponential.
//! - Transport errors, timeouts, non-JSON output, and JSON missing the
//!   `workout`/`meals` keys are retryable attempt failures.
//! - A parseable plan with the wrong day count is terminal: the provider
//!   understood the request and produced the wrong shape, so identical
//!   retries are not spent on it.
//! - The exhausted-retries error carries the last underlying failure's
//!   message; callers never see a partial plan.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::errors::{AppError, AppResult};
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::models::GeneratedPlan;
use crate::validation::NewProfile;

use super::prompt::{build_plan_prompt, PLAN_SYSTEM_PROMPT};

/// Total attempts per generation request
pub const PLAN_ATTEMPTS: u32 = 3;

/// Per-attempt deadline for plan generation
pub const PLAN_TIMEOUT: Duration = Duration::from_secs(120);

/// Backoff unit: wait `retry_index * BACKOFF_STEP` before each retry
pub const BACKOFF_STEP: Duration = Duration::from_millis(2000);

/// Days expected in each half of a generated plan
pub const PLAN_DAYS: usize = 7;

/// Sampling temperature for plan generation
const PLAN_TEMPERATURE: f32 = 0.8;

/// Retrying generation engine over an [`LlmProvider`]
pub struct PlanEngine {
    provider: Arc<dyn LlmProvider>,
    attempts: u32,
    attempt_timeout: Duration,
    backoff_step: Duration,
}

impl PlanEngine {
    /// Create an engine with the production retry policy
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            attempts: PLAN_ATTEMPTS,
            attempt_timeout: PLAN_TIMEOUT,
            backoff_step: BACKOFF_STEP,
        }
    }

    /// Override the per-attempt deadline
    #[must_use]
    pub const fn with_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    /// Generate a validated plan for a profile
    ///
    /// # Errors
    ///
    /// Returns the last underlying failure after the attempt budget is
    /// exhausted, or a terminal `MalformedResponse` when the provider
    /// returns a parseable plan with the wrong day count.
    pub async fn generate(&self, profile: &NewProfile) -> AppResult<GeneratedPlan> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(PLAN_SYSTEM_PROMPT),
            ChatMessage::user(build_plan_prompt(profile)),
        ])
        .with_temperature(PLAN_TEMPERATURE);

        let mut last_error: Option<AppError> = None;

        for attempt in 1..=self.attempts {
            if attempt > 1 {
                let wait = self.backoff_step * (attempt - 1);
                debug!(attempt, wait_ms = wait.as_millis() as u64, "Retrying plan generation");
                sleep(wait).await;
            }

            match timeout(self.attempt_timeout, self.provider.complete(&request)).await {
                Err(_) => {
                    warn!(attempt, "Plan generation attempt timed out");
                    last_error = Some(AppError::external_timeout(
                        self.provider.name(),
                        self.attempt_timeout.as_secs(),
                    ));
                }
                Ok(Err(e)) => {
                    warn!(attempt, error = %e, "Plan generation attempt failed");
                    last_error = Some(e);
                }
                Ok(Ok(response)) => match parse_plan(&response.content) {
                    Ok(plan) => {
                        // Wrong day count is terminal, not retried
                        validate_shape(&plan)?;
                        info!(attempt, "Plan generated");
                        return Ok(plan);
                    }
                    Err(e) => {
                        warn!(attempt, error = %e, "Plan output could not be parsed");
                        last_error = Some(e);
                    }
                },
            }
        }

        let last = last_error
            .unwrap_or_else(|| AppError::internal("Plan generation executed no attempts"));
        Err(AppError::new(
            last.code,
            format!(
                "Plan generation failed after {} attempts: {}",
                self.attempts, last.message
            ),
        ))
    }
}

/// Parse raw provider output into a plan, stripping a markdown fence first
///
/// # Errors
///
/// Returns `MalformedResponse` for non-JSON output or JSON missing the
/// required `workout`/`meals` keys; both are retryable at the engine level.
pub fn parse_plan(raw: &str) -> AppResult<GeneratedPlan> {
    let body = strip_code_fence(raw);
    serde_json::from_str(body)
        .map_err(|e| AppError::malformed_response(format!("Provider returned invalid plan JSON: {e}")))
}

/// Enforce the fixed 7-day shape on both halves of a parsed plan
///
/// # Errors
///
/// Returns `MalformedResponse` naming the offending half and its day count.
pub fn validate_shape(plan: &GeneratedPlan) -> AppResult<()> {
    if plan.workout.len() != PLAN_DAYS {
        return Err(AppError::malformed_response(format!(
            "Expected {PLAN_DAYS} workout days, provider returned {}",
            plan.workout.len()
        )));
    }
    if plan.meals.len() != PLAN_DAYS {
        return Err(AppError::malformed_response(format!(
            "Expected {PLAN_DAYS} meal days, provider returned {}",
            plan.meals.len()
        )));
    }
    Ok(())
}

/// Strip a wrapping triple-backtick fence, with or without a `json` tag
#[must_use]
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}
