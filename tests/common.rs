// ABOUTME: Shared test utilities for integration tests
// ABOUTME: Scripted provider stubs and server-resource builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)] // Each integration test binary uses a subset of these helpers

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Mutex;

use fitforge_server::errors::{AppError, AppResult};
use fitforge_server::llm::{ChatRequest, ChatResponse, LlmProvider};
use fitforge_server::media::{SpeechSynthesizer, UnsplashImages};
use fitforge_server::server::ServerResources;
use fitforge_server::storage::MemoryStorage;

/// One scripted outcome for the stub LLM provider
#[derive(Debug, Clone)]
pub enum ScriptStep {
    /// Respond with this text
    Text(String),
    /// Fail with a provider error carrying this message
    Error(String),
    /// Never complete (forces the caller's deadline to fire)
    Hang,
}

/// Scripted LLM provider; pops one step per call and counts invocations
pub struct ScriptedLlm {
    steps: Mutex<VecDeque<ScriptStep>>,
    calls: AtomicUsize,
}

impl ScriptedLlm {
    pub fn new(steps: Vec<ScriptStep>) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into()),
            calls: AtomicUsize::new(0),
        })
    }

    /// A provider that answers every call with the same text
    pub fn always_text(text: impl Into<String>) -> Arc<Self> {
        let text = text.into();
        Self::new(vec![ScriptStep::Text(text); 8])
    }

    /// A provider that never completes any call
    pub fn always_hang() -> Arc<Self> {
        Self::new(vec![ScriptStep::Hang; 8])
    }

    /// Number of completed `complete()` invocations
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self
            .steps
            .lock()
            .await
            .pop_front()
            .expect("scripted provider ran out of steps");
        match step {
            ScriptStep::Text(content) => Ok(ChatResponse {
                content,
                model: "scripted-model".into(),
                usage: None,
                finish_reason: Some("stop".into()),
            }),
            ScriptStep::Error(message) => Err(AppError::external_service("scripted", message)),
            ScriptStep::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

/// Stub speech synthesizer returning a fixed byte pattern
pub struct StubSpeech;

#[async_trait]
impl SpeechSynthesizer for StubSpeech {
    async fn synthesize(&self, text: &str) -> AppResult<Bytes> {
        Ok(Bytes::from(format!("MP3:{text}")))
    }
}

/// A valid generated-plan JSON body with the given number of days per half
pub fn plan_json(workout_days: usize, meal_days: usize) -> String {
    let workout_day = r#"{"day": "Monday", "name": "Upper Body Strength", "duration": "45 min", "difficulty": "Beginner", "exercises": [{"name": "Push-ups", "sets": "3 sets", "reps": "12 reps", "rest": "60s"}]}"#;
    let meal_day = r#"{"day": "Monday", "totalCalories": 1900, "macros": {"protein": 140, "carbs": 190, "fats": 58}, "meals": [{"meal": "Breakfast", "name": "Protein Oatmeal Bowl", "calories": 450}]}"#;
    format!(
        r#"{{"workout": [{}], "meals": [{}], "tips": ["Drink water", "Sleep 8 hours"]}}"#,
        vec![workout_day; workout_days].join(", "),
        vec![meal_day; meal_days].join(", ")
    )
}

/// A validated profile value for exercising the pipeline directly
pub fn new_profile() -> fitforge_server::validation::NewProfile {
    fitforge_server::validation::NewProfile {
        name: "Ann".into(),
        email: "a@x.com".into(),
        age: 28,
        gender: "female".into(),
        height: 165,
        weight: 60,
        fitness_goal: "Weight Loss".into(),
        fitness_level: "Beginner".into(),
        workout_location: "Home".into(),
        dietary_preference: "Vegetarian".into(),
    }
}

/// A full valid profile submission
pub fn profile_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Ann",
        "email": "a@x.com",
        "age": 28,
        "gender": "female",
        "height": 165,
        "weight": 60,
        "fitnessGoal": "Weight Loss",
        "fitnessLevel": "Beginner",
        "workoutLocation": "Home",
        "dietaryPreference": "Vegetarian"
    })
}

/// Build server resources over in-memory storage and the given LLM stub
pub fn test_resources(llm: Arc<ScriptedLlm>) -> Arc<ServerResources> {
    Arc::new(ServerResources::new(
        MemoryStorage::shared(),
        llm,
        Arc::new(UnsplashImages::new(None)),
        Some(Arc::new(StubSpeech)),
        false,
    ))
}

/// Resources without a speech provider, for the capability-gap path
pub fn test_resources_without_speech(llm: Arc<ScriptedLlm>) -> Arc<ServerResources> {
    Arc::new(ServerResources::new(
        MemoryStorage::shared(),
        llm,
        Arc::new(UnsplashImages::new(None)),
        None,
        false,
    ))
}
