// ABOUTME: Plan generation and auxiliary generator route handlers
// ABOUTME: Drives the full pipeline plus quote, illustration, and speech endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

//! Generation routes.
//!
//! `/api/generate-plan` runs the full pipeline: validate, generate with the
//! retrying engine, then persist. Auxiliary generators follow their own
//! failure postures: quotes always answer, illustrations always answer,
//! speech fails hard when no provider is configured.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::decode_body;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::media::AUDIO_MIME_TYPE;
use crate::models::{DailyMeals, DailyWorkout, UserProfile};
use crate::plan::store_generated_plan;
use crate::server::ServerResources;
use crate::validation::ProfilePayload;

/// Response for a completed generation pipeline run
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanResponse {
    /// Profile id (existing or newly created)
    pub user_id: Uuid,
    /// Profile record after the upsert
    pub profile: UserProfile,
    /// Seven daily workouts
    pub workout: Vec<DailyWorkout>,
    /// Seven daily meal sets
    pub meals: Vec<DailyMeals>,
    /// Motivational tips
    pub tips: Vec<String>,
    /// Stored workout plan id
    pub workout_plan_id: Uuid,
    /// Stored meal plan id
    pub meal_plan_id: Uuid,
}

/// Response carrying a motivational quote
#[derive(Debug, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// The quote text (may be the fixed fallback)
    pub quote: String,
}

/// Request for an exercise illustration
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseImageRequest {
    /// Exercise to illustrate
    pub exercise_name: Option<String>,
}

/// Request for a meal illustration
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealImageRequest {
    /// Meal to illustrate
    pub meal_name: Option<String>,
}

/// Response carrying an illustration URL
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    /// Resolved image URL
    pub image_url: String,
}

/// Request for speech synthesis
#[derive(Debug, Deserialize)]
pub struct TextToSpeechRequest {
    /// Text to speak
    pub text: Option<String>,
}

/// Generation routes handler
pub struct GenerateRoutes;

impl GenerateRoutes {
    /// Create all generation routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/generate-plan", post(Self::generate_plan))
            .route("/api/motivational-quote", get(Self::motivational_quote))
            .route("/api/generate-image/exercise", post(Self::exercise_image))
            .route("/api/generate-image/meal", post(Self::meal_image))
            .route("/api/text-to-speech", post(Self::text_to_speech))
            .with_state(resources)
    }

    async fn generate_plan(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<serde_json::Value>,
    ) -> AppResult<impl IntoResponse> {
        let payload: ProfilePayload = decode_body(body, "Invalid profile data")?;
        let profile = payload.validate()?;
        info!(email = %profile.email, "Plan generation requested");

        let plan = resources.plan_engine.generate(&profile).await?;
        let stored = store_generated_plan(resources.storage.as_ref(), profile, &plan).await?;

        info!(
            user_id = %stored.user_id,
            workout_plan_id = %stored.workout_plan_id,
            meal_plan_id = %stored.meal_plan_id,
            "Plan generation completed"
        );

        Ok(Json(GeneratePlanResponse {
            user_id: stored.user_id,
            profile: stored.profile,
            workout: plan.workout,
            meals: plan.meals,
            tips: plan.tips,
            workout_plan_id: stored.workout_plan_id,
            meal_plan_id: stored.meal_plan_id,
        }))
    }

    async fn motivational_quote(
        State(resources): State<Arc<ServerResources>>,
    ) -> AppResult<impl IntoResponse> {
        let quote = resources.quotes.daily_quote().await;
        Ok(Json(QuoteResponse { quote }))
    }

    async fn exercise_image(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<serde_json::Value>,
    ) -> AppResult<impl IntoResponse> {
        let request: ExerciseImageRequest = decode_body(body, "Invalid image request")?;
        let name = request
            .exercise_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::missing_field("exerciseName"))?;
        let image_url = resources.images.exercise_image(name).await;
        Ok(Json(ImageResponse { image_url }))
    }

    async fn meal_image(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<serde_json::Value>,
    ) -> AppResult<impl IntoResponse> {
        let request: MealImageRequest = decode_body(body, "Invalid image request")?;
        let name = request
            .meal_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::missing_field("mealName"))?;
        let image_url = resources.images.meal_image(name).await;
        Ok(Json(ImageResponse { image_url }))
    }

    async fn text_to_speech(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<serde_json::Value>,
    ) -> AppResult<impl IntoResponse> {
        let request: TextToSpeechRequest = decode_body(body, "Invalid speech request")?;
        let text = request
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::missing_field("text"))?;

        let synthesizer = resources.speech.as_ref().ok_or_else(|| {
            AppError::new(
                ErrorCode::ConfigMissing,
                "No speech synthesis provider is configured",
            )
        })?;

        let audio = synthesizer.synthesize(text).await?;
        Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, AUDIO_MIME_TYPE)],
            audio,
        ))
    }
}
