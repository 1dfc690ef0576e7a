// ABOUTME: Workout plan CRUD route handlers
// ABOUTME: Create, fetch latest/all, and update stored workout weeks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

//! Workout plan routes.
//!
//! "Current" plan semantics: the most recently created plan for a user.
//! The all-plans listing is newest-first and may be empty.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use super::{decode_body, parse_id};
use crate::errors::{AppError, AppResult};
use crate::models::DailyWorkout;
use crate::server::ServerResources;

/// Request to store a workout plan
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutPlanRequest {
    /// Owning profile id
    pub user_id: Uuid,
    /// Daily workouts
    pub week: Vec<DailyWorkout>,
}

/// Request to replace a stored week
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkoutPlanRequest {
    /// Replacement daily workouts
    pub week: Vec<DailyWorkout>,
}

/// Workout plan routes handler
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout plan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        // The :id segment is the user id on GET (latest plan per user) and
        // the plan id on PATCH
        Router::new()
            .route("/api/workout", post(Self::create_plan))
            .route("/api/workout/:id", get(Self::latest_plan).patch(Self::update_plan))
            .route("/api/workout/all/:id", get(Self::all_plans))
            .with_state(resources)
    }

    async fn create_plan(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<serde_json::Value>,
    ) -> AppResult<impl IntoResponse> {
        let request: CreateWorkoutPlanRequest = decode_body(body, "Invalid workout plan data")?;
        if request.week.is_empty() {
            return Err(AppError::invalid_input("Workout week must not be empty"));
        }
        let plan = resources
            .storage
            .create_workout_plan(request.user_id, request.week)
            .await?;
        Ok((StatusCode::CREATED, Json(plan)))
    }

    async fn latest_plan(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> AppResult<impl IntoResponse> {
        let user_id = parse_id(&user_id, "Workout plan")?;
        let plan = resources
            .storage
            .latest_workout_plan(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Workout plan"))?;
        Ok(Json(plan))
    }

    async fn all_plans(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> AppResult<impl IntoResponse> {
        let user_id = parse_id(&user_id, "Workout plan")?;
        let plans = resources.storage.all_workout_plans(user_id).await?;
        Ok(Json(plans))
    }

    async fn update_plan(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        Json(body): Json<serde_json::Value>,
    ) -> AppResult<impl IntoResponse> {
        let id = parse_id(&id, "Workout plan")?;
        let request: UpdateWorkoutPlanRequest = decode_body(body, "Invalid update data")?;
        if request.week.is_empty() {
            return Err(AppError::invalid_input("Workout week must not be empty"));
        }
        let plan = resources
            .storage
            .update_workout_plan(id, request.week)
            .await?
            .ok_or_else(|| AppError::not_found("Workout plan"))?;
        Ok(Json(plan))
    }
}
