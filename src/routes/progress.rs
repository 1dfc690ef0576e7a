// ABOUTME: Progress log CRUD route handlers
// ABOUTME: Create, list, partially update, and delete progress entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

//! Progress log routes. The only hard-delete surface in the API.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::{decode_body, parse_id};
use crate::errors::{AppError, AppResult};
use crate::server::ServerResources;
use crate::storage::{NewProgressLog, ProgressLogUpdate};

/// Request to create a progress log entry
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgressRequest {
    /// Owning profile id
    pub user_id: Uuid,
    /// Date the entry refers to
    pub date: DateTime<Utc>,
    /// Body weight in kilograms
    pub weight: Option<u32>,
    /// Whether the scheduled workout was completed
    pub workout_completed: Option<bool>,
    /// Calories burned
    pub calories_burned: Option<u32>,
    /// Free-form notes
    pub notes: Option<String>,
}

/// Partial update to a progress log entry
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgressRequest {
    /// Replacement date
    pub date: Option<DateTime<Utc>>,
    /// Replacement weight
    pub weight: Option<u32>,
    /// Replacement completion flag
    pub workout_completed: Option<bool>,
    /// Replacement calories burned
    pub calories_burned: Option<u32>,
    /// Replacement notes
    pub notes: Option<String>,
}

/// Progress log routes handler
pub struct ProgressRoutes;

impl ProgressRoutes {
    /// Create all progress log routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        // The :id segment is the user id on GET and the entry id otherwise
        Router::new()
            .route("/api/progress", post(Self::create_log))
            .route(
                "/api/progress/:id",
                get(Self::list_logs)
                    .patch(Self::update_log)
                    .delete(Self::delete_log),
            )
            .with_state(resources)
    }

    async fn create_log(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<serde_json::Value>,
    ) -> AppResult<impl IntoResponse> {
        let request: CreateProgressRequest = decode_body(body, "Invalid progress log data")?;
        let record = resources
            .storage
            .create_progress_log(NewProgressLog {
                user_id: request.user_id,
                date: request.date,
                weight: request.weight,
                workout_completed: request.workout_completed,
                calories_burned: request.calories_burned,
                notes: request.notes,
            })
            .await?;
        Ok((StatusCode::CREATED, Json(record)))
    }

    async fn list_logs(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> AppResult<impl IntoResponse> {
        let user_id = parse_id(&user_id, "Profile")?;
        let logs = resources.storage.progress_logs(user_id).await?;
        Ok(Json(logs))
    }

    async fn update_log(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        Json(body): Json<serde_json::Value>,
    ) -> AppResult<impl IntoResponse> {
        let id = parse_id(&id, "Progress log")?;
        let request: UpdateProgressRequest = decode_body(body, "Invalid update data")?;
        let record = resources
            .storage
            .update_progress_log(
                id,
                ProgressLogUpdate {
                    date: request.date,
                    weight: request.weight,
                    workout_completed: request.workout_completed,
                    calories_burned: request.calories_burned,
                    notes: request.notes,
                },
            )
            .await?
            .ok_or_else(|| AppError::not_found("Progress log"))?;
        Ok(Json(record))
    }

    async fn delete_log(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> AppResult<impl IntoResponse> {
        let id = parse_id(&id, "Progress log")?;
        if resources.storage.delete_progress_log(id).await? {
            Ok(StatusCode::NO_CONTENT)
        } else {
            Err(AppError::not_found("Progress log"))
        }
    }
}
