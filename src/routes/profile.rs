// ABOUTME: Profile CRUD route handlers
// ABOUTME: Create, fetch by id or email, and partially update intake profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

//! Profile routes.
//!
//! Duplicate-email conflicts surface as 409 from the storage layer, which
//! owns the uniqueness invariant; validation failures surface as 400 with
//! per-field details.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};

use super::{decode_body, parse_id};
use crate::errors::{AppError, AppResult};
use crate::server::ServerResources;
use crate::validation::ProfilePayload;

/// Profile routes handler
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/profile", post(Self::create_profile))
            .route("/api/profile/:id", get(Self::get_profile))
            .route("/api/profile/:id", patch(Self::update_profile))
            .route("/api/profile/email/:email", get(Self::get_profile_by_email))
            .with_state(resources)
    }

    async fn create_profile(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<serde_json::Value>,
    ) -> AppResult<impl IntoResponse> {
        let payload: ProfilePayload = decode_body(body, "Invalid profile data")?;
        let profile = payload.validate()?;
        let record = resources.storage.create_profile(profile).await?;
        Ok((StatusCode::CREATED, Json(record)))
    }

    async fn get_profile(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> AppResult<impl IntoResponse> {
        let id = parse_id(&id, "Profile")?;
        let record = resources
            .storage
            .get_profile(id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile"))?;
        Ok(Json(record))
    }

    async fn get_profile_by_email(
        State(resources): State<Arc<ServerResources>>,
        Path(email): Path<String>,
    ) -> AppResult<impl IntoResponse> {
        let record = resources
            .storage
            .get_profile_by_email(&email.to_lowercase())
            .await?
            .ok_or_else(|| AppError::not_found("Profile"))?;
        Ok(Json(record))
    }

    async fn update_profile(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        Json(body): Json<serde_json::Value>,
    ) -> AppResult<impl IntoResponse> {
        let id = parse_id(&id, "Profile")?;
        let payload: ProfilePayload = decode_body(body, "Invalid update data")?;
        let update = payload.validate_update()?;
        let record = resources
            .storage
            .update_profile(id, update)
            .await?
            .ok_or_else(|| AppError::not_found("Profile"))?;
        Ok(Json(record))
    }
}
