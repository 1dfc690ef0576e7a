// ABOUTME: Meal plan CRUD route handlers
// ABOUTME: Create, fetch latest/all, and update stored meal weeks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

//! Meal plan routes, mirroring the workout plan surface.

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
use crate::models::{DailyMeals, MacroSplit};
use crate::server::ServerResources;

/// Request to store a meal plan
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealPlanRequest {
    /// Owning profile id
    pub user_id: Uuid,
    /// Daily calorie target
    pub daily_calorie_target: u32,
    /// Target macro breakdown
    pub macros: MacroSplit,
    /// Daily meal sets
    pub week: Vec<DailyMeals>,
}

/// Partial update to a stored meal plan
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMealPlanRequest {
    /// Replacement calorie target
    pub daily_calorie_target: Option<u32>,
    /// Replacement macro breakdown
    pub macros: Option<MacroSplit>,
    /// Replacement daily meal sets
    pub week: Option<Vec<DailyMeals>>,
}

/// Meal plan routes handler
pub struct MealRoutes;

impl MealRoutes {
    /// Create all meal plan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        // The :id segment is the user id on GET and the plan id on PATCH
        Router::new()
            .route("/api/meals", post(Self::create_plan))
            .route("/api/meals/:id", get(Self::latest_plan).patch(Self::update_plan))
            .route("/api/meals/all/:id", get(Self::all_plans))
            .with_state(resources)
    }

    async fn create_plan(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<serde_json::Value>,
    ) -> AppResult<impl IntoResponse> {
        let request: CreateMealPlanRequest = decode_body(body, "Invalid meal plan data")?;
        if request.week.is_empty() {
            return Err(AppError::invalid_input("Meal week must not be empty"));
        }
        let plan = resources
            .storage
            .create_meal_plan(
                request.user_id,
                request.daily_calorie_target,
                request.macros,
                request.week,
            )
            .await?;
        Ok((StatusCode::CREATED, Json(plan)))
    }

    async fn latest_plan(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> AppResult<impl IntoResponse> {
        let user_id = parse_id(&user_id, "Meal plan")?;
        let plan = resources
            .storage
            .latest_meal_plan(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Meal plan"))?;
        Ok(Json(plan))
    }

    async fn all_plans(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> AppResult<impl IntoResponse> {
        let user_id = parse_id(&user_id, "Meal plan")?;
        let plans = resources.storage.all_meal_plans(user_id).await?;
        Ok(Json(plans))
    }

    async fn update_plan(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        Json(body): Json<serde_json::Value>,
    ) -> AppResult<impl IntoResponse> {
        let id = parse_id(&id, "Meal plan")?;
        let request: UpdateMealPlanRequest = decode_body(body, "Invalid update data")?;
        if let Some(week) = &request.week {
            if week.is_empty() {
                return Err(AppError::invalid_input("Meal week must not be empty"));
            }
        }
        let plan = resources
            .storage
            .update_meal_plan(id, request.daily_calorie_target, request.macros, request.week)
            .await?
            .ok_or_else(|| AppError::not_found("Meal plan"))?;
        Ok(Json(plan))
    }
}
