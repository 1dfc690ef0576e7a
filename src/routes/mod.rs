// ABOUTME: Route module organization for FitForge HTTP endpoints
// ABOUTME: Centralizes route definitions organized by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

//! Route modules.
//!
//! Each domain module owns its router and thin handlers that delegate to
//! the storage layer or the pipeline. Handlers return
//! `AppResult<impl IntoResponse>`; error rendering is centralized in
//! [`crate::errors`].

/// Chat message routes
pub mod chat;
/// Plan generation and auxiliary generator routes
pub mod generate;
/// Health check routes
pub mod health;
/// Meal plan CRUD routes
pub mod meals;
/// Profile CRUD routes
pub mod profile;
/// Progress log CRUD routes
pub mod progress;
/// Workout plan CRUD routes
pub mod workout;

pub use chat::ChatRoutes;
pub use generate::GenerateRoutes;
pub use health::HealthRoutes;
pub use meals::MealRoutes;
pub use profile::ProfileRoutes;
pub use progress::ProgressRoutes;
pub use workout::WorkoutRoutes;

use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Parse a path identifier, mapping malformed values to not-found for the
/// named resource (a malformed id cannot reference any record)
pub(crate) fn parse_id(raw: &str, resource: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found(resource))
}

/// Decode a request body, mapping shape mismatches to the structured 400
/// body instead of the framework's default rejection
pub(crate) fn decode_body<T: DeserializeOwned>(
    body: serde_json::Value,
    context: &str,
) -> AppResult<T> {
    serde_json::from_value(body).map_err(|e| AppError::invalid_input(format!("{context}: {e}")))
}
