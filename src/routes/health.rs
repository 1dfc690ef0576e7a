// ABOUTME: Health check route handlers for service monitoring
// ABOUTME: Reports service identity, uptime, and provider configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

//! Health routes.
//!
//! Liveness plus a view of which optional providers are configured, so a
//! degraded illustration or speech feature is visible without probing the
//! endpoints themselves.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;
use crate::server::ServerResources;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status; always "healthy" when the server answers
    pub status: String,
    /// Service identity
    pub service: ServiceInfo,
    /// Optional-provider configuration state
    pub providers: ProviderStatus,
}

/// Service identity block
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Service name
    pub name: String,
    /// Service version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// Which providers are configured
#[derive(Debug, Serialize, Deserialize)]
pub struct ProviderStatus {
    /// Plan/quote generation provider present (required at startup)
    pub generation: bool,
    /// Illustration search credential present
    pub image_search: bool,
    /// Speech synthesis provider present
    pub speech: bool,
}

/// Health routes handler
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/health", get(Self::health))
            .with_state(resources)
    }

    async fn health(
        State(resources): State<Arc<ServerResources>>,
    ) -> AppResult<impl IntoResponse> {
        Ok(Json(HealthResponse {
            status: "healthy".to_owned(),
            service: ServiceInfo {
                name: env!("CARGO_PKG_NAME").to_owned(),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                uptime_seconds: resources.started_at.elapsed().as_secs(),
            },
            providers: ProviderStatus {
                generation: true,
                image_search: resources.image_search_configured,
                speech: resources.speech.is_some(),
            },
        }))
    }
}
