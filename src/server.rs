// ABOUTME: Server resource wiring and HTTP lifecycle
// ABOUTME: Assembles the per-domain routers behind shared state and serves them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

//! Server assembly.
//!
//! [`ServerResources`] is the dependency-injection container handed to every
//! router: the storage backend, the generation engine, and the media
//! providers, all behind trait objects so tests can substitute stubs.
//! [`CoachServer`] merges the domain routers, applies the tracing and CORS
//! layers, and serves.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::errors::{AppError, AppResult};
use crate::llm::LlmProvider;
use crate::media::{ImageLookup, SpeechSynthesizer};
use crate::motivation::QuoteGenerator;
use crate::plan::PlanEngine;
use crate::routes::{
    ChatRoutes, GenerateRoutes, HealthRoutes, MealRoutes, ProfileRoutes, ProgressRoutes,
    WorkoutRoutes,
};
use crate::storage::Storage;

/// Shared state handed to every route handler
pub struct ServerResources {
    /// Persistence backend
    pub storage: Arc<dyn Storage>,
    /// Retrying plan generation engine
    pub plan_engine: PlanEngine,
    /// Fail-soft quote generator
    pub quotes: QuoteGenerator,
    /// Illustration lookup
    pub images: Arc<dyn ImageLookup>,
    /// Speech synthesis; `None` when no capable provider is configured
    pub speech: Option<Arc<dyn SpeechSynthesizer>>,
    /// Whether the illustration search tier has a credential
    pub image_search_configured: bool,
    /// Process start instant, for uptime reporting
    pub started_at: Instant,
}

impl ServerResources {
    /// Wire resources from concrete providers
    #[must_use]
    pub fn new(
        storage: Arc<dyn Storage>,
        llm: Arc<dyn LlmProvider>,
        images: Arc<dyn ImageLookup>,
        speech: Option<Arc<dyn SpeechSynthesizer>>,
        image_search_configured: bool,
    ) -> Self {
        Self {
            storage,
            plan_engine: PlanEngine::new(llm.clone()),
            quotes: QuoteGenerator::new(llm),
            images,
            speech,
            image_search_configured,
            started_at: Instant::now(),
        }
    }
}

/// The FitForge HTTP server
pub struct CoachServer {
    resources: Arc<ServerResources>,
}

impl CoachServer {
    /// Create a server over wired resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Assemble the full application router
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .merge(ProfileRoutes::routes(self.resources.clone()))
            .merge(WorkoutRoutes::routes(self.resources.clone()))
            .merge(MealRoutes::routes(self.resources.clone()))
            .merge(ChatRoutes::routes(self.resources.clone()))
            .merge(ProgressRoutes::routes(self.resources.clone()))
            .merge(GenerateRoutes::routes(self.resources.clone()))
            .merge(HealthRoutes::routes(self.resources.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    /// Bind and serve until shutdown
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot be bound or the server loop
    /// fails.
    pub async fn run(&self, port: u16) -> AppResult<()> {
        let app = self.router();

        let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind port {port}: {e}")))?;

        info!(port, "FitForge server listening");

        axum::serve(listener, app)
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))
    }
}
