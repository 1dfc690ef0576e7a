// ABOUTME: Chat message route handlers
// ABOUTME: Append-only message log with trailing-N chronological retrieval
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

//! Chat routes.
//!
//! Messages are append-only; retrieval returns the trailing N messages of a
//! session in chronological order.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use super::{decode_body, parse_id};
use crate::errors::{AppError, AppResult};
use crate::models::ChatRole;
use crate::server::ServerResources;
use crate::storage::NewChatMessage;

/// Default trailing-message window
const DEFAULT_MESSAGE_LIMIT: usize = 50;

/// Request to append a chat message
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    /// Owning profile id
    pub user_id: Uuid,
    /// Conversation session identifier
    pub session_id: String,
    /// Sender role
    pub role: ChatRole,
    /// Message content
    pub content: String,
}

/// Query parameters for message retrieval
#[derive(Debug, Deserialize, Default)]
pub struct MessagesQuery {
    /// Maximum number of trailing messages to return
    pub limit: Option<usize>,
}

/// Chat routes handler
pub struct ChatRoutes;

impl ChatRoutes {
    /// Create all chat routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/chat", post(Self::create_message))
            .route("/api/chat/:user_id/:session_id", get(Self::get_messages))
            .with_state(resources)
    }

    async fn create_message(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<serde_json::Value>,
    ) -> AppResult<impl IntoResponse> {
        let request: CreateMessageRequest = decode_body(body, "Invalid message data")?;
        if request.content.trim().is_empty() {
            return Err(AppError::invalid_input("Message content must not be empty"));
        }
        if request.session_id.trim().is_empty() {
            return Err(AppError::invalid_input("Session id must not be empty"));
        }
        let record = resources
            .storage
            .create_chat_message(NewChatMessage {
                user_id: request.user_id,
                session_id: request.session_id,
                role: request.role,
                content: request.content,
            })
            .await?;
        Ok((StatusCode::CREATED, Json(record)))
    }

    async fn get_messages(
        State(resources): State<Arc<ServerResources>>,
        Path((user_id, session_id)): Path<(String, String)>,
        Query(query): Query<MessagesQuery>,
    ) -> AppResult<impl IntoResponse> {
        let user_id = parse_id(&user_id, "Profile")?;
        let limit = query.limit.unwrap_or(DEFAULT_MESSAGE_LIMIT);
        let messages = resources
            .storage
            .chat_messages(user_id, &session_id, limit)
            .await?;
        Ok(Json(messages))
    }
}
