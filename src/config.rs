// ABOUTME: Server configuration loaded from process environment variables
// ABOUTME: Collects the HTTP port and external provider credentials in one place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

//! Environment-based configuration.
//!
//! Provider credentials are read once at startup. The generation key is
//! required; illustration and speech keys are optional; their absence
//! degrades the corresponding feature to its fallback path instead of
//! failing the server.

use std::env;

use crate::errors::{AppError, AppResult, ErrorCode};

/// Environment variable for the Gemini API key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable overriding the Gemini model
pub const GEMINI_MODEL_ENV: &str = "GEMINI_MODEL";

/// Environment variable for the Unsplash access key (optional)
pub const UNSPLASH_ACCESS_KEY_ENV: &str = "UNSPLASH_ACCESS_KEY";

/// Environment variable for the OpenAI API key used by speech synthesis (optional)
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable for the HTTP listen port
pub const HTTP_PORT_ENV: &str = "HTTP_PORT";

/// Default HTTP listen port
pub const DEFAULT_HTTP_PORT: u16 = 8081;

/// Server configuration assembled from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Gemini API key for plan and quote generation
    pub gemini_api_key: String,
    /// Optional Gemini model override
    pub gemini_model: Option<String>,
    /// Optional Unsplash access key for illustration search
    pub unsplash_access_key: Option<String>,
    /// Optional OpenAI API key for speech synthesis
    pub openai_api_key: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `GEMINI_API_KEY` is unset or `HTTP_PORT` is not a
    /// valid port number. Optional keys never fail loading.
    pub fn from_env() -> AppResult<Self> {
        // Load .env if present; a missing file is the normal production case
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {e}");
        }

        let http_port = match env::var(HTTP_PORT_ENV) {
            Ok(raw) => raw.parse::<u16>().map_err(|e| {
                AppError::config(format!("Invalid {HTTP_PORT_ENV} value {raw:?}: {e}"))
            })?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let gemini_api_key = env::var(GEMINI_API_KEY_ENV).map_err(|_| {
            AppError::new(
                ErrorCode::ConfigMissing,
                format!("{GEMINI_API_KEY_ENV} environment variable not set"),
            )
        })?;

        Ok(Self {
            http_port,
            gemini_api_key,
            gemini_model: non_empty_var(GEMINI_MODEL_ENV),
            unsplash_access_key: non_empty_var(UNSPLASH_ACCESS_KEY_ENV),
            openai_api_key: non_empty_var(OPENAI_API_KEY_ENV),
        })
    }
}

/// Read an optional environment variable, treating empty values as unset
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
