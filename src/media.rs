// ABOUTME: Illustration lookup and speech synthesis provider adapters
// ABOUTME: Unsplash-backed image search with layered fallbacks, OpenAI TTS for audio
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

//! # Media Providers
//!
//! Two capability seams with opposite failure postures:
//!
//! - [`ImageLookup`] never fails the caller. [`UnsplashImages`] resolves an
//!   illustration in three tiers: the search API when an access key is
//!   configured, then the deterministic random-image URL for the query, then
//!   a generic category image.
//! - [`SpeechSynthesizer`] is fail-hard. [`OpenAiSpeech`] converts text to
//!   an MP3 byte buffer; a missing key or provider failure propagates.

use std::env;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::{OPENAI_API_KEY_ENV, UNSPLASH_ACCESS_KEY_ENV};
use crate::errors::{AppError, AppResult, ErrorCode};

/// Generic exercise illustration used when every other tier fails
pub const GENERIC_EXERCISE_IMAGE: &str = "https://source.unsplash.com/1600x900/?fitness,workout";

/// Generic meal illustration used when every other tier fails
pub const GENERIC_MEAL_IMAGE: &str = "https://source.unsplash.com/1600x900/?healthy,food";

/// Unsplash search endpoint
const UNSPLASH_SEARCH_URL: &str = "https://api.unsplash.com/search/photos";

/// OpenAI speech synthesis endpoint
const OPENAI_SPEECH_URL: &str = "https://api.openai.com/v1/audio/speech";

/// MIME type of synthesized audio
pub const AUDIO_MIME_TYPE: &str = "audio/mpeg";

// ============================================================================
// Illustration lookup
// ============================================================================

/// Illustration lookup for exercises and meals; never fails the caller
#[async_trait]
pub trait ImageLookup: Send + Sync {
    /// One landscape illustration for an exercise
    async fn exercise_image(&self, exercise_name: &str) -> String;

    /// One appetizing illustration for a meal
    async fn meal_image(&self, meal_name: &str) -> String;
}

/// Unsplash-backed illustration lookup
///
/// Without an access key the search tier is skipped entirely and every
/// lookup resolves through the deterministic fallback URL.
pub struct UnsplashImages {
    access_key: Option<String>,
    client: Client,
}

/// Unsplash search response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    urls: ImageUrls,
}

#[derive(Debug, Deserialize)]
struct ImageUrls {
    regular: String,
}

impl UnsplashImages {
    /// Create a lookup with an optional access key
    #[must_use]
    pub fn new(access_key: Option<String>) -> Self {
        Self {
            access_key,
            client: Client::new(),
        }
    }

    /// Create a lookup from `UNSPLASH_ACCESS_KEY`; absence is not an error
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            env::var(UNSPLASH_ACCESS_KEY_ENV)
                .ok()
                .filter(|v| !v.trim().is_empty()),
        )
    }

    /// Query the search API for one landscape image
    async fn search(&self, key: &str, phrase: &str) -> AppResult<Option<String>> {
        let response = self
            .client
            .get(UNSPLASH_SEARCH_URL)
            .header("Authorization", format!("Client-ID {key}"))
            .query(&[
                ("query", phrase),
                ("per_page", "1"),
                ("orientation", "landscape"),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::external_service("unsplash", format!("Search request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(
                "unsplash",
                format!("Search returned status {status}"),
            ));
        }

        let parsed: SearchResponse = response.json().await.map_err(|e| {
            AppError::malformed_response(format!("Unsplash search response: {e}"))
        })?;

        Ok(parsed.results.into_iter().next().map(|r| r.urls.regular))
    }

    /// Resolve a phrase through the fallback tiers
    async fn lookup(&self, phrase: &str, generic: &str) -> String {
        if let Some(key) = &self.access_key {
            match self.search(key, phrase).await {
                Ok(Some(url)) => return url,
                Ok(None) => debug!(phrase, "Image search returned no candidates"),
                Err(e) => warn!(phrase, error = %e, "Image search failed, using fallback URL"),
            }
        }

        random_image_url(phrase).unwrap_or_else(|| generic.to_owned())
    }
}

/// Deterministic random-image URL for a query; `None` when the query is
/// blank and the generic tier must take over
#[must_use]
pub fn random_image_url(phrase: &str) -> Option<String> {
    let trimmed = phrase.trim();
    if trimmed.is_empty() {
        return None;
    }
    let encoded = urlencoding::encode(trimmed);
    Some(format!("https://source.unsplash.com/1600x900/?{encoded}"))
}

#[async_trait]
impl ImageLookup for UnsplashImages {
    async fn exercise_image(&self, exercise_name: &str) -> String {
        let name = exercise_name.trim();
        if name.is_empty() {
            return GENERIC_EXERCISE_IMAGE.to_owned();
        }
        let phrase = format!("{name} exercise fitness");
        self.lookup(&phrase, GENERIC_EXERCISE_IMAGE).await
    }

    async fn meal_image(&self, meal_name: &str) -> String {
        let name = meal_name.trim();
        if name.is_empty() {
            return GENERIC_MEAL_IMAGE.to_owned();
        }
        let phrase = format!("{name} healthy food");
        self.lookup(&phrase, GENERIC_MEAL_IMAGE).await
    }
}

// ============================================================================
// Speech synthesis
// ============================================================================

/// Text-to-speech conversion; fail-hard by contract
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Convert text to an audio byte buffer
    async fn synthesize(&self, text: &str) -> AppResult<Bytes>;
}

/// OpenAI speech synthesis adapter (model tts-1, voice nova, MP3 output)
pub struct OpenAiSpeech {
    api_key: String,
    client: Client,
}

impl OpenAiSpeech {
    /// Create a synthesizer with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
        }
    }

    /// Create a synthesizer from `OPENAI_API_KEY`
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when the variable is unset; the server keeps
    /// running and the speech endpoint reports the gap per request.
    pub fn from_env() -> AppResult<Self> {
        let api_key = env::var(OPENAI_API_KEY_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                AppError::new(
                    ErrorCode::ConfigMissing,
                    format!("{OPENAI_API_KEY_ENV} environment variable not set"),
                )
            })?;
        Ok(Self::new(api_key))
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiSpeech {
    async fn synthesize(&self, text: &str) -> AppResult<Bytes> {
        let body = json!({
            "model": "tts-1",
            "voice": "nova",
            "input": text,
            "speed": 1.0,
        });

        let response = self
            .client
            .post(OPENAI_SPEECH_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::external_service("openai", format!("Speech request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(
                "openai",
                format!("Speech synthesis returned status {status}: {detail}"),
            ));
        }

        response.bytes().await.map_err(|e| {
            AppError::external_service("openai", format!("Failed to read audio bytes: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_key_uses_deterministic_fallback() {
        let images = UnsplashImages::new(None);
        let url = images.exercise_image("Push-ups").await;
        assert_eq!(
            url,
            "https://source.unsplash.com/1600x900/?Push-ups%20exercise%20fitness"
        );
    }

    #[tokio::test]
    async fn test_blank_name_falls_back_to_generic() {
        let images = UnsplashImages::new(None);
        assert_eq!(images.exercise_image("   ").await, GENERIC_EXERCISE_IMAGE);
        assert_eq!(images.meal_image("").await, GENERIC_MEAL_IMAGE);
    }

    #[test]
    fn test_random_image_url_encodes_query() {
        let url = random_image_url("Grilled Chicken & Rice").unwrap();
        assert!(url.contains("Grilled%20Chicken%20%26%20Rice"));
        assert!(random_image_url("  ").is_none());
    }
}
