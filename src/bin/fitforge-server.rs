// ABOUTME: FitForge server binary entry point
// ABOUTME: Wires configuration, providers, and storage, then serves the API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

//! FitForge server binary.
//!
//! Requires `GEMINI_API_KEY`. `UNSPLASH_ACCESS_KEY` and `OPENAI_API_KEY`
//! are optional; without them the illustration search tier and the speech
//! endpoint degrade per their documented fallback policies.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use fitforge_server::config::ServerConfig;
use fitforge_server::llm::{GeminiProvider, LlmProvider};
use fitforge_server::logging::init_logging;
use fitforge_server::media::{OpenAiSpeech, SpeechSynthesizer, UnsplashImages};
use fitforge_server::server::{CoachServer, ServerResources};
use fitforge_server::storage::MemoryStorage;

#[derive(Parser)]
#[command(name = "fitforge-server")]
#[command(about = "FitForge - AI fitness coaching API")]
#[command(version)]
struct Args {
    /// HTTP port to listen on (overrides HTTP_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging().context("Failed to initialize logging")?;

    let config = ServerConfig::from_env().context("Failed to load configuration")?;
    let port = args.port.unwrap_or(config.http_port);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        port, "Starting FitForge server"
    );

    let mut llm = GeminiProvider::new(config.gemini_api_key.clone());
    if let Some(model) = &config.gemini_model {
        llm = llm.with_default_model(model.clone());
    }
    info!(model = llm.default_model(), "Plan generation provider ready");

    let image_search_configured = config.unsplash_access_key.is_some();
    if !image_search_configured {
        warn!("UNSPLASH_ACCESS_KEY not set; illustrations will use fallback URLs");
    }
    let images = UnsplashImages::new(config.unsplash_access_key.clone());

    let speech: Option<Arc<dyn SpeechSynthesizer>> = match &config.openai_api_key {
        Some(key) => Some(Arc::new(OpenAiSpeech::new(key.clone()))),
        None => {
            warn!("OPENAI_API_KEY not set; text-to-speech endpoint will report the gap");
            None
        }
    };

    let resources = Arc::new(ServerResources::new(
        MemoryStorage::shared(),
        Arc::new(llm),
        Arc::new(images),
        speech,
        image_search_configured,
    ));

    info!("Storage is in-memory; all state is lost on restart");

    let server = CoachServer::new(resources);
    server.run(port).await.context("Server exited with error")?;

    Ok(())
}
