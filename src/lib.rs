// ABOUTME: Main library entry point for the FitForge coaching API
// ABOUTME: Exposes the plan-generation pipeline, storage layer, and REST routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

#![deny(unsafe_code)]

//! # FitForge Server
//!
//! An AI fitness-coaching backend. FitForge collects a user's intake profile,
//! asks an external generative-AI provider for a personalized 7-day workout
//! and meal plan, and keeps profiles, plans, chat history, and progress logs
//! in a process-local store.
//!
//! ## Architecture
//!
//! - **Validation**: profile intake validation and normalization
//! - **LLM**: provider abstraction plus the Gemini adapter
//! - **Plan**: prompt construction, the retrying generation engine, and
//!   plan persistence
//! - **Media**: illustration lookup and speech synthesis adapters
//! - **Storage**: repository trait over an in-memory map-backed store
//! - **Routes**: axum REST surface, one router per domain
//!
//! ## Example
//!
//! ```rust,no_run
//! use fitforge_server::config::ServerConfig;
//! use fitforge_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("FitForge configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Configuration loaded from process environment
pub mod config;

/// Unified error handling with `AppError` and HTTP mapping
pub mod errors;

/// LLM provider abstraction and the Gemini adapter
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Illustration lookup and speech synthesis providers
pub mod media;

/// Domain records and generated-plan value types
pub mod models;

/// Fail-soft motivational quote generation
pub mod motivation;

/// Plan generation pipeline: prompt, engine, persistence
pub mod plan;

/// HTTP route handlers, one module per domain
pub mod routes;

/// Server assembly and lifecycle
pub mod server;

/// Repository trait and the in-memory store
pub mod storage;

/// Profile intake validation and normalization
pub mod validation;
