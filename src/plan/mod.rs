// ABOUTME: Plan generation pipeline: prompt construction, generation engine, persistence
// ABOUTME: Turns a validated profile into stored 7-day workout and meal plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

//! # Plan Generation Pipeline
//!
//! The pipeline runs strictly sequentially within one request:
//!
//! 1. [`prompt::build_plan_prompt`] renders the profile into the generation
//!    instruction (pure, deterministic)
//! 2. [`engine::PlanEngine`] drives the provider call: deadline per
//!    attempt, linear-backoff retries, output normalization, and structural
//!    validation of the 7-day shape
//! 3. [`persist::store_generated_plan`] upserts the profile by email and
//!    inserts the two plan rows
//!
//! The engine never touches storage; the persistence adapter never touches
//! the network.

pub mod engine;
pub mod persist;
pub mod prompt;

pub use engine::PlanEngine;
pub use persist::{store_generated_plan, StoredPlan};
pub use prompt::build_plan_prompt;
