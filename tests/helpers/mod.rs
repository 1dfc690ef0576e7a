// ABOUTME: Shared test helpers for integration tests
// ABOUTME: Exports the in-process axum request utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

#![allow(dead_code)] // Each integration test binary uses a subset of these helpers

pub mod axum_test;
