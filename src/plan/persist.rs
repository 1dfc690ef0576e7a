// ABOUTME: Persistence adapter for generated plans
// ABOUTME: Upserts the profile by email and inserts the workout and meal rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

//! Plan persistence.
//!
//! [`store_generated_plan`] is the write half of the pipeline: upsert the
//! profile keyed on email (merge-update reuses the existing id), then insert
//! one workout plan and one meal plan referencing it. Concurrent calls for
//! the same email are not serialized here; the store is last-writer-wins by
//! charter.

use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{GeneratedPlan, MacroSplit, UserProfile};
use crate::storage::Storage;
use crate::validation::{NewProfile, ProfileUpdate};

/// Calorie target applied when the generated week omits day-level totals
const DEFAULT_CALORIE_TARGET: u32 = 2000;

/// Identifiers and profile produced by persisting a generated plan
#[derive(Debug, Clone)]
pub struct StoredPlan {
    /// Profile id (existing or newly created)
    pub user_id: Uuid,
    /// Inserted workout plan id
    pub workout_plan_id: Uuid,
    /// Inserted meal plan id
    pub meal_plan_id: Uuid,
    /// Profile record after the upsert
    pub profile: UserProfile,
}

/// Persist a generated plan: profile upsert plus two plan inserts
///
/// # Errors
///
/// Propagates storage failures; never deletes or partially rolls back.
pub async fn store_generated_plan(
    storage: &dyn Storage,
    profile: NewProfile,
    plan: &GeneratedPlan,
) -> AppResult<StoredPlan> {
    let record = match storage.get_profile_by_email(&profile.email).await? {
        Some(existing) => storage
            .update_profile(existing.id, ProfileUpdate::from(profile))
            .await?
            .ok_or_else(|| AppError::internal("Profile vanished during upsert"))?,
        None => storage.create_profile(profile).await?,
    };

    let workout = storage
        .create_workout_plan(record.id, plan.workout.clone())
        .await?;

    // Day 1 carries the plan-level targets; fall back to the standing
    // defaults when the provider omitted them
    let (daily_calorie_target, macros) = plan
        .meals
        .first()
        .map_or((DEFAULT_CALORIE_TARGET, MacroSplit::default()), |day| {
            (day.total_calories, day.macros)
        });

    let meal = storage
        .create_meal_plan(record.id, daily_calorie_target, macros, plan.meals.clone())
        .await?;

    Ok(StoredPlan {
        user_id: record.id,
        workout_plan_id: workout.id,
        meal_plan_id: meal.id,
        profile: record,
    })
}
