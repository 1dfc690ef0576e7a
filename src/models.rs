// ABOUTME: Core data models for the FitForge coaching API
// ABOUTME: Defines UserProfile, WorkoutPlan, MealPlan, chat and progress records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

//! # Data Models
//!
//! Domain records persisted by the storage layer and the value types that
//! make up a generated fitness plan.
//!
//! ## Design Principles
//!
//! - **Serializable**: every model maps 1:1 onto the JSON wire format the
//!   web client consumes (camelCase field names)
//! - **Optional-friendly**: generated plan content varies by provider mood;
//!   optional fields are omitted from serialized output when absent
//! - **Owned**: every plan, message, and log row references exactly one
//!   profile by id

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Profile
// ============================================================================

/// A user's fitness intake record, the root entity of the data model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Unique identifier
    pub id: Uuid,
    /// Unique email address (uniqueness enforced by the storage layer)
    pub email: String,
    /// Display name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Gender (free-form, common values "male"/"female"/"other")
    pub gender: String,
    /// Height in centimeters
    pub height: u32,
    /// Weight in kilograms
    pub weight: u32,
    /// Fitness goal (e.g. "Weight Loss", "Build Muscle")
    pub fitness_goal: String,
    /// Self-reported fitness level (e.g. "Beginner")
    pub fitness_level: String,
    /// Where the user trains (e.g. "Home", "Gym", "Outdoor")
    pub workout_location: String,
    /// Dietary preference (e.g. "Vegetarian", "balanced")
    pub dietary_preference: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Workout plan
// ============================================================================

/// A single exercise within a daily workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    /// Exercise name
    pub name: String,
    /// Set prescription (e.g. "3 sets")
    pub sets: String,
    /// Rep prescription (e.g. "12 reps")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<String>,
    /// Duration prescription for timed exercises (e.g. "30 seconds")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Rest between sets (e.g. "60s")
    pub rest: String,
    /// Short form cue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// One day of the workout week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyWorkout {
    /// Day name (Monday-Sunday)
    pub day: String,
    /// Workout name (e.g. "Upper Body Strength")
    pub name: String,
    /// Session duration (e.g. "45 min")
    pub duration: String,
    /// Difficulty label matching the user's level
    pub difficulty: String,
    /// Exercises for the day
    pub exercises: Vec<WorkoutExercise>,
}

/// A stored 7-day workout plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    /// Unique identifier
    pub id: Uuid,
    /// Owning profile id
    pub user_id: Uuid,
    /// Seven ordered daily workouts
    pub week: Vec<DailyWorkout>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Meal plan
// ============================================================================

/// Macronutrient breakdown in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSplit {
    /// Protein grams
    pub protein: u32,
    /// Carbohydrate grams
    pub carbs: u32,
    /// Fat grams
    pub fats: u32,
}

impl Default for MacroSplit {
    fn default() -> Self {
        // Fallback targets when the provider omits day-level macros
        Self {
            protein: 150,
            carbs: 200,
            fats: 60,
        }
    }
}

/// A single meal within a daily meal set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// Meal slot (Breakfast, Lunch, Dinner, Snacks)
    pub meal: String,
    /// Dish name
    pub name: String,
    /// Calories for this meal
    pub calories: u32,
    /// Protein grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<u32>,
    /// Carbohydrate grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<u32>,
    /// Fat grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fats: Option<u32>,
    /// Key ingredients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    /// Preparation notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<String>,
}

/// One day of the meal week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMeals {
    /// Day name (Monday-Sunday)
    pub day: String,
    /// Total calories for the day
    pub total_calories: u32,
    /// Day-level macro breakdown
    pub macros: MacroSplit,
    /// Meals for the day
    pub meals: Vec<Meal>,
}

/// A stored 7-day meal plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    /// Unique identifier
    pub id: Uuid,
    /// Owning profile id
    pub user_id: Uuid,
    /// Daily calorie target derived from the plan
    pub daily_calorie_target: u32,
    /// Target macro breakdown
    pub macros: MacroSplit,
    /// Seven ordered daily meal sets
    pub week: Vec<DailyMeals>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Chat
// ============================================================================

/// Role of a stored chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Message written by the user
    User,
    /// Message produced by the assistant
    Assistant,
}

/// A stored chat message, append-only
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageRecord {
    /// Unique identifier
    pub id: Uuid,
    /// Owning profile id
    pub user_id: Uuid,
    /// Conversation session identifier
    pub session_id: String,
    /// Sender role
    pub role: ChatRole,
    /// Message content
    pub content: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Progress
// ============================================================================

/// A progress log entry, mutable and deletable
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressLog {
    /// Unique identifier
    pub id: Uuid,
    /// Owning profile id
    pub user_id: Uuid,
    /// Date the entry refers to
    pub date: DateTime<Utc>,
    /// Body weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    /// Whether the scheduled workout was completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_completed: Option<bool>,
    /// Calories burned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<u32>,
    /// Free-form notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Generated plan
// ============================================================================

/// The content half of a generation result: what the provider produced,
/// before persistence assigns identifiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPlan {
    /// Seven daily workouts
    pub workout: Vec<DailyWorkout>,
    /// Seven daily meal sets
    pub meals: Vec<DailyMeals>,
    /// Motivational tips (5-7 entries requested)
    #[serde(default)]
    pub tips: Vec<String>,
}
