// ABOUTME: Repository trait and the in-memory map-backed store
// ABOUTME: Owns the email-uniqueness invariant and most-recent-wins plan lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

//! # Storage
//!
//! [`Storage`] is the repository seam: route handlers and the persistence
//! adapter depend only on the trait, so the backing store is swappable.
//! [`MemoryStorage`] is the production implementation, volatile by charter,
//! all state lives in process memory behind `tokio::sync::RwLock` and is
//! lost on restart.
//!
//! Mutations are last-writer-wins per key. The email-uniqueness invariant is
//! enforced here, on create and on update, so no caller can bypass it.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{
    ChatMessageRecord, ChatRole, DailyMeals, DailyWorkout, MacroSplit, MealPlan, ProgressLog,
    UserProfile, WorkoutPlan,
};
use crate::validation::{NewProfile, ProfileUpdate};

/// Fields accepted when inserting a chat message
#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub user_id: Uuid,
    pub session_id: String,
    pub role: ChatRole,
    pub content: String,
}

/// Fields accepted when inserting a progress log entry
#[derive(Debug, Clone)]
pub struct NewProgressLog {
    pub user_id: Uuid,
    pub date: chrono::DateTime<Utc>,
    pub weight: Option<u32>,
    pub workout_completed: Option<bool>,
    pub calories_burned: Option<u32>,
    pub notes: Option<String>,
}

/// Partial update applied to a progress log entry
#[derive(Debug, Clone, Default)]
pub struct ProgressLogUpdate {
    pub date: Option<chrono::DateTime<Utc>>,
    pub weight: Option<u32>,
    pub workout_completed: Option<bool>,
    pub calories_burned: Option<u32>,
    pub notes: Option<String>,
}

/// Repository interface over the persistence backend
///
/// All operations are async so a durable backend can slot in behind the
/// same seam. `Option` returns mean "not found"; `Err` is reserved for
/// invariant violations and backend failures.
#[async_trait]
pub trait Storage: Send + Sync {
    // Profiles
    async fn create_profile(&self, profile: NewProfile) -> AppResult<UserProfile>;
    async fn get_profile(&self, id: Uuid) -> AppResult<Option<UserProfile>>;
    async fn get_profile_by_email(&self, email: &str) -> AppResult<Option<UserProfile>>;
    async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> AppResult<Option<UserProfile>>;

    // Workout plans
    async fn create_workout_plan(
        &self,
        user_id: Uuid,
        week: Vec<DailyWorkout>,
    ) -> AppResult<WorkoutPlan>;
    async fn latest_workout_plan(&self, user_id: Uuid) -> AppResult<Option<WorkoutPlan>>;
    async fn all_workout_plans(&self, user_id: Uuid) -> AppResult<Vec<WorkoutPlan>>;
    async fn update_workout_plan(
        &self,
        id: Uuid,
        week: Vec<DailyWorkout>,
    ) -> AppResult<Option<WorkoutPlan>>;

    // Meal plans
    async fn create_meal_plan(
        &self,
        user_id: Uuid,
        daily_calorie_target: u32,
        macros: MacroSplit,
        week: Vec<DailyMeals>,
    ) -> AppResult<MealPlan>;
    async fn latest_meal_plan(&self, user_id: Uuid) -> AppResult<Option<MealPlan>>;
    async fn all_meal_plans(&self, user_id: Uuid) -> AppResult<Vec<MealPlan>>;
    async fn update_meal_plan(
        &self,
        id: Uuid,
        daily_calorie_target: Option<u32>,
        macros: Option<MacroSplit>,
        week: Option<Vec<DailyMeals>>,
    ) -> AppResult<Option<MealPlan>>;

    // Chat
    async fn create_chat_message(&self, message: NewChatMessage) -> AppResult<ChatMessageRecord>;
    async fn chat_messages(
        &self,
        user_id: Uuid,
        session_id: &str,
        limit: usize,
    ) -> AppResult<Vec<ChatMessageRecord>>;

    // Progress
    async fn create_progress_log(&self, log: NewProgressLog) -> AppResult<ProgressLog>;
    async fn progress_logs(&self, user_id: Uuid) -> AppResult<Vec<ProgressLog>>;
    async fn update_progress_log(
        &self,
        id: Uuid,
        update: ProgressLogUpdate,
    ) -> AppResult<Option<ProgressLog>>;
    async fn delete_progress_log(&self, id: Uuid) -> AppResult<bool>;
}

/// In-memory store backed by per-entity hash maps
///
/// `Arc<RwLock<HashMap>>` per entity: reads take the shared lock, writes
/// the exclusive one. There is no cross-entity transaction; the pipeline
/// writes profile, workout plan, and meal plan as three separate inserts.
#[derive(Default)]
pub struct MemoryStorage {
    profiles: RwLock<HashMap<Uuid, UserProfile>>,
    workout_plans: RwLock<HashMap<Uuid, WorkoutPlan>>,
    meal_plans: RwLock<HashMap<Uuid, MealPlan>>,
    chat_messages: RwLock<HashMap<Uuid, ChatMessageRecord>>,
    progress_logs: RwLock<HashMap<Uuid, ProgressLog>>,
}

impl MemoryStorage {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store wrapped for shared ownership
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_profile(&self, profile: NewProfile) -> AppResult<UserProfile> {
        let mut profiles = self.profiles.write().await;

        if profiles.values().any(|p| p.email == profile.email) {
            return Err(AppError::conflict(format!(
                "Profile with email {} already exists",
                profile.email
            )));
        }

        let now = Utc::now();
        let record = UserProfile {
            id: Uuid::new_v4(),
            email: profile.email,
            name: profile.name,
            age: profile.age,
            gender: profile.gender,
            height: profile.height,
            weight: profile.weight,
            fitness_goal: profile.fitness_goal,
            fitness_level: profile.fitness_level,
            workout_location: profile.workout_location,
            dietary_preference: profile.dietary_preference,
            created_at: now,
            updated_at: now,
        };
        profiles.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get_profile(&self, id: Uuid) -> AppResult<Option<UserProfile>> {
        Ok(self.profiles.read().await.get(&id).cloned())
    }

    async fn get_profile_by_email(&self, email: &str) -> AppResult<Option<UserProfile>> {
        Ok(self
            .profiles
            .read()
            .await
            .values()
            .find(|p| p.email == email)
            .cloned())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> AppResult<Option<UserProfile>> {
        let mut profiles = self.profiles.write().await;

        if let Some(email) = &update.email {
            if profiles.values().any(|p| p.email == *email && p.id != id) {
                return Err(AppError::conflict(format!(
                    "Email {email} already in use by another profile"
                )));
            }
        }

        let Some(record) = profiles.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = update.name {
            record.name = name;
        }
        if let Some(email) = update.email {
            record.email = email;
        }
        if let Some(age) = update.age {
            record.age = age;
        }
        if let Some(gender) = update.gender {
            record.gender = gender;
        }
        if let Some(height) = update.height {
            record.height = height;
        }
        if let Some(weight) = update.weight {
            record.weight = weight;
        }
        if let Some(fitness_goal) = update.fitness_goal {
            record.fitness_goal = fitness_goal;
        }
        if let Some(fitness_level) = update.fitness_level {
            record.fitness_level = fitness_level;
        }
        if let Some(workout_location) = update.workout_location {
            record.workout_location = workout_location;
        }
        if let Some(dietary_preference) = update.dietary_preference {
            record.dietary_preference = dietary_preference;
        }
        record.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }

    async fn create_workout_plan(
        &self,
        user_id: Uuid,
        week: Vec<DailyWorkout>,
    ) -> AppResult<WorkoutPlan> {
        let plan = WorkoutPlan {
            id: Uuid::new_v4(),
            user_id,
            week,
            created_at: Utc::now(),
        };
        self.workout_plans
            .write()
            .await
            .insert(plan.id, plan.clone());
        Ok(plan)
    }

    async fn latest_workout_plan(&self, user_id: Uuid) -> AppResult<Option<WorkoutPlan>> {
        Ok(self
            .workout_plans
            .read()
            .await
            .values()
            .filter(|p| p.user_id == user_id)
            .max_by_key(|p| p.created_at)
            .cloned())
    }

    async fn all_workout_plans(&self, user_id: Uuid) -> AppResult<Vec<WorkoutPlan>> {
        let mut plans: Vec<WorkoutPlan> = self
            .workout_plans
            .read()
            .await
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(plans)
    }

    async fn update_workout_plan(
        &self,
        id: Uuid,
        week: Vec<DailyWorkout>,
    ) -> AppResult<Option<WorkoutPlan>> {
        let mut plans = self.workout_plans.write().await;
        let Some(plan) = plans.get_mut(&id) else {
            return Ok(None);
        };
        plan.week = week;
        Ok(Some(plan.clone()))
    }

    async fn create_meal_plan(
        &self,
        user_id: Uuid,
        daily_calorie_target: u32,
        macros: MacroSplit,
        week: Vec<DailyMeals>,
    ) -> AppResult<MealPlan> {
        let plan = MealPlan {
            id: Uuid::new_v4(),
            user_id,
            daily_calorie_target,
            macros,
            week,
            created_at: Utc::now(),
        };
        self.meal_plans.write().await.insert(plan.id, plan.clone());
        Ok(plan)
    }

    async fn latest_meal_plan(&self, user_id: Uuid) -> AppResult<Option<MealPlan>> {
        Ok(self
            .meal_plans
            .read()
            .await
            .values()
            .filter(|p| p.user_id == user_id)
            .max_by_key(|p| p.created_at)
            .cloned())
    }

    async fn all_meal_plans(&self, user_id: Uuid) -> AppResult<Vec<MealPlan>> {
        let mut plans: Vec<MealPlan> = self
            .meal_plans
            .read()
            .await
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(plans)
    }

    async fn update_meal_plan(
        &self,
        id: Uuid,
        daily_calorie_target: Option<u32>,
        macros: Option<MacroSplit>,
        week: Option<Vec<DailyMeals>>,
    ) -> AppResult<Option<MealPlan>> {
        let mut plans = self.meal_plans.write().await;
        let Some(plan) = plans.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(target) = daily_calorie_target {
            plan.daily_calorie_target = target;
        }
        if let Some(macros) = macros {
            plan.macros = macros;
        }
        if let Some(week) = week {
            plan.week = week;
        }
        Ok(Some(plan.clone()))
    }

    async fn create_chat_message(&self, message: NewChatMessage) -> AppResult<ChatMessageRecord> {
        let record = ChatMessageRecord {
            id: Uuid::new_v4(),
            user_id: message.user_id,
            session_id: message.session_id,
            role: message.role,
            content: message.content,
            created_at: Utc::now(),
        };
        self.chat_messages
            .write()
            .await
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn chat_messages(
        &self,
        user_id: Uuid,
        session_id: &str,
        limit: usize,
    ) -> AppResult<Vec<ChatMessageRecord>> {
        let mut messages: Vec<ChatMessageRecord> = self
            .chat_messages
            .read()
            .await
            .values()
            .filter(|m| m.user_id == user_id && m.session_id == session_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        // Trailing N, still chronological
        let skip = messages.len().saturating_sub(limit);
        Ok(messages.split_off(skip))
    }

    async fn create_progress_log(&self, log: NewProgressLog) -> AppResult<ProgressLog> {
        let record = ProgressLog {
            id: Uuid::new_v4(),
            user_id: log.user_id,
            date: log.date,
            weight: log.weight,
            workout_completed: log.workout_completed,
            calories_burned: log.calories_burned,
            notes: log.notes,
            created_at: Utc::now(),
        };
        self.progress_logs
            .write()
            .await
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn progress_logs(&self, user_id: Uuid) -> AppResult<Vec<ProgressLog>> {
        let mut logs: Vec<ProgressLog> = self
            .progress_logs
            .read()
            .await
            .values()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(logs)
    }

    async fn update_progress_log(
        &self,
        id: Uuid,
        update: ProgressLogUpdate,
    ) -> AppResult<Option<ProgressLog>> {
        let mut logs = self.progress_logs.write().await;
        let Some(log) = logs.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(date) = update.date {
            log.date = date;
        }
        if let Some(weight) = update.weight {
            log.weight = Some(weight);
        }
        if let Some(completed) = update.workout_completed {
            log.workout_completed = Some(completed);
        }
        if let Some(calories) = update.calories_burned {
            log.calories_burned = Some(calories);
        }
        if let Some(notes) = update.notes {
            log.notes = Some(notes);
        }
        Ok(Some(log.clone()))
    }

    async fn delete_progress_log(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.progress_logs.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile(email: &str) -> NewProfile {
        NewProfile {
            name: "Ann".into(),
            email: email.into(),
            age: 28,
            gender: "female".into(),
            height: 165,
            weight: 60,
            fitness_goal: "Weight Loss".into(),
            fitness_level: "Beginner".into(),
            workout_location: "Home".into(),
            dietary_preference: "Vegetarian".into(),
        }
    }

    fn sample_week() -> Vec<DailyWorkout> {
        vec![DailyWorkout {
            day: "Monday".into(),
            name: "Full Body".into(),
            duration: "45 min".into(),
            difficulty: "Beginner".into(),
            exercises: Vec::new(),
        }]
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_without_mutation() {
        let storage = MemoryStorage::new();
        let first = storage.create_profile(sample_profile("a@x.com")).await.unwrap();

        let mut second = sample_profile("a@x.com");
        second.name = "Impostor".into();
        let err = storage.create_profile(second).await.unwrap_err();
        assert_eq!(err.http_status(), 409);

        let kept = storage.get_profile(first.id).await.unwrap().unwrap();
        assert_eq!(kept.name, "Ann");
    }

    #[tokio::test]
    async fn test_update_rejects_email_collision() {
        let storage = MemoryStorage::new();
        storage.create_profile(sample_profile("a@x.com")).await.unwrap();
        let other = storage.create_profile(sample_profile("b@x.com")).await.unwrap();

        let update = ProfileUpdate {
            email: Some("a@x.com".into()),
            ..Default::default()
        };
        let err = storage.update_profile(other.id, update).await.unwrap_err();
        assert_eq!(err.http_status(), 409);
    }

    #[tokio::test]
    async fn test_update_own_email_is_not_a_collision() {
        let storage = MemoryStorage::new();
        let profile = storage.create_profile(sample_profile("a@x.com")).await.unwrap();

        let update = ProfileUpdate {
            email: Some("a@x.com".into()),
            weight: Some(61),
            ..Default::default()
        };
        let updated = storage
            .update_profile(profile.id, update)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.weight, 61);
    }

    #[tokio::test]
    async fn test_latest_workout_plan_wins() {
        let storage = MemoryStorage::new();
        let user_id = Uuid::new_v4();

        let _first = storage
            .create_workout_plan(user_id, sample_week())
            .await
            .unwrap();
        // Insertion order is not enough on equal timestamps; ensure a
        // strictly later creation instant
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second = storage
            .create_workout_plan(user_id, sample_week())
            .await
            .unwrap();

        let latest = storage.latest_workout_plan(user_id).await.unwrap().unwrap();
        assert_eq!(latest.id, second.id);

        let all = storage.all_workout_plans(user_id).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
    }

    #[tokio::test]
    async fn test_chat_trailing_limit_chronological() {
        let storage = MemoryStorage::new();
        let user_id = Uuid::new_v4();

        for i in 0..5 {
            storage
                .create_chat_message(NewChatMessage {
                    user_id,
                    session_id: "s1".into(),
                    role: ChatRole::User,
                    content: format!("message {i}"),
                })
                .await
                .unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let messages = storage.chat_messages(user_id, "s1", 2).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "message 3");
        assert_eq!(messages[1].content, "message 4");
    }

    #[tokio::test]
    async fn test_progress_log_crud() {
        let storage = MemoryStorage::new();
        let user_id = Uuid::new_v4();

        let log = storage
            .create_progress_log(NewProgressLog {
                user_id,
                date: Utc::now(),
                weight: Some(60),
                workout_completed: None,
                calories_burned: None,
                notes: None,
            })
            .await
            .unwrap();

        let updated = storage
            .update_progress_log(
                log.id,
                ProgressLogUpdate {
                    workout_completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.workout_completed, Some(true));
        assert_eq!(updated.weight, Some(60));

        assert!(storage.delete_progress_log(log.id).await.unwrap());
        assert!(!storage.delete_progress_log(log.id).await.unwrap());
        assert!(storage.progress_logs(user_id).await.unwrap().is_empty());
    }
}
