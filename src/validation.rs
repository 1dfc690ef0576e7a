// ABOUTME: Profile intake validation and normalization
// ABOUTME: Checks field ranges and formats, reporting every violation at once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

//! Profile validation.
//!
//! Two entry points: [`ProfilePayload::validate`] for full profile intake
//! (email required) and [`ProfilePayload::validate_update`] for partial
//! updates (all fields optional, present fields still checked). Both are
//! pure and
//! idempotent; a failure enumerates every violated field in the error
//! details rather than stopping at the first.
//!
//! Enumerated fields (gender, fitness level, workout location) accept any
//! non-empty string beyond the known values. The intake form offers the
//! canonical choices, but the API stays permissive so free-form entries
//! survive round trips.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::{AppError, AppResult};

/// Age bounds in years
pub const AGE_RANGE: std::ops::RangeInclusive<u32> = 10..=100;

/// Height bounds in centimeters
pub const HEIGHT_RANGE: std::ops::RangeInclusive<u32> = 80..=250;

/// Weight bounds in kilograms
pub const WEIGHT_RANGE: std::ops::RangeInclusive<u32> = 25..=350;

/// Canonical gender choices offered by the intake form
pub const KNOWN_GENDERS: &[&str] = &["male", "female", "other"];

/// Canonical fitness levels offered by the intake form
pub const KNOWN_FITNESS_LEVELS: &[&str] = &["Beginner", "Intermediate", "Advanced"];

/// Canonical workout locations offered by the intake form
pub const KNOWN_WORKOUT_LOCATIONS: &[&str] = &["Home", "Gym", "Outdoor"];

/// Raw profile submission as received over the wire
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub height: Option<i64>,
    pub weight: Option<i64>,
    pub fitness_goal: Option<String>,
    pub fitness_level: Option<String>,
    pub workout_location: Option<String>,
    pub dietary_preference: Option<String>,
}

/// A fully validated, normalized profile ready for persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    pub name: String,
    pub email: String,
    pub age: u32,
    pub gender: String,
    pub height: u32,
    pub weight: u32,
    pub fitness_goal: String,
    pub fitness_level: String,
    pub workout_location: String,
    pub dietary_preference: String,
}

/// Validated partial update; only present fields are applied
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness_goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_preference: Option<String>,
}

impl From<NewProfile> for ProfileUpdate {
    /// A full profile expressed as an update touching every field; used by
    /// the upsert-by-email path
    fn from(profile: NewProfile) -> Self {
        Self {
            name: Some(profile.name),
            email: Some(profile.email),
            age: Some(profile.age),
            gender: Some(profile.gender),
            height: Some(profile.height),
            weight: Some(profile.weight),
            fitness_goal: Some(profile.fitness_goal),
            fitness_level: Some(profile.fitness_level),
            workout_location: Some(profile.workout_location),
            dietary_preference: Some(profile.dietary_preference),
        }
    }
}

/// Accumulates per-field violations so callers see them all at once
#[derive(Debug, Default)]
struct FieldErrors {
    errors: Vec<(String, String)>,
}

impl FieldErrors {
    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push((field.to_owned(), message.into()));
    }

    fn into_result(self, context: &str) -> AppResult<()> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let fields: Vec<serde_json::Value> = self
            .errors
            .iter()
            .map(|(field, message)| json!({ "field": field, "message": message }))
            .collect();
        Err(AppError::invalid_input(context).with_details(json!({ "fields": fields })))
    }
}

impl ProfilePayload {
    /// Validate a full profile submission
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` with a `fields` detail array listing every
    /// violated field.
    pub fn validate(&self) -> AppResult<NewProfile> {
        let mut errors = FieldErrors::default();

        let name = required_text(&mut errors, "name", self.name.as_deref());
        let email = match self.email.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                let email = raw.to_lowercase();
                if !is_valid_email(&email) {
                    errors.push("email", "must be a valid email address");
                }
                email
            }
            _ => {
                errors.push("email", "is required");
                String::new()
            }
        };
        let age = required_range(&mut errors, "age", self.age, &AGE_RANGE);
        let height = required_range(&mut errors, "height", self.height, &HEIGHT_RANGE);
        let weight = required_range(&mut errors, "weight", self.weight, &WEIGHT_RANGE);
        let gender = required_text(&mut errors, "gender", self.gender.as_deref());
        let fitness_goal = required_text(&mut errors, "fitnessGoal", self.fitness_goal.as_deref());
        let fitness_level =
            required_text(&mut errors, "fitnessLevel", self.fitness_level.as_deref());
        let workout_location = required_text(
            &mut errors,
            "workoutLocation",
            self.workout_location.as_deref(),
        );
        let dietary_preference = required_text(
            &mut errors,
            "dietaryPreference",
            self.dietary_preference.as_deref(),
        );

        errors.into_result("Invalid profile data")?;

        Ok(NewProfile {
            name,
            email,
            age,
            gender,
            height,
            weight,
            fitness_goal,
            fitness_level,
            workout_location,
            dietary_preference,
        })
    }

    /// Validate a partial update; absent fields are skipped, present fields
    /// must satisfy the same constraints as full intake
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` with a `fields` detail array listing every
    /// violated field.
    pub fn validate_update(&self) -> AppResult<ProfileUpdate> {
        let mut errors = FieldErrors::default();

        let email = match self.email.as_deref().map(str::trim) {
            None => None,
            Some(raw) => {
                let email = raw.to_lowercase();
                if !is_valid_email(&email) {
                    errors.push("email", "must be a valid email address");
                }
                Some(email)
            }
        };

        let update = ProfileUpdate {
            name: optional_text(&mut errors, "name", self.name.as_deref()),
            email,
            age: optional_range(&mut errors, "age", self.age, &AGE_RANGE),
            gender: optional_text(&mut errors, "gender", self.gender.as_deref()),
            height: optional_range(&mut errors, "height", self.height, &HEIGHT_RANGE),
            weight: optional_range(&mut errors, "weight", self.weight, &WEIGHT_RANGE),
            fitness_goal: optional_text(&mut errors, "fitnessGoal", self.fitness_goal.as_deref()),
            fitness_level: optional_text(
                &mut errors,
                "fitnessLevel",
                self.fitness_level.as_deref(),
            ),
            workout_location: optional_text(
                &mut errors,
                "workoutLocation",
                self.workout_location.as_deref(),
            ),
            dietary_preference: optional_text(
                &mut errors,
                "dietaryPreference",
                self.dietary_preference.as_deref(),
            ),
        };

        errors.into_result("Invalid update data")?;

        Ok(update)
    }
}

/// Syntactic email check: non-empty local part, `@`, dotted domain
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.len() <= 5 {
        return false;
    }
    let Some(at_pos) = email.find('@') else {
        return false;
    };
    if at_pos == 0 || at_pos == email.len() - 1 {
        return false;
    }
    let domain = &email[at_pos + 1..];
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

fn required_text(errors: &mut FieldErrors, field: &str, value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => trimmed.to_owned(),
        Some(_) => {
            errors.push(field, "must not be empty");
            String::new()
        }
        None => {
            errors.push(field, "is required");
            String::new()
        }
    }
}

fn optional_text(errors: &mut FieldErrors, field: &str, value: Option<&str>) -> Option<String> {
    match value.map(str::trim) {
        None => None,
        Some(trimmed) if !trimmed.is_empty() => Some(trimmed.to_owned()),
        Some(_) => {
            errors.push(field, "must not be empty");
            None
        }
    }
}

fn required_range(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<i64>,
    range: &std::ops::RangeInclusive<u32>,
) -> u32 {
    match value {
        Some(v) => check_range(errors, field, v, range).unwrap_or(0),
        None => {
            errors.push(field, "is required");
            0
        }
    }
}

fn optional_range(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<i64>,
    range: &std::ops::RangeInclusive<u32>,
) -> Option<u32> {
    value.and_then(|v| check_range(errors, field, v, range))
}

fn check_range(
    errors: &mut FieldErrors,
    field: &str,
    value: i64,
    range: &std::ops::RangeInclusive<u32>,
) -> Option<u32> {
    let (min, max) = (*range.start(), *range.end());
    match u32::try_from(value) {
        Ok(v) if range.contains(&v) => Some(v),
        _ => {
            errors.push(field, format!("must be between {min} and {max}"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> ProfilePayload {
        ProfilePayload {
            name: Some("Ann".into()),
            email: Some("a@x.com".into()),
            age: Some(28),
            gender: Some("female".into()),
            height: Some(165),
            weight: Some(60),
            fitness_goal: Some("Weight Loss".into()),
            fitness_level: Some("Beginner".into()),
            workout_location: Some("Home".into()),
            dietary_preference: Some("Vegetarian".into()),
        }
    }

    #[test]
    fn test_valid_profile_normalizes() {
        let mut payload = full_payload();
        payload.email = Some("  A@X.com ".into());
        payload.name = Some("  Ann ".into());

        let profile = payload.validate().unwrap();
        assert_eq!(profile.email, "a@x.com");
        assert_eq!(profile.name, "Ann");
    }

    #[test]
    fn test_validation_is_idempotent() {
        let payload = full_payload();
        let first = payload.validate().unwrap();
        let second = payload.validate().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_all_violations_reported() {
        let payload = ProfilePayload {
            name: Some("   ".into()),
            email: Some("not-an-email".into()),
            age: Some(7),
            height: Some(600),
            weight: Some(-3),
            ..Default::default()
        };

        let err = payload.validate().unwrap_err();
        let fields = err.details["fields"].as_array().unwrap();
        let named: Vec<&str> = fields
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        for field in [
            "name",
            "email",
            "age",
            "height",
            "weight",
            "gender",
            "fitnessGoal",
            "fitnessLevel",
            "workoutLocation",
            "dietaryPreference",
        ] {
            assert!(named.contains(&field), "missing violation for {field}");
        }
    }

    #[test]
    fn test_free_form_enum_fields_accepted() {
        let mut payload = full_payload();
        payload.gender = Some("nonbinary".into());
        payload.fitness_level = Some("weekend warrior".into());
        payload.workout_location = Some("hotel rooms".into());
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_update_skips_absent_fields() {
        let payload = ProfilePayload {
            weight: Some(72),
            ..Default::default()
        };
        let update = payload.validate_update().unwrap();
        assert_eq!(update.weight, Some(72));
        assert!(update.name.is_none());
        assert!(update.email.is_none());
    }

    #[test]
    fn test_update_checks_present_fields() {
        let payload = ProfilePayload {
            age: Some(300),
            email: Some("bad".into()),
            ..Default::default()
        };
        let err = payload.validate_update().unwrap_err();
        let fields = err.details["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("user@example.com"));
        assert!(!is_valid_email("invalid"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("user@.com"));
    }
}
