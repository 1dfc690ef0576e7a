// ABOUTME: Deterministic rendering of a profile into the plan-generation prompt
// ABOUTME: Restates every intake field and pins the exact JSON response shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

//! Plan prompt construction.
//!
//! [`build_plan_prompt`] is a pure function: identical profiles produce
//! byte-identical prompt text, which keeps golden-output tests stable. The
//! prompt restates the full intake, demands exactly 7 workout days and 7
//! meal days plus 5-7 tips, and closes with a fully worked JSON example of
//! the required nesting.

use crate::validation::NewProfile;

/// System message framing for the generation request
pub const PLAN_SYSTEM_PROMPT: &str = "You are a certified fitness coach and nutritionist. \
    Always return valid JSON responses without markdown formatting.";

/// Render the generation instruction for a profile
#[must_use]
pub fn build_plan_prompt(profile: &NewProfile) -> String {
    format!(
        r#"You are a certified AI fitness coach and nutritionist with 15+ years of experience. Generate a comprehensive, personalized 7-day fitness and nutrition plan.

User Profile:
- Name: {name}
- Age: {age} years
- Gender: {gender}
- Weight: {weight}kg
- Height: {height}cm
- Fitness Goal: {goal}
- Current Fitness Level: {level}
- Workout Location: {location}
- Dietary Preference: {diet}

Create a detailed plan that includes:

1. **7-Day Workout Plan**: Each day should have:
   - Day name (Monday-Sunday)
   - Workout name (e.g., "Upper Body Strength", "Cardio & Core")
   - Duration (e.g., "45 min")
   - Difficulty level matching their fitness level
   - List of 4-6 exercises with:
     - Exercise name
     - Sets (e.g., "3 sets" or "4 sets")
     - Reps/Duration (e.g., "12 reps" or "30 seconds")
     - Rest time between sets (e.g., "60s" or "90s")
     - Brief instructions if needed

2. **7-Day Meal Plan**: Each day should have:
   - Day name (Monday-Sunday)
   - Total daily calories (based on their goal)
   - Macros breakdown (protein, carbs, fats in grams)
   - 4 meals (Breakfast, Lunch, Dinner, Snacks):
     - Meal name
     - Calories per meal
     - Protein, carbs, fats (optional)
     - Key ingredients list
     - Brief recipe or preparation notes

3. **Motivational Tips**: 5-7 personalized tips for staying motivated and achieving their {goal} goal.

IMPORTANT: Return ONLY valid JSON in this exact format (no markdown, no code blocks, just raw JSON):

{{
  "workout": [
    {{
      "day": "Monday",
      "name": "Upper Body Strength",
      "duration": "45 min",
      "difficulty": "Intermediate",
      "exercises": [
        {{
          "name": "Push-ups",
          "sets": "3 sets",
          "reps": "12 reps",
          "rest": "60s",
          "instructions": "Keep your core tight and lower until chest nearly touches ground"
        }}
      ]
    }}
  ],
  "meals": [
    {{
      "day": "Monday",
      "totalCalories": 2000,
      "macros": {{
        "protein": 150,
        "carbs": 200,
        "fats": 60
      }},
      "meals": [
        {{
          "meal": "Breakfast",
          "name": "Protein Oatmeal Bowl",
          "calories": 450,
          "protein": 30,
          "carbs": 55,
          "fats": 12,
          "ingredients": ["Oats", "Protein powder", "Banana", "Almonds"],
          "recipe": "Cook oats, mix in protein powder, top with sliced banana and almonds"
        }}
      ]
    }}
  ],
  "tips": [
    "Start each day with a glass of water and light stretching",
    "Track your progress weekly, not daily"
  ]
}}"#,
        name = profile.name,
        age = profile.age,
        gender = profile.gender,
        weight = profile.weight,
        height = profile.height,
        goal = profile.fitness_goal,
        level = profile.fitness_level,
        location = profile.workout_location,
        diet = profile.dietary_preference,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> NewProfile {
        NewProfile {
            name: "Ann".into(),
            email: "a@x.com".into(),
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

    #[test]
    fn test_prompt_is_deterministic() {
        let profile = sample_profile();
        assert_eq!(build_plan_prompt(&profile), build_plan_prompt(&profile));
    }

    #[test]
    fn test_prompt_restates_every_field() {
        let prompt = build_plan_prompt(&sample_profile());
        assert!(prompt.contains("Name: Ann"));
        assert!(prompt.contains("Age: 28 years"));
        assert!(prompt.contains("Gender: female"));
        assert!(prompt.contains("Weight: 60kg"));
        assert!(prompt.contains("Height: 165cm"));
        assert!(prompt.contains("Fitness Goal: Weight Loss"));
        assert!(prompt.contains("Current Fitness Level: Beginner"));
        assert!(prompt.contains("Workout Location: Home"));
        assert!(prompt.contains("Dietary Preference: Vegetarian"));
    }

    #[test]
    fn test_prompt_pins_structure_and_example() {
        let prompt = build_plan_prompt(&sample_profile());
        assert!(prompt.contains("7-Day Workout Plan"));
        assert!(prompt.contains("7-Day Meal Plan"));
        assert!(prompt.contains("5-7 personalized tips"));
        // The worked example must itself be the exact wire shape
        assert!(prompt.contains("\"totalCalories\": 2000"));
        assert!(prompt.contains("\"workout\": ["));
        assert!(prompt.contains("\"meals\": ["));
    }
}
