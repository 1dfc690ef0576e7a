// ABOUTME: Integration tests for workout, meal, chat, progress, and health routes
// ABOUTME: Covers CRUD semantics, latest-plan lookup, and trailing chat windows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitForge Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{test_resources, ScriptedLlm};
use fitforge_server::server::CoachServer;
use helpers::axum_test::TestRequest;
use serde_json::json;
use uuid::Uuid;

fn app() -> axum::Router {
    CoachServer::new(test_resources(ScriptedLlm::always_text("unused"))).router()
}

fn week_body() -> serde_json::Value {
    json!([{
        "day": "Monday",
        "name": "Upper Body Strength",
        "duration": "45 min",
        "difficulty": "Beginner",
        "exercises": [
            { "name": "Push-ups", "sets": "3 sets", "reps": "12 reps", "rest": "60s" }
        ]
    }])
}

fn meal_week_body() -> serde_json::Value {
    json!([{
        "day": "Monday",
        "totalCalories": 1900,
        "macros": { "protein": 140, "carbs": 190, "fats": 58 },
        "meals": [
            { "meal": "Breakfast", "name": "Protein Oatmeal Bowl", "calories": 450 }
        ]
    }])
}

// ============================================================================
// Workout plans
// ============================================================================

#[tokio::test]
async fn test_workout_plan_crud_and_latest() {
    let app = app();
    let user_id = Uuid::new_v4();

    let first = TestRequest::post("/api/workout")
        .json(&json!({ "userId": user_id, "week": week_body() }))
        .send(app.clone())
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let second = TestRequest::post("/api/workout")
        .json(&json!({ "userId": user_id, "week": week_body() }))
        .send(app.clone())
        .await;
    let second: serde_json::Value = second.json();

    let latest = TestRequest::get(&format!("/api/workout/{user_id}"))
        .send(app.clone())
        .await;
    assert_eq!(latest.status(), StatusCode::OK);
    let latest: serde_json::Value = latest.json();
    assert_eq!(latest["id"], second["id"]);

    let all = TestRequest::get(&format!("/api/workout/all/{user_id}"))
        .send(app.clone())
        .await;
    let all: serde_json::Value = all.json();
    assert_eq!(all.as_array().unwrap().len(), 2);

    let mut replacement = week_body();
    replacement[0]["name"] = json!("Lower Body Strength");
    let patched = TestRequest::patch(&format!("/api/workout/{}", second["id"].as_str().unwrap()))
        .json(&json!({ "week": replacement }))
        .send(app.clone())
        .await;
    assert_eq!(patched.status(), StatusCode::OK);
    let patched: serde_json::Value = patched.json();
    assert_eq!(patched["week"][0]["name"], "Lower Body Strength");

    let empty = TestRequest::get(&format!("/api/workout/{}", Uuid::new_v4()))
        .send(app.clone())
        .await;
    assert_eq!(empty.status(), StatusCode::NOT_FOUND);

    let empty_all = TestRequest::get(&format!("/api/workout/all/{}", Uuid::new_v4()))
        .send(app.clone())
        .await;
    assert_eq!(empty_all.status(), StatusCode::OK);
    let empty_all: serde_json::Value = empty_all.json();
    assert!(empty_all.as_array().unwrap().is_empty());

    let invalid = TestRequest::post("/api/workout")
        .json(&json!({ "userId": user_id }))
        .send(app)
        .await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Meal plans
// ============================================================================

#[tokio::test]
async fn test_meal_plan_crud_and_latest() {
    let app = app();
    let user_id = Uuid::new_v4();

    let create = |app: axum::Router| async move {
        TestRequest::post("/api/meals")
            .json(&json!({
                "userId": user_id,
                "dailyCalorieTarget": 1900,
                "macros": { "protein": 140, "carbs": 190, "fats": 58 },
                "week": meal_week_body()
            }))
            .send(app)
            .await
    };

    let first = create(app.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let second: serde_json::Value = create(app.clone()).await.json();

    let latest = TestRequest::get(&format!("/api/meals/{user_id}"))
        .send(app.clone())
        .await;
    assert_eq!(latest.status(), StatusCode::OK);
    let latest: serde_json::Value = latest.json();
    assert_eq!(latest["id"], second["id"]);
    assert_eq!(latest["dailyCalorieTarget"], 1900);

    let patched = TestRequest::patch(&format!("/api/meals/{}", second["id"].as_str().unwrap()))
        .json(&json!({ "dailyCalorieTarget": 2100 }))
        .send(app.clone())
        .await;
    assert_eq!(patched.status(), StatusCode::OK);
    let patched: serde_json::Value = patched.json();
    assert_eq!(patched["dailyCalorieTarget"], 2100);
    // Untouched fields survive a partial update
    assert_eq!(patched["macros"]["protein"], 140);

    let all = TestRequest::get(&format!("/api/meals/all/{user_id}"))
        .send(app)
        .await;
    let all: serde_json::Value = all.json();
    assert_eq!(all.as_array().unwrap().len(), 2);
}

// ============================================================================
// Chat
// ============================================================================

#[tokio::test]
async fn test_chat_append_and_trailing_window() {
    let app = app();
    let user_id = Uuid::new_v4();

    for i in 0..5 {
        let response = TestRequest::post("/api/chat")
            .json(&json!({
                "userId": user_id,
                "sessionId": "s1",
                "role": if i % 2 == 0 { "user" } else { "assistant" },
                "content": format!("message {i}")
            }))
            .send(app.clone())
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let window = TestRequest::get(&format!("/api/chat/{user_id}/s1?limit=2"))
        .send(app.clone())
        .await;
    assert_eq!(window.status(), StatusCode::OK);
    let window: serde_json::Value = window.json();
    let messages = window.as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["content"], "message 3");
    assert_eq!(messages[1]["content"], "message 4");

    let other_session = TestRequest::get(&format!("/api/chat/{user_id}/s2"))
        .send(app.clone())
        .await;
    let other_session: serde_json::Value = other_session.json();
    assert!(other_session.as_array().unwrap().is_empty());

    let invalid = TestRequest::post("/api/chat")
        .json(&json!({ "userId": user_id, "sessionId": "s1", "role": "user", "content": "  " }))
        .send(app)
        .await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Progress logs
// ============================================================================

#[tokio::test]
async fn test_progress_log_crud() {
    let app = app();
    let user_id = Uuid::new_v4();

    let created = TestRequest::post("/api/progress")
        .json(&json!({
            "userId": user_id,
            "date": "2025-06-01T00:00:00Z",
            "weight": 60,
            "notes": "feeling strong"
        }))
        .send(app.clone())
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: serde_json::Value = created.json();
    let id = created["id"].as_str().unwrap().to_owned();

    let listed = TestRequest::get(&format!("/api/progress/{user_id}"))
        .send(app.clone())
        .await;
    let listed: serde_json::Value = listed.json();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let patched = TestRequest::patch(&format!("/api/progress/{id}"))
        .json(&json!({ "workoutCompleted": true }))
        .send(app.clone())
        .await;
    assert_eq!(patched.status(), StatusCode::OK);
    let patched: serde_json::Value = patched.json();
    assert_eq!(patched["workoutCompleted"], true);
    assert_eq!(patched["weight"], 60);

    let deleted = TestRequest::delete(&format!("/api/progress/{id}"))
        .send(app.clone())
        .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = TestRequest::delete(&format!("/api/progress/{id}"))
        .send(app)
        .await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_reports_provider_configuration() {
    let app = app();

    let response = TestRequest::get("/api/health").send(app).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["providers"]["generation"], true);
    assert_eq!(body["providers"]["image_search"], false);
    assert_eq!(body["providers"]["speech"], true);
    assert!(body["service"]["version"].is_string());
}
