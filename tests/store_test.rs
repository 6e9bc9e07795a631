// ABOUTME: Integration tests for the per-user nutrition store and vision-analysis conversion
// ABOUTME: Covers ownership isolation, ordering, upserts, and analyzed-food defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{Duration, Utc};
use macrolens::errors::ErrorCode;
use macrolens::external::analysis::{DEFAULT_QUANTITY, UNKNOWN_FOOD_NAME};
use macrolens::external::{InMemoryStore, NutritionStore, VisionAnalysis};
use macrolens::intelligence::ServingEditor;
use macrolens::models::{LogType, MealType, UserProfile, WeightEntry, WeightSource};
use serde_json::json;
use std::sync::Arc;

mod common;
use common::{assert_close, food, init_test_logging, log_at};

// ============================================================================
// FOOD LOG TESTS
// ============================================================================

#[tokio::test]
async fn test_logs_listed_newest_first_per_user() {
    init_test_logging();
    let store = InMemoryStore::new();
    let now = Utc::now();

    let older = log_at("alice", now - Duration::days(2), vec![food("Egg", "2", 140.0, 12.0, 1.0, 10.0)]);
    let newer = log_at("alice", now, vec![food("Toast", "1 slice", 80.0, 3.0, 15.0, 1.0)]);
    let other = log_at("bob", now, vec![food("Tea", "1 cup", 2.0, 0.0, 0.5, 0.0)]);

    store.upsert_log(older.clone()).await.unwrap();
    store.upsert_log(newer.clone()).await.unwrap();
    store.upsert_log(other).await.unwrap();

    let logs = store.list_logs("alice").await.unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].id, newer.id);
    assert_eq!(logs[1].id, older.id);
}

#[tokio::test]
async fn test_cross_user_access_is_rejected() {
    let store = InMemoryStore::new();
    let log = log_at("alice", Utc::now(), vec![]);
    store.upsert_log(log.clone()).await.unwrap();

    let err = store.get_log("bob", &log.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let mut stolen = log.clone();
    stolen.user_id = "bob".to_owned();
    let err = store.upsert_log(stolen).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);

    let err = store.delete_log("bob", &log.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert!(store.get_log("alice", &log.id).await.is_ok());
}

#[tokio::test]
async fn test_edit_and_save_recomputes_totals() {
    let store = InMemoryStore::new();
    let log = log_at("alice", Utc::now(), vec![food("Rice", "100g", 130.0, 2.7, 28.0, 0.3)]);
    store.upsert_log(log.clone()).await.unwrap();

    let mut loaded = store.get_log("alice", &log.id).await.unwrap();
    let mut editor = ServingEditor::new(loaded.foods().to_vec());
    editor.set_quantity(0, "250g").unwrap();
    loaded.replace_foods(editor.finish());
    store.upsert_log(loaded).await.unwrap();

    let saved = store.get_log("alice", &log.id).await.unwrap();
    assert_close(saved.total_nutrition().calories, 325.0, 1e-9);
    assert_eq!(saved.foods()[0].serving_size, "250g");
}

#[tokio::test]
async fn test_delete_log() {
    let store = InMemoryStore::new();
    let log = log_at("alice", Utc::now(), vec![]);
    store.upsert_log(log.clone()).await.unwrap();

    store.delete_log("alice", &log.id).await.unwrap();
    assert!(store.list_logs("alice").await.unwrap().is_empty());
    assert!(store.delete_log("alice", &log.id).await.is_err());
}

#[tokio::test]
async fn test_concurrent_writers_share_store() {
    let store: Arc<dyn NutritionStore> = Arc::new(InMemoryStore::new());
    let mut handles = Vec::new();
    for i in 0..8 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            let log = log_at("alice", Utc::now(), vec![food("Snack", "1", f64::from(i), 0.0, 0.0, 0.0)]);
            store.upsert_log(log).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(store.list_logs("alice").await.unwrap().len(), 8);
}

// ============================================================================
// WEIGHT / PROFILE TESTS
// ============================================================================

#[tokio::test]
async fn test_weights_listed_oldest_first() {
    let store = InMemoryStore::new();
    let now = Utc::now();
    let late = WeightEntry::new("alice", now, 70.0, WeightSource::Manual).unwrap();
    let early = WeightEntry::new("alice", now - Duration::days(7), 71.0, WeightSource::Onboarding).unwrap();

    store.upsert_weight(late).await.unwrap();
    store.upsert_weight(early).await.unwrap();

    let weights = store.list_weights("alice").await.unwrap();
    assert_close(weights[0].weight_kg, 71.0, 1e-12);
    assert_eq!(weights[0].source, WeightSource::Onboarding);
    assert!(store.list_weights("bob").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_profile_round_trip() {
    let store = InMemoryStore::new();
    assert_eq!(
        store.get_profile("alice").await.unwrap_err().code,
        ErrorCode::ResourceNotFound
    );

    let mut profile = UserProfile::new("alice", "Alice");
    profile.daily_goals.calories = 1800;
    store.upsert_profile(profile.clone()).await.unwrap();
    assert_eq!(store.get_profile("alice").await.unwrap(), profile);
}

// ============================================================================
// VISION ANALYSIS TESTS
// ============================================================================

#[test]
fn test_analysis_defaults_and_clamping() {
    let analysis: VisionAnalysis = serde_json::from_value(json!({
        "foods": [
            {
                "name": "Grilled chicken",
                "quantity": "150g",
                "calories": 248.0,
                "protein": 46.5,
                "carbs": 0.0,
                "fat": 5.4,
                "minerals": { "iron": 1.5 }
            },
            { "name": "  ", "calories": -20.0, "protein": 1.0 }
        ],
        "confidence": 0.85,
        "notes": "Portion estimated from plate size"
    }))
    .unwrap();

    let items = analysis.into_food_items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].serving_size, "150g");
    assert_close(items[0].nutrition.mineral("iron"), 1.5, 1e-12);
    assert_eq!(items[1].name, UNKNOWN_FOOD_NAME);
    assert_eq!(items[1].serving_size, DEFAULT_QUANTITY);
    assert_close(items[1].nutrition.calories, 0.0, 1e-12);
}

#[test]
fn test_analysis_into_photo_log() {
    let analysis: VisionAnalysis = serde_json::from_value(json!({
        "foods": [
            { "name": "Rice", "quantity": "1 cup", "calories": 206.0, "protein": 4.3, "carbs": 45.0, "fat": 0.4 },
            { "name": "Dal", "quantity": "1 bowl", "calories": 180.0, "protein": 12.0, "carbs": 30.0, "fat": 2.0 }
        ],
        "confidence": 0.85
    }))
    .unwrap();

    let log = analysis.into_food_log(
        "alice",
        Utc::now(),
        MealType::Dinner,
        Some("photos/alice/1.jpg".to_owned()),
    );
    assert_eq!(log.log_type, LogType::Photo);
    assert_eq!(log.photo_url.as_deref(), Some("photos/alice/1.jpg"));
    assert_close(log.total_nutrition().calories, 386.0, 1e-9);
}

#[test]
fn test_analysis_null_estimates_resolve_to_zero() {
    let analysis: VisionAnalysis = serde_json::from_value(json!({
        "foods": [
            {
                "name": "Rice",
                "quantity": null,
                "calories": null,
                "protein": 4.3,
                "carbs": null,
                "fat": 0.4,
                "fiber": null
            },
            { "name": null, "calories": 90.0 }
        ],
        "confidence": null,
        "notes": null
    }))
    .unwrap();
    assert_close(analysis.confidence, 0.0, 1e-12);

    let items = analysis.into_food_items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "Rice");
    assert_eq!(items[0].serving_size, DEFAULT_QUANTITY);
    assert_close(items[0].nutrition.calories, 0.0, 1e-12);
    assert_close(items[0].nutrition.protein, 4.3, 1e-12);
    assert_close(items[0].nutrition.carbs, 0.0, 1e-12);
    assert!(items[0].nutrition.fiber.is_none());
    assert_eq!(items[1].name, UNKNOWN_FOOD_NAME);
    assert_close(items[1].nutrition.calories, 90.0, 1e-12);

    let empty: VisionAnalysis = serde_json::from_value(json!({ "foods": null })).unwrap();
    assert!(empty.into_food_items().is_empty());
}
