// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging plus profile, food and log builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `macrolens`

use chrono::{DateTime, Duration, Utc};
use macrolens::models::{
    ActivityLevel, BodyProfile, FoodItem, FoodLog, Gender, GoalProfile, LogType, MealType,
    NutrientProfile, PrimaryGoal,
};
use std::env;
use std::sync::Once;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Validated body profile
pub fn body(gender: Gender, age: u32, height_cm: f64, weight_kg: f64) -> BodyProfile {
    BodyProfile::new(gender, age, height_cm, weight_kg, None).unwrap()
}

/// Goal profile with no conditions or preferences
pub fn goals(activity: ActivityLevel, primary: &[PrimaryGoal]) -> GoalProfile {
    GoalProfile::new(activity, primary.iter().copied(), [], []).unwrap()
}

/// Food with macros only
pub fn food(name: &str, serving: &str, calories: f64, protein: f64, carbs: f64, fat: f64) -> FoodItem {
    FoodItem::new(
        name,
        serving,
        NutrientProfile::macros(calories, protein, carbs, fat),
    )
}

/// Manual-search log for `user_id` at `date`
pub fn log_at(user_id: &str, date: DateTime<Utc>, foods: Vec<FoodItem>) -> FoodLog {
    FoodLog::new(user_id, date, MealType::Lunch, LogType::ManualSearch, foods)
}

/// Instant `days` whole days before `now`
pub fn days_ago(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(days)
}

/// Assert two floats agree within `tolerance`
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} (+/- {tolerance}), got {actual}"
    );
}
