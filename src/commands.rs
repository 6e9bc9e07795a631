// ABOUTME: Command handlers behind macrolens-cli, one per subcommand
// ABOUTME: Each takes parsed arguments or raw JSON text and returns a JSON value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

//! CLI command handlers
//!
//! The binary parses arguments and prints; everything else lives here so the
//! JSON each subcommand produces can be tested directly.

use crate::intelligence::{
    achievements, compute_default_targets, logging_streaks, meal_time_averages, next_achievement,
    normalize_food, normalize_search_response, period_insights, summarize_period, top_foods,
    FoodRecord, FoodSearchResponse, ProgressPeriod, ScalingBase,
};
use chrono::{DateTime, Utc};
use macrolens_core::errors::{AppError, AppResult};
use macrolens_core::models::{
    BodyProfile, DailyGoals, FoodItem, FoodLog, GoalProfile, NutrientProfile,
};
use serde_json::{json, Value};
use tracing::{debug, info};

/// Foods listed in the summary output
pub const TOP_FOODS_LIMIT: usize = 4;

/// Daily calorie and macro targets
///
/// # Errors
///
/// Returns an error if the targets cannot be serialized
pub fn targets(body: &BodyProfile, goals: &GoalProfile) -> AppResult<Value> {
    let targets = compute_default_targets(body, goals);
    info!(calories = targets.calories, "Computed daily targets");
    Ok(serde_json::to_value(targets)?)
}

/// Rescale a JSON nutrient profile from one quantity to another
///
/// A `from` quantity without a number counts as one unit, matching how a
/// loaded food is captured for editing.
///
/// # Errors
///
/// Returns an error if `input` is not a nutrient profile or `to` has no
/// positive number
pub fn scale(input: &str, from: &str, to: &str) -> AppResult<Value> {
    let nutrition: NutrientProfile = serde_json::from_str(input)?;
    let base = ScalingBase::from_food(&FoodItem::new("", from, nutrition));
    debug!(base_amount = base.base_amount(), "Scaling nutrient profile");

    let scaled = base
        .rescale(to)
        .ok_or_else(|| AppError::invalid_input(format!("'{to}' contains no positive quantity")))?;
    Ok(serde_json::to_value(scaled)?)
}

/// Normalize a food record, or every food of a search response
///
/// A document with a `foods` key is read as a search response.
///
/// # Errors
///
/// Returns an error if `input` is not JSON of either shape
pub fn normalize(input: &str) -> AppResult<Value> {
    let document: Value = serde_json::from_str(input)?;
    if document.get("foods").is_some() {
        let response: FoodSearchResponse = serde_json::from_value(document)?;
        Ok(serde_json::to_value(normalize_search_response(&response))?)
    } else {
        let record: FoodRecord = serde_json::from_value(document)?;
        Ok(serde_json::to_value(normalize_food(&record))?)
    }
}

/// Progress summary for a JSON array of food logs
///
/// Log totals are recomputed from their foods before summarizing.
///
/// # Errors
///
/// Returns an error if `input` is not an array of food logs
pub fn summarize(
    input: &str,
    period: ProgressPeriod,
    goals: &DailyGoals,
    now: DateTime<Utc>,
) -> AppResult<Value> {
    let logs: Vec<FoodLog> = serde_json::from_str(input)?;
    let logs: Vec<FoodLog> = logs.into_iter().map(FoodLog::with_recomputed_totals).collect();
    debug!(logs = logs.len(), %period, "Summarizing food logs");

    let summary = summarize_period(&logs, period, now);
    let streaks = logging_streaks(&logs, now.date_naive());
    let progress = achievements(streaks, logs.len(), None);
    let top: Vec<Value> = top_foods(&logs, TOP_FOODS_LIMIT)
        .into_iter()
        .map(|(name, count)| json!({ "name": name, "count": count }))
        .collect();

    Ok(json!({
        "insights": period_insights(&summary, goals, streaks),
        "summary": summary,
        "streaks": streaks,
        "topFoods": top,
        "mealTimes": meal_time_averages(&logs, period, now),
        "nextAchievement": next_achievement(&progress),
        "achievements": progress,
    }))
}
