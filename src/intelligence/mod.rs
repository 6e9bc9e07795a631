// ABOUTME: Nutrition intelligence module: targets, scaling, normalization and progress
// ABOUTME: Pure synchronous computations over the core models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

//! Nutrition Intelligence
//!
//! - `macro_calculator` - daily calorie and macro targets
//! - `units` - height and weight conversions
//! - `serving_scaler` - serving-size rescaling and the meal edit session
//! - `nutrient_normalizer` - food-database records to per-100 g nutrients
//! - `aggregation` - nutrient sums across foods and logs
//! - `progress` - period summaries, streaks, weight progress and achievements

/// Daily calorie and macro target calculation
pub mod macro_calculator;

/// Height and weight unit conversions
pub mod units;

/// Serving-size rescaling
pub mod serving_scaler;

/// Food-database normalization
pub mod nutrient_normalizer;

/// Nutrient summation
pub mod aggregation;

/// Progress roll-ups
pub mod progress;

pub use aggregation::{sum_log_totals, sum_nutrition};
pub use macro_calculator::{
    adjust_calories_for_goal, calculate_bmr, calculate_tdee, compute_default_targets,
    compute_targets, resolve_effective_goal, select_macro_split,
};
pub use nutrient_normalizer::{
    normalize_food, normalize_nutrient_source, normalize_search_response, FoodRecord,
    FoodSearchResponse, NormalizedFood,
};
pub use progress::{
    achievements, daily_calorie_series, logging_streaks, meal_time_averages, next_achievement,
    period_insights, remaining_against_goals, summarize_period, top_foods, weight_progress,
    AchievementProgress, AchievementType, MealTimeAverage, PeriodSummary, ProgressPeriod,
    Streaks, WeightProgress,
};
pub use serving_scaler::{
    parse_quantity_amount, scale_nutrition, scaling_factor, ScalingBase, ServingEditor,
};
pub use units::{convert_height_to_cm, convert_kg_to_lbs, convert_lbs_to_kg};
