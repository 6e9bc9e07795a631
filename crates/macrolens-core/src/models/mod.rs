// ABOUTME: Core data models for the MacroLens nutrition engine
// ABOUTME: Profiles, nutrient profiles, food logs, weight entries and user documents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

/// Body and goal profiles, wire enums and computed targets
pub mod profile;

/// Nutrient profiles, food items and food logs
pub mod nutrition;

/// Body weight entries
pub mod weight;

/// User profile documents
pub mod user;

/// Serde helpers for loosely typed external payloads
pub mod lenient;

pub use lenient::null_as_default;
pub use nutrition::{FoodItem, FoodLog, LogType, MealType, MicronutrientMap, NutrientProfile};
pub use profile::{
    ActivityLevel, BodyProfile, DailyGoals, DietaryPreference, Gender, GoalProfile,
    HealthCondition, MacroTargets, PrimaryGoal,
};
pub use user::{OnboardingData, UserProfile};
pub use weight::{WeightEntry, WeightSource};
