// ABOUTME: Nutrition engine configuration with validation and environment overrides
// ABOUTME: Re-exports calculator and scaler configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

//! Engine Configuration Module
//!
//! - `nutrition` - BMR coefficients, activity multipliers, goal adjustments,
//!   macro splits and scaling precision
//! - `error` - validation errors

pub mod error;
pub mod nutrition;

pub use error::ConfigError;
pub use nutrition::{
    ActivityFactorsConfig, BmrConfig, GoalAdjustmentConfig, MacroSplit, MacroSplitConfig,
    NutritionConfig, ScalingConfig,
};
