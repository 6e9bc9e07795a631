// ABOUTME: Configuration module for the MacroLens engine
// ABOUTME: Nutrition engine constants with environment overrides and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

/// Calculator, scaler and normalizer configuration
pub mod intelligence;

pub use intelligence::{ConfigError, NutritionConfig};
