// ABOUTME: Main library entry point for the MacroLens nutrition engine
// ABOUTME: Macro targets, serving scaling, food normalization, and progress analytics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

#![deny(unsafe_code)]

//! # `MacroLens`
//!
//! Nutrition engine behind a meal-photo calorie tracker. The engine turns a
//! user's body statistics and goals into daily calorie and macro targets,
//! rescales nutrients when a serving size is edited, normalizes food-database
//! records into per-100 g values, and rolls food and weight logs up into
//! progress summaries.
//!
//! ## Architecture
//!
//! - **Core** (`macrolens-core`): errors, constants, and domain models
//! - **Config**: tunable formula coefficients with environment overrides
//! - **Intelligence**: the pure nutrition math
//! - **External**: contracts for the vision analyzer and the document store
//! - **Commands**: JSON-in, JSON-out handlers used by `macrolens-cli`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use macrolens::intelligence::compute_default_targets;
//! use macrolens::models::{ActivityLevel, BodyProfile, Gender, GoalProfile, PrimaryGoal};
//! use macrolens::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let body = BodyProfile::new(Gender::Male, 30, 180.0, 80.0, None)?;
//!     let goals = GoalProfile::new(ActivityLevel::Moderate, [PrimaryGoal::Maintain], [], [])?;
//!     let targets = compute_default_targets(&body, &goals);
//!     println!("{} kcal/day", targets.calories);
//!     Ok(())
//! }
//! ```

pub use macrolens_core::{constants, errors, models};

/// Formula coefficients and engine tunables
pub mod config;

/// Structured logging setup
pub mod logging;

/// Nutrition calculations: targets, scaling, normalization, progress
pub mod intelligence;

/// Vision-analysis result shape and the per-user document store
pub mod external;

/// Handlers behind the `macrolens-cli` subcommands
pub mod commands;
