// ABOUTME: Collaborator contracts consumed by the engine
// ABOUTME: Vision analysis result shape and the per-user document store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

/// Vision-service analysis result
pub mod analysis;

/// Per-user document store
pub mod store;

pub use analysis::{AnalyzedFood, VisionAnalysis};
pub use store::{InMemoryStore, NutritionStore};
