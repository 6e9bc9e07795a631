// ABOUTME: Core types and constants for the MacroLens nutrition engine
// ABOUTME: Foundation crate with error handling, domain models, and nutrient constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

#![deny(unsafe_code)]

//! # `MacroLens` Core
//!
//! Foundation crate providing shared types and constants for the `MacroLens`
//! nutrition engine. Everything here is plain data plus validation; the
//! arithmetic lives in the main crate.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Nutrient codes, unit factors, and engine limits
//! - **models**: Body/goal profiles, nutrient profiles, food logs, weight entries

/// Unified error handling system with standard error codes
pub mod errors;

/// Nutrient codes, unit conversion factors and engine limits
pub mod constants;

/// Core data models (profiles, nutrients, food logs, weight entries)
pub mod models;
