// ABOUTME: Configuration error types for nutrition engine validation
// ABOUTME: Defines error variants for invalid ranges, splits, and environment overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

//! Configuration error types for nutrition engine validation.

use macrolens_core::errors::{AppError, ErrorCode};
use std::env;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Ordered values are out of order (e.g., activity multipliers)
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Environment variable access error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] env::VarError),

    /// Failed to parse an override value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Macro split fractions don't sum to 1.0
    #[error("Invalid weights: {0}")]
    InvalidWeights(&'static str),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::new(ErrorCode::ConfigInvalid, error.to_string()).with_source(error)
    }
}
