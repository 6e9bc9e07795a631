// ABOUTME: Body weight log entries recorded manually or during onboarding
// ABOUTME: WeightEntry and WeightSource definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a weight entry came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeightSource {
    /// Entered on the progress screen
    #[default]
    Manual,
    /// Captured by the onboarding questionnaire
    Onboarding,
}

/// A single body weight measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightEntry {
    /// Opaque record id
    pub id: String,
    /// Owning user id
    pub user_id: String,
    /// Measurement time
    pub date: DateTime<Utc>,
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Origin of the measurement
    #[serde(default)]
    pub source: WeightSource,
}

impl WeightEntry {
    /// Create an entry with a fresh id
    ///
    /// # Errors
    ///
    /// Returns an error if `weight_kg` is not finite and positive.
    pub fn new(
        user_id: impl Into<String>,
        date: DateTime<Utc>,
        weight_kg: f64,
        source: WeightSource,
    ) -> AppResult<Self> {
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(AppError::out_of_range(format!(
                "weight_kg must be positive, got {weight_kg}"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            date,
            weight_kg,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_weight() {
        assert!(WeightEntry::new("u", Utc::now(), 0.0, WeightSource::Manual).is_err());
        assert!(WeightEntry::new("u", Utc::now(), f64::INFINITY, WeightSource::Manual).is_err());
    }

    #[test]
    fn test_source_defaults_to_manual() {
        let json = serde_json::json!({
            "id": "w1",
            "userId": "u",
            "date": "2025-03-01T08:00:00Z",
            "weightKg": 81.5
        });
        let entry: WeightEntry = serde_json::from_value(json).unwrap();
        assert_eq!(entry.source, WeightSource::Manual);
    }
}
