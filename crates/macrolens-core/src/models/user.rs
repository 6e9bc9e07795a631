// ABOUTME: User profile document with daily goals and onboarding answers
// ABOUTME: UserProfile and OnboardingData definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

use super::profile::{BodyProfile, DailyGoals, GoalProfile, MacroTargets};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Answers captured by onboarding plus the targets computed from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingData {
    /// Body measurements
    pub body: BodyProfile,
    /// Goals, conditions and preferences
    pub goals: GoalProfile,
    /// Targets computed at completion
    pub targets: MacroTargets,
    /// When onboarding finished
    pub completed_at: DateTime<Utc>,
}

/// Per-user profile document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Opaque user id
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Daily targets shown on the dashboard
    #[serde(default)]
    pub daily_goals: DailyGoals,
    /// Onboarding answers, absent until completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding: Option<OnboardingData>,
}

impl UserProfile {
    /// New profile with default daily goals
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            daily_goals: DailyGoals::default(),
            onboarding: None,
        }
    }

    /// Record completed onboarding and adopt its targets as daily goals
    pub fn complete_onboarding(&mut self, onboarding: OnboardingData) {
        self.daily_goals = onboarding.targets.daily_goals();
        self.onboarding = Some(onboarding);
    }

    /// Starting weight from onboarding, if any
    #[must_use]
    pub fn onboarding_weight_kg(&self) -> Option<f64> {
        self.onboarding.as_ref().map(|data| data.body.weight_kg())
    }

    /// Target weight from onboarding, if any
    #[must_use]
    pub fn target_weight_kg(&self) -> Option<f64> {
        self.onboarding
            .as_ref()
            .and_then(|data| data.body.target_weight_kg())
    }
}
