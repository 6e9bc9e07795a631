// ABOUTME: Body and goal profile models used as calculator input
// ABOUTME: Validated constructors enforce positive body stats and a non-empty goal set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

use crate::constants::energy::{KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Gender as collected during onboarding
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male (uses the +5 BMR offset)
    Male,
    /// Female (uses the -161 BMR offset)
    Female,
    /// Other or undisclosed (shares the female BMR offset)
    Other,
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise or physical job
    VeryActive,
}

/// Primary goal selected during onboarding
///
/// Declaration order is the resolution priority: when several goals are
/// selected, the first one in this order drives the calorie adjustment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryGoal {
    /// Manage blood sugar
    ControlDiabetes,
    /// Caloric deficit
    LoseWeight,
    /// Caloric surplus
    BuildMuscle,
    /// Mild deficit
    GetFit,
    /// Caloric balance
    Maintain,
}

/// Health condition that may change the macro split
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum HealthCondition {
    /// Diagnosed diabetes
    Diabetes,
    /// Pre-diabetes
    PreDiabetic,
    /// High blood pressure
    HighBp,
    /// High cholesterol
    HighCholesterol,
    /// Polycystic ovary syndrome
    Pcos,
    /// Thyroid condition
    Thyroid,
    /// Heart disease
    HeartDisease,
    /// No condition reported
    None,
}

impl HealthCondition {
    /// Whether the condition calls for the blood-sugar macro split
    #[must_use]
    pub const fn affects_blood_sugar(self) -> bool {
        matches!(self, Self::Diabetes | Self::PreDiabetic)
    }
}

/// Dietary preference; only `Keto` changes the macro split
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DietaryPreference {
    /// No meat
    Vegetarian,
    /// No animal products
    Vegan,
    /// No gluten
    GlutenFree,
    /// No dairy
    DairyFree,
    /// Very low carbohydrate
    Keto,
    /// Paleolithic diet
    Paleo,
    /// Halal
    Halal,
    /// No preference
    None,
}

macro_rules! impl_wire_name {
    ($ty:ty { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Wire name used in stored documents
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($name => Ok(Self::$variant),)+
                    other => Err(AppError::invalid_input(format!(
                        "Unknown {} '{other}'",
                        stringify!($ty)
                    ))),
                }
            }
        }
    };
}

impl_wire_name!(Gender {
    Male => "male",
    Female => "female",
    Other => "other",
});

impl_wire_name!(ActivityLevel {
    Sedentary => "sedentary",
    Light => "light",
    Moderate => "moderate",
    Active => "active",
    VeryActive => "veryActive",
});

impl_wire_name!(PrimaryGoal {
    ControlDiabetes => "control_diabetes",
    LoseWeight => "lose_weight",
    BuildMuscle => "build_muscle",
    GetFit => "get_fit",
    Maintain => "maintain",
});

impl_wire_name!(HealthCondition {
    Diabetes => "diabetes",
    PreDiabetic => "pre_diabetic",
    HighBp => "high_bp",
    HighCholesterol => "high_cholesterol",
    Pcos => "pcos",
    Thyroid => "thyroid",
    HeartDisease => "heart_disease",
    None => "none",
});

impl_wire_name!(DietaryPreference {
    Vegetarian => "vegetarian",
    Vegan => "vegan",
    GlutenFree => "gluten_free",
    DairyFree => "dairy_free",
    Keto => "keto",
    Paleo => "paleo",
    Halal => "halal",
    None => "none",
});

/// Wire shape of a body profile before validation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BodyProfileFields {
    gender: Gender,
    age: u32,
    height_cm: f64,
    weight_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_weight_kg: Option<f64>,
}

/// Body statistics for BMR calculation
///
/// Only constructible through [`BodyProfile::new`] (or deserialization, which
/// runs the same checks), so every instance has a positive age, height and
/// weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BodyProfileFields", into = "BodyProfileFields")]
pub struct BodyProfile {
    gender: Gender,
    age: u32,
    height_cm: f64,
    weight_kg: f64,
    target_weight_kg: Option<f64>,
}

fn require_positive(field: &str, value: f64) -> AppResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(AppError::out_of_range(format!(
            "{field} must be a positive number, got {value}"
        )))
    }
}

impl BodyProfile {
    /// Create a validated body profile
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` if age is zero, or if height, weight or the
    /// optional target weight is not a finite positive number
    pub fn new(
        gender: Gender,
        age: u32,
        height_cm: f64,
        weight_kg: f64,
        target_weight_kg: Option<f64>,
    ) -> AppResult<Self> {
        if age == 0 {
            return Err(AppError::out_of_range("age must be at least 1 year"));
        }
        let height_cm = require_positive("height_cm", height_cm)?;
        let weight_kg = require_positive("weight_kg", weight_kg)?;
        let target_weight_kg = target_weight_kg
            .map(|target| require_positive("target_weight_kg", target))
            .transpose()?;

        Ok(Self {
            gender,
            age,
            height_cm,
            weight_kg,
            target_weight_kg,
        })
    }

    /// Gender
    #[must_use]
    pub const fn gender(&self) -> Gender {
        self.gender
    }

    /// Age in years
    #[must_use]
    pub const fn age(&self) -> u32 {
        self.age
    }

    /// Height in centimeters
    #[must_use]
    pub const fn height_cm(&self) -> f64 {
        self.height_cm
    }

    /// Weight in kilograms
    #[must_use]
    pub const fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Target weight in kilograms, if set
    #[must_use]
    pub const fn target_weight_kg(&self) -> Option<f64> {
        self.target_weight_kg
    }
}

impl TryFrom<BodyProfileFields> for BodyProfile {
    type Error = AppError;

    fn try_from(fields: BodyProfileFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.gender,
            fields.age,
            fields.height_cm,
            fields.weight_kg,
            fields.target_weight_kg,
        )
    }
}

impl From<BodyProfile> for BodyProfileFields {
    fn from(profile: BodyProfile) -> Self {
        Self {
            gender: profile.gender,
            age: profile.age,
            height_cm: profile.height_cm,
            weight_kg: profile.weight_kg,
            target_weight_kg: profile.target_weight_kg,
        }
    }
}

/// Wire shape of a goal profile before validation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoalProfileFields {
    activity_level: ActivityLevel,
    primary_goals: Vec<PrimaryGoal>,
    #[serde(default)]
    health_conditions: Vec<HealthCondition>,
    #[serde(default)]
    dietary_preferences: Vec<DietaryPreference>,
}

/// Lifestyle, goals and constraints for target calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GoalProfileFields", into = "GoalProfileFields")]
pub struct GoalProfile {
    activity_level: ActivityLevel,
    primary_goals: BTreeSet<PrimaryGoal>,
    health_conditions: BTreeSet<HealthCondition>,
    dietary_preferences: BTreeSet<DietaryPreference>,
}

impl GoalProfile {
    /// Create a validated goal profile
    ///
    /// Duplicates are collapsed; the order goals were selected in is not
    /// preserved because it never influences the result.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` if no primary goal is given
    pub fn new(
        activity_level: ActivityLevel,
        primary_goals: impl IntoIterator<Item = PrimaryGoal>,
        health_conditions: impl IntoIterator<Item = HealthCondition>,
        dietary_preferences: impl IntoIterator<Item = DietaryPreference>,
    ) -> AppResult<Self> {
        let primary_goals: BTreeSet<_> = primary_goals.into_iter().collect();
        if primary_goals.is_empty() {
            return Err(AppError::missing_field("At least one primary goal"));
        }

        Ok(Self {
            activity_level,
            primary_goals,
            health_conditions: health_conditions.into_iter().collect(),
            dietary_preferences: dietary_preferences.into_iter().collect(),
        })
    }

    /// Activity level
    #[must_use]
    pub const fn activity_level(&self) -> ActivityLevel {
        self.activity_level
    }

    /// Selected goals, ordered by resolution priority
    #[must_use]
    pub const fn primary_goals(&self) -> &BTreeSet<PrimaryGoal> {
        &self.primary_goals
    }

    /// Reported health conditions
    #[must_use]
    pub const fn health_conditions(&self) -> &BTreeSet<HealthCondition> {
        &self.health_conditions
    }

    /// Dietary preferences
    #[must_use]
    pub const fn dietary_preferences(&self) -> &BTreeSet<DietaryPreference> {
        &self.dietary_preferences
    }

    /// Whether the goal set contains `goal`
    #[must_use]
    pub fn has_goal(&self, goal: PrimaryGoal) -> bool {
        self.primary_goals.contains(&goal)
    }

    /// Whether the condition set contains `condition`
    #[must_use]
    pub fn has_condition(&self, condition: HealthCondition) -> bool {
        self.health_conditions.contains(&condition)
    }

    /// Whether the preference set contains `preference`
    #[must_use]
    pub fn prefers(&self, preference: DietaryPreference) -> bool {
        self.dietary_preferences.contains(&preference)
    }

    /// Copy of this profile with a different activity level
    #[must_use]
    pub fn with_activity_level(mut self, activity_level: ActivityLevel) -> Self {
        self.activity_level = activity_level;
        self
    }
}

impl TryFrom<GoalProfileFields> for GoalProfile {
    type Error = AppError;

    fn try_from(fields: GoalProfileFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.activity_level,
            fields.primary_goals,
            fields.health_conditions,
            fields.dietary_preferences,
        )
    }
}

impl From<GoalProfile> for GoalProfileFields {
    fn from(profile: GoalProfile) -> Self {
        Self {
            activity_level: profile.activity_level,
            primary_goals: profile.primary_goals.into_iter().collect(),
            health_conditions: profile.health_conditions.into_iter().collect(),
            dietary_preferences: profile.dietary_preferences.into_iter().collect(),
        }
    }
}

/// Daily calorie and macro goals shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyGoals {
    /// Calories (kcal)
    pub calories: u32,
    /// Protein (g)
    pub protein: u32,
    /// Carbohydrates (g)
    pub carbs: u32,
    /// Fat (g)
    pub fat: u32,
}

impl Default for DailyGoals {
    fn default() -> Self {
        Self {
            calories: 2200,
            protein: 140,
            carbs: 250,
            fat: 70,
        }
    }
}

/// Calculated daily targets
///
/// Always recomputed wholesale; a new value replaces the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    /// Target calories (kcal/day), never below the calorie floor
    pub calories: u32,
    /// Protein (g/day)
    pub protein: u32,
    /// Carbohydrates (g/day)
    pub carbs: u32,
    /// Fat (g/day)
    pub fat: u32,
    /// Basal metabolic rate (kcal/day)
    pub bmr: i32,
    /// Total daily energy expenditure (kcal/day)
    pub tdee: i32,
}

impl MacroTargets {
    /// Calories implied by the gram targets (4/4/9 kcal per gram)
    #[must_use]
    pub fn macro_calories(&self) -> f64 {
        f64::from(self.fat).mul_add(
            KCAL_PER_G_FAT,
            f64::from(self.protein).mul_add(KCAL_PER_G_PROTEIN, f64::from(self.carbs) * KCAL_PER_G_CARBS),
        )
    }

    /// The subset stored on the user profile
    #[must_use]
    pub const fn daily_goals(&self) -> DailyGoals {
        DailyGoals {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
        }
    }
}
