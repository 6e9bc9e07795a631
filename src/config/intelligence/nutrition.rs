// ABOUTME: Nutrition configuration for daily target calculation and serving scaling
// ABOUTME: Configures BMR coefficients, activity multipliers, goal adjustments, and macro splits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

//! Nutrition Engine Configuration
//!
//! Every constant used by the target calculator and the serving scaler lives
//! here, with the published values as defaults.
//!
//! # Scientific References
//!
//! - BMR: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
//! - Activity factors: `McArdle`, Katch & Katch (2010), Exercise Physiology

use super::error::ConfigError;
use macrolens_core::constants::limits;
use macrolens_core::models::{ActivityLevel, Gender, PrimaryGoal};
use serde::{Deserialize, Serialize};
use std::env::{self, VarError};
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static NUTRITION_CONFIG: OnceLock<NutritionConfig> = OnceLock::new();

/// Tolerance when checking that a macro split sums to one
const SPLIT_SUM_TOLERANCE: f64 = 1e-6;

/// Nutrition Engine Configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// Basal Metabolic Rate (BMR) coefficients
    pub bmr: BmrConfig,
    /// Activity factor multipliers for TDEE calculation
    pub activity_factors: ActivityFactorsConfig,
    /// Calorie adjustment per effective goal
    pub goal_adjustments: GoalAdjustmentConfig,
    /// Macronutrient calorie fractions
    pub macro_splits: MacroSplitConfig,
    /// Serving scaler and normalizer precision
    pub scaling: ScalingConfig,
}

/// BMR (Basal Metabolic Rate) calculation configuration
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
/// American Journal of Clinical Nutrition, 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Mifflin-St Jeor weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Mifflin-St Jeor height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Mifflin-St Jeor age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Mifflin-St Jeor male constant (+5)
    pub msj_male_constant: f64,
    /// Mifflin-St Jeor female constant (-161)
    pub msj_female_constant: f64,
    /// Constant for gender "other" (-161, same as female)
    pub msj_other_constant: f64,
}

impl BmrConfig {
    /// Sex-specific constant for a gender
    #[must_use]
    pub const fn constant_for(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.msj_male_constant,
            Gender::Female => self.msj_female_constant,
            Gender::Other => self.msj_other_constant,
        }
    }
}

/// Activity factor multipliers for TDEE calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary (little/no exercise): 1.2
    pub sedentary: f64,
    /// Lightly active (1-3 days/week): 1.375
    pub light: f64,
    /// Moderately active (3-5 days/week): 1.55
    pub moderate: f64,
    /// Active (6-7 days/week): 1.725
    pub active: f64,
    /// Very active (hard training 2x/day): 1.9
    pub very_active: f64,
}

impl ActivityFactorsConfig {
    /// Multiplier for an activity level
    #[must_use]
    pub const fn multiplier_for(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::Light => self.light,
            ActivityLevel::Moderate => self.moderate,
            ActivityLevel::Active => self.active,
            ActivityLevel::VeryActive => self.very_active,
        }
    }
}

/// Daily calorie adjustment applied to TDEE for the effective goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalAdjustmentConfig {
    /// Deficit for weight loss (-500 kcal)
    pub lose_weight: f64,
    /// Surplus for muscle gain (+300 kcal)
    pub build_muscle: f64,
    /// Mild deficit for general fitness (-250 kcal)
    pub get_fit: f64,
    /// Deficit for glycemic control (-300 kcal)
    pub control_diabetes: f64,
    /// Maintenance (0 kcal)
    pub maintain: f64,
    /// Lowest calorie target ever emitted (1200 kcal)
    pub calorie_floor: f64,
}

impl GoalAdjustmentConfig {
    /// Adjustment for a goal
    #[must_use]
    pub const fn adjustment_for(&self, goal: PrimaryGoal) -> f64 {
        match goal {
            PrimaryGoal::LoseWeight => self.lose_weight,
            PrimaryGoal::BuildMuscle => self.build_muscle,
            PrimaryGoal::GetFit => self.get_fit,
            PrimaryGoal::ControlDiabetes => self.control_diabetes,
            PrimaryGoal::Maintain => self.maintain,
        }
    }
}

/// Fraction of calories from protein, carbohydrate and fat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    /// Protein fraction (0.0-1.0)
    pub protein: f64,
    /// Carbohydrate fraction (0.0-1.0)
    pub carbs: f64,
    /// Fat fraction (0.0-1.0)
    pub fat: f64,
}

impl MacroSplit {
    /// Create a split
    #[must_use]
    pub const fn new(protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            protein,
            carbs,
            fat,
        }
    }

    fn is_valid(&self) -> bool {
        let parts = [self.protein, self.carbs, self.fat];
        parts.iter().all(|part| (0.0..=1.0).contains(part))
            && (parts.iter().sum::<f64>() - 1.0).abs() < SPLIT_SUM_TOLERANCE
    }
}

/// Macro split table
///
/// Selection order: keto preference, then blood-sugar management, then the
/// effective goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroSplitConfig {
    /// Ketogenic preference (25/5/70)
    pub keto: MacroSplit,
    /// Diabetes, pre-diabetes, or glycemic-control goal (30/35/35)
    pub blood_sugar: MacroSplit,
    /// Weight loss (35/35/30)
    pub lose_weight: MacroSplit,
    /// Muscle gain (30/45/25)
    pub build_muscle: MacroSplit,
    /// General fitness (30/40/30)
    pub get_fit: MacroSplit,
    /// Maintenance (30/40/30)
    pub maintain: MacroSplit,
}

impl MacroSplitConfig {
    /// Goal-driven split, ignoring preference and condition overrides
    #[must_use]
    pub const fn for_goal(&self, goal: PrimaryGoal) -> MacroSplit {
        match goal {
            PrimaryGoal::ControlDiabetes => self.blood_sugar,
            PrimaryGoal::LoseWeight => self.lose_weight,
            PrimaryGoal::BuildMuscle => self.build_muscle,
            PrimaryGoal::GetFit => self.get_fit,
            PrimaryGoal::Maintain => self.maintain,
        }
    }

    /// Validate that every split sums to 1.0
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidWeights` naming the first invalid split.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let splits = [
            (&self.keto, "keto macro split must sum to 1.0"),
            (&self.blood_sugar, "blood_sugar macro split must sum to 1.0"),
            (&self.lose_weight, "lose_weight macro split must sum to 1.0"),
            (&self.build_muscle, "build_muscle macro split must sum to 1.0"),
            (&self.get_fit, "get_fit macro split must sum to 1.0"),
            (&self.maintain, "maintain macro split must sum to 1.0"),
        ];

        for (split, message) in splits {
            if !split.is_valid() {
                return Err(ConfigError::InvalidWeights(message));
            }
        }
        Ok(())
    }
}

/// Serving scaler and normalizer precision settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingConfig {
    /// Floor for a scaling base amount (0.01)
    pub min_base_amount: f64,
    /// Decimal places kept when scaling a serving (2)
    pub scale_decimals: i32,
    /// Decimal places kept when normalizing a database record (1)
    pub normalize_decimals: i32,
    /// Label servings within this many grams of 100 g skip conversion (0.5)
    pub reference_tolerance_grams: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
            msj_other_constant: -161.0,
        }
    }
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            light: 1.375,
            moderate: 1.55,
            active: 1.725,
            very_active: 1.9,
        }
    }
}

impl Default for GoalAdjustmentConfig {
    fn default() -> Self {
        Self {
            lose_weight: -500.0,
            build_muscle: 300.0,
            get_fit: -250.0,
            control_diabetes: -300.0,
            maintain: 0.0,
            calorie_floor: 1200.0,
        }
    }
}

impl Default for MacroSplitConfig {
    fn default() -> Self {
        Self {
            keto: MacroSplit::new(0.25, 0.05, 0.70),
            blood_sugar: MacroSplit::new(0.30, 0.35, 0.35),
            lose_weight: MacroSplit::new(0.35, 0.35, 0.30),
            build_muscle: MacroSplit::new(0.30, 0.45, 0.25),
            get_fit: MacroSplit::new(0.30, 0.40, 0.30),
            maintain: MacroSplit::new(0.30, 0.40, 0.30),
        }
    }
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            min_base_amount: limits::MIN_BASE_AMOUNT,
            scale_decimals: limits::SCALE_DECIMALS,
            normalize_decimals: limits::NORMALIZE_DECIMALS,
            reference_tolerance_grams: limits::REFERENCE_TOLERANCE_GRAMS,
        }
    }
}

impl NutritionConfig {
    /// Get the global configuration instance
    #[must_use]
    pub fn global() -> &'static Self {
        NUTRITION_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load nutrition config: {e}, using defaults");
                Self::default()
            })
        })
    }

    /// Load configuration from defaults plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if multipliers are out of order, a split does not sum
    /// to 1.0, or a floor or precision setting is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let factors = &self.activity_factors;
        if factors.sedentary <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "sedentary activity factor must be positive",
            ));
        }
        if factors.sedentary >= factors.light
            || factors.light >= factors.moderate
            || factors.moderate >= factors.active
            || factors.active >= factors.very_active
        {
            return Err(ConfigError::InvalidRange(
                "Activity factors must be in ascending order",
            ));
        }

        if self.goal_adjustments.calorie_floor <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "calorie_floor must be positive",
            ));
        }

        self.macro_splits.validate()?;

        let scaling = &self.scaling;
        if scaling.min_base_amount <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "min_base_amount must be positive",
            ));
        }
        if !(0..=6).contains(&scaling.scale_decimals)
            || !(0..=6).contains(&scaling.normalize_decimals)
        {
            return Err(ConfigError::ValueOutOfRange(
                "decimal places must be between 0 and 6",
            ));
        }
        if scaling.reference_tolerance_grams < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "reference_tolerance_grams must not be negative",
            ));
        }

        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    ///
    /// An unset variable leaves `target` unchanged; a value that is not
    /// valid Unicode is an error.
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        let val = match env::var(env_var_name) {
            Ok(val) => val,
            Err(VarError::NotPresent) => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        *target = val
            .trim()
            .parse()
            .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // BMR
        Self::apply_env_var("MACROLENS_BMR_MALE_CONSTANT", &mut self.bmr.msj_male_constant)?;
        Self::apply_env_var(
            "MACROLENS_BMR_FEMALE_CONSTANT",
            &mut self.bmr.msj_female_constant,
        )?;
        Self::apply_env_var(
            "MACROLENS_BMR_OTHER_CONSTANT",
            &mut self.bmr.msj_other_constant,
        )?;

        // Activity
        let factors = &mut self.activity_factors;
        Self::apply_env_var("MACROLENS_ACTIVITY_SEDENTARY", &mut factors.sedentary)?;
        Self::apply_env_var("MACROLENS_ACTIVITY_LIGHT", &mut factors.light)?;
        Self::apply_env_var("MACROLENS_ACTIVITY_MODERATE", &mut factors.moderate)?;
        Self::apply_env_var("MACROLENS_ACTIVITY_ACTIVE", &mut factors.active)?;
        Self::apply_env_var("MACROLENS_ACTIVITY_VERY_ACTIVE", &mut factors.very_active)?;

        // Goals
        let goals = &mut self.goal_adjustments;
        Self::apply_env_var("MACROLENS_ADJUST_LOSE_WEIGHT", &mut goals.lose_weight)?;
        Self::apply_env_var("MACROLENS_ADJUST_BUILD_MUSCLE", &mut goals.build_muscle)?;
        Self::apply_env_var("MACROLENS_ADJUST_GET_FIT", &mut goals.get_fit)?;
        Self::apply_env_var(
            "MACROLENS_ADJUST_CONTROL_DIABETES",
            &mut goals.control_diabetes,
        )?;
        Self::apply_env_var("MACROLENS_CALORIE_FLOOR", &mut goals.calorie_floor)?;

        // Scaling
        let scaling = &mut self.scaling;
        Self::apply_env_var("MACROLENS_MIN_BASE_AMOUNT", &mut scaling.min_base_amount)?;
        Self::apply_env_var("MACROLENS_SCALE_DECIMALS", &mut scaling.scale_decimals)?;
        Self::apply_env_var(
            "MACROLENS_NORMALIZE_DECIMALS",
            &mut scaling.normalize_decimals,
        )?;

        Ok(self)
    }
}
