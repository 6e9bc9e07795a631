// ABOUTME: Daily calorie and macronutrient target calculation from body stats and goals
// ABOUTME: Mifflin-St Jeor BMR, activity TDEE, goal priority, calorie floor, and macro splits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

//! Macro Target Calculator
//!
//! Derives [`MacroTargets`] from a validated [`BodyProfile`] and
//! [`GoalProfile`]. The pipeline is:
//!
//! 1. BMR (Mifflin-St Jeor)
//! 2. TDEE = BMR x activity multiplier
//! 3. effective goal, by fixed priority
//! 4. calorie adjustment for that goal, floored
//! 5. macro split (keto, then blood sugar, then goal)
//! 6. gram targets from the unrounded calorie target
//!
//! Every step is exposed on its own. None of them fail: the typed profiles
//! already guarantee positive, finite inputs.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>

use crate::config::intelligence::{
    ActivityFactorsConfig, BmrConfig, GoalAdjustmentConfig, MacroSplit, MacroSplitConfig,
    NutritionConfig,
};
use macrolens_core::constants::energy::{KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};
use macrolens_core::models::{
    ActivityLevel, BodyProfile, DietaryPreference, GoalProfile, MacroTargets, PrimaryGoal,
};
use tracing::debug;

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation (1990)
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + offset,
/// where the offset is +5 for male and -161 for female and other.
#[must_use]
pub fn calculate_bmr(body: &BodyProfile, config: &BmrConfig) -> f64 {
    config.msj_weight_coef.mul_add(
        body.weight_kg(),
        config.msj_height_coef.mul_add(
            body.height_cm(),
            config
                .msj_age_coef
                .mul_add(f64::from(body.age()), config.constant_for(body.gender())),
        ),
    )
}

/// Calculate Total Daily Energy Expenditure: BMR x activity multiplier
#[must_use]
pub fn calculate_tdee(bmr: f64, activity_level: ActivityLevel, config: &ActivityFactorsConfig) -> f64 {
    bmr * config.multiplier_for(activity_level)
}

/// Pick the goal that drives the calorie adjustment
///
/// Priority: `control_diabetes` > `lose_weight` > `build_muscle` > `get_fit` >
/// `maintain`. Goal sets iterate in that order, so the first element wins.
#[must_use]
pub fn resolve_effective_goal(goals: &GoalProfile) -> PrimaryGoal {
    goals
        .primary_goals()
        .first()
        .copied()
        .unwrap_or(PrimaryGoal::Maintain)
}

/// Apply the goal's calorie adjustment to TDEE, never going below the floor
#[must_use]
pub fn adjust_calories_for_goal(tdee: f64, goal: PrimaryGoal, config: &GoalAdjustmentConfig) -> f64 {
    (tdee + config.adjustment_for(goal)).max(config.calorie_floor)
}

/// Select the macro split
///
/// A keto preference overrides everything. Otherwise diabetes, pre-diabetes
/// or a `control_diabetes` effective goal select the blood-sugar split.
/// Otherwise the effective goal decides.
#[must_use]
pub fn select_macro_split(
    goals: &GoalProfile,
    effective_goal: PrimaryGoal,
    config: &MacroSplitConfig,
) -> MacroSplit {
    if goals.prefers(DietaryPreference::Keto) {
        return config.keto;
    }

    let blood_sugar = goals
        .health_conditions()
        .iter()
        .any(|condition| condition.affects_blood_sugar());
    if blood_sugar || effective_goal == PrimaryGoal::ControlDiabetes {
        return config.blood_sugar;
    }

    config.for_goal(effective_goal)
}

/// Compute daily targets with the given configuration
#[must_use]
pub fn compute_targets(
    body: &BodyProfile,
    goals: &GoalProfile,
    config: &NutritionConfig,
) -> MacroTargets {
    let bmr = calculate_bmr(body, &config.bmr);
    let tdee = calculate_tdee(bmr, goals.activity_level(), &config.activity_factors);
    let effective_goal = resolve_effective_goal(goals);
    let calories = adjust_calories_for_goal(tdee, effective_goal, &config.goal_adjustments);
    let split = select_macro_split(goals, effective_goal, &config.macro_splits);

    let targets = MacroTargets {
        calories: calories.round() as u32,
        protein: (calories * split.protein / KCAL_PER_G_PROTEIN).round() as u32,
        carbs: (calories * split.carbs / KCAL_PER_G_CARBS).round() as u32,
        fat: (calories * split.fat / KCAL_PER_G_FAT).round() as u32,
        bmr: bmr.round() as i32,
        tdee: tdee.round() as i32,
    };

    debug!(
        bmr = targets.bmr,
        tdee = targets.tdee,
        effective_goal = %effective_goal,
        calories = targets.calories,
        protein = targets.protein,
        carbs = targets.carbs,
        fat = targets.fat,
        "Computed macro targets"
    );

    targets
}

/// Compute daily targets with the process-wide configuration
#[must_use]
pub fn compute_default_targets(body: &BodyProfile, goals: &GoalProfile) -> MacroTargets {
    compute_targets(body, goals, NutritionConfig::global())
}
