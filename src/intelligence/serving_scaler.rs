// ABOUTME: Serving-size rescaling of nutrient profiles during meal editing
// ABOUTME: Scaling factor, per-field rounding, scaling bases, and the edit session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

//! Serving Scaler
//!
//! When a user changes "150g" to "200g" the nutrients must follow. Scaling
//! always starts from the [`ScalingBase`] captured when editing began, never
//! from the currently displayed (already rounded) values, so repeated edits
//! do not accumulate rounding drift.

use crate::config::intelligence::NutritionConfig;
use crate::intelligence::aggregation::sum_nutrition;
use crate::intelligence::nutrient_normalizer::NormalizedFood;
use macrolens_core::constants::limits::REFERENCE_GRAMS;
use macrolens_core::errors::{AppError, AppResult};
use macrolens_core::models::{FoodItem, NutrientProfile};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// First decimal number in a quantity string, e.g. "1.5 cups" -> 1.5
static QUANTITY_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\d+(\.\d+)?").ok());

/// Round to a fixed number of decimal places
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}

/// Extract the first decimal number from free-text quantity, or 0 when there is none
#[must_use]
pub fn parse_quantity_amount(text: &str) -> f64 {
    QUANTITY_PATTERN
        .as_ref()
        .and_then(|pattern| pattern.find(text))
        .and_then(|found| found.as_str().parse::<f64>().ok())
        .filter(|amount| amount.is_finite())
        .unwrap_or(0.0)
}

/// Ratio between a new quantity and the base quantity
///
/// The base is floored at the configured minimum (0.01) so a zero base never
/// divides by zero.
#[must_use]
pub fn scaling_factor(new_amount: f64, base_amount: f64) -> f64 {
    let min_base = NutritionConfig::global().scaling.min_base_amount;
    new_amount / base_amount.max(min_base)
}

/// Multiply every field by `factor`, rounding each result independently
#[must_use]
pub fn scale_nutrition(base: &NutrientProfile, factor: f64) -> NutrientProfile {
    let decimals = NutritionConfig::global().scaling.scale_decimals;
    scale_nutrition_with_precision(base, factor, decimals)
}

/// [`scale_nutrition`] with an explicit number of decimal places
#[must_use]
pub fn scale_nutrition_with_precision(
    base: &NutrientProfile,
    factor: f64,
    decimals: i32,
) -> NutrientProfile {
    base.map_values(|value| round_to(value * factor, decimals))
}

/// Quantity and nutrients a food's edits are scaled from
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingBase {
    base_amount: f64,
    base_nutrition: NutrientProfile,
}

impl ScalingBase {
    /// Base for an explicit amount, floored at the configured minimum
    #[must_use]
    pub fn new(base_amount: f64, base_nutrition: NutrientProfile) -> Self {
        let min_base = NutritionConfig::global().scaling.min_base_amount;
        let base_amount = if base_amount.is_finite() {
            base_amount.max(min_base)
        } else {
            min_base
        };
        Self {
            base_amount,
            base_nutrition,
        }
    }

    /// Capture a food as loaded; a serving with no number counts as one unit
    #[must_use]
    pub fn from_food(item: &FoodItem) -> Self {
        let parsed = parse_quantity_amount(&item.serving_size);
        let amount = if parsed > 0.0 { parsed } else { 1.0 };
        Self::new(amount, item.nutrition.clone())
    }

    /// Quantity the base nutrients describe
    #[must_use]
    pub const fn base_amount(&self) -> f64 {
        self.base_amount
    }

    /// Nutrients at the base quantity
    #[must_use]
    pub const fn base_nutrition(&self) -> &NutrientProfile {
        &self.base_nutrition
    }

    /// Nutrients for a new quantity, or `None` when the text has no positive number
    #[must_use]
    pub fn rescale(&self, quantity_text: &str) -> Option<NutrientProfile> {
        let amount = parse_quantity_amount(quantity_text);
        if amount <= 0.0 {
            return None;
        }
        let factor = scaling_factor(amount, self.base_amount);
        Some(scale_nutrition(&self.base_nutrition, factor))
    }
}

/// A food being edited together with the base it rescales from
#[derive(Debug, Clone, PartialEq)]
struct EditableFood {
    item: FoodItem,
    base: ScalingBase,
}

/// Edit session over the foods of one meal
///
/// Created from an analysis result or an existing log, mutated by quantity
/// edits and database substitutions, and consumed by [`ServingEditor::finish`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServingEditor {
    foods: Vec<EditableFood>,
}

impl ServingEditor {
    /// Start a session, capturing a scaling base for each food
    #[must_use]
    pub fn new(foods: Vec<FoodItem>) -> Self {
        let foods = foods
            .into_iter()
            .map(|item| EditableFood {
                base: ScalingBase::from_food(&item),
                item,
            })
            .collect();
        Self { foods }
    }

    /// Number of foods in the session
    #[must_use]
    pub fn len(&self) -> usize {
        self.foods.len()
    }

    /// Whether the session has no foods
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    /// Current foods in display order
    pub fn items(&self) -> impl Iterator<Item = &FoodItem> {
        self.foods.iter().map(|food| &food.item)
    }

    /// Food at `index`
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&FoodItem> {
        self.foods.get(index).map(|food| &food.item)
    }

    /// Scaling base at `index`
    #[must_use]
    pub fn base(&self, index: usize) -> Option<&ScalingBase> {
        self.foods.get(index).map(|food| &food.base)
    }

    /// Running total across all foods
    #[must_use]
    pub fn total(&self) -> NutrientProfile {
        let items: Vec<FoodItem> = self.items().cloned().collect();
        sum_nutrition(&items)
    }

    fn entry_mut(&mut self, index: usize) -> AppResult<&mut EditableFood> {
        let len = self.foods.len();
        self.foods.get_mut(index).ok_or_else(|| {
            AppError::out_of_range(format!("food index {index} out of range for {len} foods"))
        })
    }

    /// Change a food's quantity text
    ///
    /// The text is always stored. Nutrients are rescaled from the base only
    /// when the text contains a positive number. Returns whether a rescale
    /// happened.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn set_quantity(&mut self, index: usize, quantity_text: &str) -> AppResult<bool> {
        let entry = self.entry_mut(index)?;
        entry.item.serving_size = quantity_text.to_owned();

        match entry.base.rescale(quantity_text) {
            Some(nutrition) => {
                entry.item.nutrition = nutrition;
                Ok(true)
            }
            None => {
                debug!(index, quantity_text, "Quantity has no positive amount, keeping nutrients");
                Ok(false)
            }
        }
    }

    /// Replace a food with a normalized database food at its reference serving
    ///
    /// The per-100 g nutrients become the new base, so later quantity edits
    /// scale from the database values.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn apply_food_record(&mut self, index: usize, food: &NormalizedFood) -> AppResult<()> {
        let entry = self.entry_mut(index)?;
        let serving_text = food.serving_text();
        let parsed = parse_quantity_amount(&serving_text);
        let amount = if parsed > 0.0 { parsed } else { REFERENCE_GRAMS };

        let base = ScalingBase::new(REFERENCE_GRAMS, food.nutrition.clone());
        entry.item = FoodItem::new(
            food.name.clone(),
            serving_text,
            scale_nutrition(base.base_nutrition(), scaling_factor(amount, REFERENCE_GRAMS)),
        );
        entry.base = base;
        Ok(())
    }

    /// Append a blank food with a one-unit base
    pub fn add_empty_food(&mut self) -> usize {
        let item = FoodItem::default();
        self.foods.push(EditableFood {
            base: ScalingBase::new(1.0, item.nutrition.clone()),
            item,
        });
        self.foods.len() - 1
    }

    /// Remove and return the food at `index`
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn remove_food(&mut self, index: usize) -> AppResult<FoodItem> {
        self.entry_mut(index)?;
        Ok(self.foods.remove(index).item)
    }

    /// End the session and return the edited foods
    #[must_use]
    pub fn finish(self) -> Vec<FoodItem> {
        self.foods.into_iter().map(|food| food.item).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity_amount() {
        assert!((parse_quantity_amount("150g") - 150.0).abs() < f64::EPSILON);
        assert!((parse_quantity_amount("about 1.5 cups") - 1.5).abs() < f64::EPSILON);
        assert!(parse_quantity_amount("a handful").abs() < f64::EPSILON);
        assert!(parse_quantity_amount("").abs() < f64::EPSILON);
    }

    #[test]
    fn test_round_to() {
        assert!((round_to(1.234_567, 2) - 1.23).abs() < 1e-12);
        assert!((round_to(321.06, 1) - 321.1).abs() < 1e-12);
    }

    #[test]
    fn test_scaling_factor_floors_base() {
        assert!((scaling_factor(1.0, 0.0) - 100.0).abs() < 1e-9);
        assert!((scaling_factor(200.0, 100.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_base_from_food_without_number() {
        let item = FoodItem::new("Soup", "a bowl", NutrientProfile::macros(120.0, 4.0, 15.0, 5.0));
        let base = ScalingBase::from_food(&item);
        assert!((base.base_amount() - 1.0).abs() < f64::EPSILON);
    }
}
