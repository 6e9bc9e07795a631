// ABOUTME: Sums nutrient profiles across food items and food logs
// ABOUTME: Missing optional nutrients count as zero; micronutrient maps merge key-wise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

use macrolens_core::models::{FoodItem, FoodLog, NutrientProfile};

/// Total nutrients across food items
///
/// Fiber, sugar and sodium are always present in the result.
#[must_use]
pub fn sum_nutrition(foods: &[FoodItem]) -> NutrientProfile {
    foods.iter().map(|food| &food.nutrition).sum()
}

/// Total nutrients across logs, from each log's stored totals
#[must_use]
pub fn sum_log_totals<'a>(logs: impl IntoIterator<Item = &'a FoodLog>) -> NutrientProfile {
    logs.into_iter().map(FoodLog::total_nutrition).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use macrolens_core::models::{LogType, MealType};
    use chrono::Utc;

    #[test]
    fn test_empty_sum_is_zero_with_optionals_present() {
        let total = sum_nutrition(&[]);
        assert!(total.calories.abs() < f64::EPSILON);
        assert_eq!(total.fiber, Some(0.0));
        assert_eq!(total.sodium, Some(0.0));
    }

    #[test]
    fn test_sum_log_totals() {
        let food = FoodItem::new("Toast", "1 slice", NutrientProfile::macros(80.0, 3.0, 14.0, 1.0));
        let logs = [
            FoodLog::new("u", Utc::now(), MealType::Breakfast, LogType::Photo, vec![food.clone()]),
            FoodLog::new("u", Utc::now(), MealType::Lunch, LogType::Photo, vec![food.clone(), food]),
        ];
        let total = sum_log_totals(&logs);
        assert!((total.calories - 240.0).abs() < 1e-9);
        assert!((total.carbs - 42.0).abs() < 1e-9);
    }
}
