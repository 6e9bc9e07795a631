// ABOUTME: Nutrition tracking models for food intake analysis
// ABOUTME: NutrientProfile, FoodItem, FoodLog, MealType, and LogType definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

use crate::errors::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::AddAssign;
use std::str::FromStr;
use uuid::Uuid;

/// Named micronutrient amounts (vitamins or minerals)
pub type MicronutrientMap = BTreeMap<String, f64>;

/// Nutrients for one serving of a food, or a sum of servings
///
/// The serving this profile describes is tracked by the owner (see
/// `FoodItem::serving_size`); the profile itself carries no quantity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (g)
    pub protein: f64,
    /// Carbohydrates (g)
    pub carbs: f64,
    /// Fat (g)
    pub fat: f64,
    /// Fiber (g)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    /// Sugar (g)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugar: Option<f64>,
    /// Sodium (mg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
    /// Vitamins by name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamins: Option<MicronutrientMap>,
    /// Minerals by name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minerals: Option<MicronutrientMap>,
}

impl NutrientProfile {
    /// Profile with only the four required macros set
    #[must_use]
    pub fn macros(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
            ..Self::default()
        }
    }

    /// Fiber, treating a missing value as zero
    #[must_use]
    pub fn fiber_or_zero(&self) -> f64 {
        self.fiber.unwrap_or(0.0)
    }

    /// Sugar, treating a missing value as zero
    #[must_use]
    pub fn sugar_or_zero(&self) -> f64 {
        self.sugar.unwrap_or(0.0)
    }

    /// Sodium, treating a missing value as zero
    #[must_use]
    pub fn sodium_or_zero(&self) -> f64 {
        self.sodium.unwrap_or(0.0)
    }

    /// Mineral amount by key, zero when missing
    #[must_use]
    pub fn mineral(&self, key: &str) -> f64 {
        self.minerals
            .as_ref()
            .and_then(|map| map.get(key).copied())
            .unwrap_or(0.0)
    }

    /// Vitamin amount by key, zero when missing
    #[must_use]
    pub fn vitamin(&self, key: &str) -> f64 {
        self.vitamins
            .as_ref()
            .and_then(|map| map.get(key).copied())
            .unwrap_or(0.0)
    }

    /// Apply `f` to every numeric field, keeping optional fields' presence
    #[must_use]
    pub fn map_values(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        let mut map_micros = |micros: &Option<MicronutrientMap>| {
            micros.as_ref().map(|map| {
                map.iter()
                    .map(|(key, value)| (key.clone(), f(*value)))
                    .collect::<MicronutrientMap>()
            })
        };
        let vitamins = map_micros(&self.vitamins);
        let minerals = map_micros(&self.minerals);

        Self {
            calories: f(self.calories),
            protein: f(self.protein),
            carbs: f(self.carbs),
            fat: f(self.fat),
            fiber: self.fiber.map(&mut f),
            sugar: self.sugar.map(&mut f),
            sodium: self.sodium.map(&mut f),
            vitamins,
            minerals,
        }
    }

    /// Whether every numeric field is finite and non-negative
    #[must_use]
    pub fn is_non_negative(&self) -> bool {
        let micros = [&self.vitamins, &self.minerals]
            .into_iter()
            .flatten()
            .flat_map(MicronutrientMap::values)
            .copied();

        [self.calories, self.protein, self.carbs, self.fat]
            .into_iter()
            .chain([self.fiber, self.sugar, self.sodium].into_iter().flatten())
            .chain(micros)
            .all(|value| value.is_finite() && value >= 0.0)
    }

    /// Copy with negative or non-finite values replaced by zero
    #[must_use]
    pub fn clamped_non_negative(&self) -> Self {
        self.map_values(|value| if value.is_finite() && value > 0.0 { value } else { 0.0 })
    }
}

fn merge_micros(target: &mut Option<MicronutrientMap>, other: Option<&MicronutrientMap>) {
    let Some(other) = other else {
        return;
    };
    let map = target.get_or_insert_with(MicronutrientMap::new);
    for (key, value) in other {
        *map.entry(key.clone()).or_insert(0.0) += value;
    }
}

/// Summation treats missing optionals as zero; fiber, sugar and sodium are
/// always present in the result
impl AddAssign<&NutrientProfile> for NutrientProfile {
    fn add_assign(&mut self, other: &NutrientProfile) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.carbs += other.carbs;
        self.fat += other.fat;
        self.fiber = Some(self.fiber_or_zero() + other.fiber_or_zero());
        self.sugar = Some(self.sugar_or_zero() + other.sugar_or_zero());
        self.sodium = Some(self.sodium_or_zero() + other.sodium_or_zero());
        merge_micros(&mut self.vitamins, other.vitamins.as_ref());
        merge_micros(&mut self.minerals, other.minerals.as_ref());
    }
}

impl<'a> Sum<&'a NutrientProfile> for NutrientProfile {
    fn sum<I: Iterator<Item = &'a NutrientProfile>>(iter: I) -> Self {
        let mut total = Self {
            fiber: Some(0.0),
            sugar: Some(0.0),
            sodium: Some(0.0),
            ..Self::default()
        };
        for profile in iter {
            total += profile;
        }
        total
    }
}

/// One food within a logged meal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    /// Display name
    pub name: String,
    /// Free-text quantity and unit, e.g. "150g" or "1 cup"
    pub serving_size: String,
    /// Nutrients for `serving_size`
    pub nutrition: NutrientProfile,
}

impl FoodItem {
    /// Create a food item
    #[must_use]
    pub fn new(name: impl Into<String>, serving_size: impl Into<String>, nutrition: NutrientProfile) -> Self {
        Self {
            name: name.into(),
            serving_size: serving_size.into(),
            nutrition,
        }
    }
}

/// Meal slot a log belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
}

impl MealType {
    /// Every slot in day order
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snack];
}

impl FromStr for MealType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snack" | "snacks" => Ok(Self::Snack),
            other => Err(AppError::invalid_input(format!("Unknown meal type '{other}'"))),
        }
    }
}

/// How a log was created
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LogType {
    /// Confirmed from a photo analysis
    Photo,
    /// Built from food-database search results
    ManualSearch,
}

/// A confirmed meal owned by one user
///
/// `total_nutrition` is derived from `foods`; the only mutation is wholesale
/// replacement of the food list through [`FoodLog::replace_foods`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodLog {
    /// Opaque record id
    pub id: String,
    /// Owning user id
    pub user_id: String,
    /// When the meal was eaten
    pub date: DateTime<Utc>,
    /// Meal slot
    pub meal_type: MealType,
    /// Creation path
    pub log_type: LogType,
    /// Reference to the meal photo, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    foods: Vec<FoodItem>,
    total_nutrition: NutrientProfile,
}

impl FoodLog {
    /// Create a log with a fresh id and computed totals
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        date: DateTime<Utc>,
        meal_type: MealType,
        log_type: LogType,
        foods: Vec<FoodItem>,
    ) -> Self {
        let total_nutrition = foods.iter().map(|food| &food.nutrition).sum();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            date,
            meal_type,
            log_type,
            photo_url: None,
            foods,
            total_nutrition,
        }
    }

    /// Attach a photo reference
    #[must_use]
    pub fn with_photo_url(mut self, photo_url: impl Into<String>) -> Self {
        self.photo_url = Some(photo_url.into());
        self
    }

    /// Foods in display order
    #[must_use]
    pub fn foods(&self) -> &[FoodItem] {
        &self.foods
    }

    /// Sum across all foods
    #[must_use]
    pub const fn total_nutrition(&self) -> &NutrientProfile {
        &self.total_nutrition
    }

    /// Replace the whole food list and recompute totals
    pub fn replace_foods(&mut self, foods: Vec<FoodItem>) {
        self.total_nutrition = foods.iter().map(|food| &food.nutrition).sum();
        self.foods = foods;
    }

    /// Recompute totals after deserializing a document that may carry stale ones
    #[must_use]
    pub fn with_recomputed_totals(mut self) -> Self {
        self.total_nutrition = self.foods.iter().map(|food| &food.nutrition).sum();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple() -> FoodItem {
        FoodItem::new("Apple", "182g", NutrientProfile::macros(95.0, 0.5, 25.0, 0.3))
    }

    #[test]
    fn test_sum_treats_missing_optionals_as_zero() {
        let mut rice = NutrientProfile::macros(200.0, 4.0, 45.0, 0.4);
        rice.fiber = Some(0.6);
        rice.minerals = Some(BTreeMap::from([("iron".to_owned(), 1.2)]));
        let apple = apple().nutrition;

        let total: NutrientProfile = [&rice, &apple].into_iter().sum();

        assert!((total.calories - 295.0).abs() < 1e-9);
        assert_eq!(total.fiber, Some(0.6));
        assert_eq!(total.sugar, Some(0.0));
        assert!((total.mineral("iron") - 1.2).abs() < 1e-9);
        assert!(total.vitamins.is_none());
    }

    #[test]
    fn test_map_values_keeps_presence() {
        let mut profile = NutrientProfile::macros(100.0, 10.0, 10.0, 1.0);
        profile.sodium = Some(50.0);
        let doubled = profile.map_values(|v| v * 2.0);

        assert!((doubled.sodium.unwrap() - 100.0).abs() < 1e-9);
        assert!(doubled.fiber.is_none());
    }

    #[test]
    fn test_clamped_non_negative() {
        let mut profile = NutrientProfile::macros(-5.0, f64::NAN, 3.0, 1.0);
        profile.vitamins = Some(BTreeMap::from([("vitaminC".to_owned(), -1.0)]));
        assert!(!profile.is_non_negative());

        let clamped = profile.clamped_non_negative();
        assert!(clamped.is_non_negative());
        assert!(clamped.calories.abs() < f64::EPSILON);
        assert!(clamped.vitamin("vitaminC").abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_negative_checks_every_field() {
        let mut profile = NutrientProfile::macros(100.0, 10.0, 10.0, 1.0);
        assert!(profile.is_non_negative());

        profile.sodium = Some(f64::INFINITY);
        assert!(!profile.is_non_negative());

        profile.sodium = Some(5.0);
        profile.minerals = Some(BTreeMap::from([("iron".to_owned(), -0.1)]));
        assert!(!profile.is_non_negative());
    }

    #[test]
    fn test_food_log_replace_recomputes_totals() {
        let mut log = FoodLog::new(
            "user-1",
            Utc::now(),
            MealType::Lunch,
            LogType::Photo,
            vec![apple(), apple()],
        );
        assert!((log.total_nutrition().calories - 190.0).abs() < 1e-9);

        log.replace_foods(vec![apple()]);
        assert_eq!(log.foods().len(), 1);
        assert!((log.total_nutrition().calories - 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_food_log_wire_format() {
        let log = FoodLog::new("u", Utc::now(), MealType::Snack, LogType::ManualSearch, vec![apple()]);
        let json = serde_json::to_value(&log).unwrap();

        assert_eq!(json["mealType"], "snack");
        assert_eq!(json["logType"], "manual_search");
        assert_eq!(json["foods"][0]["servingSize"], "182g");
        assert!(json.get("photoUrl").is_none());
    }

    #[test]
    fn test_meal_type_parsing() {
        assert_eq!("Dinner".parse::<MealType>().unwrap(), MealType::Dinner);
        assert_eq!("snacks".parse::<MealType>().unwrap(), MealType::Snack);
        assert!("brunch".parse::<MealType>().is_err());
    }
}
