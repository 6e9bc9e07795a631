// ABOUTME: Vision-service analysis result shape and its conversion into food items
// ABOUTME: Clamps model estimates and fills default names and quantities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

use chrono::{DateTime, Utc};
use macrolens_core::models::{
    null_as_default, FoodItem, FoodLog, LogType, MealType, MicronutrientMap, NutrientProfile,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name used when the model returns none
pub const UNKNOWN_FOOD_NAME: &str = "Unknown food";

/// Quantity used when the model returns none
pub const DEFAULT_QUANTITY: &str = "1 serving";

/// One food as estimated by the vision model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzedFood {
    /// Food name
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Amount with unit, e.g. "150g" or "1 cup"
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: String,
    /// Energy (kcal)
    #[serde(deserialize_with = "null_as_default")]
    pub calories: f64,
    /// Protein (g)
    #[serde(deserialize_with = "null_as_default")]
    pub protein: f64,
    /// Carbohydrates (g)
    #[serde(deserialize_with = "null_as_default")]
    pub carbs: f64,
    /// Fat (g)
    #[serde(deserialize_with = "null_as_default")]
    pub fat: f64,
    /// Fiber (g)
    pub fiber: Option<f64>,
    /// Sugar (g)
    pub sugar: Option<f64>,
    /// Sodium (mg)
    pub sodium: Option<f64>,
    /// Vitamins by name
    pub vitamins: Option<MicronutrientMap>,
    /// Minerals by name
    pub minerals: Option<MicronutrientMap>,
}

impl AnalyzedFood {
    /// Convert to a food item, clamping negative or non-finite estimates to zero
    #[must_use]
    pub fn into_food_item(self) -> FoodItem {
        let name = self.name.trim();
        let quantity = self.quantity.trim();
        let nutrition = NutrientProfile {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            fiber: self.fiber,
            sugar: self.sugar,
            sodium: self.sodium,
            vitamins: self.vitamins,
            minerals: self.minerals,
        };
        if !nutrition.is_non_negative() {
            debug!(food = name, "Clamping invalid estimates from vision analysis");
        }

        FoodItem::new(
            if name.is_empty() { UNKNOWN_FOOD_NAME } else { name },
            if quantity.is_empty() { DEFAULT_QUANTITY } else { quantity },
            nutrition.clamped_non_negative(),
        )
    }
}

/// Result of analyzing one meal photo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisionAnalysis {
    /// Detected foods
    #[serde(deserialize_with = "null_as_default")]
    pub foods: Vec<AnalyzedFood>,
    /// Model confidence (0.0-1.0)
    #[serde(deserialize_with = "null_as_default")]
    pub confidence: f64,
    /// Free-text notes from the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl VisionAnalysis {
    /// Detected foods as editable food items
    #[must_use]
    pub fn into_food_items(self) -> Vec<FoodItem> {
        self.foods
            .into_iter()
            .map(AnalyzedFood::into_food_item)
            .collect()
    }

    /// A photo log built directly from the analysis
    #[must_use]
    pub fn into_food_log(
        self,
        user_id: impl Into<String>,
        date: DateTime<Utc>,
        meal_type: MealType,
        photo_url: Option<String>,
    ) -> FoodLog {
        let log = FoodLog::new(user_id, date, meal_type, LogType::Photo, self.into_food_items());
        match photo_url {
            Some(url) => log.with_photo_url(url),
            None => log,
        }
    }
}
