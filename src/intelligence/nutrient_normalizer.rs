// ABOUTME: Normalizes USDA FoodData Central records into canonical per-100 g nutrients
// ABOUTME: Nutrient-code lookup, label-serving conversion, rounding, and search result mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

//! Nutrient Normalizer
//!
//! `FoodData` Central returns nutrients in two shapes:
//!
//! - `foodNutrients`: a list of coded entries, always per 100 g
//! - `labelNutrients`: a label block, per labeled serving
//!
//! If any field resolves to a positive value from the coded list, the whole
//! coded set is used as-is. Otherwise every label value is converted to
//! per 100 g from the serving size and unit. Missing data resolves to 0;
//! nothing here fails.

use crate::config::intelligence::NutritionConfig;
use crate::intelligence::serving_scaler::round_to;
use macrolens_core::constants::limits::REFERENCE_GRAMS;
use macrolens_core::constants::mineral_keys;
use macrolens_core::constants::nutrient_ids;
use macrolens_core::constants::units::{GRAMS_PER_KG, GRAMS_PER_LB, GRAMS_PER_OZ};
use macrolens_core::models::{null_as_default, MicronutrientMap, NutrientProfile};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Reference to a nutrient definition inside a coded entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientRef {
    /// Nutrient code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
}

/// One coded nutrient entry (per 100 g)
///
/// Search results use `nutrientId`/`value`; detail records use
/// `nutrient.id`/`amount`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodNutrient {
    /// Nutrient code (search shape)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrient_id: Option<u32>,
    /// Nested nutrient definition (detail shape)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrient: Option<NutrientRef>,
    /// Amount (search shape)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Amount (detail shape)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

impl FoodNutrient {
    /// Entry in the search shape
    #[must_use]
    pub const fn coded(nutrient_id: u32, value: f64) -> Self {
        Self {
            nutrient_id: Some(nutrient_id),
            nutrient: None,
            value: Some(value),
            amount: None,
        }
    }

    fn code(&self) -> Option<u32> {
        self.nutrient_id
            .or_else(|| self.nutrient.as_ref().and_then(|n| n.id))
    }

    fn quantity(&self) -> Option<f64> {
        self.value.or(self.amount)
    }
}

/// A single label value
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelValue {
    /// Amount per labeled serving
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl LabelValue {
    fn of(value: f64) -> Option<Self> {
        Some(Self { value: Some(value) })
    }
}

/// Nutrition-facts label block (per labeled serving)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelNutrients {
    /// Energy (kcal)
    pub calories: Option<LabelValue>,
    /// Protein (g)
    pub protein: Option<LabelValue>,
    /// Carbohydrates (g)
    pub carbohydrates: Option<LabelValue>,
    /// Fat (g)
    pub fat: Option<LabelValue>,
    /// Fiber (g)
    pub fiber: Option<LabelValue>,
    /// Sugars (g)
    pub sugars: Option<LabelValue>,
    /// Sodium (mg)
    pub sodium: Option<LabelValue>,
    /// Calcium (mg)
    pub calcium: Option<LabelValue>,
    /// Iron (mg)
    pub iron: Option<LabelValue>,
    /// Potassium (mg)
    pub potassium: Option<LabelValue>,
}

/// A `FoodData` Central food record as returned by search or detail calls
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FoodRecord {
    /// `FoodData` Central id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fdc_id: Option<u64>,
    /// Data type (Foundation, SR Legacy, Branded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Food description, usually upper case
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Brand name (branded foods)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    /// Brand owner (branded foods)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_owner: Option<String>,
    /// Labeled serving size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<f64>,
    /// Labeled serving unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_size_unit: Option<String>,
    /// Household serving, e.g. "1 cup"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub household_serving_full_text: Option<String>,
    /// Coded per-100 g nutrients
    #[serde(deserialize_with = "null_as_default")]
    pub food_nutrients: Vec<FoodNutrient>,
    /// Label block, per labeled serving
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_nutrients: Option<LabelNutrients>,
}

/// A page of food search results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FoodSearchResponse {
    /// Matching foods
    #[serde(deserialize_with = "null_as_default")]
    pub foods: Vec<FoodRecord>,
    /// Total pages available
    #[serde(deserialize_with = "null_as_default")]
    pub total_pages: u32,
}

/// A database food normalized to a 100 g reference serving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedFood {
    /// `FoodData` Central id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fdc_id: Option<u64>,
    /// Title-cased name, "Unknown" when absent
    pub name: String,
    /// Brand name, else brand owner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Always 100
    pub serving_size: f64,
    /// Always "g"
    pub serving_unit: String,
    /// Household serving text from the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub household_serving_text: Option<String>,
    /// Data type from the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Nutrients per 100 g
    pub nutrition: NutrientProfile,
}

impl NormalizedFood {
    /// Serving as quantity text, e.g. "100 g"
    #[must_use]
    pub fn serving_text(&self) -> String {
        format!("{} {}", self.serving_size, self.serving_unit)
            .trim()
            .to_owned()
    }

    /// Re-encode as a food record
    ///
    /// The record carries the coded nutrients and a matching label block for
    /// a 100 g serving, so normalizing it again yields the same food.
    #[must_use]
    pub fn to_record(&self) -> FoodRecord {
        let fields = NutrientFields::from_profile(&self.nutrition);
        let food_nutrients = fields
            .coded()
            .into_iter()
            .map(|(code, value)| FoodNutrient::coded(code, value))
            .collect();

        FoodRecord {
            fdc_id: self.fdc_id,
            data_type: self.data_type.clone(),
            description: Some(self.name.clone()),
            brand_name: self.brand.clone(),
            brand_owner: None,
            serving_size: Some(self.serving_size),
            serving_size_unit: Some(self.serving_unit.clone()),
            household_serving_full_text: self.household_serving_text.clone(),
            food_nutrients,
            label_nutrients: Some(fields.label()),
        }
    }
}

/// The ten tracked fields, flat
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct NutrientFields {
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    fiber: f64,
    sugar: f64,
    sodium: f64,
    calcium: f64,
    iron: f64,
    potassium: f64,
}

impl NutrientFields {
    fn from_coded(nutrients: &[FoodNutrient]) -> Self {
        let lookup = |codes: &[u32]| coded_value(nutrients, codes);
        Self {
            calories: lookup(nutrient_ids::CALORIES),
            protein: lookup(nutrient_ids::PROTEIN),
            carbs: lookup(nutrient_ids::CARBS),
            fat: lookup(nutrient_ids::FAT),
            fiber: lookup(nutrient_ids::FIBER),
            sugar: lookup(nutrient_ids::SUGAR),
            sodium: lookup(nutrient_ids::SODIUM),
            calcium: lookup(nutrient_ids::CALCIUM),
            iron: lookup(nutrient_ids::IRON),
            potassium: lookup(nutrient_ids::POTASSIUM),
        }
    }

    fn from_label(label: Option<&LabelNutrients>, serving: LabelServing<'_>, tolerance: f64) -> Self {
        let label = label.cloned().unwrap_or_default();
        let convert = |entry: Option<LabelValue>| {
            let value = entry
                .and_then(|e| e.value)
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(0.0);
            serving.to_per_100g(value, tolerance)
        };
        Self {
            calories: convert(label.calories),
            protein: convert(label.protein),
            carbs: convert(label.carbohydrates),
            fat: convert(label.fat),
            fiber: convert(label.fiber),
            sugar: convert(label.sugars),
            sodium: convert(label.sodium),
            calcium: convert(label.calcium),
            iron: convert(label.iron),
            potassium: convert(label.potassium),
        }
    }

    fn from_profile(profile: &NutrientProfile) -> Self {
        Self {
            calories: profile.calories,
            protein: profile.protein,
            carbs: profile.carbs,
            fat: profile.fat,
            fiber: profile.fiber_or_zero(),
            sugar: profile.sugar_or_zero(),
            sodium: profile.sodium_or_zero(),
            calcium: profile.mineral(mineral_keys::CALCIUM),
            iron: profile.mineral(mineral_keys::IRON),
            potassium: profile.mineral(mineral_keys::POTASSIUM),
        }
    }

    fn values(&self) -> [f64; 10] {
        [
            self.calories,
            self.protein,
            self.carbs,
            self.fat,
            self.fiber,
            self.sugar,
            self.sodium,
            self.calcium,
            self.iron,
            self.potassium,
        ]
    }

    fn any_positive(&self) -> bool {
        self.values().iter().any(|value| *value > 0.0)
    }

    fn coded(&self) -> Vec<(u32, f64)> {
        let codes = [
            nutrient_ids::CALORIES,
            nutrient_ids::PROTEIN,
            nutrient_ids::CARBS,
            nutrient_ids::FAT,
            nutrient_ids::FIBER,
            nutrient_ids::SUGAR,
            nutrient_ids::SODIUM,
            nutrient_ids::CALCIUM,
            nutrient_ids::IRON,
            nutrient_ids::POTASSIUM,
        ];
        codes
            .iter()
            .zip(self.values())
            .filter_map(|(field_codes, value)| field_codes.first().map(|code| (*code, value)))
            .collect()
    }

    fn label(&self) -> LabelNutrients {
        LabelNutrients {
            calories: LabelValue::of(self.calories),
            protein: LabelValue::of(self.protein),
            carbohydrates: LabelValue::of(self.carbs),
            fat: LabelValue::of(self.fat),
            fiber: LabelValue::of(self.fiber),
            sugars: LabelValue::of(self.sugar),
            sodium: LabelValue::of(self.sodium),
            calcium: LabelValue::of(self.calcium),
            iron: LabelValue::of(self.iron),
            potassium: LabelValue::of(self.potassium),
        }
    }

    fn into_profile(self, decimals: i32) -> NutrientProfile {
        let round = |value: f64| round_to(value, decimals);
        let minerals = MicronutrientMap::from([
            (mineral_keys::CALCIUM.to_owned(), round(self.calcium)),
            (mineral_keys::IRON.to_owned(), round(self.iron)),
            (mineral_keys::POTASSIUM.to_owned(), round(self.potassium)),
        ]);
        NutrientProfile {
            calories: round(self.calories),
            protein: round(self.protein),
            carbs: round(self.carbs),
            fat: round(self.fat),
            fiber: Some(round(self.fiber)),
            sugar: Some(round(self.sugar)),
            sodium: Some(round(self.sodium)),
            vitamins: None,
            minerals: Some(minerals),
        }
    }
}

/// First strictly positive amount among `codes`, in order
///
/// For each code only the first entry carrying it is considered.
fn coded_value(nutrients: &[FoodNutrient], codes: &[u32]) -> f64 {
    codes
        .iter()
        .filter_map(|code| {
            nutrients
                .iter()
                .find(|entry| entry.code() == Some(*code))
                .and_then(FoodNutrient::quantity)
        })
        .find(|value| *value > 0.0)
        .unwrap_or(0.0)
}

/// Labeled serving used to convert label values to per 100 g
#[derive(Debug, Clone, Copy)]
struct LabelServing<'a> {
    size: Option<f64>,
    unit: Option<&'a str>,
}

impl LabelServing<'_> {
    fn grams(&self, size: f64) -> f64 {
        let unit = self
            .unit
            .map(|u| u.trim().to_lowercase())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| "g".to_owned());
        match unit.as_str() {
            "oz" => size * GRAMS_PER_OZ,
            "lb" => size * GRAMS_PER_LB,
            "kg" => size * GRAMS_PER_KG,
            _ => size,
        }
    }

    fn to_per_100g(self, value: f64, tolerance: f64) -> f64 {
        let size = match self.size {
            Some(size) if size > 0.0 && value != 0.0 => size,
            _ => return value,
        };
        let grams = self.grams(size);
        if (grams - REFERENCE_GRAMS).abs() < tolerance {
            return value;
        }
        value / grams * REFERENCE_GRAMS
    }
}

/// Canonical per-100 g nutrients for a food record
#[must_use]
pub fn normalize_nutrient_source(raw: &FoodRecord) -> NutrientProfile {
    let scaling = &NutritionConfig::global().scaling;

    let coded = NutrientFields::from_coded(&raw.food_nutrients);
    let fields = if coded.any_positive() {
        debug!(fdc_id = ?raw.fdc_id, "Using per-100 g coded nutrients");
        coded
    } else {
        debug!(
            fdc_id = ?raw.fdc_id,
            serving_size = ?raw.serving_size,
            serving_unit = ?raw.serving_size_unit,
            "No coded nutrients, converting label values"
        );
        let serving = LabelServing {
            size: raw.serving_size,
            unit: raw.serving_size_unit.as_deref(),
        };
        NutrientFields::from_label(
            raw.label_nutrients.as_ref(),
            serving,
            scaling.reference_tolerance_grams,
        )
    };

    fields.into_profile(scaling.normalize_decimals)
}

/// Lower-case the text, then capitalize the first letter of every word
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_word = false;
    for c in text.to_lowercase().chars() {
        let is_word = c.is_alphanumeric() || c == '_';
        if is_word && !previous_is_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        previous_is_word = is_word;
    }
    out
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty()).cloned()
}

/// Full search-result shape for a food record
#[must_use]
pub fn normalize_food(raw: &FoodRecord) -> NormalizedFood {
    let name = non_empty(raw.description.as_ref())
        .map_or_else(|| "Unknown".to_owned(), |description| title_case(&description));

    NormalizedFood {
        fdc_id: raw.fdc_id,
        name,
        brand: non_empty(raw.brand_name.as_ref()).or_else(|| non_empty(raw.brand_owner.as_ref())),
        serving_size: REFERENCE_GRAMS,
        serving_unit: "g".to_owned(),
        household_serving_text: non_empty(raw.household_serving_full_text.as_ref()),
        data_type: raw.data_type.clone(),
        nutrition: normalize_nutrient_source(raw),
    }
}

/// Normalize every food in a search response
#[must_use]
pub fn normalize_search_response(response: &FoodSearchResponse) -> Vec<NormalizedFood> {
    response.foods.iter().map(normalize_food).collect()
}
