// ABOUTME: Application constants organized by domain
// ABOUTME: Food-database nutrient codes, unit conversion factors, and engine limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

//! Constants shared by the calculator, the scaler and the normalizer.

/// `FoodData` Central nutrient codes, in lookup priority order per field
///
/// A field resolves to the first code whose amount is strictly positive.
pub mod nutrient_ids {
    /// Energy (kcal), then Atwater general and specific factors
    pub const CALORIES: &[u32] = &[1008, 2047, 2048];
    /// Protein
    pub const PROTEIN: &[u32] = &[1003];
    /// Carbohydrate, by difference
    pub const CARBS: &[u32] = &[1005];
    /// Total lipid (fat)
    pub const FAT: &[u32] = &[1004];
    /// Fiber, total dietary
    pub const FIBER: &[u32] = &[1079];
    /// Total sugars, then sugars NLEA
    pub const SUGAR: &[u32] = &[2000, 1063];
    /// Sodium, Na
    pub const SODIUM: &[u32] = &[1093];
    /// Calcium, Ca
    pub const CALCIUM: &[u32] = &[1087];
    /// Iron, Fe
    pub const IRON: &[u32] = &[1089];
    /// Potassium, K
    pub const POTASSIUM: &[u32] = &[1092];
}

/// Mass and length conversion factors
pub mod units {
    /// Centimeters per foot
    pub const CM_PER_FOOT: f64 = 30.48;
    /// Centimeters per inch
    pub const CM_PER_INCH: f64 = 2.54;
    /// Kilograms per pound
    pub const KG_PER_LB: f64 = 0.453_592;
    /// Grams per ounce
    pub const GRAMS_PER_OZ: f64 = 28.3495;
    /// Grams per pound
    pub const GRAMS_PER_LB: f64 = 453.592;
    /// Grams per kilogram
    pub const GRAMS_PER_KG: f64 = 1000.0;
}

/// Energy density of macronutrients (kcal per gram)
pub mod energy {
    /// Protein kcal/g
    pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
    /// Carbohydrate kcal/g
    pub const KCAL_PER_G_CARBS: f64 = 4.0;
    /// Fat kcal/g
    pub const KCAL_PER_G_FAT: f64 = 9.0;
}

/// Mineral map keys used by normalized and analyzed foods
pub mod mineral_keys {
    /// Calcium (mg)
    pub const CALCIUM: &str = "calcium";
    /// Iron (mg)
    pub const IRON: &str = "iron";
    /// Potassium (mg)
    pub const POTASSIUM: &str = "potassium";
}

/// Limits applied by the serving scaler and normalizer
pub mod limits {
    /// Reference quantity for normalized food records
    pub const REFERENCE_GRAMS: f64 = 100.0;
    /// Servings this close to the reference skip per-100 g conversion
    pub const REFERENCE_TOLERANCE_GRAMS: f64 = 0.5;
    /// Floor for a scaling base amount, avoids division blow-up
    pub const MIN_BASE_AMOUNT: f64 = 0.01;
    /// Decimal places kept by serving scaling
    pub const SCALE_DECIMALS: i32 = 2;
    /// Decimal places kept by source normalization
    pub const NORMALIZE_DECIMALS: i32 = 1;
}
