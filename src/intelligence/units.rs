// ABOUTME: Height and weight unit conversions used by onboarding
// ABOUTME: Feet/inches to centimeters and pounds/kilograms in both directions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

use macrolens_core::constants::units::{CM_PER_FOOT, CM_PER_INCH, KG_PER_LB};

/// Convert feet and inches to centimeters
#[must_use]
pub fn convert_height_to_cm(feet: f64, inches: f64) -> f64 {
    feet.mul_add(CM_PER_FOOT, inches * CM_PER_INCH)
}

/// Convert pounds to kilograms
#[must_use]
pub fn convert_lbs_to_kg(pounds: f64) -> f64 {
    pounds * KG_PER_LB
}

/// Convert kilograms to pounds
#[must_use]
pub fn convert_kg_to_lbs(kilograms: f64) -> f64 {
    kilograms / KG_PER_LB
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_conversion() {
        assert!((convert_height_to_cm(5.0, 10.0) - 177.8).abs() < 1e-9);
        assert!((convert_height_to_cm(6.0, 0.0) - 182.88).abs() < 1e-9);
    }

    #[test]
    fn test_weight_round_trip() {
        for pounds in [0.5, 100.0, 176.4, 330.0] {
            assert!((convert_kg_to_lbs(convert_lbs_to_kg(pounds)) - pounds).abs() < 1e-6);
        }
    }
}
