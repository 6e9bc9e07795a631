// ABOUTME: Lenient serde helpers for payloads produced by external services
// ABOUTME: Treats explicit JSON null the same as a missing field
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

use serde::{Deserialize, Deserializer};

/// Deserialize a value, mapping an explicit `null` to `T::default()`
///
/// `#[serde(default)]` only covers absent fields. Use this with
/// `deserialize_with` on fields where external services send `null`
/// for "unknown".
///
/// # Errors
///
/// Returns the deserializer's error when the value is present but has the
/// wrong type
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "null_as_default")]
        amount: f64,
        #[serde(deserialize_with = "null_as_default")]
        items: Vec<String>,
    }

    #[test]
    fn test_null_and_missing_both_default() {
        let nulls: Sample = serde_json::from_value(json!({"amount": null, "items": null})).unwrap();
        assert!(nulls.amount.abs() < f64::EPSILON);
        assert!(nulls.items.is_empty());

        let missing: Sample = serde_json::from_value(json!({})).unwrap();
        assert!(missing.items.is_empty());

        let present: Sample = serde_json::from_value(json!({"amount": 2.5, "items": ["a"]})).unwrap();
        assert!((present.amount - 2.5).abs() < f64::EPSILON);
        assert_eq!(present.items, vec!["a".to_owned()]);
    }

    #[test]
    fn test_wrong_type_still_fails() {
        assert!(serde_json::from_value::<Sample>(json!({"amount": "lots"})).is_err());
    }
}
