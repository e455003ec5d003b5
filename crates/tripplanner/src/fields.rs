//! Positional field codec.
//!
//! A card is stored as a JSON object whose keys are `field0`, `field1`, ...
//! in template order. The mapping is keyed by position, not by name: a record
//! written under one template and read under a reordered one assigns values
//! to the wrong fields without any error.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

/// Key prefix of every positional entry.
const FIELD_PREFIX: &str = "field";

/// A card's field values keyed by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap(BTreeMap<usize, String>);

impl FieldMap {
    /// Build a mapping from values in document order.
    #[must_use]
    pub fn from_values(values: &[String]) -> Self {
        Self(values.iter().cloned().enumerate().collect())
    }

    /// Assign stored values onto `values`, position by position.
    ///
    /// Positions absent from the mapping, positions whose stored value is
    /// empty, and positions beyond `values` are left untouched. Returns the
    /// number of stored positions that had no slot to land in.
    pub fn apply_to(&self, values: &mut [String]) -> usize {
        let mut overflow = 0;
        for (&index, value) in &self.0 {
            match values.get_mut(index) {
                Some(slot) if !value.is_empty() => slot.clone_from(value),
                Some(_) => {}
                None => overflow += 1,
            }
        }
        overflow
    }

    /// Value stored at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(&index).map(String::as_str)
    }

    /// Number of stored positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no positions are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parse `field{n}` into `n`.
///
/// Only the canonical decimal form is accepted, so `field01` and `field+1`
/// are not read as `field1`.
fn parse_key(key: &str) -> Option<usize> {
    let suffix = key.strip_prefix(FIELD_PREFIX)?;
    let index: usize = suffix.parse().ok()?;
    (index.to_string() == suffix).then_some(index)
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (index, value) in &self.0 {
            map.serialize_entry(&format!("{FIELD_PREFIX}{index}"), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldMapVisitor;

        impl<'de> Visitor<'de> for FieldMapVisitor {
            type Value = FieldMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of field0..fieldN string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FieldMap, A::Error> {
                let mut values = BTreeMap::new();
                while let Some(key) = access.next_key::<String>()? {
                    match parse_key(&key) {
                        Some(index) => {
                            values.insert(index, access.next_value::<String>()?);
                        }
                        None => {
                            access.next_value::<IgnoredAny>()?;
                            trace!("ignoring non-positional key '{}'", key);
                        }
                    }
                }
                Ok(FieldMap(values))
            }
        }

        deserializer.deserialize_map(FieldMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_serialize_uses_positional_keys() {
        let map = FieldMap::from_values(&strings(&["Delta", "DL123", ""]));
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"field0": "Delta", "field1": "DL123", "field2": ""})
        );
    }

    #[test]
    fn test_serialize_keeps_index_order_past_ten() {
        let values: Vec<String> = (0..12).map(|i| i.to_string()).collect();
        let text = serde_json::to_string(&FieldMap::from_values(&values)).unwrap();
        let nine = text.find("\"field9\"").unwrap();
        let ten = text.find("\"field10\"").unwrap();
        assert!(nine < ten);
    }

    #[test]
    fn test_deserialize_fills_present_positions_only() {
        let map: FieldMap =
            serde_json::from_str(r#"{"field0": "Hilton", "field2": "2025-06-01"}"#).unwrap();
        let mut values = strings(&["", "keep", "", ""]);
        let overflow = map.apply_to(&mut values);
        assert_eq!(overflow, 0);
        assert_eq!(values, strings(&["Hilton", "keep", "2025-06-01", ""]));
    }

    #[test]
    fn test_deserialize_skips_empty_stored_values() {
        let map: FieldMap = serde_json::from_str(r#"{"field0": ""}"#).unwrap();
        let mut values = strings(&["default"]);
        map.apply_to(&mut values);
        assert_eq!(values[0], "default");
    }

    #[test]
    fn test_deserialize_reports_overflow() {
        let map: FieldMap = serde_json::from_str(r#"{"field0": "a", "field5": "b"}"#).unwrap();
        let mut values = strings(&["", ""]);
        assert_eq!(map.apply_to(&mut values), 1);
        assert_eq!(values, strings(&["a", ""]));
    }

    #[test]
    fn test_non_positional_keys_ignored() {
        let map: FieldMap =
            serde_json::from_str(r#"{"airline": "x", "field1": "y", "fieldX": "z"}"#).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(1), Some("y"));
    }

    #[test]
    fn test_only_canonical_keys_are_positional() {
        let map: FieldMap = serde_json::from_str(
            r#"{"field1": "kept", "field01": "a", "field+1": "b", "field 1": "c", "field": "d"}"#,
        )
        .unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(1), Some("kept"));

        assert_eq!(parse_key("field0"), Some(0));
        assert_eq!(parse_key("field10"), Some(10));
        assert_eq!(parse_key("field00"), None);
        assert_eq!(parse_key("field-0"), None);
    }

    #[test]
    fn test_non_string_value_is_rejected() {
        let result: Result<FieldMap, _> = serde_json::from_str(r#"{"field0": 12}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_map() {
        let map: FieldMap = serde_json::from_str("{}").unwrap();
        assert!(map.is_empty());
    }
}
