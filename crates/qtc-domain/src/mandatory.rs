//! Mandatory fields with an explicit "not found" value
//!
//! Some record fields may never be omitted. When the source text does not state
//! them, the extractor must say so explicitly with [`HIL_SENTINEL`], which keeps
//! "unknown, needs a human" distinguishable from "malformed output".

use schemars::gen::SchemaGenerator;
use schemars::schema::{Schema, SchemaObject, SubschemaValidation};
use schemars::JsonSchema;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Literal marking a mandatory field that requires human-in-the-loop follow-up
pub const HIL_SENTINEL: &str = "NOT_FOUND_HIL";

/// A mandatory field value
///
/// On the wire a `NotFound` value is the string `"NOT_FOUND_HIL"`; any other
/// value must have the shape of `T`.
///
/// # Examples
///
/// ```
/// use qtc_domain::Mandatory;
///
/// let days: Mandatory<u32> = serde_json::from_str("14").unwrap();
/// assert_eq!(days, Mandatory::Known(14));
///
/// let days: Mandatory<u32> = serde_json::from_str(r#""NOT_FOUND_HIL""#).unwrap();
/// assert!(days.is_not_found());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Mandatory<T> {
    /// The value was stated in the source
    Known(T),

    /// The value was not stated; a human must supply it
    NotFound,
}

impl<T> Mandatory<T> {
    /// Whether the field carries the sentinel
    pub fn is_not_found(&self) -> bool {
        matches!(self, Mandatory::NotFound)
    }
}

impl<T: fmt::Display> fmt::Display for Mandatory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mandatory::Known(value) => value.fmt(f),
            Mandatory::NotFound => f.write_str(HIL_SENTINEL),
        }
    }
}

impl<T: Serialize> Serialize for Mandatory<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Mandatory::Known(value) => value.serialize(serializer),
            Mandatory::NotFound => serializer.serialize_str(HIL_SENTINEL),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Mandatory<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.as_str() == Some(HIL_SENTINEL) {
            return Ok(Mandatory::NotFound);
        }
        T::deserialize(value)
            .map(Mandatory::Known)
            .map_err(de::Error::custom)
    }
}

impl<T: JsonSchema> JsonSchema for Mandatory<T> {
    fn schema_name() -> String {
        format!("Mandatory_{}", T::schema_name())
    }

    fn is_referenceable() -> bool {
        false
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        let sentinel = SchemaObject {
            const_value: Some(serde_json::Value::String(HIL_SENTINEL.to_string())),
            ..Default::default()
        };
        let schema = SchemaObject {
            subschemas: Some(Box::new(SubschemaValidation {
                any_of: Some(vec![gen.subschema_for::<T>(), Schema::Object(sentinel)]),
                ..Default::default()
            })),
            ..Default::default()
        };
        Schema::Object(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sentinel_round_trip() {
        let value: Mandatory<String> = Mandatory::NotFound;
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#""NOT_FOUND_HIL""#);
        let back: Mandatory<String> = serde_json::from_str(&json).unwrap();
        assert!(back.is_not_found());
    }

    #[test]
    fn test_sentinel_accepted_for_integer_field() {
        let value: Mandatory<u32> = serde_json::from_str(r#""NOT_FOUND_HIL""#).unwrap();
        assert_eq!(value, Mandatory::NotFound);
    }

    #[test]
    fn test_other_strings_rejected_for_integer_field() {
        let result: Result<Mandatory<u32>, _> = serde_json::from_str(r#""fourteen""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_null_is_not_the_sentinel() {
        let result: Result<Mandatory<String>, _> = serde_json::from_str("null");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Mandatory::Known(21u32).to_string(), "21");
        assert_eq!(Mandatory::<u32>::NotFound.to_string(), HIL_SENTINEL);
    }

    #[test]
    fn test_schema_allows_sentinel() {
        let schema = schemars::schema_for!(Mandatory<u32>);
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("anyOf"));
        assert!(json.contains(HIL_SENTINEL));
    }

    proptest! {
        #[test]
        fn prop_known_strings_survive(s in "[A-Za-z ]{0,24}") {
            let value = Mandatory::Known(s.clone());
            let json = serde_json::to_string(&value).unwrap();
            let back: Mandatory<String> = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, Mandatory::Known(s));
        }
    }
}
