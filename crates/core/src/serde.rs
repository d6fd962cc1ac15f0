//! Serde helper functions for the tracking service's JSON mapping.
//!
//! The service speaks proto3 JSON: 64-bit integers travel as strings, and
//! repeated fields may arrive as `null` instead of being omitted. These
//! helpers absorb those quirks so message types can use plain Rust fields.

use serde::{Deserialize, Deserializer, Serializer};

/// Returns true for the proto3 zero value of an `i64` field.
pub fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// Deserialize a value, treating an explicit `null` as the type's default.
pub fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let value: Option<T> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// `i64` fields encoded as decimal strings.
///
/// Decoding accepts a string, a number or `null` (which maps to zero).
pub mod int64 {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(i64),
    }

    pub fn serialize<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<StringOrNumber>::deserialize(deserializer)? {
            None => Ok(0),
            Some(StringOrNumber::Number(n)) => Ok(n),
            Some(StringOrNumber::String(s)) if s.trim().is_empty() => Ok(0),
            Some(StringOrNumber::String(s)) => s
                .trim()
                .parse()
                .map_err(|_| serde::de::Error::custom(format!("invalid int64 string: {s:?}"))),
        }
    }
}
