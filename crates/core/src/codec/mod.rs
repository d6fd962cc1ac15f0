//! Wire codec between typed messages and JSON objects.
//!
//! Encoding omits unset optional fields and zero values. Decoding fills absent
//! fields with their zero value. In [`Strictness::Strict`] mode, any field the
//! schema does not declare is rejected, including fields of nested messages.

mod error;

pub use error::{CodecError, Result};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

/// A message kind with a fixed schema.
///
/// Implemented through [`impl_message!`] for every request and response type.
pub trait Message: Serialize + DeserializeOwned {
    /// Schema name used in error messages.
    const NAME: &'static str;

    /// Every field name the schema recognizes.
    const FIELDS: &'static [&'static str];

    /// Appends the dotted path of every unrecognized field in `object`.
    fn collect_unknown(object: &Map<String, Value>, path: &str, unknown: &mut Vec<String>) {
        collect_unknown_fields(Self::FIELDS, object, path, unknown);
    }
}

/// How strictly decoding treats fields outside the schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Unknown fields fail with [`CodecError::UnknownFields`].
    Strict,
    /// Unknown fields are ignored.
    #[default]
    Lenient,
}

/// Encodes a message as a JSON object.
pub fn encode<M: Message>(message: &M) -> Result<Map<String, Value>> {
    let value = serde_json::to_value(message).map_err(|e| CodecError::Schema {
        message: M::NAME,
        reason: e.to_string(),
    })?;
    match value {
        Value::Object(object) => Ok(object),
        other => Err(CodecError::NotAnObject {
            message: M::NAME,
            found: json_type(&other),
        }),
    }
}

/// Decodes a JSON value into a message.
pub fn decode<M: Message>(value: Value, strictness: Strictness) -> Result<M> {
    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(CodecError::NotAnObject {
                message: M::NAME,
                found: json_type(&other),
            })
        }
    };

    if strictness == Strictness::Strict {
        let mut unknown = Vec::new();
        M::collect_unknown(&object, "", &mut unknown);
        if !unknown.is_empty() {
            return Err(CodecError::UnknownFields {
                message: M::NAME,
                fields: unknown,
            });
        }
    }

    serde_json::from_value(Value::Object(object)).map_err(|e| CodecError::Schema {
        message: M::NAME,
        reason: e.to_string(),
    })
}

/// Decodes a raw response body. An empty body decodes as `{}`.
pub fn decode_str<M: Message>(body: &str, strictness: Strictness) -> Result<M> {
    let value = if body.trim().is_empty() {
        Value::Object(Map::new())
    } else {
        serde_json::from_str(body).map_err(|e| CodecError::InvalidJson(e.to_string()))?
    };
    decode(value, strictness)
}

/// Appends fields of `object` that are not listed in `fields`.
pub fn collect_unknown_fields(
    fields: &[&str],
    object: &Map<String, Value>,
    path: &str,
    unknown: &mut Vec<String>,
) {
    for key in object.keys() {
        if !fields.contains(&key.as_str()) {
            unknown.push(join_path(path, key));
        }
    }
}

/// Recurses into a nested message field, or into each element of a repeated one.
pub fn collect_nested<M: Message>(value: Option<&Value>, path: &str, unknown: &mut Vec<String>) {
    match value {
        Some(Value::Object(object)) => M::collect_unknown(object, path, unknown),
        Some(Value::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                if let Value::Object(object) = item {
                    M::collect_unknown(object, &format!("{path}[{index}]"), unknown);
                }
            }
        }
        _ => {}
    }
}

/// Joins a parent path and a field name with a dot.
pub fn join_path(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{path}.{field}")
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Implements [`Message`] for a type.
///
/// Nested message fields listed after `nested` are checked recursively in
/// strict mode.
macro_rules! impl_message {
    ($ty:ty, $name:literal, [$($field:literal),* $(,)?]) => {
        impl $crate::codec::Message for $ty {
            const NAME: &'static str = $name;
            const FIELDS: &'static [&'static str] = &[$($field),*];
        }
    };
    ($ty:ty, $name:literal, [$($field:literal),* $(,)?], nested { $($nested:literal => $nested_ty:ty),* $(,)? }) => {
        impl $crate::codec::Message for $ty {
            const NAME: &'static str = $name;
            const FIELDS: &'static [&'static str] = &[$($field),*];

            fn collect_unknown(
                object: &::serde_json::Map<String, ::serde_json::Value>,
                path: &str,
                unknown: &mut Vec<String>,
            ) {
                $crate::codec::collect_unknown_fields(Self::FIELDS, object, path, unknown);
                $(
                    $crate::codec::collect_nested::<$nested_ty>(
                        object.get($nested),
                        &$crate::codec::join_path(path, $nested),
                        unknown,
                    );
                )*
            }
        }
    };
}

pub(crate) use impl_message;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Inner {
        key: String,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Outer {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        inners: Vec<Inner>,
    }

    impl_message!(Inner, "Inner", ["key"]);
    impl_message!(Outer, "Outer", ["id", "note", "inners"], nested { "inners" => Inner });

    #[test]
    fn test_encode_omits_unset_fields() {
        let outer = Outer {
            id: "e1".to_string(),
            note: None,
            inners: vec![],
        };
        let object = encode(&outer).unwrap();
        assert_eq!(Value::Object(object), json!({"id": "e1"}));
    }

    #[test]
    fn test_decode_fills_zero_values() {
        let outer: Outer = decode(json!({"id": "e1"}), Strictness::Strict).unwrap();
        assert_eq!(outer.note, None);
        assert!(outer.inners.is_empty());
    }

    #[test]
    fn test_decode_missing_required_field() {
        let result: Result<Outer> = decode(json!({"note": "n"}), Strictness::Lenient);
        match result {
            Err(CodecError::Schema { message, reason }) => {
                assert_eq!(message, "Outer");
                assert!(reason.contains("missing field `id`"));
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_rejects_unknown_top_level_field() {
        let result: Result<Outer> = decode(json!({"id": "e1", "color": "red"}), Strictness::Strict);
        assert_eq!(
            result.unwrap_err(),
            CodecError::UnknownFields {
                message: "Outer",
                fields: vec!["color".to_string()],
            }
        );
    }

    #[test]
    fn test_strict_rejects_unknown_nested_field() {
        let value = json!({"id": "e1", "inners": [{"key": "a"}, {"key": "b", "extra": 1}]});
        let result: Result<Outer> = decode(value, Strictness::Strict);
        assert_eq!(
            result.unwrap_err(),
            CodecError::UnknownFields {
                message: "Outer",
                fields: vec!["inners[1].extra".to_string()],
            }
        );
    }

    #[test]
    fn test_lenient_ignores_unknown_fields() {
        let value = json!({"id": "e1", "color": "red", "inners": [{"key": "a", "extra": 1}]});
        let outer: Outer = decode(value, Strictness::Lenient).unwrap();
        assert_eq!(outer.inners, vec![Inner { key: "a".to_string() }]);
    }

    #[test]
    fn test_decode_rejects_non_object() {
        let result: Result<Outer> = decode(json!(["e1"]), Strictness::Lenient);
        assert_eq!(
            result.unwrap_err(),
            CodecError::NotAnObject {
                message: "Outer",
                found: "array",
            }
        );
    }

    #[test]
    fn test_decode_str_empty_body() {
        let result: Result<Inner> = decode_str("  ", Strictness::Lenient);
        assert!(matches!(result, Err(CodecError::Schema { .. })));
    }

    #[test]
    fn test_decode_str_invalid_json() {
        let result: Result<Inner> = decode_str("<html>", Strictness::Lenient);
        assert!(matches!(result, Err(CodecError::InvalidJson(_))));
    }
}
