//! Field-level decode and encode of presence values.

use presence_core::{Envelope, Presence, PresenceSource};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{json_type_name, JsonCodecError, JsonResult};
use crate::object::JsonObject;

/// Decodes `field` of `object` into a [`Presence`].
///
/// A missing key yields `Absent`, a `null` literal yields `Present(None)`,
/// and any other value is decoded as `T`.
///
/// # Errors
///
/// Returns a type mismatch if the value cannot be decoded as `T`. A failed
/// conversion never degrades to an absent value.
pub fn decode_field<T: DeserializeOwned>(
    object: &Map<String, Value>,
    field: &str,
) -> JsonResult<Presence<T>> {
    let decoded = JsonObject::new(object)
        .lookup(field)
        .try_into_presence(|raw| {
            <T as Deserialize>::deserialize(raw)
                .map_err(|e| JsonCodecError::type_mismatch::<T>(field, &e))
        });

    match &decoded {
        Ok(value) => tracing::debug!(
            medium = "json",
            field = %field,
            state = value.state_name(),
            target_type = std::any::type_name::<T>(),
            "Decoded JSON field"
        ),
        Err(err) => tracing::debug!(
            medium = "json",
            field = %field,
            target_type = std::any::type_name::<T>(),
            error = %err,
            "JSON field conversion failed"
        ),
    }

    decoded
}

/// Decodes `field` into an envelope around a [`Presence`], such as
/// `Box<Presence<T>>`.
///
/// Presence is decided for the innermost value; the envelope is always
/// constructed.
///
/// # Errors
///
/// Same as [`decode_field`].
pub fn decode_enveloped_field<E, T>(object: &Map<String, Value>, field: &str) -> JsonResult<E>
where
    E: Envelope<Inner = Presence<T>>,
    T: DeserializeOwned,
{
    decode_field(object, field).map(E::wrap)
}

/// Writes `value` under `field` of `object`.
///
/// An absent value removes the key; an explicit null writes a `null`
/// literal.
///
/// # Errors
///
/// Returns [`JsonCodecError::Encode`] if the value cannot be serialized.
pub fn encode_field<T: Serialize>(
    object: &mut Map<String, Value>,
    field: &str,
    value: &Presence<T>,
) -> JsonResult<()> {
    match value {
        Presence::Absent => {
            object.remove(field);
        }
        Presence::Present(None) => {
            object.insert(field.to_string(), Value::Null);
        }
        Presence::Present(Some(inner)) => {
            let encoded = serde_json::to_value(inner).map_err(|source| JsonCodecError::Encode {
                field: field.to_string(),
                source,
            })?;
            object.insert(field.to_string(), encoded);
        }
    }

    Ok(())
}

/// Serializes `value` into a JSON object.
///
/// Presence fields must carry
/// `#[serde(default, skip_serializing_if = "Presence::is_absent")]` so that
/// absent members are omitted.
///
/// # Errors
///
/// Returns [`JsonCodecError::Syntax`] if serialization fails and
/// [`JsonCodecError::NotAnObject`] if `value` does not serialize to an
/// object.
pub fn to_object<T: Serialize>(value: &T) -> JsonResult<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(JsonCodecError::NotAnObject {
            found: json_type_name(&other),
        }),
    }
}

/// Deserializes `T` from a JSON object.
///
/// # Errors
///
/// Returns a type mismatch against [`DOCUMENT_FIELD`](crate::DOCUMENT_FIELD)
/// if a member has the wrong type or a required member is missing.
pub fn from_object<T: DeserializeOwned>(object: Map<String, Value>) -> JsonResult<T> {
    <T as Deserialize>::deserialize(Value::Object(object)).map_err(JsonCodecError::from_document::<T>)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test input must be an object"),
        }
    }

    #[test]
    fn test_decode_three_states() {
        let body = object(json!({"name": null, "age": 42}));

        assert_eq!(decode_field::<String>(&body, "name").unwrap(), Presence::null());
        assert_eq!(decode_field::<u32>(&body, "age").unwrap(), Presence::present(42));
        assert_eq!(decode_field::<String>(&body, "email").unwrap(), Presence::absent());
    }

    #[test]
    fn test_decode_mismatch_is_error() {
        let body = object(json!({"age": "forty-two"}));

        let err = decode_field::<u32>(&body, "age").unwrap_err();
        assert!(err.is_type_mismatch());
        assert!(err.to_string().contains("'age'"));
    }

    #[test]
    fn test_decode_nested_value() {
        let body = object(json!({"tags": ["a", "b"]}));
        let tags: Presence<Vec<String>> = decode_field(&body, "tags").unwrap();

        assert_eq!(tags, Presence::present(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_decode_enveloped() {
        let body = object(json!({"a": 1, "b": null}));

        let a: Box<Presence<i32>> = decode_enveloped_field(&body, "a").unwrap();
        let b: Arc<Presence<i32>> = decode_enveloped_field(&body, "b").unwrap();
        let c: Box<Presence<i32>> = decode_enveloped_field(&body, "c").unwrap();

        assert_eq!(*a, Presence::present(1));
        assert!(b.is_null());
        assert!(c.is_absent());
    }

    #[test]
    fn test_encode_field() {
        let mut out = Map::new();
        encode_field(&mut out, "a", &Presence::present(1)).unwrap();
        encode_field(&mut out, "b", &Presence::<i32>::null()).unwrap();
        encode_field(&mut out, "c", &Presence::<i32>::absent()).unwrap();

        assert_eq!(Value::Object(out), json!({"a": 1, "b": null}));
    }

    #[test]
    fn test_to_object_rejects_scalars() {
        assert!(matches!(
            to_object(&5),
            Err(JsonCodecError::NotAnObject { found: "number" })
        ));
    }

    #[test]
    fn test_object_round_trip() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Patch {
            #[serde(default, skip_serializing_if = "Presence::is_absent")]
            title: Presence<String>,
            #[serde(default, skip_serializing_if = "Presence::is_absent")]
            note: Presence<String>,
        }

        let patch = Patch {
            title: Presence::absent(),
            note: Presence::null(),
        };

        let map = to_object(&patch).unwrap();
        assert_eq!(Value::Object(map.clone()), json!({"note": null}));

        let back: Patch = from_object(map).unwrap();
        assert_eq!(back, patch);
    }

    #[test]
    fn test_from_object_mismatch_is_type_error() {
        #[derive(Debug, Deserialize)]
        struct Patch {
            #[serde(default)]
            age: Presence<u8>,
        }

        let err = from_object::<Patch>(object(json!({"age": "old"}))).unwrap_err();

        assert!(err.is_type_mismatch());
        assert!(err.to_string().contains("expected u8"));
    }
}
