//! JSON object nodes as presence sources.

use presence_core::{Lookup, Presence, PresenceSource};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::codec::{decode_field, encode_field};
use crate::error::{json_type_name, JsonCodecError, JsonResult};

/// Read-only view of a JSON object that answers presence lookups.
///
/// A missing key is absent, a `null` literal is an explicit null, and any
/// other value is handed to the caller raw.
///
/// # Example
///
/// ```
/// use presence_core::{Lookup, PresenceSource};
/// use presence_json::JsonObject;
/// use serde_json::json;
///
/// let body = json!({"a": null, "b": 1});
/// let object = JsonObject::new(body.as_object().unwrap());
///
/// assert_eq!(object.lookup("a"), Lookup::Null);
/// assert_eq!(object.lookup("b"), Lookup::Value(&json!(1)));
/// assert_eq!(object.lookup("c"), Lookup::Absent);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct JsonObject<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> JsonObject<'a> {
    /// Wraps an object node.
    #[must_use]
    pub const fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    /// Views `value` as an object.
    ///
    /// # Errors
    ///
    /// Returns [`JsonCodecError::NotAnObject`] for any other JSON type.
    pub fn from_value(value: &'a Value) -> JsonResult<Self> {
        value.as_object().map(Self::new).ok_or(JsonCodecError::NotAnObject {
            found: json_type_name(value),
        })
    }

    /// Decodes `field` as a presence value.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if the value cannot be decoded as `T`.
    pub fn field<T: DeserializeOwned>(&self, field: &str) -> JsonResult<Presence<T>> {
        decode_field(self.map, field)
    }

    /// Returns the underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &'a Map<String, Value> {
        self.map
    }
}

impl PresenceSource for JsonObject<'_> {
    type Raw = Value;

    fn lookup(&self, key: &str) -> Lookup<'_, Value> {
        match self.map.get(key) {
            None => Lookup::Absent,
            Some(Value::Null) => Lookup::Null,
            Some(value) => Lookup::Value(value),
        }
    }
}

/// Parses `bytes` as a JSON document whose root must be an object.
///
/// # Errors
///
/// Returns [`JsonCodecError::Syntax`] for malformed JSON and
/// [`JsonCodecError::NotAnObject`] for a non-object root.
pub fn parse_object(bytes: &[u8]) -> JsonResult<Map<String, Value>> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(map) => Ok(map),
        other => Err(JsonCodecError::NotAnObject {
            found: json_type_name(&other),
        }),
    }
}

/// Builds a JSON object field by field, omitting absent values.
///
/// # Example
///
/// ```
/// use presence_core::Presence;
/// use presence_json::ObjectWriter;
/// use serde_json::json;
///
/// let object = ObjectWriter::new()
///     .field("name", &Presence::present("Karl"))?
///     .field("nickname", &Presence::<String>::null())?
///     .field("email", &Presence::<String>::absent())?
///     .into_value();
///
/// assert_eq!(object, json!({"name": "Karl", "nickname": null}));
/// # Ok::<(), presence_json::JsonCodecError>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct ObjectWriter {
    map: Map<String, Value>,
}

impl ObjectWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing object.
    #[must_use]
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self { map }
    }

    /// Writes `value` under `field`, or removes `field` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`JsonCodecError::Encode`] if the value cannot be serialized.
    pub fn field<T: Serialize>(mut self, field: &str, value: &Presence<T>) -> JsonResult<Self> {
        encode_field(&mut self.map, field, value)?;
        Ok(self)
    }

    /// Returns the built map.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.map
    }

    /// Returns the built object as a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_rejects_non_object() {
        let value = json!("text");
        let err = JsonObject::from_value(&value).unwrap_err();
        assert!(matches!(err, JsonCodecError::NotAnObject { found: "string" }));
    }

    #[test]
    fn test_field_decoding() {
        let value = json!({"count": 3, "label": null});
        let object = JsonObject::from_value(&value).unwrap();

        assert_eq!(object.field::<u8>("count").unwrap(), Presence::present(3));
        assert_eq!(object.field::<String>("label").unwrap(), Presence::null());
        assert_eq!(object.field::<String>("other").unwrap(), Presence::absent());
    }

    #[test]
    fn test_parse_object() {
        let map = parse_object(br#"{"a": 1}"#).unwrap();
        assert_eq!(map.get("a"), Some(&json!(1)));

        assert!(matches!(
            parse_object(b"[1]"),
            Err(JsonCodecError::NotAnObject { found: "array" })
        ));
        assert!(matches!(parse_object(b"{"), Err(JsonCodecError::Syntax(_))));
    }

    #[test]
    fn test_writer_overwrites_and_removes() {
        let mut start = Map::new();
        start.insert("stale".to_string(), json!(true));
        start.insert("kept".to_string(), json!(1));

        let value = ObjectWriter::from_map(start)
            .field("stale", &Presence::<bool>::absent())
            .unwrap()
            .field("kept", &Presence::present(2))
            .unwrap()
            .into_value();

        assert_eq!(value, json!({"kept": 2}));
    }
}
