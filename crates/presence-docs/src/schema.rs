//! OpenAPI 3 records produced by the projector.
//!
//! Only the keywords the projector emits are modelled. Field names serialize
//! in OpenAPI's camelCase.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::DocsResult;

/// Where an operation parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterIn {
    /// `?name=value`
    Query,
    /// A templated path segment.
    Path,
    /// A request header.
    Header,
    /// A cookie.
    Cookie,
}

/// An operation parameter record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Name as sent on the wire.
    pub name: String,
    /// Location, serialized as `in`.
    #[serde(rename = "in")]
    pub location: ParameterIn,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether a client must send it.
    #[serde(default)]
    pub required: bool,
    /// Whether it is deprecated; omitted when `false`.
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,
    /// Value schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

impl Parameter {
    /// Serializes the record.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::SerializationError`](crate::DocsError) if an
    /// example value cannot be serialized.
    pub fn to_json(&self) -> DocsResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// JSON Schema primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// `"string"`
    String,
    /// `"number"`
    Number,
    /// `"integer"`
    Integer,
    /// `"boolean"`
    Boolean,
    /// `"array"`
    Array,
    /// `"object"`
    Object,
}

/// A schema object. Unset keywords are left out of the output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Schema {
    /// `type`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    /// `format`, e.g. `uuid` or `date-time`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// `description`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `$ref` to a component schema.
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// `nullable`; omitted when `false`.
    #[serde(skip_serializing_if = "is_false")]
    pub nullable: bool,

    /// Object members in declaration order.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,
    /// Names of members a client must send.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Element schema of an array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    /// Inclusive numeric lower bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Inclusive numeric upper bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Shortest allowed string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// Longest allowed string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// Sample value for documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

impl Schema {
    fn typed(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    /// `{"type": "string"}`
    #[must_use]
    pub fn string() -> Self {
        Self::typed(SchemaType::String)
    }

    /// `{"type": "integer"}`
    #[must_use]
    pub fn integer() -> Self {
        Self::typed(SchemaType::Integer)
    }

    /// `{"type": "number"}`
    #[must_use]
    pub fn number() -> Self {
        Self::typed(SchemaType::Number)
    }

    /// `{"type": "boolean"}`
    #[must_use]
    pub fn boolean() -> Self {
        Self::typed(SchemaType::Boolean)
    }

    /// An array of `items`.
    #[must_use]
    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::typed(SchemaType::Array)
        }
    }

    /// An object with no members yet.
    #[must_use]
    pub fn object() -> Self {
        Self::typed(SchemaType::Object)
    }

    /// A `$ref` to `path`.
    #[must_use]
    pub fn reference(path: impl Into<String>) -> Self {
        Self {
            reference: Some(path.into()),
            ..Self::default()
        }
    }

    /// Sets `format`.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets `description`.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets numeric bounds; `None` clears a bound.
    #[must_use]
    pub fn with_range(mut self, minimum: Option<f64>, maximum: Option<f64>) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }

    /// Sets string length bounds; `None` clears a bound.
    #[must_use]
    pub fn with_length(mut self, min_length: Option<u64>, max_length: Option<u64>) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    /// Accepts `null` in addition to the typed value.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Adds or replaces member `name`.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Lists `name` as required, once.
    #[must_use]
    pub fn required_property(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.required.contains(&name) {
            self.required.push(name);
        }
        self
    }

    /// Whether members can be added: an untyped or object schema that is not
    /// a reference.
    #[must_use]
    pub fn is_object(&self) -> bool {
        self.reference.is_none() && matches!(self.schema_type, None | Some(SchemaType::Object))
    }
}
