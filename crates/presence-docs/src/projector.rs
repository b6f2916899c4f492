//! Schema projection for presence-wrapped declarations.
//!
//! A `Presence<T>` field or parameter is documented as `T`, is never
//! required, and stays nullable only if `T` itself is.

use crate::describe::{DeclaredType, DescribeType};
use crate::error::{DocsError, DocsResult};
use crate::schema::{Parameter, ParameterIn, Schema};

/// A parameter declaration before its schema is finalized.
///
/// `required` holds whatever the declaration asked for; the projector may
/// override it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    pub location: ParameterIn,
    /// Description.
    pub description: Option<String>,
    /// Whether the declaration is marked required.
    pub required: bool,
    /// Declared type shape.
    pub declared: DeclaredType,
}

impl ParameterDescriptor {
    /// Describes a parameter of type `T`.
    #[must_use]
    pub fn of<T: DescribeType + ?Sized>(name: impl Into<String>, location: ParameterIn) -> Self {
        Self {
            name: name.into(),
            location,
            description: None,
            required: false,
            declared: T::declared_type(),
        }
    }

    /// Marks the declaration as required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Adds a description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Builds the OpenAPI parameter record.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::MissingField`] if the name is empty.
    pub fn to_parameter(&self) -> DocsResult<Parameter> {
        if self.name.is_empty() {
            return Err(DocsError::MissingField {
                field: "name".to_string(),
            });
        }

        Ok(Parameter {
            name: self.name.clone(),
            location: self.location,
            description: self.description.clone(),
            required: self.required,
            deprecated: false,
            schema: Some(self.declared.schema().clone()),
        })
    }
}

/// Projects presence-wrapped declarations onto their inner schema.
///
/// The projector is stateless and every operation is idempotent.
///
/// # Example
///
/// ```rust
/// use presence_core::Presence;
/// use presence_docs::{ParameterDescriptor, ParameterIn, SchemaProjector};
/// use uuid::Uuid;
///
/// let declared = ParameterDescriptor::of::<Presence<Uuid>>("myId", ParameterIn::Query)
///     .required(true);
///
/// let projected = SchemaProjector::new().project_parameter(declared);
/// let param = projected.to_parameter().unwrap();
///
/// assert!(!param.required);
/// assert_eq!(param.schema.unwrap().format.as_deref(), Some("uuid"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaProjector;

impl SchemaProjector {
    /// Creates a projector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Projects a parameter descriptor.
    ///
    /// A wrapped declaration is replaced by its inner schema and forced to
    /// `required = false`. Any other declaration is returned unchanged.
    #[must_use]
    pub fn project_parameter(&self, descriptor: ParameterDescriptor) -> ParameterDescriptor {
        if !descriptor.declared.is_wrapped() {
            return descriptor;
        }

        tracing::trace!(
            field = %descriptor.name,
            required_hint = descriptor.required,
            "Projecting wrapped parameter schema"
        );

        ParameterDescriptor {
            required: false,
            declared: DeclaredType::Plain(descriptor.declared.into_schema()),
            ..descriptor
        }
    }

    /// Projects and builds the OpenAPI parameter record for `T`.
    ///
    /// # Errors
    ///
    /// Same as [`ParameterDescriptor::to_parameter`].
    pub fn parameter<T: DescribeType + ?Sized>(
        &self,
        name: impl Into<String>,
        location: ParameterIn,
        required: bool,
    ) -> DocsResult<Parameter> {
        let descriptor = ParameterDescriptor::of::<T>(name, location).required(required);
        self.project_parameter(descriptor).to_parameter()
    }

    /// Inserts property `name` into `object`.
    ///
    /// The property is listed in `required` only when `required` is set and
    /// the declaration is not wrapped. Re-projecting the same property
    /// replaces it without duplicating the `required` entry.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::NotAnObject`] if `object` cannot hold properties.
    pub fn project_property(
        &self,
        object: &mut Schema,
        name: &str,
        declared: &DeclaredType,
        required: bool,
    ) -> DocsResult<()> {
        if !object.is_object() {
            return Err(DocsError::NotAnObject {
                property: name.to_string(),
            });
        }

        let wrapped = declared.is_wrapped();
        object
            .properties
            .insert(name.to_string(), declared.schema().clone());

        if required && !wrapped {
            if !object.required.iter().any(|r| r == name) {
                object.required.push(name.to_string());
            }
        } else {
            object.required.retain(|r| r != name);
        }

        tracing::trace!(field = %name, wrapped, required, "Projected property schema");
        Ok(())
    }

    /// Inserts a property of type `T` into `object`.
    ///
    /// # Errors
    ///
    /// Same as [`SchemaProjector::project_property`].
    pub fn property<T: DescribeType + ?Sized>(
        &self,
        object: &mut Schema,
        name: &str,
        required: bool,
    ) -> DocsResult<()> {
        self.project_property(object, name, &T::declared_type(), required)
    }
}
