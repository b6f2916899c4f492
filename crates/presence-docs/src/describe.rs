//! Static type descriptions used to build schemas.
//!
//! Each described type reports a [`DeclaredType`]: a plain schema, a
//! presence wrapper, or a single-value envelope around another declaration.
//! The projector inspects this shape once per declared field instead of
//! inspecting values at runtime.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use presence_core::Presence;
use uuid::Uuid;

use crate::Schema;

/// Shape of a declared field or parameter type.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclaredType {
    /// An ordinary type with its schema.
    Plain(Schema),
    /// `Presence<T>` around the inner declaration.
    Presence(Box<DeclaredType>),
    /// `Box<T>`, `Arc<T>` or `Rc<T>` around the inner declaration.
    Envelope(Box<DeclaredType>),
}

impl DeclaredType {
    /// Returns `true` if a presence wrapper appears at any envelope depth.
    #[must_use]
    pub fn is_wrapped(&self) -> bool {
        match self {
            Self::Plain(_) => false,
            Self::Presence(_) => true,
            Self::Envelope(inner) => inner.is_wrapped(),
        }
    }

    /// Returns the schema of the innermost plain type.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        match self {
            Self::Plain(schema) => schema,
            Self::Presence(inner) | Self::Envelope(inner) => inner.schema(),
        }
    }

    /// Consumes the declaration, returning the innermost schema.
    #[must_use]
    pub fn into_schema(self) -> Schema {
        match self {
            Self::Plain(schema) => schema,
            Self::Presence(inner) | Self::Envelope(inner) => inner.into_schema(),
        }
    }

    /// Marks the innermost schema as nullable.
    #[must_use]
    pub fn into_nullable(self) -> Self {
        match self {
            Self::Plain(schema) => Self::Plain(schema.nullable()),
            Self::Presence(inner) => Self::Presence(Box::new(inner.into_nullable())),
            Self::Envelope(inner) => Self::Envelope(Box::new(inner.into_nullable())),
        }
    }
}

/// Types that can describe their declared shape and schema.
///
/// # Example
///
/// ```rust
/// use presence_core::Presence;
/// use presence_docs::{DeclaredType, DescribeType, Schema};
///
/// struct Email(String);
///
/// impl DescribeType for Email {
///     fn declared_type() -> DeclaredType {
///         DeclaredType::Plain(Schema::string().with_format("email"))
///     }
/// }
///
/// let declared = <Presence<Email>>::declared_type();
/// assert!(declared.is_wrapped());
/// assert_eq!(declared.schema().format.as_deref(), Some("email"));
/// ```
pub trait DescribeType {
    /// Returns the declared shape of this type.
    fn declared_type() -> DeclaredType;

    /// Returns the schema of the innermost plain type.
    fn schema() -> Schema {
        Self::declared_type().into_schema()
    }
}

macro_rules! describe_plain {
    ($($t:ty => $schema:expr),* $(,)?) => {
        $(
            impl DescribeType for $t {
                fn declared_type() -> DeclaredType {
                    DeclaredType::Plain($schema)
                }
            }
        )*
    };
}

describe_plain!(
    bool => Schema::boolean(),
    i8 => Schema::integer().with_format("int32").with_range(Some(f64::from(i8::MIN)), Some(f64::from(i8::MAX))),
    i16 => Schema::integer().with_format("int32").with_range(Some(f64::from(i16::MIN)), Some(f64::from(i16::MAX))),
    i32 => Schema::integer().with_format("int32"),
    i64 => Schema::integer().with_format("int64"),
    u8 => Schema::integer().with_format("int32").with_range(Some(0.0), Some(f64::from(u8::MAX))),
    u16 => Schema::integer().with_format("int32").with_range(Some(0.0), Some(f64::from(u16::MAX))),
    u32 => Schema::integer().with_format("int64").with_range(Some(0.0), Some(f64::from(u32::MAX))),
    u64 => Schema::integer().with_format("int64").with_range(Some(0.0), None),
    f32 => Schema::number().with_format("float"),
    f64 => Schema::number().with_format("double"),
    char => Schema::string().with_length(Some(1), Some(1)),
    String => Schema::string(),
    str => Schema::string(),
    Uuid => Schema::string().with_format("uuid"),
    NaiveDate => Schema::string().with_format("date"),
    NaiveDateTime => Schema::string().with_format("date-time"),
    DateTime<Utc> => Schema::string().with_format("date-time"),
    IpAddr => Schema::string().with_format("ip"),
    Ipv4Addr => Schema::string().with_format("ipv4"),
    Ipv6Addr => Schema::string().with_format("ipv6"),
    serde_json::Value => Schema::default(),
);

impl<T: DescribeType + ?Sized> DescribeType for &T {
    fn declared_type() -> DeclaredType {
        T::declared_type()
    }
}

impl<T: DescribeType> DescribeType for Vec<T> {
    fn declared_type() -> DeclaredType {
        DeclaredType::Plain(Schema::array(T::schema()))
    }
}

impl<T: DescribeType> DescribeType for [T] {
    fn declared_type() -> DeclaredType {
        DeclaredType::Plain(Schema::array(T::schema()))
    }
}

impl<T: DescribeType> DescribeType for Option<T> {
    fn declared_type() -> DeclaredType {
        T::declared_type().into_nullable()
    }
}

impl<T: DescribeType> DescribeType for Presence<T> {
    fn declared_type() -> DeclaredType {
        DeclaredType::Presence(Box::new(T::declared_type()))
    }
}

macro_rules! describe_envelope {
    ($($envelope:ident),*) => {
        $(
            impl<T: DescribeType + ?Sized> DescribeType for $envelope<T> {
                fn declared_type() -> DeclaredType {
                    DeclaredType::Envelope(Box::new(T::declared_type()))
                }
            }
        )*
    };
}

describe_envelope!(Box, Arc, Rc);
