//! Serde support for [`Presence`].
//!
//! Decoding a key that exists yields `Present`: a null literal becomes
//! `Present(None)`, anything else is handed to the inner type's decoder.
//! Whether the key exists at all is decided by the enclosing struct, so
//! fields need `#[serde(default)]` for a missing key to become `Absent`.
//! Without the attribute a missing key fails with serde's `missing field`
//! error instead of reading as null.
//!
//! Decoding asks the format to describe its input, so it needs a
//! self-describing format such as JSON.
//!
//! Encoding an absent value is an error. The enclosing struct must skip the
//! key with `skip_serializing_if = "Presence::is_absent"` (or
//! [`crate::is_absent`] for enveloped values); writing `null` instead would
//! collapse absent into present-null on the wire.

use std::fmt;
use std::marker::PhantomData;

use serde::de::value::{
    BoolDeserializer, BorrowedBytesDeserializer, BorrowedStrDeserializer, BytesDeserializer,
    CharDeserializer, EnumAccessDeserializer, F32Deserializer, F64Deserializer, I128Deserializer,
    I16Deserializer, I32Deserializer, I64Deserializer, I8Deserializer, MapAccessDeserializer,
    SeqAccessDeserializer, StrDeserializer, StringDeserializer, U128Deserializer,
    U16Deserializer, U32Deserializer, U64Deserializer, U8Deserializer,
};
use serde::de::{Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, Visitor};
use serde::ser::{Error as _, Serialize, Serializer};

use crate::Presence;

impl<T: Serialize> Serialize for Presence<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Absent => Err(S::Error::custom(
                "absent presence value must be skipped, not serialized \
                 (use skip_serializing_if = \"Presence::is_absent\")",
            )),
            Self::Present(None) => serializer.serialize_none(),
            Self::Present(Some(value)) => serializer.serialize_some(value),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Presence<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer
            .deserialize_any(PresentVisitor(PhantomData))
            .map(Self::Present)
    }
}

/// Maps `null` to `None` and hands any other input to `T`.
struct PresentVisitor<T>(PhantomData<T>);

macro_rules! forward_primitives {
    ($($method:ident: $ty:ty => $deserializer:ident),* $(,)?) => {
        $(
            fn $method<E: serde::de::Error>(self, v: $ty) -> Result<Self::Value, E> {
                T::deserialize($deserializer::<E>::new(v)).map(Some)
            }
        )*
    };
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for PresentVisitor<T> {
    type Value = Option<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null or a value")
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        T::deserialize(deserializer).map(Some)
    }

    fn visit_newtype_struct<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> Result<Self::Value, D::Error> {
        T::deserialize(deserializer).map(Some)
    }

    forward_primitives!(
        visit_bool: bool => BoolDeserializer,
        visit_i8: i8 => I8Deserializer,
        visit_i16: i16 => I16Deserializer,
        visit_i32: i32 => I32Deserializer,
        visit_i64: i64 => I64Deserializer,
        visit_i128: i128 => I128Deserializer,
        visit_u8: u8 => U8Deserializer,
        visit_u16: u16 => U16Deserializer,
        visit_u32: u32 => U32Deserializer,
        visit_u64: u64 => U64Deserializer,
        visit_u128: u128 => U128Deserializer,
        visit_f32: f32 => F32Deserializer,
        visit_f64: f64 => F64Deserializer,
        visit_char: char => CharDeserializer,
        visit_string: String => StringDeserializer,
    );

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
        T::deserialize(StrDeserializer::new(v)).map(Some)
    }

    fn visit_borrowed_str<E: serde::de::Error>(self, v: &'de str) -> Result<Self::Value, E> {
        T::deserialize(BorrowedStrDeserializer::new(v)).map(Some)
    }

    fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
        T::deserialize(BytesDeserializer::new(v)).map(Some)
    }

    fn visit_borrowed_bytes<E: serde::de::Error>(self, v: &'de [u8]) -> Result<Self::Value, E> {
        T::deserialize(BorrowedBytesDeserializer::new(v)).map(Some)
    }

    fn visit_byte_buf<E: serde::de::Error>(self, v: Vec<u8>) -> Result<Self::Value, E> {
        self.visit_bytes(&v)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        T::deserialize(SeqAccessDeserializer::new(seq)).map(Some)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        T::deserialize(MapAccessDeserializer::new(map)).map(Some)
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<Self::Value, A::Error> {
        T::deserialize(EnumAccessDeserializer::new(data)).map(Some)
    }
}
