//! String-to-value conversion for flat parameters.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Converts a single decoded parameter token into a typed value.
///
/// This is the same conversion used for ordinary parameters and for the
/// inner type of a `Presence<T>` parameter, so both read identical wire
/// formats.
///
/// # Implementing `FromParam`
///
/// ```rust
/// use presence_extract::FromParam;
///
/// struct Percent(u8);
///
/// impl FromParam for Percent {
///     fn from_param(raw: &str) -> Result<Self, String> {
///         let value = u8::from_param(raw.trim_end_matches('%'))?;
///         if value > 100 {
///             return Err(format!("{value} exceeds 100"));
///         }
///         Ok(Percent(value))
///     }
/// }
///
/// assert_eq!(Percent::from_param("42%").unwrap().0, 42);
/// assert!(Percent::from_param("142").is_err());
/// ```
pub trait FromParam: Sized {
    /// Parses `raw`, returning a human-readable reason on failure.
    ///
    /// # Errors
    ///
    /// Returns a description of why `raw` is not a valid value.
    fn from_param(raw: &str) -> Result<Self, String>;
}

impl FromParam for String {
    fn from_param(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }
}

// Accepts the same spellings as configuration booleans
impl FromParam for bool {
    fn from_param(raw: &str) -> Result<Self, String> {
        match raw.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(format!("'{raw}' is not a boolean")),
        }
    }
}

macro_rules! impl_from_param_via_from_str {
    ($($t:ty),* $(,)?) => {
        $(
            impl FromParam for $t {
                fn from_param(raw: &str) -> Result<Self, String> {
                    raw.parse::<$t>().map_err(|e| e.to_string())
                }
            }
        )*
    };
}

impl_from_param_via_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char, IpAddr,
    Ipv4Addr, Ipv6Addr, NaiveDate,
);

impl FromParam for Uuid {
    fn from_param(raw: &str) -> Result<Self, String> {
        Uuid::parse_str(raw).map_err(|e| e.to_string())
    }
}

impl FromParam for DateTime<Utc> {
    fn from_param(raw: &str) -> Result<Self, String> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| e.to_string())
    }
}
