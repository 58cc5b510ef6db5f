//! Canonical value kinds.
//!
//! A [`Kind`] is the dialect-independent category of a column's values.
//! Kinds serialize to their lowercase names (`"text"`, `"int"`, ...), which
//! are a stable external contract.

mod detector;
mod layouts;
mod sample;

pub use detector::{Detector, Normalizer, detect_columns, detect_kind};
pub use layouts::{Layout, LAYOUTS};
pub use sample::Sample;

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{SlqError, SlqResult};

/// Canonical value category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u16)]
pub enum Kind {
    #[default]
    Unknown = 0,
    Null = 1,
    Text = 2,
    Int = 3,
    Float = 4,
    Decimal = 5,
    Bool = 6,
    Datetime = 7,
    Date = 8,
    Time = 9,
    Bytes = 10,
}

impl Kind {
    /// Every kind, in tag order.
    pub const ALL: [Kind; 11] = [
        Kind::Unknown,
        Kind::Null,
        Kind::Text,
        Kind::Int,
        Kind::Float,
        Kind::Decimal,
        Kind::Bool,
        Kind::Datetime,
        Kind::Date,
        Kind::Time,
        Kind::Bytes,
    ];

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Unknown => "unknown",
            Kind::Null => "null",
            Kind::Text => "text",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Decimal => "decimal",
            Kind::Bool => "bool",
            Kind::Datetime => "datetime",
            Kind::Date => "date",
            Kind::Time => "time",
            Kind::Bytes => "bytes",
        }
    }

    /// Stable numeric tag.
    pub fn tag(self) -> u16 {
        self as u16
    }

    /// True for `Datetime`, `Date` and `Time`.
    pub fn is_temporal(self) -> bool {
        matches!(self, Kind::Datetime | Kind::Date | Kind::Time)
    }

    /// True for `Int`, `Float` and `Decimal`.
    pub fn is_numeric(self) -> bool {
        matches!(self, Kind::Int | Kind::Float | Kind::Decimal)
    }

    /// Parse `text` and assign it to `self`.
    ///
    /// On error `self` keeps its previous value.
    pub fn update_from_text(&mut self, text: &[u8]) -> SlqResult<()> {
        let s = std::str::from_utf8(text)
            .map_err(|_| SlqError::UnknownKind(String::from_utf8_lossy(text).into_owned()))?;
        *self = s.parse()?;
        Ok(())
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = SlqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| SlqError::UnknownKind(s.to_string()))
    }
}

impl TryFrom<u16> for Kind {
    type Error = SlqError;

    fn try_from(tag: u16) -> Result<Self, Self::Error> {
        Kind::ALL
            .get(tag as usize)
            .copied()
            .ok_or(SlqError::InvalidKind(tag))
    }
}

impl Serialize for Kind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Kind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KindVisitor;

        impl Visitor<'_> for KindVisitor {
            type Value = Kind;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a kind name such as \"text\" or \"int\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Kind, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(KindVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cases() -> Vec<(Kind, &'static str)> {
        vec![
            (Kind::Unknown, "unknown"),
            (Kind::Null, "null"),
            (Kind::Text, "text"),
            (Kind::Int, "int"),
            (Kind::Float, "float"),
            (Kind::Decimal, "decimal"),
            (Kind::Bool, "bool"),
            (Kind::Datetime, "datetime"),
            (Kind::Date, "date"),
            (Kind::Time, "time"),
            (Kind::Bytes, "bytes"),
        ]
    }

    #[test]
    fn test_kind_text_round_trip() {
        for (kind, name) in cases() {
            assert_eq!(kind.to_string(), name);
            assert_eq!(name.parse::<Kind>().unwrap(), kind);

            let mut target = Kind::Unknown;
            target.update_from_text(name.as_bytes()).unwrap();
            assert_eq!(target, kind);
        }
    }

    #[test]
    fn test_kind_json_round_trip() {
        for (kind, name) in cases() {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", name));
            let back: Kind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn test_kind_tags() {
        for kind in Kind::ALL {
            assert_eq!(Kind::try_from(kind.tag()).unwrap(), kind);
        }
        assert!(matches!(Kind::try_from(666), Err(SlqError::InvalidKind(666))));
        assert!(Kind::try_from(11).is_err());
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(serde_json::from_str::<Kind>("\"invalid_text\"").is_err());
        assert!(serde_json::from_str::<Kind>("666").is_err());
        assert!(serde_json::from_str::<Kind>("\"TEXT\"").is_err());
    }

    #[test]
    fn test_failed_update_leaves_kind_unchanged() {
        let mut kind = Kind::Bytes;
        assert!(kind.update_from_text(b"invalid_text").is_err());
        assert_eq!(kind, Kind::Bytes);

        assert!(kind.update_from_text(&[0xff, 0xfe]).is_err());
        assert_eq!(kind, Kind::Bytes);
    }
}
