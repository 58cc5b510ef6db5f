use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A dynamically typed scalar as read from a source.
///
/// The temporal variants double as the canonical output of a
/// [`Normalizer`](super::Normalizer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Sample {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    /// Arbitrary precision numeric, kept as written (e.g. a JSON number).
    Number(String),
    Text(String),
    Bytes(Vec<u8>),
    Datetime(DateTime<Utc>),
    Date(NaiveDate),
    Time(NaiveTime),
}

impl Sample {
    pub fn is_null(&self) -> bool {
        matches!(self, Sample::Null)
    }

    /// Null, or text that is empty.
    pub fn is_blank(&self) -> bool {
        match self {
            Sample::Null => true,
            Sample::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sample::Null => write!(f, "NULL"),
            Sample::Bool(b) => write!(f, "{}", b),
            Sample::Int(n) => write!(f, "{}", n),
            Sample::UInt(n) => write!(f, "{}", n),
            Sample::Float(n) => write!(f, "{}", n),
            Sample::Number(s) | Sample::Text(s) => write!(f, "{}", s),
            Sample::Bytes(b) => {
                for byte in b {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            Sample::Datetime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Sample::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Sample::Time(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
        }
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Sample {
            fn from(n: $t) -> Self {
                Sample::Int(n as i64)
            }
        })*
    };
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Sample {
            fn from(n: $t) -> Self {
                Sample::UInt(n as u64)
            }
        })*
    };
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<i128> for Sample {
    fn from(n: i128) -> Self {
        match i64::try_from(n) {
            Ok(n) => Sample::Int(n),
            Err(_) => Sample::Number(n.to_string()),
        }
    }
}

impl From<f32> for Sample {
    fn from(n: f32) -> Self {
        Sample::Float(n as f64)
    }
}

impl From<f64> for Sample {
    fn from(n: f64) -> Self {
        Sample::Float(n)
    }
}

impl From<bool> for Sample {
    fn from(b: bool) -> Self {
        Sample::Bool(b)
    }
}

impl From<&str> for Sample {
    fn from(s: &str) -> Self {
        Sample::Text(s.to_string())
    }
}

impl From<String> for Sample {
    fn from(s: String) -> Self {
        Sample::Text(s)
    }
}

impl From<Vec<u8>> for Sample {
    fn from(b: Vec<u8>) -> Self {
        Sample::Bytes(b)
    }
}

impl From<DateTime<Utc>> for Sample {
    fn from(dt: DateTime<Utc>) -> Self {
        Sample::Datetime(dt)
    }
}

impl From<NaiveDateTime> for Sample {
    fn from(dt: NaiveDateTime) -> Self {
        Sample::Datetime(dt.and_utc())
    }
}

impl From<NaiveDate> for Sample {
    fn from(d: NaiveDate) -> Self {
        Sample::Date(d)
    }
}

impl From<NaiveTime> for Sample {
    fn from(t: NaiveTime) -> Self {
        Sample::Time(t)
    }
}

impl<T: Into<Sample>> From<Option<T>> for Sample {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Sample::Null, Into::into)
    }
}

impl From<serde_json::Value> for Sample {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value;
        match v {
            Value::Null => Sample::Null,
            Value::Bool(b) => Sample::Bool(b),
            Value::Number(n) => Sample::Number(n.to_string()),
            Value::String(s) => Sample::Text(s),
            // Nested structures are carried as their JSON text.
            other => Sample::Text(other.to_string()),
        }
    }
}
