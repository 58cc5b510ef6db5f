//! Catalog of recognized temporal text layouts.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::{Kind, Sample};

/// How a layout's text is turned into a chrono value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Time(&'static str),
    Date(&'static str),
    Rfc3339,
    /// Datetime without a usable offset; read as UTC.
    Naive(&'static str),
    /// Datetime carrying a numeric offset.
    Offset(&'static str),
    /// Datetime without a year.
    Stamp(&'static str),
}

/// A named temporal layout and the kind it yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub name: &'static str,
    pub kind: Kind,
    format: Format,
}

impl Layout {
    const fn new(name: &'static str, kind: Kind, format: Format) -> Self {
        Self { name, kind, format }
    }

    /// Parse `s` under this layout into its canonical sample.
    pub fn parse(&self, s: &str) -> Option<Sample> {
        match self.format {
            Format::Time(fmt) => NaiveTime::parse_from_str(s, fmt).ok().map(Sample::Time),
            Format::Date(fmt) => NaiveDate::parse_from_str(s, fmt).ok().map(Sample::Date),
            Format::Rfc3339 => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| Sample::Datetime(dt.with_timezone(&Utc))),
            Format::Naive(fmt) => NaiveDateTime::parse_from_str(s, fmt)
                .ok()
                .map(|dt| Sample::Datetime(dt.and_utc())),
            Format::Offset(fmt) => DateTime::parse_from_str(s, fmt)
                .ok()
                .map(|dt| Sample::Datetime(dt.with_timezone(&Utc))),
            // Year 0 is a leap year, so Feb 29 stamps still parse.
            Format::Stamp(fmt) => {
                NaiveDateTime::parse_from_str(&format!("0000 {}", s), &format!("%Y {}", fmt))
                    .ok()
                    .map(|dt| Sample::Datetime(dt.and_utc()))
            }
        }
    }

    pub fn matches(&self, s: &str) -> bool {
        self.parse(s).is_some()
    }
}

/// Recognized layouts, in precedence order.
///
/// Layouts with a numeric offset come before their `%Z` twins: `%Z` skips
/// any non-whitespace run, so it would also swallow an offset.
pub static LAYOUTS: &[Layout] = &[
    // Time only
    Layout::new("time", Kind::Time, Format::Time("%H:%M:%S%.f")),
    Layout::new("time_short", Kind::Time, Format::Time("%H:%M")),
    Layout::new("kitchen", Kind::Time, Format::Time("%I:%M%p")),
    Layout::new("kitchen_spaced", Kind::Time, Format::Time("%I:%M %p")),
    // Date only
    Layout::new("date", Kind::Date, Format::Date("%Y-%m-%d")),
    Layout::new("date_slash", Kind::Date, Format::Date("%Y/%m/%d")),
    Layout::new("date_day_month", Kind::Date, Format::Date("%d %b %Y")),
    Layout::new("date_month_day", Kind::Date, Format::Date("%b %d, %Y")),
    Layout::new("date_us", Kind::Date, Format::Date("%m/%d/%Y")),
    // Full datetime
    Layout::new("rfc3339", Kind::Datetime, Format::Rfc3339),
    Layout::new("iso8601", Kind::Datetime, Format::Naive("%Y-%m-%dT%H:%M:%S%.f")),
    Layout::new("sql_datetime", Kind::Datetime, Format::Naive("%Y-%m-%d %H:%M:%S%.f")),
    Layout::new("ansic", Kind::Datetime, Format::Naive("%a %b %e %H:%M:%S %Y")),
    Layout::new("ruby_date", Kind::Datetime, Format::Offset("%a %b %d %H:%M:%S %z %Y")),
    Layout::new("unix_date", Kind::Datetime, Format::Naive("%a %b %e %H:%M:%S %Z %Y")),
    Layout::new("rfc822z", Kind::Datetime, Format::Offset("%d %b %y %H:%M %z")),
    Layout::new("rfc822", Kind::Datetime, Format::Naive("%d %b %y %H:%M %Z")),
    Layout::new("rfc850", Kind::Datetime, Format::Naive("%A, %d-%b-%y %H:%M:%S %Z")),
    Layout::new("rfc1123z", Kind::Datetime, Format::Offset("%a, %d %b %Y %H:%M:%S %z")),
    Layout::new("rfc1123", Kind::Datetime, Format::Naive("%a, %d %b %Y %H:%M:%S %Z")),
    Layout::new("stamp", Kind::Datetime, Format::Stamp("%b %e %H:%M:%S")),
    Layout::new("stamp_milli", Kind::Datetime, Format::Stamp("%b %e %H:%M:%S%.3f")),
    Layout::new("stamp_micro", Kind::Datetime, Format::Stamp("%b %e %H:%M:%S%.6f")),
    Layout::new("stamp_nano", Kind::Datetime, Format::Stamp("%b %e %H:%M:%S%.9f")),
];
