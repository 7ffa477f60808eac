use crate::consts::{
    CALENDAR_GREGORIAN, CALENDAR_JULIAN, PRECISION_DAY, PRECISION_HOUR, PRECISION_MINUTE,
    PRECISION_MONTH, PRECISION_SECOND, PRECISION_YEAR,
};
use crate::prelude::*;
use crate::TimeValueError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Granularity of a parsed timestamp, ordered from coarsest to finest.
///
/// Serializes as the numeric code of the Wikibase time data type
/// (`9` for year up to `14` for second).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Precision {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "second")]
    Second,
}

impl Precision {
    /// All precisions, coarsest first
    pub const ALL: [Self; 6] = [
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
    ];

    /// Returns the Wikibase precision code
    pub const fn code(self) -> u8 {
        match self {
            Self::Year => PRECISION_YEAR,
            Self::Month => PRECISION_MONTH,
            Self::Day => PRECISION_DAY,
            Self::Hour => PRECISION_HOUR,
            Self::Minute => PRECISION_MINUTE,
            Self::Second => PRECISION_SECOND,
        }
    }

    /// Name of the capture group holding this field in a compiled pattern
    pub const fn group_name(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
        }
    }
}

impl TryFrom<u8> for Precision {
    type Error = TimeValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|precision| precision.code() == value)
            .ok_or(TimeValueError::InvalidPrecision(value))
    }
}

impl From<Precision> for u8 {
    fn from(precision: Precision) -> Self {
        precision.code()
    }
}

/// Calendar model a timestamp is expressed in.
/// Parsing always produces [`CalendarModel::Gregorian`]; no conversion is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CalendarModel {
    /// Proleptic Gregorian calendar
    #[default]
    Gregorian,
    /// Proleptic Julian calendar
    Julian,
}

impl CalendarModel {
    /// Returns the concept URI identifying this calendar
    pub const fn uri(self) -> &'static str {
        match self {
            Self::Gregorian => CALENDAR_GREGORIAN,
            Self::Julian => CALENDAR_JULIAN,
        }
    }
}

impl TryFrom<&str> for CalendarModel {
    type Error = TimeValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            CALENDAR_GREGORIAN => Ok(Self::Gregorian),
            CALENDAR_JULIAN => Ok(Self::Julian),
            other => Err(TimeValueError::InvalidCalendar(other.to_owned())),
        }
    }
}

impl TryFrom<String> for CalendarModel {
    type Error = TimeValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<CalendarModel> for String {
    fn from(calendar: CalendarModel) -> Self {
        calendar.uri().to_owned()
    }
}

impl fmt::Display for CalendarModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri())
    }
}

/// A signed year of arbitrary magnitude.
///
/// Years are kept as their decimal digits so that values beyond any
/// fixed-width integer survive a parse unchanged. Leading zeros are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Year {
    negative: bool,
    digits: String,
}

impl Year {
    /// Creates a year from a sign and its decimal digits
    ///
    /// # Errors
    /// Returns `TimeValueError::InvalidYear` if `digits` is empty or holds
    /// anything but ASCII digits.
    pub fn new(negative: bool, digits: &str) -> Result<Self, TimeValueError> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeValueError::InvalidYear(digits.to_owned()));
        }
        let trimmed = digits.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0" } else { trimmed };
        Ok(Self {
            negative,
            digits: digits.to_owned(),
        })
    }

    /// True for years before the epoch (`-` sign)
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    /// Decimal digits of the magnitude, without sign or leading zeros
    #[inline]
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Returns the year as `i64`, or `None` if it does not fit
    pub fn get(&self) -> Option<i64> {
        let magnitude = self.digits.parse::<i64>().ok()?;
        Some(if self.negative { -magnitude } else { magnitude })
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { '-' } else { '+' };
        write!(f, "{sign}{}", self.digits)
    }
}
