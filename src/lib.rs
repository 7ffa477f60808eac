//! Parse localized, human-readable date strings back into precision-tagged
//! timestamps.
//!
//! The input is described by the same `sprintfDate`-style template a
//! formatter would use to render it (`"j F Y"`, `"d. M Y"`, `"H:i, j. M Y"`),
//! plus optional locale tables for month names and digit glyphs. Punctuation
//! and spacing in the input need not match the template exactly.

#[macro_use]
mod macros;
mod consts;
mod extract;
mod options;
mod parser;
mod pattern;
mod prelude;
mod template;
mod types;

pub use consts::*;
pub use extract::{normalize_number, translate_digits};
pub use options::{ConfigError, DigitTransformTable, MonthNames, ParserOptions};
pub use parser::DateFormatParser;
pub use pattern::{compile, CompiledPattern, Fragment, Width};
pub use template::{tokenize, Token};
pub use types::{CalendarModel, Precision, Year};

use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// Failure to parse an input string.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The input does not match the template, or matched without a year.
    #[error("Failed to parse {input} ({normalized})")]
    Unparseable {
        /// The offending input, unchanged
        input: String,
        /// The input with localized digits replaced by ASCII digits
        normalized: String,
    },

    /// The compiled template was rejected by the regex engine.
    #[error("Invalid date format pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Failure to build a [`TimeValue`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeValueError {
    #[error("Invalid timestamp: {0} (expected ±Y-MM-DDThh:mm:ssZ)")]
    InvalidTimestamp(String),
    #[error("Invalid year: {0}")]
    InvalidYear(String),
    #[error("Invalid precision: {0} (must be 9-14)")]
    InvalidPrecision(u8),
    #[error("Invalid calendar model: {0}")]
    InvalidCalendar(String),
}

/// An immutable calendar timestamp tagged with its precision.
///
/// Components finer than the precision are 0 and mean "unspecified": a
/// month of 0 is not January. Displays as `±Y-MM-DDThh:mm:ssZ`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(
    fmt = "{}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
    year,
    month,
    day,
    hour,
    minute,
    second
)]
#[serde(try_from = "TimeValueRepr", into = "TimeValueRepr")]
pub struct TimeValue {
    year: Year,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    timezone: i16,
    before: u32,
    after: u32,
    precision: Precision,
    calendar_model: CalendarModel,
}

impl TimeValue {
    /// Creates a value from its timestamp string and metadata.
    ///
    /// `timezone` is the offset in minutes, `before` and `after` the
    /// uncertainty in units of `precision`.
    ///
    /// # Errors
    /// Returns `TimeValueError::InvalidTimestamp` if `timestamp` is not laid
    /// out as `±Y-MM-DDThh:mm:ssZ`.
    pub fn new(
        timestamp: &str,
        timezone: i16,
        before: u32,
        after: u32,
        precision: Precision,
        calendar_model: CalendarModel,
    ) -> Result<Self, TimeValueError> {
        let invalid = || TimeValueError::InvalidTimestamp(timestamp.to_owned());
        let caps = regex!(
            r"^([+-])([0-9]+)-([0-9]{2})-([0-9]{2})T([0-9]{2}):([0-9]{2}):([0-9]{2})Z$"
        )
        .captures(timestamp)
        .ok_or_else(invalid)?;
        let (_, [sign, year, month, day, hour, minute, second]) = caps.extract();
        let two_digits = |s: &str| s.parse::<u8>().map_err(|_| invalid());

        Ok(Self {
            year: Year::new(sign == "-", year)?,
            month: two_digits(month)?,
            day: two_digits(day)?,
            hour: two_digits(hour)?,
            minute: two_digits(minute)?,
            second: two_digits(second)?,
            timezone,
            before,
            after,
            precision,
            calendar_model,
        })
    }

    /// The timestamp in its `±Y-MM-DDThh:mm:ssZ` layout
    pub fn timestamp(&self) -> String {
        self.to_string()
    }

    pub const fn year(&self) -> &Year {
        &self.year
    }

    pub const fn is_negative(&self) -> bool {
        self.year.is_negative()
    }

    /// Month 1-12, or 0 when unspecified
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Day of month, or 0 when unspecified
    pub const fn day(&self) -> u8 {
        self.day
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Time zone offset in minutes
    pub const fn timezone(&self) -> i16 {
        self.timezone
    }

    pub const fn before(&self) -> u32 {
        self.before
    }

    pub const fn after(&self) -> u32 {
        self.after
    }

    pub const fn precision(&self) -> Precision {
        self.precision
    }

    pub const fn calendar_model(&self) -> CalendarModel {
        self.calendar_model
    }
}

/// Wire form of [`TimeValue`], as in the Wikibase JSON data model
#[derive(Serialize, Deserialize)]
struct TimeValueRepr {
    time: String,
    timezone: i16,
    before: u32,
    after: u32,
    precision: Precision,
    calendarmodel: CalendarModel,
}

impl TryFrom<TimeValueRepr> for TimeValue {
    type Error = TimeValueError;

    fn try_from(repr: TimeValueRepr) -> Result<Self, Self::Error> {
        Self::new(
            &repr.time,
            repr.timezone,
            repr.before,
            repr.after,
            repr.precision,
            repr.calendarmodel,
        )
    }
}

impl From<TimeValue> for TimeValueRepr {
    fn from(value: TimeValue) -> Self {
        Self {
            time: value.timestamp(),
            timezone: value.timezone,
            before: value.before,
            after: value.after,
            precision: value.precision,
            calendarmodel: value.calendar_model,
        }
    }
}

/// Parses `input` with a one-off [`DateFormatParser`].
///
/// Reuse a `DateFormatParser` when parsing many inputs with the same
/// options, so the pattern is compiled once.
///
/// # Errors
/// Returns `ParseError::Unparseable` if the input does not match the
/// template or carries no year.
pub fn parse(input: &str, options: &ParserOptions) -> Result<TimeValue, ParseError> {
    DateFormatParser::new(options.clone()).parse(input)
}
