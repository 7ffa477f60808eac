//! Parser configuration: the date format template and the two locale tables.
//!
//! All three are plain data supplied by the caller. Deserializing
//! [`ParserOptions`] accepts the option keys `dateFormat`,
//! `digitTransformTable` and `monthNames`, each optional.

use crate::consts::{DEFAULT_DATE_FORMAT, DIGITS, MONTHS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error building a locale table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Month numbers run from 1 to 12.
    #[error("Invalid month in month name table: {0} (must be 1-12)")]
    InvalidMonth(u8),

    /// Digit transform keys are single ASCII digits.
    #[error("Invalid digit in digit transform table: {0:?}")]
    InvalidDigit(String),
}

/// Accepted spellings per month, one slot per month number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<u8, Vec<String>>",
    into = "BTreeMap<u8, Vec<String>>"
)]
pub struct MonthNames {
    slots: [Vec<String>; MONTHS],
}

impl MonthNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds spellings for `month` (1-12), keeping the ones already present
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidMonth` if `month` is outside 1-12.
    pub fn insert<I, S>(&mut self, month: u8, names: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slot = Self::slot_index(month).ok_or(ConfigError::InvalidMonth(month))?;
        self.slots[slot].extend(names.into_iter().map(Into::into));
        Ok(())
    }

    /// Builder-style [`MonthNames::insert`]
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidMonth` if `month` is outside 1-12.
    pub fn with<I, S>(mut self, month: u8, names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(month, names)?;
        Ok(self)
    }

    /// Spellings configured for `month`; empty for unknown months
    pub fn get(&self, month: u8) -> &[String] {
        match Self::slot_index(month) {
            Some(slot) => &self.slots[slot],
            None => &[],
        }
    }

    /// Iterates `(month, spellings)` in ascending month order, skipping
    /// months without a usable (non-empty) spelling
    pub fn iter(&self) -> impl Iterator<Item = (u8, Vec<&str>)> + '_ {
        (1..=MONTHS as u8).filter_map(move |month| {
            let names: Vec<&str> = self
                .get(month)
                .iter()
                .map(String::as_str)
                .filter(|name| !name.is_empty())
                .collect();
            (!names.is_empty()).then_some((month, names))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    fn slot_index(month: u8) -> Option<usize> {
        (1..=MONTHS as u8)
            .contains(&month)
            .then(|| usize::from(month) - 1)
    }
}

impl TryFrom<BTreeMap<u8, Vec<String>>> for MonthNames {
    type Error = ConfigError;

    fn try_from(map: BTreeMap<u8, Vec<String>>) -> Result<Self, Self::Error> {
        map.into_iter()
            .try_fold(Self::new(), |names, (month, spellings)| {
                names.with(month, spellings)
            })
    }
}

impl From<MonthNames> for BTreeMap<u8, Vec<String>> {
    fn from(names: MonthNames) -> Self {
        (1..=MONTHS as u8)
            .zip(names.slots)
            .filter(|(_, spellings)| !spellings.is_empty())
            .collect()
    }
}

/// Localized glyph per ASCII digit.
///
/// Glyphs may be longer than one character. Empty glyphs are treated as
/// absent so they never end up in a character class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct DigitTransformTable {
    glyphs: [String; DIGITS],
}

impl DigitTransformTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from the ten glyphs for `0` through `9`
    pub fn from_glyphs<S: Into<String>>(glyphs: [S; DIGITS]) -> Self {
        Self {
            glyphs: glyphs.map(Into::into),
        }
    }

    /// Sets the glyph for `digit`, replacing any previous one
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidDigit` if `digit` is not an ASCII digit.
    pub fn insert(&mut self, digit: char, glyph: impl Into<String>) -> Result<(), ConfigError> {
        let slot = digit
            .to_digit(10)
            .filter(|_| digit.is_ascii_digit())
            .ok_or_else(|| ConfigError::InvalidDigit(digit.to_string()))?;
        self.glyphs[slot as usize] = glyph.into();
        Ok(())
    }

    /// Glyph configured for `digit`, if any
    pub fn glyph(&self, digit: char) -> Option<&str> {
        let slot = digit.to_digit(10).filter(|_| digit.is_ascii_digit())?;
        let glyph = self.glyphs[slot as usize].as_str();
        (!glyph.is_empty()).then_some(glyph)
    }

    /// Iterates the non-empty `(ascii digit, glyph)` pairs
    pub fn glyphs(&self) -> impl Iterator<Item = (char, &str)> + '_ {
        ('0'..='9')
            .zip(self.glyphs.iter())
            .filter(|(_, glyph)| !glyph.is_empty())
            .map(|(digit, glyph)| (digit, glyph.as_str()))
    }
}

impl TryFrom<BTreeMap<String, String>> for DigitTransformTable {
    type Error = ConfigError;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        let mut table = Self::new();
        for (key, glyph) in map {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(digit), None) => table.insert(digit, glyph)?,
                _ => return Err(ConfigError::InvalidDigit(key)),
            }
        }
        Ok(table)
    }
}

impl From<DigitTransformTable> for BTreeMap<String, String> {
    fn from(table: DigitTransformTable) -> Self {
        table
            .glyphs()
            .map(|(digit, glyph)| (digit.to_string(), glyph.to_owned()))
            .collect()
    }
}

/// Options driving a [`crate::DateFormatParser`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserOptions {
    /// Format template, in `sprintfDate` codes
    pub date_format: String,
    /// Localized digits; `None` accepts ASCII digits only
    pub digit_transform_table: Option<DigitTransformTable>,
    /// Localized month names; `None` accepts numeric months only
    pub month_names: Option<MonthNames>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_owned(),
            digit_transform_table: None,
            month_names: None,
        }
    }
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    #[must_use]
    pub fn with_digit_transform_table(mut self, table: DigitTransformTable) -> Self {
        self.digit_transform_table = Some(table);
        self
    }

    #[must_use]
    pub fn with_month_names(mut self, names: MonthNames) -> Self {
        self.month_names = Some(names);
        self
    }
}
