//! Turns a pattern match into a [`TimeValue`].

use crate::consts::{MONTH_GROUP, MONTH_NAME_GROUPS};
use crate::options::DigitTransformTable;
use crate::pattern::CompiledPattern;
use crate::types::{CalendarModel, Precision, Year};
use crate::{ParseError, TimeValue};
use regex::Captures;

/// Finer fields, checked independently after the month
const TIME_FIELDS: [Precision; 4] = [
    Precision::Day,
    Precision::Hour,
    Precision::Minute,
    Precision::Second,
];

/// Matches `input` against `pattern` and assembles the timestamp.
///
/// Precision is the finest field that captured something; absent fields
/// are 0.
///
/// # Errors
/// Returns `ParseError::Unparseable` if the pattern does not match or
/// captures no year.
pub fn extract(
    pattern: &CompiledPattern,
    input: &str,
    digits: Option<&DigitTransformTable>,
) -> Result<TimeValue, ParseError> {
    let unparseable = || ParseError::Unparseable {
        input: input.to_owned(),
        normalized: translate_digits(input, digits),
    };

    let Some(caps) = pattern.captures(input) else {
        tracing::trace!(input, "date format did not match");
        return Err(unparseable());
    };
    let raw_year = caps.name(Precision::Year.group_name()).ok_or_else(unparseable)?;
    let year = Year::new(false, &normalize_number(raw_year.as_str(), digits))
        .map_err(|_| unparseable())?;

    let mut precision = Precision::Year;
    // Indexed by `Precision`; the year slot stays unused
    let mut fields = [0_u8; Precision::ALL.len()];

    if let Some(raw_month) = caps.name(MONTH_GROUP) {
        fields[Precision::Month as usize] = match named_month(&caps) {
            Some(month) => month,
            None => field_value(raw_month.as_str(), digits).ok_or_else(unparseable)?,
        };
        precision = Precision::Month;
    }

    for field in TIME_FIELDS {
        if let Some(raw) = caps.name(field.group_name()) {
            fields[field as usize] = field_value(raw.as_str(), digits).ok_or_else(unparseable)?;
            precision = field;
        }
    }

    let [_, month, day, hour, minute, second] = fields;
    let timestamp = format!("{year}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}Z");
    tracing::trace!(input, %timestamp, %precision, "parsed date");

    TimeValue::new(&timestamp, 0, 0, 0, precision, CalendarModel::Gregorian)
        .map_err(|_| unparseable())
}

/// Month number of the first `monthN` group that matched something
fn named_month(caps: &Captures<'_>) -> Option<u8> {
    (1..)
        .zip(MONTH_NAME_GROUPS)
        .find(|(_, group)| caps.name(group).is_some_and(|m| !m.as_str().is_empty()))
        .map(|(month, _)| month)
}

fn field_value(raw: &str, digits: Option<&DigitTransformTable>) -> Option<u8> {
    normalize_number(raw, digits).parse().ok()
}

/// Replaces localized digit glyphs with ASCII digits, leaving everything
/// else untouched. Longer glyphs are tried first.
pub fn translate_digits(text: &str, digits: Option<&DigitTransformTable>) -> String {
    let mut glyphs: Vec<(char, &str)> = digits
        .into_iter()
        .flat_map(DigitTransformTable::glyphs)
        .collect();
    if glyphs.is_empty() {
        return text.to_owned();
    }
    glyphs.sort_by_key(|(_, glyph)| std::cmp::Reverse(glyph.len()));

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        match glyphs.iter().find(|(_, glyph)| rest.starts_with(glyph)) {
            Some((digit, glyph)) => {
                out.push(*digit);
                rest = &rest[glyph.len()..];
            }
            None => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    out
}

/// Translates localized digits and drops everything that is not an ASCII
/// digit
pub fn normalize_number(text: &str, digits: Option<&DigitTransformTable>) -> String {
    translate_digits(text, digits)
        .chars()
        .filter(char::is_ascii_digit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::MonthNames;
    use crate::pattern::compile;

    fn arabic_indic() -> DigitTransformTable {
        DigitTransformTable::from_glyphs(["٠", "١", "٢", "٣", "٤", "٥", "٦", "٧", "٨", "٩"])
    }

    #[test]
    fn test_translate_digits() {
        let table = arabic_indic();
        assert_eq!(translate_digits("١٩٩١-٠٨", Some(&table)), "1991-08");
        assert_eq!(translate_digits("١٩٩١-٠٨", None), "١٩٩١-٠٨");
    }

    #[test]
    fn test_translate_digits_prefers_longer_glyphs() {
        let mut table = DigitTransformTable::new();
        table.insert('1', "a").unwrap();
        table.insert('2', "ab").unwrap();
        assert_eq!(translate_digits("aba", Some(&table)), "21");
    }

    #[test]
    fn test_normalize_number_strips_non_digits() {
        assert_eq!(normalize_number("1.", None), "1");
        assert_eq!(normalize_number(" 2 014 ", None), "2014");
        assert_eq!(normalize_number("٢٠١٤", Some(&arabic_indic())), "2014");
        assert_eq!(normalize_number("abc", None), "");
    }

    #[test]
    fn test_extract_year_only() {
        let pattern = compile("Y", None, None).unwrap();
        let value = extract(&pattern, "2014", None).unwrap();
        assert_eq!(value.to_string(), "+2014-00-00T00:00:00Z");
        assert_eq!(value.precision(), Precision::Year);
    }

    #[test]
    fn test_extract_missing_year_is_unparseable() {
        let pattern = compile("d.m.", None, None).unwrap();
        let result = extract(&pattern, "1.9.", None);
        assert!(matches!(
            result,
            Err(ParseError::Unparseable { ref input, .. }) if input == "1.9."
        ));
    }

    #[test]
    fn test_extract_named_month_wins_over_number() {
        let names = MonthNames::new().with(3, ["Mär"]).unwrap();
        let pattern = compile("j. M Y", Some(&names), None).unwrap();
        let value = extract(&pattern, "4. Mär. 1201", None).unwrap();
        assert_eq!(value.to_string(), "+1201-03-04T00:00:00Z");
    }

    #[test]
    fn test_extract_localized_digits() {
        let table = arabic_indic();
        let pattern = compile("j.n.Y", None, Some(&table)).unwrap();
        let value = extract(&pattern, "١.٩.٢٠١٤", Some(&table)).unwrap();
        assert_eq!(value.to_string(), "+2014-09-01T00:00:00Z");
        assert_eq!(value.precision(), Precision::Day);
    }

    #[test]
    fn test_extract_error_carries_normalized_input() {
        let table = arabic_indic();
        let pattern = compile("Y", None, Some(&table)).unwrap();
        let err = extract(&pattern, "x٢٠١٤", Some(&table)).unwrap_err();
        assert_eq!(
            err,
            ParseError::Unparseable {
                input: "x٢٠١٤".to_owned(),
                normalized: "x2014".to_owned(),
            }
        );
        assert_eq!(err.to_string(), "Failed to parse x٢٠١٤ (x2014)");
    }
}
