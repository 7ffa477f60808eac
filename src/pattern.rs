//! Compiles a format template into an anchored, case-insensitive regex.
//!
//! Compilation happens in two steps so the lowering can be tested without
//! the regex engine:
//!
//! 1. **Lowering**: template tokens become [`Fragment`]s. Every field is
//!    followed by the optional separators the input may carry after it,
//!    unconditionally, so `"YF"` still tolerates `"2014 September"`.
//! 2. **Rendering**: fragments are written out as regex syntax. Digits are
//!    ASCII plus the configured localized glyphs, months alternate between a
//!    number and the configured names.
//!
//! ## Capture groups
//!
//! - `year`, `month`, `day`, `hour`, `minute`, `second`: raw field text.
//! - `month1` … `month12`: nested inside `month`, one per month with at
//!   least one configured name.
//!
//! Only the first occurrence of a field in a template is captured; repeats
//! are matched with the same shape but without a group, as the regex engine
//! rejects duplicate group names.
//!
//! The `regex` crate never backtracks, so separator runs like `\p{P}*\p{Z}*`
//! cannot blow up on adversarial input.

use crate::consts::{MONTH_GROUP, MONTH_NAME_GROUPS};
use crate::options::{DigitTransformTable, MonthNames};
use crate::prelude::*;
use crate::template::{self, Token};
use crate::types::Precision;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use std::fmt::Write;

/// How many digits a numeric field takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// One or two digits
    Short,
    /// One or more digits
    Unbounded,
}

/// Intermediate representation of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Text matched exactly (case-insensitively)
    Literal(String),
    /// A numeric field
    Number { field: Precision, width: Width },
    /// A month, as a number or one of the configured names
    Month,
    /// Zero or more punctuation characters
    Punctuation,
    /// Zero or more space separator characters
    Space,
}

/// A template compiled against a set of locale tables.
///
/// Derefs to the underlying [`Regex`].
#[derive(Debug, Clone, Deref)]
pub struct CompiledPattern {
    #[deref]
    regex: Regex,
    fragments: Vec<Fragment>,
}

impl CompiledPattern {
    /// The fragments the regex was rendered from
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }
}

/// Compiles `template` with the given locale tables.
///
/// # Errors
/// Fails only if the regex engine rejects the rendered pattern, which can
/// happen when huge month tables exceed its size limit.
pub fn compile(
    template: &str,
    month_names: Option<&MonthNames>,
    digits: Option<&DigitTransformTable>,
) -> Result<CompiledPattern, regex::Error> {
    let fragments = lower(&template::tokenize(template));
    let source = render(&fragments, month_names, digits);
    tracing::debug!(template, pattern = %source, "compiled date format");

    let regex = RegexBuilder::new(&source)
        .case_insensitive(true)
        .unicode(true)
        .build()?;
    Ok(CompiledPattern { regex, fragments })
}

/// Lowers template tokens into fragments
pub fn lower(tokens: &[Token]) -> Vec<Fragment> {
    let mut fragments = Vec::with_capacity(tokens.len() * 3);
    for token in tokens {
        match token {
            Token::Field(Precision::Year) => fragments.extend([
                Fragment::Number {
                    field: Precision::Year,
                    width: Width::Unbounded,
                },
                Fragment::Space,
            ]),
            Token::Field(Precision::Month) => {
                fragments.extend([Fragment::Month, Fragment::Punctuation, Fragment::Space]);
            }
            Token::Field(Precision::Day) => fragments.extend([
                Fragment::Number {
                    field: Precision::Day,
                    width: Width::Short,
                },
                Fragment::Punctuation,
                Fragment::Space,
            ]),
            &Token::Field(field) => fragments.extend([
                Fragment::Number {
                    field,
                    width: Width::Short,
                },
                Fragment::Space,
            ]),
            Token::Verbatim(text) => fragments.push(Fragment::Literal(text.clone())),
            Token::Punctuation => fragments.push(Fragment::Punctuation),
            Token::Space => fragments.push(Fragment::Space),
        }
    }
    fragments
}

/// Renders fragments as an anchored regex source string
pub fn render(
    fragments: &[Fragment],
    month_names: Option<&MonthNames>,
    digits: Option<&DigitTransformTable>,
) -> String {
    let digit_class = digit_class(digits);
    let mut captured = HashSet::new();
    let mut out = String::from(r"^\p{Z}*");

    for fragment in fragments {
        match fragment {
            Fragment::Literal(text) => out.push_str(&regex::escape(text)),
            Fragment::Number { field, width } => {
                let repeat = match width {
                    Width::Short => "{1,2}",
                    Width::Unbounded => "+",
                };
                let _ = write!(out, "({}{digit_class}{repeat})", open_group(*field, &mut captured));
            }
            Fragment::Month => {
                let first = captured.insert(Precision::Month);
                let open = if first {
                    format!("?P<{MONTH_GROUP}>")
                } else {
                    "?:".to_owned()
                };
                let _ = write!(out, "({open}{digit_class}{{1,2}}");
                for (month, names) in month_names.into_iter().flat_map(MonthNames::iter) {
                    let alternatives: Vec<String> =
                        names.into_iter().map(regex::escape).collect();
                    let open = if first {
                        format!("?P<{}>", MONTH_NAME_GROUPS[usize::from(month) - 1])
                    } else {
                        "?:".to_owned()
                    };
                    let _ = write!(out, "|({open}{})", alternatives.join("|"));
                }
                out.push(')');
            }
            Fragment::Punctuation => out.push_str(r"\p{P}*"),
            Fragment::Space => out.push_str(r"\p{Z}*"),
        }
    }

    out.push('$');
    out
}

/// Opens a named group for the first occurrence of `field`, a plain one after
fn open_group(field: Precision, captured: &mut HashSet<Precision>) -> String {
    if captured.insert(field) {
        format!("?P<{}>", field.group_name())
    } else {
        "?:".to_owned()
    }
}

/// Character class accepting ASCII digits and every configured glyph character
fn digit_class(digits: Option<&DigitTransformTable>) -> String {
    let mut class = String::from("[0-9");
    let mut seen = HashSet::new();
    for (_, glyph) in digits.into_iter().flat_map(DigitTransformTable::glyphs) {
        for c in glyph.chars().filter(|c| seen.insert(*c)) {
            class.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
        }
    }
    class.push(']');
    class
}
