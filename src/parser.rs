use crate::extract;
use crate::options::ParserOptions;
use crate::pattern::{self, CompiledPattern};
use crate::{ParseError, TimeValue};
use once_cell::sync::OnceCell;

/// Parses date strings rendered with a `sprintfDate`-style template.
///
/// The regex is compiled on first use and cached for the lifetime of the
/// options. The parser is `Send + Sync`; concurrent first calls compile at
/// most once.
///
/// ```
/// use date_format_parser::{DateFormatParser, MonthNames, ParserOptions, Precision};
///
/// let options = ParserOptions::new()
///     .with_date_format("d. M Y")
///     .with_month_names(MonthNames::new().with(9, ["September"])?);
/// let parser = DateFormatParser::new(options);
///
/// let value = parser.parse("1. September 2014")?;
/// assert_eq!(value.to_string(), "+2014-09-01T00:00:00Z");
/// assert_eq!(value.precision(), Precision::Day);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DateFormatParser {
    options: ParserOptions,
    pattern: OnceCell<CompiledPattern>,
}

impl DateFormatParser {
    /// Name of the value format this parser produces
    pub const FORMAT_NAME: &'static str = "datetime";

    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            pattern: OnceCell::new(),
        }
    }

    pub const fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Replaces the options; the pattern is recompiled on next use
    pub fn set_options(&mut self, options: ParserOptions) {
        self.options = options;
        self.pattern = OnceCell::new();
    }

    /// Returns the compiled pattern, compiling it if needed
    ///
    /// # Errors
    /// Returns `ParseError::Pattern` if the regex engine rejects the pattern.
    pub fn pattern(&self) -> Result<&CompiledPattern, ParseError> {
        self.pattern.get_or_try_init(|| {
            pattern::compile(
                &self.options.date_format,
                self.options.month_names.as_ref(),
                self.options.digit_transform_table.as_ref(),
            )
            .map_err(ParseError::from)
        })
    }

    /// Parses `input` into a timestamp
    ///
    /// # Errors
    /// Returns `ParseError::Unparseable` if the input does not match the
    /// template or carries no year.
    pub fn parse(&self, input: &str) -> Result<TimeValue, ParseError> {
        extract::extract(
            self.pattern()?,
            input,
            self.options.digit_transform_table.as_ref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::MonthNames;
    use crate::types::Precision;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_default_template_is_day_month_year() {
        let parser = DateFormatParser::default();
        assert_eq!(parser.options().date_format, "j F Y");
        let value = parser.parse("15 8 1991").unwrap();
        assert_eq!(value.to_string(), "+1991-08-15T00:00:00Z");
    }

    #[test]
    fn test_pattern_is_cached() {
        let parser = DateFormatParser::default();
        let first = parser.pattern().unwrap() as *const CompiledPattern;
        let second = parser.pattern().unwrap() as *const CompiledPattern;
        assert_eq!(first, second);
    }

    #[test]
    fn test_set_options_recompiles() {
        let mut parser = DateFormatParser::new(ParserOptions::new().with_date_format("Y"));
        assert!(parser.parse("2014").is_ok());
        assert!(parser.parse("9 2014").is_err());

        parser.set_options(ParserOptions::new().with_date_format("n Y"));
        assert_eq!(parser.options().date_format, "n Y");
        let value = parser.parse("9 2014").unwrap();
        assert_eq!(value.precision(), Precision::Month);
    }

    #[test]
    fn test_shared_across_threads() {
        let names = MonthNames::new().with(9, ["September"]).unwrap();
        let parser = Arc::new(DateFormatParser::new(
            ParserOptions::new()
                .with_date_format("d. M Y")
                .with_month_names(names),
        ));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let parser = Arc::clone(&parser);
                thread::spawn(move || parser.parse("1. September 2014").unwrap().to_string())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "+2014-09-01T00:00:00Z");
        }
    }

    #[test]
    fn test_format_name() {
        assert_eq!(DateFormatParser::FORMAT_NAME, "datetime");
    }
}
