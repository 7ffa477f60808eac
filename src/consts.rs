/// Template used when no `dateFormat` option is given: day, full month name, year
pub const DEFAULT_DATE_FORMAT: &str = "j F Y";

/// Prefix of the extended (multi-character) template codes
pub const EXTENDED_CODE_PREFIX: char = 'x';
/// Escapes the following template character
pub const ESCAPE_CODE: &str = "\\";
/// Opens and closes a quoted literal in a template
pub const QUOTE_CODE: &str = "\"";
pub const QUOTE_CHAR: char = '"';

/// Second characters of extended codes that take one more character
/// (calendar variants such as `xij` or `xkY`)
pub const CALENDAR_VARIANT_CODES: [char; 6] = ['i', 'j', 'k', 'm', 'o', 't'];

/// Year, e.g. `2014`
pub const CODE_YEAR: &str = "Y";
/// Month codes: full name, zero-padded number, abbreviated name, number,
/// genitive name
pub const CODES_MONTH: [&str; 5] = ["F", "m", "M", "n", "xg"];
/// Day of month, zero-padded and not
pub const CODES_DAY: [&str; 2] = ["d", "j"];
/// Hour, 24-hour clock (12-hour codes are not distinguished when parsing)
pub const CODES_HOUR: [&str; 2] = ["G", "H"];
/// Minutes
pub const CODE_MINUTE: &str = "i";
/// Seconds
pub const CODE_SECOND: &str = "s";
/// Raw output toggles; no effect on parsing
pub const CODES_RAW: [&str; 2] = ["xn", "xN"];

/// Number of months in a year, and of month-name slots
pub const MONTHS: usize = 12;
/// Number of ASCII digits, and of digit transform slots
pub const DIGITS: usize = 10;

/// Name of the capture group holding the numeric or named month
pub const MONTH_GROUP: &str = "month";
/// Names of the per-month alternation groups, index 0 is January
pub const MONTH_NAME_GROUPS: [&str; MONTHS] = [
    "month1", "month2", "month3", "month4", "month5", "month6", "month7", "month8", "month9",
    "month10", "month11", "month12",
];

/// Precision codes as used by the Wikibase time data type
pub const PRECISION_YEAR: u8 = 9;
pub const PRECISION_MONTH: u8 = 10;
pub const PRECISION_DAY: u8 = 11;
pub const PRECISION_HOUR: u8 = 12;
pub const PRECISION_MINUTE: u8 = 13;
pub const PRECISION_SECOND: u8 = 14;

/// Concept URI of the proleptic Gregorian calendar
pub const CALENDAR_GREGORIAN: &str = "http://www.wikidata.org/entity/Q1985727";
/// Concept URI of the proleptic Julian calendar
pub const CALENDAR_JULIAN: &str = "http://www.wikidata.org/entity/Q1985786";
