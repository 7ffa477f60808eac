//! Tokenizer for `sprintfDate`-style format templates.
//!
//! A template is read one code at a time. Codes are single characters, or
//! two characters starting with `x`; a few `x` codes (calendar variants such
//! as `xij` or `xkY`) take a third character. Unknown codes fall back to
//! their last character, which is then classified as punctuation,
//! whitespace or a literal.

use crate::consts::{
    CALENDAR_VARIANT_CODES, CODES_DAY, CODES_HOUR, CODES_MONTH, CODES_RAW, CODE_MINUTE,
    CODE_SECOND, CODE_YEAR, ESCAPE_CODE, EXTENDED_CODE_PREFIX, QUOTE_CHAR, QUOTE_CODE,
};
use crate::types::Precision;

/// One unit of a template, as seen by the pattern compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A date or time field
    Field(Precision),
    /// Text to match exactly (escaped characters, quoted literals, letters)
    Verbatim(String),
    /// A punctuation character; the input may carry any punctuation run here
    Punctuation,
    /// A whitespace character; the input may carry any whitespace run here
    Space,
}

/// Splits `template` into tokens. Never fails: dangling escapes and
/// unterminated quotes degrade to matching the character itself.
pub fn tokenize(template: &str) -> Vec<Token> {
    let chars: Vec<char> = template.chars().collect();
    let last = chars.len().saturating_sub(1);
    let mut tokens = Vec::new();
    let mut p = 0;

    while p < chars.len() {
        let mut code = chars[p].to_string();

        if chars[p] == EXTENDED_CODE_PREFIX && p < last {
            p += 1;
            code.push(chars[p]);

            if CALENDAR_VARIANT_CODES.contains(&chars[p]) && p < last {
                // Calendar variants only change how a number is rendered
                p += 2;
                continue;
            }
        }

        match code.as_str() {
            CODE_YEAR => tokens.push(Token::Field(Precision::Year)),
            c if CODES_MONTH.contains(&c) => tokens.push(Token::Field(Precision::Month)),
            c if CODES_DAY.contains(&c) => tokens.push(Token::Field(Precision::Day)),
            c if CODES_HOUR.contains(&c) => tokens.push(Token::Field(Precision::Hour)),
            CODE_MINUTE => tokens.push(Token::Field(Precision::Minute)),
            CODE_SECOND => tokens.push(Token::Field(Precision::Second)),
            c if CODES_RAW.contains(&c) => {}
            ESCAPE_CODE => {
                if p < last {
                    p += 1;
                }
                tokens.push(Token::Verbatim(chars[p].to_string()));
            }
            QUOTE_CODE => {
                match chars[p + 1..].iter().position(|&c| c == QUOTE_CHAR) {
                    Some(len) => {
                        let quoted: String = chars[p + 1..p + 1 + len].iter().collect();
                        if !quoted.is_empty() {
                            tokens.push(Token::Verbatim(quoted));
                        }
                        p += len + 1;
                    }
                    None => tokens.push(Token::Verbatim(QUOTE_CODE.to_owned())),
                }
            }
            _ => tokens.push(classify(chars[p])),
        }

        p += 1;
    }

    tokens
}

fn classify(c: char) -> Token {
    let mut buf = [0; 4];
    let s = c.encode_utf8(&mut buf);
    if regex!(r"^\p{P}$").is_match(s) {
        Token::Punctuation
    } else if regex!(r"^\p{Z}$").is_match(s) {
        Token::Space
    } else {
        Token::Verbatim(c.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verbatim(s: &str) -> Token {
        Token::Verbatim(s.to_owned())
    }

    #[test]
    fn test_field_codes() {
        use Precision::*;
        let tokens = tokenize("YFmMnxgdjGHis");
        let fields: Vec<_> = [
            Year, Month, Month, Month, Month, Month, Day, Day, Hour, Hour, Minute, Second,
        ]
        .into_iter()
        .map(Token::Field)
        .collect();
        assert_eq!(tokens, fields);
    }

    #[test]
    fn test_punctuation_and_space() {
        let tokens = tokenize("d. M Y");
        assert_eq!(
            tokens,
            vec![
                Token::Field(Precision::Day),
                Token::Punctuation,
                Token::Space,
                Token::Field(Precision::Month),
                Token::Space,
                Token::Field(Precision::Year),
            ]
        );
    }

    #[test]
    fn test_unicode_punctuation_and_space() {
        // EN DASH and NO-BREAK SPACE
        let tokens = tokenize("Y\u{2013}m\u{a0}d");
        assert_eq!(tokens[1], Token::Punctuation);
        assert_eq!(tokens[3], Token::Space);
    }

    #[test]
    fn test_letters_are_verbatim() {
        let tokens = tokenize("Y年");
        assert_eq!(tokens, vec![Token::Field(Precision::Year), verbatim("年")]);
    }

    #[test]
    fn test_escape() {
        let tokens = tokenize(r"\YY");
        assert_eq!(tokens, vec![verbatim("Y"), Token::Field(Precision::Year)]);

        // An escaped punctuation mark is matched exactly, not as a class
        let tokens = tokenize(r"d\.m");
        assert_eq!(tokens[1], verbatim("."));
    }

    #[test]
    fn test_trailing_escape_is_verbatim() {
        let tokens = tokenize(r"Y\");
        assert_eq!(tokens, vec![Token::Field(Precision::Year), verbatim("\\")]);
    }

    #[test]
    fn test_quoted_literal() {
        let tokens = tokenize(r#"j "de" F"#);
        assert_eq!(
            tokens,
            vec![
                Token::Field(Precision::Day),
                Token::Space,
                verbatim("de"),
                Token::Space,
                Token::Field(Precision::Month),
            ]
        );
    }

    #[test]
    fn test_quoted_literal_keeps_codes_and_punctuation() {
        let tokens = tokenize(r#""Y. d"Y"#);
        assert_eq!(tokens, vec![verbatim("Y. d"), Token::Field(Precision::Year)]);
    }

    #[test]
    fn test_empty_quotes_produce_nothing() {
        assert!(tokenize(r#""""#).is_empty());
    }

    #[test]
    fn test_unterminated_quote_is_verbatim() {
        let tokens = tokenize(r#"Y "d"#);
        assert_eq!(
            tokens,
            vec![
                Token::Field(Precision::Year),
                Token::Space,
                verbatim("\""),
                Token::Field(Precision::Day),
            ]
        );
    }

    #[test]
    fn test_raw_toggles_are_skipped() {
        let tokens = tokenize("xnYxN");
        assert_eq!(tokens, vec![Token::Field(Precision::Year)]);
    }

    #[test]
    fn test_calendar_variants_are_skipped() {
        let tokens = tokenize("xijxkY d");
        assert_eq!(tokens, vec![Token::Space, Token::Field(Precision::Day)]);
    }

    #[test]
    fn test_calendar_variant_prefix_at_end() {
        // Nothing left to lengthen: `xi` is unknown and falls back to `i`
        // as a literal, not the minute code
        let tokens = tokenize("Yxi");
        assert_eq!(tokens, vec![Token::Field(Precision::Year), verbatim("i")]);
    }

    #[test]
    fn test_unknown_extended_code_uses_last_char() {
        assert_eq!(tokenize("xx"), vec![verbatim("x")]);
        // `xY` is not a year code
        assert_eq!(tokenize("xY"), vec![verbatim("Y")]);
        assert_eq!(tokenize("x"), vec![verbatim("x")]);
        // `x\` and `x"` are unknown codes, not escapes or quotes
        assert_eq!(
            tokenize("x\\Y"),
            vec![Token::Punctuation, Token::Field(Precision::Year)]
        );
        assert_eq!(
            tokenize("x\"Y\""),
            vec![
                Token::Punctuation,
                Token::Field(Precision::Year),
                verbatim("\""),
            ]
        );
    }

    #[test]
    fn test_empty_template() {
        assert!(tokenize("").is_empty());
    }
}
