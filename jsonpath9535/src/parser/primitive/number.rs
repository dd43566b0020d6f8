//! Parses a JSON number literal, per RFC 9535 §2.1's `number` production
//!
//! `-0` (and `-0.0`, `-0e0`, ...) is always lexed as a float: RFC 9535 does not special-case
//! signed-zero integers, and using it where an `Integer` is required (an index or slice
//! bound) is rejected later, during parsing, not here.
use nom::{
    character::complete::{char as nom_char, digit1, one_of},
    combinator::{opt, recognize},
    sequence::{preceded, tuple},
    IResult,
};

use super::int::parse_int_string;

fn parse_fractional(input: &str) -> IResult<&str, &str> {
    recognize(preceded(nom_char('.'), digit1))(input)
}

fn parse_exponent(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        one_of("eE"),
        opt(one_of("+-")),
        digit1,
    )))(input)
}

/// The full source text of a JSON number literal
pub(crate) fn parse_number_string(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(nom_char('-')),
        parse_int_string,
        opt(parse_fractional),
        opt(parse_exponent),
    )))(input)
}

/// Whether a matched number literal's text denotes a float (has a `.` or exponent, or is
/// a negative zero) rather than a plain integer
pub(crate) fn is_float_literal(text: &str) -> bool {
    text.contains('.') || text.contains('e') || text.contains('E') || text == "-0"
}

/// Parse a JSON number literal into a [`serde_json::Number`]
pub(crate) fn parse_number(input: &str) -> IResult<&str, serde_json::Number> {
    let (rest, text) = parse_number_string(input)?;
    let number = if is_float_literal(text) {
        text.parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
    } else {
        text.parse::<i64>().ok().map(serde_json::Number::from)
    };
    match number {
        Some(n) => Ok((rest, n)),
        None => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Digit,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_zero_is_a_float() {
        assert!(is_float_literal("-0"));
    }

    #[test]
    fn plain_integer_is_not_a_float() {
        assert!(!is_float_literal("42"));
    }

    #[test]
    fn parses_exponent_form() {
        assert_eq!(parse_number_string("1.5e10"), Ok(("", "1.5e10")));
    }
}
