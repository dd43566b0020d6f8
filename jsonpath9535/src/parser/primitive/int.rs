//! Parses the digit sequence of an integer literal, per RFC 9535 §2.1's `int` production
//!
//! A leading zero is only permitted when it is the entire integer (`0`); `010` is not a
//! valid JSONPath integer.
use nom::{
    branch::alt,
    character::complete::{char as nom_char, digit1, one_of},
    combinator::{opt, recognize},
    sequence::{pair, preceded},
    IResult,
};

fn parse_zero(input: &str) -> IResult<&str, &str> {
    recognize(nom_char('0'))(input)
}

fn parse_non_zero_int(input: &str) -> IResult<&str, &str> {
    recognize(pair(one_of("123456789"), digit1))(input)
}

fn parse_non_zero_single_digit(input: &str) -> IResult<&str, &str> {
    recognize(one_of("123456789"))(input)
}

/// The unsigned digit sequence: `0` or a non-zero digit followed by more digits
pub(crate) fn parse_int_string(input: &str) -> IResult<&str, &str> {
    alt((parse_zero, parse_non_zero_int, parse_non_zero_single_digit))(input)
}

/// A (possibly negative) integer literal's source text, e.g. for `[-]` and index/step
/// components of a slice selector
pub(crate) fn parse_signed_int_string(input: &str) -> IResult<&str, &str> {
    recognize(preceded(opt(nom_char('-')), parse_int_string))(input)
}

#[cfg(test)]
mod tests {
    use super::{parse_int_string, parse_signed_int_string};

    #[test]
    fn parses_zero() {
        assert_eq!(parse_int_string("0"), Ok(("", "0")));
    }

    #[test]
    fn parses_multi_digit() {
        assert_eq!(parse_int_string("123"), Ok(("", "123")));
    }

    #[test]
    fn stops_before_leading_zero_digit() {
        let (rest, matched) = parse_int_string("0123").unwrap();
        assert_eq!(matched, "0");
        assert_eq!(rest, "123");
    }

    #[test]
    fn parses_negative() {
        assert_eq!(parse_signed_int_string("-42"), Ok(("", "-42")));
    }
}
