//! Parses the body of a single- or double-quoted string literal
//!
//! Adapted from the unescaping grammar of RFC 9535 §2.3.1.1: surrogate pairs in
//! `\uXXXX` escapes are recombined into a single `char`, and the two quote styles share
//! escape handling apart from which quote character terminates the literal and which one
//! may appear unescaped.
use nom::{
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::char as nom_char,
    combinator::{map, map_opt, value, verify},
    multi::fold_many0,
    sequence::{delimited, preceded},
    IResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringQuote {
    Single,
    Double,
}

fn parse_hex_char(input: &str) -> IResult<&str, u32> {
    map_opt(
        nom::bytes::complete::take_while_m_n(4, 4, |c: char| c.is_ascii_hexdigit()),
        |hex| u32::from_str_radix(hex, 16).ok(),
    )(input)
}

fn parse_unicode_sequence(input: &str) -> IResult<&str, u32> {
    preceded(nom_char('u'), parse_hex_char)(input)
}

fn parse_high_surrogate(input: &str) -> IResult<&str, u32> {
    verify(parse_unicode_sequence, |cp| (0xD800..=0xDBFF).contains(cp))(input)
}

fn parse_low_surrogate(input: &str) -> IResult<&str, u32> {
    verify(parse_unicode_sequence, |cp| (0xDC00..=0xDFFF).contains(cp))(input)
}

fn parse_surrogate(input: &str) -> IResult<&str, char> {
    map_opt(
        nom::sequence::pair(parse_high_surrogate, preceded(tag("\\"), parse_low_surrogate)),
        |(high, low)| {
            let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
            char::from_u32(combined)
        },
    )(input)
}

fn parse_non_surrogate(input: &str) -> IResult<&str, char> {
    map_opt(parse_unicode_sequence, char::from_u32)(input)
}

fn parse_escaped_char(_quote: StringQuote) -> impl Fn(&str) -> IResult<&str, char> {
    move |input| {
        preceded(
            nom_char('\\'),
            alt((
                parse_surrogate,
                parse_non_surrogate,
                value('\u{08}', nom_char('b')),
                value('\u{0C}', nom_char('f')),
                value('\n', nom_char('n')),
                value('\r', nom_char('r')),
                value('\t', nom_char('t')),
                value('/', nom_char('/')),
                value('\\', nom_char('\\')),
                value('\'', nom_char('\'')),
                value('"', nom_char('"')),
            )),
        )(input)
    }
}

fn parse_unescaped(quote: StringQuote) -> impl Fn(&str) -> IResult<&str, &str> {
    move |input| {
        let excluded: &[char] = match quote {
            StringQuote::Single => &['\'', '\\'],
            StringQuote::Double => &['"', '\\'],
        };
        is_not(excluded)(input)
    }
}

#[derive(Debug, Clone)]
enum StringFragment<'a> {
    Literal(&'a str),
    EscapedChar(char),
}

fn parse_fragment(quote: StringQuote) -> impl Fn(&str) -> IResult<&str, StringFragment<'_>> {
    move |input| {
        alt((
            map(parse_unescaped(quote), StringFragment::Literal),
            map(parse_escaped_char(quote), StringFragment::EscapedChar),
        ))(input)
    }
}

fn parse_internal(quote: StringQuote) -> impl Fn(&str) -> IResult<&str, String> {
    move |input| {
        fold_many0(parse_fragment(quote), String::new, |mut acc, frag| {
            match frag {
                StringFragment::Literal(s) => acc.push_str(s),
                StringFragment::EscapedChar(c) => acc.push(c),
            }
            acc
        })(input)
    }
}

fn parse_single_quoted(input: &str) -> IResult<&str, String> {
    delimited(nom_char('\''), parse_internal(StringQuote::Single), nom_char('\''))(input)
}

fn parse_double_quoted(input: &str) -> IResult<&str, String> {
    delimited(nom_char('"'), parse_internal(StringQuote::Double), nom_char('"'))(input)
}

/// Parse a full single- or double-quoted string literal (quotes included) from the
/// start of `input`
pub(crate) fn parse_string_literal(input: &str) -> IResult<&str, String> {
    alt((parse_single_quoted, parse_double_quoted))(input)
}
