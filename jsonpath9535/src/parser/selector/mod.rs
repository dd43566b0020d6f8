//! Parses a bracketed selection, `[<selector> (',' <selector>)*]`, and each kind of
//! selector it may contain
mod filter;
mod function;
mod slice;

pub(crate) use function::parse_literal;

use jsonpath9535_core::spec::{
    segment::Segment,
    selector::{index::Index, name::Name, Selector},
};

use crate::lexer::TokenKind;

use super::{Parser, ParseOutcome};

pub(crate) fn parse_bracketed(parser: &mut Parser) -> ParseOutcome<Segment> {
    parser.expect(&TokenKind::LBracket)?;
    if matches!(parser.peek(), TokenKind::RBracket) {
        return parser.fail_validation(crate::error::ValidationError::EmptySegment);
    }
    let mut selectors = Vec::new();
    loop {
        selectors.push(parse_selector(parser)?);
        if matches!(parser.peek(), TokenKind::Comma) {
            parser.advance();
            continue;
        }
        break;
    }
    parser.expect(&TokenKind::RBracket)?;
    Ok(Segment::LongHand(selectors))
}

fn parse_selector(parser: &mut Parser) -> ParseOutcome<Selector> {
    match parser.peek().clone() {
        TokenKind::Star => {
            parser.advance();
            Ok(Selector::Wildcard)
        }
        TokenKind::String(s) => {
            parser.advance();
            Ok(Selector::Name(Name(s)))
        }
        TokenKind::Question => {
            parser.advance();
            Ok(Selector::Filter(filter::parse_filter(parser)?))
        }
        TokenKind::Number(_) | TokenKind::Colon => slice::parse_index_or_slice(parser),
        other => parser.fail(format!("expected a selector, found `{other}`")),
    }
}

/// Parse the text of a `Number` token as a bare (non-float) integer literal, used for
/// index selectors and slice bounds/step
pub(crate) fn parse_selector_int(parser: &mut Parser, text: &str) -> ParseOutcome<i64> {
    if super::primitive::number::is_float_literal(text) {
        if text == "-0" {
            return parser.fail_validation(crate::error::ValidationError::NegativeZeroIndex);
        }
        return parser.fail(format!("`{text}` is not a valid integer"));
    }
    text.parse::<i64>().map_err(|_| {
        super::Recoverable(crate::error::Error::Parse(crate::error::ParseError::new(
            parser.peek_pos(),
            format!("`{text}` is out of range"),
        )))
    })
}

pub(crate) fn index_from_i64(parser: &mut Parser, value: i64) -> ParseOutcome<Index> {
    use jsonpath9535_core::spec::integer::Integer;
    match Integer::try_new(value) {
        Ok(i) => Ok(Index::new(i)),
        Err(e) => parser.fail_validation(crate::error::ValidationError::Integer(e)),
    }
}
