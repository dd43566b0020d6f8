//! Disambiguates and parses the `index` and `slice` selectors, which share a leading
//! `Number` or `Colon` token
use jsonpath9535_core::spec::selector::{slice::Slice, Selector};

use crate::lexer::TokenKind;

use super::{index_from_i64, parse_selector_int};
use crate::parser::{ParseOutcome, Parser};

pub(crate) fn parse_index_or_slice(parser: &mut Parser) -> ParseOutcome<Selector> {
    if matches!(parser.peek(), TokenKind::Colon) {
        return parse_slice(parser, None);
    }
    let TokenKind::Number(text) = parser.peek().clone() else {
        unreachable!("caller only dispatches Number or Colon here")
    };
    parser.advance();
    if matches!(parser.peek(), TokenKind::Colon) {
        let start = parse_selector_int(parser, &text)?;
        return parse_slice(parser, Some(start));
    }
    let value = parse_selector_int(parser, &text)?;
    Ok(Selector::Index(index_from_i64(parser, value)?))
}

fn parse_slice(parser: &mut Parser, start: Option<i64>) -> ParseOutcome<Selector> {
    parser.expect(&TokenKind::Colon)?;
    let end = parse_optional_bound(parser)?;
    let step = if matches!(parser.peek(), TokenKind::Colon) {
        parser.advance();
        parse_optional_bound(parser)?
    } else {
        None
    };
    Ok(Selector::Slice(Slice { start, end, step }))
}

fn parse_optional_bound(parser: &mut Parser) -> ParseOutcome<Option<i64>> {
    if let TokenKind::Number(text) = parser.peek().clone() {
        parser.advance();
        Ok(Some(parse_selector_int(parser, &text)?))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse_jsonpath;
    use jsonpath9535_core::spec::{segment::Segment, selector::Selector};

    fn only_selector(query: &str) -> Selector {
        let q = parse_jsonpath(query).unwrap();
        match &q.segments[0].segment {
            Segment::LongHand(sels) => sels[0].clone(),
            _ => panic!("expected a bracketed segment"),
        }
    }

    #[test]
    fn parses_bare_index() {
        assert!(matches!(only_selector("$[3]"), Selector::Index(_)));
    }

    #[test]
    fn parses_full_slice() {
        assert!(matches!(only_selector("$[1:5:2]"), Selector::Slice(_)));
    }

    #[test]
    fn parses_slice_with_omitted_start() {
        assert!(matches!(only_selector("$[:5]"), Selector::Slice(_)));
    }

    #[test]
    fn rejects_negative_zero_index() {
        assert!(parse_jsonpath("$[-0]").is_err());
    }
}
