//! Parses a filter selector's expression tree: `?<logical-or-expr>`
use jsonpath9535_core::spec::{
    functions::{require_logical_return, require_value_return, FunctionExpr},
    query::Query,
    segment::{QuerySegmentKind, Segment},
    selector::{
        filter::{
            BasicExpr, Comparable, ComparisonExpr, ComparisonOp, ExistExpr, Filter, LogicalAndExpr, LogicalOrExpr,
            Literal, SingularQuery, SingularQuerySegment,
        },
        Selector,
    },
};

use crate::lexer::TokenKind;
use crate::parser::{ParseOutcome, Parser};

use super::function::{parse_function_expr, parse_literal};

pub(crate) fn parse_filter(parser: &mut Parser) -> ParseOutcome<Filter> {
    Ok(Filter(parse_logical_or(parser)?))
}

fn parse_logical_or(parser: &mut Parser) -> ParseOutcome<LogicalOrExpr> {
    let mut clauses = vec![parse_logical_and(parser)?];
    while matches!(parser.peek(), TokenKind::Or) {
        parser.advance();
        clauses.push(parse_logical_and(parser)?);
    }
    Ok(LogicalOrExpr(clauses))
}

fn parse_logical_and(parser: &mut Parser) -> ParseOutcome<LogicalAndExpr> {
    let mut clauses = vec![parse_basic_expr(parser)?];
    while matches!(parser.peek(), TokenKind::And) {
        parser.advance();
        clauses.push(parse_basic_expr(parser)?);
    }
    Ok(LogicalAndExpr(clauses))
}

fn parse_basic_expr(parser: &mut Parser) -> ParseOutcome<BasicExpr> {
    if matches!(parser.peek(), TokenKind::Not) {
        parser.advance();
        return parse_negated_primary(parser);
    }
    if matches!(parser.peek(), TokenKind::LParen) {
        parser.advance();
        let inner = parse_logical_or(parser)?;
        parser.expect(&TokenKind::RParen)?;
        return Ok(BasicExpr::Paren(Box::new(inner)));
    }
    match parser.peek().clone() {
        TokenKind::Root | TokenKind::Current => {
            let query = parser.parse_embedded_query()?;
            if let Some(op) = peek_comparison_op(parser) {
                parser.advance();
                let lhs = query_to_comparable(parser, query)?;
                let rhs = parse_comparable(parser)?;
                Ok(BasicExpr::Comparison(ComparisonExpr { lhs, op, rhs }))
            } else {
                Ok(BasicExpr::Exist(ExistExpr(query)))
            }
        }
        TokenKind::Identifier(name) => {
            parser.advance();
            let func = parse_function_expr(parser, name)?;
            if let Some(op) = peek_comparison_op(parser) {
                parser.advance();
                require_value(parser, &func)?;
                let rhs = parse_comparable(parser)?;
                Ok(BasicExpr::Comparison(ComparisonExpr {
                    lhs: Comparable::FunctionExpr(func),
                    op,
                    rhs,
                }))
            } else {
                require_logical(parser, &func)?;
                Ok(BasicExpr::FunctionExpr(func))
            }
        }
        TokenKind::Number(_) | TokenKind::String(_) => {
            let lit = parse_literal(parser)?;
            let Some(op) = peek_comparison_op(parser) else {
                return parser.fail("a bare literal is not a valid filter expression; expected a comparison");
            };
            parser.advance();
            let rhs = parse_comparable(parser)?;
            Ok(BasicExpr::Comparison(ComparisonExpr {
                lhs: Comparable::Literal(Literal(lit)),
                op,
                rhs,
            }))
        }
        other => parser.fail(format!("expected a filter expression, found `{other}`")),
    }
}

fn parse_negated_primary(parser: &mut Parser) -> ParseOutcome<BasicExpr> {
    if matches!(parser.peek(), TokenKind::LParen) {
        parser.advance();
        let inner = parse_logical_or(parser)?;
        parser.expect(&TokenKind::RParen)?;
        return Ok(BasicExpr::NotParen(Box::new(inner)));
    }
    match parser.peek().clone() {
        TokenKind::Root | TokenKind::Current => {
            let query = parser.parse_embedded_query()?;
            Ok(BasicExpr::NotExist(ExistExpr(query)))
        }
        TokenKind::Identifier(name) => {
            parser.advance();
            let func = parse_function_expr(parser, name)?;
            require_logical(parser, &func)?;
            Ok(BasicExpr::NotFunctionExpr(func))
        }
        other => parser.fail(format!("expected a query or function call after `!`, found `{other}`")),
    }
}

fn require_logical(parser: &Parser, func: &FunctionExpr) -> ParseOutcome<()> {
    match require_logical_return(&func.name) {
        Ok(()) => Ok(()),
        Err(e) => parser.fail_validation(crate::error::ValidationError::Function(e)),
    }
}

fn require_value(parser: &Parser, func: &FunctionExpr) -> ParseOutcome<()> {
    match require_value_return(&func.name) {
        Ok(()) => Ok(()),
        Err(e) => parser.fail_validation(crate::error::ValidationError::Function(e)),
    }
}

fn peek_comparison_op(parser: &Parser) -> Option<ComparisonOp> {
    match parser.peek() {
        TokenKind::Eq => Some(ComparisonOp::EqualTo),
        TokenKind::Ne => Some(ComparisonOp::NotEqualTo),
        TokenKind::Lt => Some(ComparisonOp::LessThan),
        TokenKind::Le => Some(ComparisonOp::LessThanEqual),
        TokenKind::Gt => Some(ComparisonOp::GreaterThan),
        TokenKind::Ge => Some(ComparisonOp::GreaterThanEqual),
        _ => None,
    }
}

fn parse_comparable(parser: &mut Parser) -> ParseOutcome<Comparable> {
    match parser.peek().clone() {
        TokenKind::Number(_) | TokenKind::String(_) => Ok(Comparable::Literal(Literal(parse_literal(parser)?))),
        TokenKind::Identifier(name) if matches!(name.as_str(), "true" | "false" | "null") => {
            Ok(Comparable::Literal(Literal(parse_literal(parser)?)))
        }
        TokenKind::Root | TokenKind::Current => {
            let query = parser.parse_embedded_query()?;
            query_to_comparable(parser, query)
        }
        TokenKind::Identifier(name) => {
            parser.advance();
            let func = parse_function_expr(parser, name)?;
            require_value(parser, &func)?;
            Ok(Comparable::FunctionExpr(func))
        }
        other => parser.fail(format!("expected a comparable value, found `{other}`")),
    }
}

fn query_to_comparable(parser: &mut Parser, query: Query) -> ParseOutcome<Comparable> {
    Ok(Comparable::SingularQuery(to_singular_query(parser, query)?))
}

/// Convert a parsed [`Query`] into a [`SingularQuery`], failing if it is not guaranteed
/// to produce at most one node
pub(crate) fn to_singular_query(parser: &mut Parser, query: Query) -> ParseOutcome<SingularQuery> {
    if !query.is_singular() {
        return parser.fail("expected a singular query (only name and index selectors) here");
    }
    let mut segments = Vec::with_capacity(query.segments.len());
    for seg in &query.segments {
        debug_assert_eq!(seg.kind, QuerySegmentKind::Child);
        let converted = match &seg.segment {
            Segment::DotName(name) => SingularQuerySegment::Name(name.clone()),
            Segment::LongHand(selectors) => match selectors.as_slice() {
                [Selector::Name(n)] => SingularQuerySegment::Name(n.as_str().to_owned()),
                [Selector::Index(i)] => SingularQuerySegment::Index(i.value()),
                _ => return parser.fail("expected a singular query (only name and index selectors) here"),
            },
            Segment::Wildcard => return parser.fail("expected a singular query (only name and index selectors) here"),
        };
        segments.push(converted);
    }
    Ok(SingularQuery {
        kind: query.kind,
        segments,
    })
}

#[cfg(test)]
mod tests {
    use crate::parser::parse_jsonpath;

    #[test]
    fn parses_comparison_filter() {
        assert!(parse_jsonpath("$[?@.price<10]").is_ok());
    }

    #[test]
    fn parses_existence_filter() {
        assert!(parse_jsonpath("$[?@.isbn]").is_ok());
    }

    #[test]
    fn parses_and_or_and_negation() {
        assert!(parse_jsonpath("$[?@.a && @.b || !@.c]").is_ok());
    }

    #[test]
    fn parses_function_call_filter() {
        assert!(parse_jsonpath("$[?length(@.a)>2]").is_ok());
    }

    #[test]
    fn rejects_non_singular_query_as_comparable() {
        assert!(parse_jsonpath("$[?@.* == 1]").is_err());
    }

    #[test]
    fn rejects_a_value_returning_function_used_as_a_bare_filter() {
        assert!(parse_jsonpath("$[?value(@.a)]").is_err());
    }

    #[test]
    fn rejects_a_logical_returning_function_used_as_a_comparable() {
        assert!(parse_jsonpath("$[?match(@, 'a') == true]").is_err());
    }

    #[test]
    fn accepts_a_singular_query_argument_to_a_nodes_type_parameter() {
        assert!(parse_jsonpath("$[?count(@.a) == 1]").is_ok());
        assert!(parse_jsonpath("$[?value(@.a) == 1]").is_ok());
    }

    #[test]
    fn rejects_a_literal_argument_to_a_nodes_type_parameter() {
        assert!(parse_jsonpath("$[?count(1)]").is_err());
    }
}
