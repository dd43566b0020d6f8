//! Parses function calls, `name(arg, arg, ...)`, and the literals that may appear as
//! their arguments or as comparison operands
use serde_json::Value;

use jsonpath9535_core::spec::functions::{validate_call, FunctionExpr, FunctionExprArg, JsonPathTypeKind};

use crate::lexer::TokenKind;
use crate::parser::{primitive::number::is_float_literal, ParseOutcome, Parser};

use super::filter;

pub(crate) fn parse_function_expr(parser: &mut Parser, name: String) -> ParseOutcome<FunctionExpr> {
    parser.expect(&TokenKind::LParen)?;
    let mut args = Vec::new();
    if !matches!(parser.peek(), TokenKind::RParen) {
        loop {
            args.push(parse_function_arg(parser)?);
            if matches!(parser.peek(), TokenKind::Comma) {
                parser.advance();
                continue;
            }
            break;
        }
    }
    parser.expect(&TokenKind::RParen)?;

    let kinds: Vec<JsonPathTypeKind> = args.iter().map(FunctionExprArg::as_type_kind).collect();
    match validate_call(&name, &kinds) {
        Ok(return_type) => Ok(FunctionExpr { name, args, return_type }),
        Err(e) => parser.fail_validation(crate::error::ValidationError::Function(e)),
    }
}

fn parse_function_arg(parser: &mut Parser) -> ParseOutcome<FunctionExprArg> {
    match parser.peek().clone() {
        TokenKind::Root | TokenKind::Current => {
            let query = parser.parse_embedded_query()?;
            if query.is_singular() {
                Ok(FunctionExprArg::SingularQuery(filter::to_singular_query(parser, query)?))
            } else {
                Ok(FunctionExprArg::FilterQuery(query))
            }
        }
        TokenKind::Identifier(name) if is_bool_keyword(&name) => {
            parser.advance();
            Ok(FunctionExprArg::Literal(bool_keyword_value(&name)))
        }
        TokenKind::Identifier(name) => {
            parser.advance();
            Ok(FunctionExprArg::FunctionExpr(Box::new(parse_function_expr(parser, name)?)))
        }
        TokenKind::Number(_) | TokenKind::String(_) => Ok(FunctionExprArg::Literal(parse_literal(parser)?)),
        other => parser.fail(format!("expected a function argument, found `{other}`")),
    }
}

fn is_bool_keyword(s: &str) -> bool {
    matches!(s, "true" | "false" | "null")
}

fn bool_keyword_value(s: &str) -> Value {
    match s {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::Null,
    }
}

/// Parse a `Number`, `String`, or keyword (`true`/`false`/`null`) token as a literal JSON
/// value
pub(crate) fn parse_literal(parser: &mut Parser) -> ParseOutcome<Value> {
    match parser.peek().clone() {
        TokenKind::Number(text) => {
            parser.advance();
            if is_float_literal(&text) {
                let f: f64 = text.parse().map_err(|_| {
                    crate::parser::Recoverable(crate::error::Error::Parse(crate::error::ParseError::new(
                        parser.peek_pos(),
                        format!("`{text}` is not a valid number"),
                    )))
                })?;
                Ok(Value::from(f))
            } else {
                let i: i64 = text.parse().map_err(|_| {
                    crate::parser::Recoverable(crate::error::Error::Parse(crate::error::ParseError::new(
                        parser.peek_pos(),
                        format!("`{text}` is not a valid number"),
                    )))
                })?;
                Ok(Value::from(i))
            }
        }
        TokenKind::String(s) => {
            parser.advance();
            Ok(Value::String(s))
        }
        TokenKind::Identifier(name) if is_bool_keyword(&name) => {
            parser.advance();
            Ok(bool_keyword_value(&name))
        }
        other => parser.fail(format!("expected a literal, found `{other}`")),
    }
}

