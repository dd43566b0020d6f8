//! Tokenizes a JSONPath query string
//!
//! The lexer resolves, at each position, in order: whitespace, two-character lexemes,
//! single-character lexemes, a quoted string literal, a number literal, and finally a
//! bare identifier (used for dot-shorthand member names and function names). Anything
//! else is an illegal character.
mod token;

pub(crate) use token::{Span, Token, TokenKind};

use crate::error::{LexError, LexErrorKind};
use crate::parser::primitive::{number::parse_number_string, string::parse_string_literal};

/// Tokenize an entire query string
pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).run()
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn advance_by(&mut self, n: usize) {
        self.pos += n;
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let start = self.pos;
            if self.rest().is_empty() {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    span: Span { start, end: start },
                });
                break;
            }
            let kind = self.next_token()?;
            tokens.push(Token {
                kind,
                span: Span { start, end: self.pos },
            });
        }
        Ok(tokens)
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start_matches([' ', '\t', '\n', '\r']);
        self.pos += self.rest().len() - trimmed.len();
    }

    fn next_token(&mut self) -> Result<TokenKind, LexError> {
        if let Some(kind) = self.match_two_char() {
            self.advance_by(2);
            return Ok(kind);
        }
        if let Some(kind) = self.match_one_char() {
            self.advance_by(1);
            return Ok(kind);
        }
        if self.rest().starts_with(['\'', '"']) {
            return match parse_string_literal(self.rest()) {
                Ok((rest, s)) => {
                    let consumed = self.rest().len() - rest.len();
                    self.advance_by(consumed);
                    Ok(TokenKind::String(s))
                }
                Err(_) => Err(LexError {
                    position: self.pos,
                    kind: LexErrorKind::UnterminatedString,
                }),
            };
        }
        if self.rest().starts_with(|c: char| c.is_ascii_digit()) || self.rest().starts_with('-') {
            if let Ok((rest, text)) = parse_number_string(self.rest()) {
                let consumed = self.rest().len() - rest.len();
                self.advance_by(consumed);
                return Ok(TokenKind::Number(text.to_string()));
            }
        }
        if let Some(ident) = self.match_identifier() {
            let len = ident.len();
            self.advance_by(len);
            return Ok(TokenKind::Identifier(ident.to_string()));
        }
        let bad = self.rest().chars().next().unwrap();
        Err(LexError {
            position: self.pos,
            kind: LexErrorKind::IllegalChar(bad),
        })
    }

    fn match_two_char(&self) -> Option<TokenKind> {
        let r = self.rest();
        if r.starts_with("..") {
            Some(TokenKind::DotDot)
        } else if r.starts_with("==") {
            Some(TokenKind::Eq)
        } else if r.starts_with("!=") {
            Some(TokenKind::Ne)
        } else if r.starts_with("<=") {
            Some(TokenKind::Le)
        } else if r.starts_with(">=") {
            Some(TokenKind::Ge)
        } else if r.starts_with("&&") {
            Some(TokenKind::And)
        } else if r.starts_with("||") {
            Some(TokenKind::Or)
        } else {
            None
        }
    }

    fn match_one_char(&self) -> Option<TokenKind> {
        let c = self.rest().chars().next()?;
        let kind = match c {
            '$' => TokenKind::Root,
            '@' => TokenKind::Current,
            '.' => TokenKind::Dot,
            '*' => TokenKind::Star,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '?' => TokenKind::Question,
            '!' => TokenKind::Not,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            '=' => return None,
            _ => return None,
        };
        Some(kind)
    }

    fn match_identifier(&self) -> Option<&'a str> {
        let r = self.rest();
        let mut chars = r.char_indices();
        let (_, first) = chars.next()?;
        if !(first.is_ascii_alphabetic() || first == '_' || (first as u32) > 0x7F) {
            return None;
        }
        let mut end = first.len_utf8();
        for (idx, c) in chars {
            if c.is_ascii_alphanumeric() || c == '_' || (c as u32) > 0x7F {
                end = idx + c.len_utf8();
            } else {
                break;
            }
        }
        Some(&r[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::{tokenize, TokenKind};

    #[test]
    fn tokenizes_simple_path() {
        let tokens = tokenize("$.store.book[0]").unwrap();
        let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Root,
                TokenKind::Dot,
                TokenKind::Identifier("store".into()),
                TokenKind::Dot,
                TokenKind::Identifier("book".into()),
                TokenKind::LBracket,
                TokenKind::Number("0".into()),
                TokenKind::RBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn tokenizes_descendant_and_filter() {
        let tokens = tokenize("$..book[?@.price<10]").unwrap();
        assert!(tokens.iter().any(|t| t.kind == TokenKind::DotDot));
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Question));
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Lt));
    }

    #[test]
    fn rejects_illegal_character() {
        assert!(tokenize("$.foo#bar").is_err());
    }

    #[test]
    fn negative_number_is_one_token() {
        let tokens = tokenize("[-1]").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Number("-1".into()));
    }

    #[test]
    fn rejects_unterminated_string() {
        let err = tokenize("$['unterminated").unwrap_err();
        assert_eq!(err.kind, crate::error::LexErrorKind::UnterminatedString);
    }
}
