//! A token-based recursive-descent parser building the RFC 9535 JSONPath AST
pub(crate) mod primitive;
pub(crate) mod selector;

use jsonpath9535_core::spec::{
    query::{Query, QueryKind},
    segment::{QuerySegment, QuerySegmentKind, Segment},
};

use crate::{
    error::{Error, ParseError, ValidationError},
    lexer::{self, Token, TokenKind},
};

/// A recoverable parse failure: either a plain syntax error or a static validation
/// error (an out-of-range integer, an ill-typed function call, `-0` as an index, ...)
/// detected while building the AST. Kept as the furthest-reaching error encountered, so
/// that when every alternative in a choice point fails, the most informative one is
/// reported rather than the first.
#[derive(Debug)]
pub(crate) struct Recoverable(pub(crate) Error);

/// The result of a single parsing production
pub(crate) type ParseOutcome<T> = Result<T, Recoverable>;

pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

/// Parse a complete JSONPath query string, starting at `$`
pub(crate) fn parse_jsonpath(input: &str) -> Result<Query, Error> {
    let tokens = lexer::tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    let query = parser.parse_root_query().map_err(|r| r.0)?;
    parser.expect_eof().map_err(|r| r.0)?;
    Ok(query)
}

impl Parser {
    pub(crate) fn peek(&self) -> &TokenKind {
        &self.tokens[self.pos.min(self.tokens.len() - 1)].kind
    }

    pub(crate) fn peek_pos(&self) -> usize {
        self.tokens[self.pos.min(self.tokens.len() - 1)].span.start
    }

    pub(crate) fn advance(&mut self) -> TokenKind {
        let tok = self.tokens[self.pos.min(self.tokens.len() - 1)].kind.clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    pub(crate) fn fail<T>(&self, message: impl Into<String>) -> ParseOutcome<T> {
        Err(Recoverable(Error::Parse(ParseError::new(self.peek_pos(), message))))
    }

    /// Fail with a static validation error rather than a plain syntax error
    pub(crate) fn fail_validation<T>(&self, err: ValidationError) -> ParseOutcome<T> {
        Err(Recoverable(Error::Validation(err)))
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> ParseOutcome<()> {
        if std::mem::discriminant(self.peek()) == std::mem::discriminant(kind) {
            self.advance();
            Ok(())
        } else {
            self.fail(format!("expected `{kind}`, found `{}`", self.peek()))
        }
    }

    fn expect_eof(&mut self) -> ParseOutcome<()> {
        if matches!(self.peek(), TokenKind::Eof) {
            Ok(())
        } else {
            self.fail(format!("unexpected trailing input `{}`", self.peek()))
        }
    }

    fn parse_root_query(&mut self) -> ParseOutcome<Query> {
        self.expect(&TokenKind::Root)?;
        let segments = self.parse_segments()?;
        Ok(Query {
            kind: QueryKind::Root,
            segments,
        })
    }

    /// Parse a query embedded inside a filter expression: `$...` or `@...`
    pub(crate) fn parse_embedded_query(&mut self) -> ParseOutcome<Query> {
        let kind = match self.peek() {
            TokenKind::Root => {
                self.advance();
                QueryKind::Root
            }
            TokenKind::Current => {
                self.advance();
                QueryKind::Current
            }
            other => return self.fail(format!("expected `$` or `@`, found `{other}`")),
        };
        let segments = self.parse_segments()?;
        Ok(Query { kind, segments })
    }

    fn parse_segments(&mut self) -> ParseOutcome<Vec<QuerySegment>> {
        let mut segments = Vec::new();
        loop {
            match self.peek() {
                TokenKind::DotDot => {
                    self.advance();
                    let segment = self.parse_segment_body()?;
                    segments.push(QuerySegment {
                        kind: QuerySegmentKind::Descendant,
                        segment,
                    });
                }
                TokenKind::Dot => {
                    self.advance();
                    let segment = match self.advance() {
                        TokenKind::Star => Segment::Wildcard,
                        TokenKind::Identifier(name) => Segment::DotName(name),
                        other => return self.fail(format!("expected a name or `*` after `.`, found `{other}`")),
                    };
                    segments.push(QuerySegment {
                        kind: QuerySegmentKind::Child,
                        segment,
                    });
                }
                TokenKind::LBracket => {
                    let segment = selector::parse_bracketed(self)?;
                    segments.push(QuerySegment {
                        kind: QuerySegmentKind::Child,
                        segment,
                    });
                }
                _ => break,
            }
        }
        Ok(segments)
    }

    /// The segment immediately following a `..` token: a wildcard, a bracketed
    /// selection, or a bare member name
    fn parse_segment_body(&mut self) -> ParseOutcome<Segment> {
        match self.peek() {
            TokenKind::Star => {
                self.advance();
                Ok(Segment::Wildcard)
            }
            TokenKind::LBracket => selector::parse_bracketed(self),
            TokenKind::Identifier(_) => {
                let TokenKind::Identifier(name) = self.advance() else {
                    unreachable!()
                };
                Ok(Segment::DotName(name))
            }
            other => self.fail(format!("expected a name, `*`, or `[` after `..`, found `{other}`")),
        }
    }
}

impl From<Recoverable> for Error {
    fn from(r: Recoverable) -> Self {
        r.0
    }
}
