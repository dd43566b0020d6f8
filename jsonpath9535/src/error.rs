//! The error taxonomy returned when a query string fails to lex, parse, or validate
//!
//! Evaluation itself never produces an error: cycle and depth-cap conditions are reported
//! as [`jsonpath9535_core::warning::Warning`]s through a caller-supplied sink instead.
use jsonpath9535_core::spec::functions::FunctionValidationError;
use jsonpath9535_core::spec::integer::IntegerError;

/// Everything that can go wrong turning a query string into a usable [`crate::JsonPath`]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input contained a character, or an unterminated literal, the lexer could not
    /// tokenize
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The token stream did not match the JSONPath grammar
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The query was syntactically well-formed but violates a static constraint: an
    /// out-of-range integer literal, an ill-typed function call, or similar
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    /// Render a single-line, human-readable message with a caret pointing at the byte
    /// offset where the problem was detected, if one is known
    pub fn display_with_source(&self, source: &str) -> String {
        self.render(source, false)
    }

    /// Like [`Error::display_with_source`], but wraps the caret line in ANSI bold-red
    /// escape codes for terminals that support them
    ///
    /// Callers are responsible for deciding whether the output terminal supports ANSI;
    /// this crate does no terminal detection of its own.
    pub fn display_with_source_ansi(&self, source: &str) -> String {
        self.render(source, true)
    }

    fn render(&self, source: &str, ansi: bool) -> String {
        let Some(pos) = self.position() else {
            return self.to_string();
        };
        let mut caret = String::new();
        for _ in 0..pos {
            caret.push(' ');
        }
        caret.push('^');
        if ansi {
            format!("{self}\n  {source}\n  \x1b[1;31m{caret}\x1b[0m")
        } else {
            format!("{self}\n  {source}\n  {caret}")
        }
    }

    fn position(&self) -> Option<usize> {
        match self {
            Error::Lex(e) => Some(e.position),
            Error::Parse(e) => Some(e.position),
            Error::Validation(_) => None,
        }
    }
}

/// A lexical error: an illegal character or an unterminated string literal
#[derive(Debug, thiserror::Error)]
#[error("{kind} at byte offset {position}")]
pub struct LexError {
    /// The byte offset into the source string where the error was detected
    pub position: usize,
    /// What went wrong
    pub kind: LexErrorKind,
}

/// The specific kind of [`LexError`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    /// A character that cannot begin any valid token
    #[error("illegal character {0:?}")]
    IllegalChar(char),
    /// A string literal was opened but never closed
    #[error("unterminated string literal")]
    UnterminatedString,
}

/// A syntax error: the token stream does not match the JSONPath grammar
#[derive(Debug, thiserror::Error)]
#[error("{message} at byte offset {position}")]
pub struct ParseError {
    /// The byte offset into the source string where the error was detected
    pub position: usize,
    /// A human-readable description of what was expected
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

/// A static validity error, detected after a successful parse
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// An integer literal (an index, or a slice bound/step) fell outside
    /// [-(2**53)+1, (2**53)-1]
    #[error(transparent)]
    Integer(#[from] IntegerError),
    /// A function call did not type-check against its declared signature
    #[error(transparent)]
    Function(#[from] FunctionValidationError),
    /// `-0` was used as an index selector, which RFC 9535 treats as a float literal, not
    /// a valid integer index
    #[error("`-0` is not a valid index; it lexes as a float, not an integer")]
    NegativeZeroIndex,
    /// A query segment contained no selectors
    #[error("a bracketed segment must contain at least one selector")]
    EmptySegment,
}
