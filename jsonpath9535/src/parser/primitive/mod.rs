//! Leaf-level text parsers shared by the lexer and, for literals embedded in filter
//! expressions, the parser itself
pub(crate) mod int;
pub(crate) mod number;
pub(crate) mod string;
