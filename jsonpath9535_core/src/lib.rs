//! Core types for the `jsonpath9535` crate: the RFC 9535 JSONPath AST, the
//! function-extension type system and registry, the node/path result types,
//! and the cycle- and depth-safe evaluation context.
#![forbid(unsafe_code)]

pub mod eval;
pub mod node;
pub mod path;
pub mod spec;
pub mod warning;
