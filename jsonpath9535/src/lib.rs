//! A compliant [RFC 9535](https://www.rfc-editor.org/rfc/rfc9535) JSONPath query engine
//! for [`serde_json::Value`].
//!
//! ```
//! use jsonpath9535::JsonPath;
//! use serde_json::json;
//!
//! let doc = json!({
//!     "store": {
//!         "book": [
//!             {"title": "Sword of Honour", "price": 12.99},
//!             {"title": "The Lord of the Rings", "price": 22.99}
//!         ]
//!     }
//! });
//!
//! let path = JsonPath::parse("$.store.book[?@.price<20].title").unwrap();
//! let titles: Vec<_> = path.query(&doc).all();
//! assert_eq!(titles, vec!["Sword of Honour"]);
//! ```
//!
//! Cycle and traversal-depth safety are handled internally: a descendant segment (`..`)
//! or a structural equality comparison never diverges, even against a pathologically
//! deep or self-referential value, and instead emits a structured
//! [`Warning`](jsonpath9535_core::warning::Warning) which callers may collect with
//! [`JsonPath::query_collecting_warnings`].
#![forbid(unsafe_code)]
#![deny(unreachable_pub)]
#![warn(missing_docs)]

pub mod error;
mod ext;
mod lexer;
mod parser;
mod path;

pub use ext::JsonPathExt;
pub use path::JsonPath;

pub use jsonpath9535_core::{
    node::{AtMostOneError, ExactlyOneError, LocatedNode, LocatedNodeList, NodeList},
    path::{NormalizedPath, PathElement},
    spec::functions::{register_function, JsonPathType, JsonPathTypeKind},
    warning::{NoopSink, VecSink, Warning, WarningKind, WarningSink},
};
