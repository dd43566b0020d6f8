//! The [`JsonPath`] façade: a parsed, reusable query
use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Serialize};
use serde_json::Value;

use jsonpath9535_core::{
    eval::EvalContext,
    node::{LocatedNodeList, NodeList},
    path::NormalizedPath,
    spec::query::{Query, Queryable},
    warning::{NoopSink, VecSink, Warning, WarningSink},
};

use crate::{error::Error, parser};

/// A parsed RFC 9535 JSONPath query, ready to be evaluated against any [`serde_json::Value`]
///
/// ```
/// use jsonpath9535::JsonPath;
/// use serde_json::json;
///
/// let path = JsonPath::parse("$.store.book[*].author").unwrap();
/// let doc = json!({"store": {"book": [{"author": "A"}, {"author": "B"}]}});
/// let authors: Vec<_> = path.query(&doc).all();
/// assert_eq!(authors, vec!["A", "B"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath(Query);

impl JsonPath {
    /// Parse a query string into a reusable [`JsonPath`]
    pub fn parse(input: &str) -> Result<Self, Error> {
        Ok(Self(parser::parse_jsonpath(input)?))
    }

    /// Evaluate this query against `value`, discarding cycle/depth warnings
    pub fn query<'b>(&self, value: &'b Value) -> NodeList<'b> {
        let mut sink = NoopSink;
        self.query_with_sink(value, &mut sink)
    }

    /// Evaluate this query against `value`, collecting any cycle/depth warnings into `sink`
    pub fn query_with_sink<'b>(&self, value: &'b Value, sink: &mut dyn WarningSink) -> NodeList<'b> {
        let mut ctx = EvalContext::new(sink);
        NodeList(self.0.query(value, value, &mut ctx))
    }

    /// Evaluate this query against `value`, returning both the matched nodes and every
    /// warning raised while doing so
    pub fn query_collecting_warnings<'b>(&self, value: &'b Value) -> (NodeList<'b>, Vec<Warning>) {
        let mut sink = VecSink::default();
        let nodes = self.query_with_sink(value, &mut sink);
        (nodes, sink.0)
    }

    /// Evaluate this query against `value`, returning each result node paired with its
    /// normalized path
    pub fn query_located<'b>(&self, value: &'b Value) -> LocatedNodeList<'b> {
        let mut sink = NoopSink;
        let mut ctx = EvalContext::new(&mut sink);
        LocatedNodeList(self.0.query_located(value, value, NormalizedPath::default(), &mut ctx))
    }

    /// Whether this query is guaranteed to match at most one node
    pub fn is_singular(&self) -> bool {
        self.0.is_singular()
    }
}

impl FromStr for JsonPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for JsonPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for JsonPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::JsonPath;
    use serde_json::json;

    #[test]
    fn round_trips_display() {
        let p = JsonPath::parse("$.a.b[0]").unwrap();
        assert_eq!(p.to_string(), "$.a.b[0]");
    }

    #[test]
    fn queries_nested_document() {
        let p = JsonPath::parse("$.a.b").unwrap();
        let doc = json!({"a": {"b": 42}});
        assert_eq!(p.query(&doc).exactly_one().unwrap(), &json!(42));
    }
}
