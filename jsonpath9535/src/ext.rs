//! Extends [`serde_json::Value`] with a `json_path` convenience method
use serde_json::Value;

use jsonpath9535_core::node::NodeList;

use crate::{error::Error, path::JsonPath};

/// Adds [`JsonPathExt::json_path`] to [`serde_json::Value`]
pub trait JsonPathExt {
    /// Parse `path` and immediately evaluate it against `self`
    ///
    /// For a query that will be run more than once, prefer parsing it once with
    /// [`JsonPath::parse`] and reusing the result.
    fn json_path(&self, path: &str) -> Result<NodeList<'_>, Error>;
}

impl JsonPathExt for Value {
    fn json_path(&self, path: &str) -> Result<NodeList<'_>, Error> {
        Ok(JsonPath::parse(path)?.query(self))
    }
}

#[cfg(test)]
mod tests {
    use super::JsonPathExt;
    use serde_json::json;

    #[test]
    fn json_path_extension_method_queries_value() {
        let doc = json!({"a": 1});
        let nodes = doc.json_path("$.a").unwrap();
        assert_eq!(nodes.exactly_one().unwrap(), &json!(1));
    }
}
