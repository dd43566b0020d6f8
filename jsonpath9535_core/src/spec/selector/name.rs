//! The name selector, e.g. `['foo']`
use serde_json::Value;

use crate::{eval::EvalContext, node::LocatedNode, path::NormalizedPath};

use crate::spec::query::Queryable;

/// A name selector, `['name']`, selecting a single object member by key
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Name(pub String);

impl Name {
    /// The member name this selector addresses
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}'", self.0.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

impl Queryable for Name {
    fn query<'b>(
        &self,
        current: &'b Value,
        _root: &'b Value,
        _ctx: &mut EvalContext<'_>,
    ) -> Vec<&'b Value> {
        current
            .as_object()
            .and_then(|o| o.get(self.as_str()))
            .into_iter()
            .collect()
    }

    fn query_located<'b>(
        &self,
        current: &'b Value,
        _root: &'b Value,
        parent: NormalizedPath<'b>,
        _ctx: &mut EvalContext<'_>,
    ) -> Vec<LocatedNode<'b>> {
        current
            .as_object()
            .and_then(|o| o.get_key_value(self.as_str()))
            .map(|(k, v)| LocatedNode {
                loc: parent.clone_and_push(k),
                node: v,
            })
            .into_iter()
            .collect()
    }
}
