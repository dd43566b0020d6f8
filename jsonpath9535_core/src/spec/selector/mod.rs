//! The five RFC 9535 §2.3 selectors
pub mod filter;
pub mod index;
pub mod name;
pub mod slice;

use serde_json::Value;

use crate::{eval::EvalContext, node::LocatedNode, path::NormalizedPath};

use self::{filter::Filter, index::Index, name::Name, slice::Slice};

use super::query::Queryable;

/// One selector within a `[...]` segment
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Selector {
    /// `'name'` or `"name"`: a single object member
    Name(Name),
    /// `*`: every child
    Wildcard,
    /// `i`: a single array element
    Index(Index),
    /// `start:end:step`: a range of array elements
    Slice(Slice),
    /// `?<expr>`: children satisfying a filter expression
    Filter(Filter),
}

impl Selector {
    /// Whether this selector is guaranteed to select at most one node
    pub fn is_singular(&self) -> bool {
        matches!(self, Selector::Name(_) | Selector::Index(_))
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::Name(n) => write!(f, "{n}"),
            Selector::Wildcard => write!(f, "*"),
            Selector::Index(i) => write!(f, "{i}"),
            Selector::Slice(s) => write!(f, "{s}"),
            Selector::Filter(fi) => write!(f, "{fi}"),
        }
    }
}

impl Queryable for Selector {
    #[cfg_attr(feature = "trace", tracing::instrument(name = "selector", level = "trace", skip(ctx)))]
    fn query<'b>(
        &self,
        current: &'b Value,
        root: &'b Value,
        ctx: &mut EvalContext<'_>,
    ) -> Vec<&'b Value> {
        match self {
            Selector::Name(n) => n.query(current, root, ctx),
            Selector::Wildcard => {
                if let Some(list) = current.as_array() {
                    list.iter().collect()
                } else if let Some(obj) = current.as_object() {
                    obj.values().collect()
                } else {
                    Vec::new()
                }
            }
            Selector::Index(i) => i.query(current, root, ctx),
            Selector::Slice(s) => s.query(current, root, ctx),
            Selector::Filter(filt) => filter_children(current, |v| filt.test(v, root, ctx)),
        }
    }

    fn query_located<'b>(
        &self,
        current: &'b Value,
        root: &'b Value,
        parent: NormalizedPath<'b>,
        ctx: &mut EvalContext<'_>,
    ) -> Vec<LocatedNode<'b>> {
        match self {
            Selector::Name(n) => n.query_located(current, root, parent, ctx),
            Selector::Wildcard => {
                let mut out = Vec::new();
                if let Some(list) = current.as_array() {
                    for (i, v) in list.iter().enumerate() {
                        out.push(LocatedNode {
                            loc: parent.clone_and_push(i),
                            node: v,
                        });
                    }
                } else if let Some(obj) = current.as_object() {
                    for (k, v) in obj {
                        out.push(LocatedNode {
                            loc: parent.clone_and_push(k),
                            node: v,
                        });
                    }
                }
                out
            }
            Selector::Index(i) => i.query_located(current, root, parent, ctx),
            Selector::Slice(s) => s.query_located(current, root, parent, ctx),
            Selector::Filter(filt) => {
                let mut out = Vec::new();
                if let Some(list) = current.as_array() {
                    for (i, v) in list.iter().enumerate() {
                        if filt.test(v, root, ctx) {
                            out.push(LocatedNode {
                                loc: parent.clone_and_push(i),
                                node: v,
                            });
                        }
                    }
                } else if let Some(obj) = current.as_object() {
                    for (k, v) in obj {
                        if filt.test(v, root, ctx) {
                            out.push(LocatedNode {
                                loc: parent.clone_and_push(k),
                                node: v,
                            });
                        }
                    }
                }
                out
            }
        }
    }
}

fn filter_children<'b>(current: &'b Value, mut pred: impl FnMut(&Value) -> bool) -> Vec<&'b Value> {
    if let Some(list) = current.as_array() {
        list.iter().filter(|v| pred(v)).collect()
    } else if let Some(obj) = current.as_object() {
        obj.values().filter(|v| pred(v)).collect()
    } else {
        Vec::new()
    }
}
