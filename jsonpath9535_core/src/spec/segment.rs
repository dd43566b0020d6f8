//! Segments: the `.name`, `[...]` and `..` constructs chained together in a query
use serde_json::Value;

use crate::{eval::EvalContext, node::LocatedNode, path::NormalizedPath};

use super::{query::Queryable, selector::Selector};

/// One segment of a JSONPath query, together with whether it is a child or descendant segment
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct QuerySegment {
    /// Whether this is a child (`.`/`[...]`) or descendant (`..`) segment
    pub kind: QuerySegmentKind,
    /// The segment itself
    pub segment: Segment,
}

impl QuerySegment {
    /// A normal child segment
    pub fn is_child(&self) -> bool {
        matches!(self.kind, QuerySegmentKind::Child)
    }

    /// A recursive descendant segment
    pub fn is_descendent(&self) -> bool {
        !self.is_child()
    }
}

impl std::fmt::Display for QuerySegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if matches!(self.kind, QuerySegmentKind::Descendant) {
            write!(f, "..")?;
        }
        write!(f, "{}", self.segment)
    }
}

/// Whether a [`QuerySegment`] addresses direct children or all descendants
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum QuerySegmentKind {
    /// Addresses the direct children of the input node(s)
    Child,
    /// Addresses the input node(s) and all of their descendants, recursively
    Descendant,
}

impl Queryable for QuerySegment {
    #[cfg_attr(feature = "trace", tracing::instrument(name = "query_segment", level = "trace", skip(ctx)))]
    fn query<'b>(
        &self,
        current: &'b Value,
        root: &'b Value,
        ctx: &mut EvalContext<'_>,
    ) -> Vec<&'b Value> {
        let mut out = self.segment.query(current, root, ctx);
        if self.is_descendent() {
            out.append(&mut descend(self, current, root, ctx));
        }
        out
    }

    fn query_located<'b>(
        &self,
        current: &'b Value,
        root: &'b Value,
        parent: NormalizedPath<'b>,
        ctx: &mut EvalContext<'_>,
    ) -> Vec<LocatedNode<'b>> {
        let mut out = self.segment.query_located(current, root, parent.clone(), ctx);
        if self.is_descendent() {
            out.append(&mut descend_located(self, current, root, parent, ctx));
        }
        out
    }
}

/// Visit `current`'s children (recursively, via the mutual recursion with
/// [`QuerySegment::query`]) in the pre-order required by RFC 9535 §2.5.2.2: a node's own
/// matches are produced (by the caller, via `segment.query(current, ..)`) before its
/// descendants' matches.
fn descend<'b>(
    segment: &QuerySegment,
    current: &'b Value,
    root: &'b Value,
    ctx: &mut EvalContext<'_>,
) -> Vec<&'b Value> {
    let mut out = Vec::new();
    if !ctx.enter(current, "") {
        return out;
    }
    if let Some(list) = current.as_array() {
        for v in list {
            out.append(&mut segment.query(v, root, ctx));
        }
    } else if let Some(obj) = current.as_object() {
        for v in obj.values() {
            out.append(&mut segment.query(v, root, ctx));
        }
    }
    ctx.exit(current);
    out
}

fn descend_located<'b>(
    segment: &QuerySegment,
    current: &'b Value,
    root: &'b Value,
    parent: NormalizedPath<'b>,
    ctx: &mut EvalContext<'_>,
) -> Vec<LocatedNode<'b>> {
    let mut out = Vec::new();
    if !ctx.enter(current, &parent.to_string()) {
        return out;
    }
    if let Some(list) = current.as_array() {
        for (i, v) in list.iter().enumerate() {
            out.append(&mut segment.query_located(v, root, parent.clone_and_push(i), ctx));
        }
    } else if let Some(obj) = current.as_object() {
        for (k, v) in obj {
            out.append(&mut segment.query_located(v, root, parent.clone_and_push(k), ctx));
        }
    }
    ctx.exit(current);
    out
}

/// The selector(s) applied to each input node by a [`QuerySegment`]
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Segment {
    /// `[...]`: one or more comma-separated selectors
    LongHand(Vec<Selector>),
    /// `.name`: dot-shorthand for `['name']`
    DotName(String),
    /// `.*`: dot-shorthand for `[*]`
    Wildcard,
}

impl Segment {
    /// Whether this segment is guaranteed to select at most one node
    pub fn is_singular(&self) -> bool {
        match self {
            Segment::LongHand(selectors) => match selectors.as_slice() {
                [] => true,
                [one] => one.is_singular(),
                _ => false,
            },
            Segment::DotName(_) => true,
            Segment::Wildcard => false,
        }
    }

    /// This segment as a slice of selectors, if it is a `LongHand` segment
    pub fn as_long_hand(&self) -> Option<&[Selector]> {
        match self {
            Segment::LongHand(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// This segment's name, if it is a `DotName` segment
    pub fn as_dot_name(&self) -> Option<&str> {
        match self {
            Segment::DotName(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::LongHand(selectors) => {
                write!(f, "[")?;
                for (i, s) in selectors.iter().enumerate() {
                    write!(f, "{s}{}", if i + 1 == selectors.len() { "" } else { "," })?;
                }
                write!(f, "]")
            }
            Segment::DotName(name) => write!(f, ".{name}"),
            Segment::Wildcard => write!(f, ".*"),
        }
    }
}

impl Queryable for Segment {
    #[cfg_attr(feature = "trace", tracing::instrument(name = "segment", level = "trace", skip(ctx)))]
    fn query<'b>(
        &self,
        current: &'b Value,
        root: &'b Value,
        ctx: &mut EvalContext<'_>,
    ) -> Vec<&'b Value> {
        let mut out = Vec::new();
        match self {
            Segment::LongHand(selectors) => {
                for selector in selectors {
                    out.append(&mut selector.query(current, root, ctx));
                }
            }
            Segment::DotName(key) => {
                if let Some(v) = current.as_object().and_then(|o| o.get(key)) {
                    out.push(v);
                }
            }
            Segment::Wildcard => {
                if let Some(list) = current.as_array() {
                    out.extend(list.iter());
                } else if let Some(obj) = current.as_object() {
                    out.extend(obj.values());
                }
            }
        }
        out
    }

    fn query_located<'b>(
        &self,
        current: &'b Value,
        root: &'b Value,
        parent: NormalizedPath<'b>,
        ctx: &mut EvalContext<'_>,
    ) -> Vec<LocatedNode<'b>> {
        let mut out = Vec::new();
        match self {
            Segment::LongHand(selectors) => {
                for s in selectors {
                    out.append(&mut s.query_located(current, root, parent.clone(), ctx));
                }
            }
            Segment::DotName(name) => {
                if let Some((k, v)) = current.as_object().and_then(|o| o.get_key_value(name)) {
                    out.push(LocatedNode {
                        loc: parent.clone_and_push(k),
                        node: v,
                    });
                }
            }
            Segment::Wildcard => {
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
            }
        }
        out
    }
}
