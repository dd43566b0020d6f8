//! The top-level query type
use serde_json::Value;

use crate::{eval::EvalContext, node::LocatedNode, path::NormalizedPath};

use super::segment::QuerySegment;

mod sealed {
    use crate::spec::{
        segment::{QuerySegment, Segment},
        selector::{
            filter::{Filter, SingularQuery},
            index::Index,
            name::Name,
            slice::Slice,
            Selector,
        },
    };

    use super::Query;

    pub trait Sealed {}
    impl Sealed for Query {}
    impl Sealed for QuerySegment {}
    impl Sealed for Segment {}
    impl Sealed for Slice {}
    impl Sealed for Name {}
    impl Sealed for Selector {}
    impl Sealed for Index {}
    impl Sealed for Filter {}
    impl Sealed for SingularQuery {}
}

/// A type that can be evaluated against a JSON value
pub trait Queryable: sealed::Sealed {
    /// Evaluate `self` against `current`, resolving absolute sub-queries against `root`
    fn query<'b>(&self, current: &'b Value, root: &'b Value, ctx: &mut EvalContext<'_>)
        -> Vec<&'b Value>;

    /// Like [`Queryable::query`], but also tracks the [`NormalizedPath`] of each result
    fn query_located<'b>(
        &self,
        current: &'b Value,
        root: &'b Value,
        parent: NormalizedPath<'b>,
        ctx: &mut EvalContext<'_>,
    ) -> Vec<LocatedNode<'b>>;
}

/// A parsed RFC 9535 JSONPath query
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Query {
    /// Whether this query is rooted at `$` or relative to `@`
    pub kind: QueryKind,
    /// The segments making up the query, applied left to right
    pub segments: Vec<QuerySegment>,
}

impl Query {
    /// Whether this query is guaranteed to produce at most one result node
    pub fn is_singular(&self) -> bool {
        self.segments
            .iter()
            .all(|s| s.is_child() && s.segment.is_singular())
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            QueryKind::Root => write!(f, "$")?,
            QueryKind::Current => write!(f, "@")?,
        }
        for s in &self.segments {
            write!(f, "{s}")?;
        }
        Ok(())
    }
}

/// Whether a query is rooted at the document root or the current node
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum QueryKind {
    /// Rooted at `$`
    #[default]
    Root,
    /// Relative to `@`
    Current,
}

impl Queryable for Query {
    #[cfg_attr(feature = "trace", tracing::instrument(name = "query", level = "trace", skip(ctx)))]
    fn query<'b>(
        &self,
        current: &'b Value,
        root: &'b Value,
        ctx: &mut EvalContext<'_>,
    ) -> Vec<&'b Value> {
        let mut frontier = match self.kind {
            QueryKind::Root => vec![root],
            QueryKind::Current => vec![current],
        };
        for segment in &self.segments {
            let mut next = Vec::new();
            for v in &frontier {
                next.append(&mut segment.query(v, root, ctx));
            }
            frontier = next;
        }
        frontier
    }

    fn query_located<'b>(
        &self,
        current: &'b Value,
        root: &'b Value,
        parent: NormalizedPath<'b>,
        ctx: &mut EvalContext<'_>,
    ) -> Vec<LocatedNode<'b>> {
        let start = match self.kind {
            QueryKind::Root => root,
            QueryKind::Current => current,
        };
        let mut frontier = vec![LocatedNode {
            loc: parent,
            node: start,
        }];
        for segment in &self.segments {
            let mut next = Vec::new();
            for ln in &frontier {
                next.append(&mut segment.query_located(ln.node, root, ln.loc.clone(), ctx));
            }
            frontier = next;
        }
        frontier
    }
}
