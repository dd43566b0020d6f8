//! The index selector, e.g. `[0]` or `[-1]`
use serde_json::Value;

use crate::{eval::EvalContext, node::LocatedNode, path::NormalizedPath};

use crate::spec::{integer::Integer, query::Queryable};

/// An index selector, selecting a single array element by a (possibly negative) index
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Index(Integer);

impl Index {
    /// Build an index selector from an already-range-checked [`Integer`]
    pub fn new(value: Integer) -> Self {
        Self(value)
    }

    /// The raw index value, which may be negative
    pub fn value(&self) -> i64 {
        self.0.get()
    }

    /// Resolve this selector's index against an array of length `len`, per RFC 9535
    /// §2.3.3.2: negative indices count from the end, and a result outside `0..len` means
    /// there is no such element.
    pub fn resolve(&self, len: usize) -> Option<usize> {
        let i = self.value();
        if i >= 0 {
            let i = i as usize;
            (i < len).then_some(i)
        } else {
            let from_end = i.checked_neg()? as usize;
            (from_end <= len).then(|| len - from_end)
        }
    }
}

impl std::fmt::Display for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Queryable for Index {
    fn query<'b>(
        &self,
        current: &'b Value,
        _root: &'b Value,
        _ctx: &mut EvalContext<'_>,
    ) -> Vec<&'b Value> {
        current
            .as_array()
            .and_then(|arr| self.resolve(arr.len()).map(|i| &arr[i]))
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
            .as_array()
            .and_then(|arr| self.resolve(arr.len()).map(|i| (i, &arr[i])))
            .map(|(i, v)| LocatedNode {
                loc: parent.clone_and_push(i),
                node: v,
            })
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Index;
    use crate::spec::integer::Integer;

    #[test]
    fn resolves_negative_index_from_end() {
        let idx = Index::new(Integer::try_new(-1).unwrap());
        assert_eq!(idx.resolve(3), Some(2));
    }

    #[test]
    fn out_of_range_negative_index_yields_none() {
        let idx = Index::new(Integer::try_new(-4).unwrap());
        assert_eq!(idx.resolve(3), None);
    }
}
