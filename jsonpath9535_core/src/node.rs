//! Result types produced by a JSONPath query
use std::slice::Iter;

use serde::Serialize;
use serde_json::Value;

use crate::path::NormalizedPath;

/// A list of nodes resulting from a JSONPath query
///
/// Each node is a borrowed reference into the original [`serde_json::Value`] that was
/// queried; the caller must keep the root value alive for as long as a [`NodeList`]
/// derived from it is in use.
#[derive(Debug, Default, Eq, PartialEq, Serialize, Clone)]
pub struct NodeList<'a>(pub Vec<&'a Value>);

impl<'a> NodeList<'a> {
    /// At most one node, or an error describing how many were actually produced
    pub fn at_most_one(&self) -> Result<Option<&'a Value>, AtMostOneError> {
        match self.0.len() {
            0 => Ok(None),
            1 => Ok(self.0.first().copied()),
            n => Err(AtMostOneError(n)),
        }
    }

    /// Exactly one node, or an error describing how many were actually produced
    pub fn exactly_one(&self) -> Result<&'a Value, ExactlyOneError> {
        match self.0.len() {
            0 => Err(ExactlyOneError::Empty),
            1 => Ok(self.0[0]),
            n => Err(ExactlyOneError::MoreThanOne(n)),
        }
    }

    /// Every node produced by the query
    pub fn all(self) -> Vec<&'a Value> {
        self.0
    }

    /// The number of nodes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the nodelist is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// An iterator over the nodelist
    pub fn iter(&self) -> Iter<'_, &Value> {
        self.0.iter()
    }

    /// The first node, if any
    pub fn first(&self) -> Option<&'a Value> {
        self.0.first().copied()
    }

    /// The last node, if any
    pub fn last(&self) -> Option<&'a Value> {
        self.0.last().copied()
    }

    /// The node at `index`, if any
    pub fn get(&self, index: usize) -> Option<&'a Value> {
        self.0.get(index).copied()
    }
}

impl<'a> From<Vec<&'a Value>> for NodeList<'a> {
    fn from(nodes: Vec<&'a Value>) -> Self {
        Self(nodes)
    }
}

impl<'a> IntoIterator for NodeList<'a> {
    type Item = &'a Value;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Produced when a [`NodeList`] was expected to contain at most one entry
#[derive(Debug, thiserror::Error)]
#[error("nodelist expected to contain at most one entry, but instead contains {0} entries")]
pub struct AtMostOneError(pub usize);

/// Produced when a [`NodeList`] was expected to contain exactly one entry
#[derive(Debug, thiserror::Error)]
pub enum ExactlyOneError {
    /// The nodelist was empty
    #[error("nodelist expected to contain one entry, but is empty")]
    Empty,
    /// The nodelist contained more than one entry
    #[error("nodelist expected to contain one entry, but instead contains {0} entries")]
    MoreThanOne(usize),
}

/// A node paired with its [`NormalizedPath`] location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedNode<'a> {
    /// The node's location within the root value
    pub loc: NormalizedPath<'a>,
    /// The node's value
    pub node: &'a Value,
}

impl<'a> LocatedNode<'a> {
    /// The node's location
    pub fn location(&self) -> &NormalizedPath<'a> {
        &self.loc
    }

    /// The node's value
    pub fn value(&self) -> &'a Value {
        self.node
    }
}

/// A list of nodes resulting from a JSONPath query, each paired with its location
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LocatedNodeList<'a>(pub Vec<LocatedNode<'a>>);

impl<'a> LocatedNodeList<'a> {
    /// Every located node produced by the query
    pub fn all(self) -> Vec<LocatedNode<'a>> {
        self.0
    }

    /// All node values, discarding locations
    pub fn nodes(&self) -> Nodes<'_, 'a> {
        Nodes(self.0.iter())
    }

    /// All node locations, discarding values
    pub fn locations(&self) -> Locations<'_, 'a> {
        Locations(self.0.iter())
    }

    /// At most one located node
    pub fn at_most_one(&self) -> Result<Option<&LocatedNode<'a>>, AtMostOneError> {
        match self.0.len() {
            0 => Ok(None),
            1 => Ok(self.0.first()),
            n => Err(AtMostOneError(n)),
        }
    }

    /// Exactly one located node
    pub fn exactly_one(&self) -> Result<&LocatedNode<'a>, ExactlyOneError> {
        match self.0.len() {
            0 => Err(ExactlyOneError::Empty),
            1 => Ok(&self.0[0]),
            n => Err(ExactlyOneError::MoreThanOne(n)),
        }
    }

    /// The number of located nodes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Remove nodes whose location has already been seen, keeping the first occurrence
    ///
    /// Descendant segments over documents with shared substructure (e.g. aliased array
    /// elements) can otherwise produce the same location more than once.
    pub fn dedup(mut self) -> Self {
        let mut seen = std::collections::HashSet::new();
        self.0.retain(|ln| seen.insert(ln.loc.to_string()));
        self
    }
}

impl<'a> IntoIterator for LocatedNodeList<'a> {
    type Item = LocatedNode<'a>;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// An iterator over the node values of a [`LocatedNodeList`]
pub struct Nodes<'i, 'a>(Iter<'i, LocatedNode<'a>>);

impl<'i, 'a> Iterator for Nodes<'i, 'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|ln| ln.node)
    }
}

/// An iterator over the locations of a [`LocatedNodeList`]
pub struct Locations<'i, 'a>(Iter<'i, LocatedNode<'a>>);

impl<'i, 'a> Iterator for Locations<'i, 'a> {
    type Item = &'i NormalizedPath<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|ln| &ln.loc)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::NodeList;

    #[test]
    fn at_most_one_reports_count() {
        let a = json!(1);
        let b = json!(2);
        let nl = NodeList(vec![&a, &b]);
        assert!(matches!(nl.at_most_one(), Err(super::AtMostOneError(2))));
    }

    #[test]
    fn exactly_one_empty() {
        let nl: NodeList = NodeList(vec![]);
        assert!(nl.exactly_one().unwrap_err().to_string().contains("empty"));
    }
}
