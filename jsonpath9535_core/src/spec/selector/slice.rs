//! The slice selector, e.g. `[1:5:2]`
use serde_json::Value;

use crate::{eval::EvalContext, node::LocatedNode, path::NormalizedPath};

use crate::spec::query::Queryable;

/// An array slice selector, `[start:end:step]`
///
/// Any of the three components may be omitted; per RFC 9535 §2.3.4, a missing `step`
/// defaults to `1`, and the defaults for `start`/`end` depend on the sign of `step`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Slice {
    /// The lower bound, inclusive of its sign-dependent default
    pub start: Option<i64>,
    /// The upper bound, exclusive of its sign-dependent default
    pub end: Option<i64>,
    /// The step, defaulting to `1`
    pub step: Option<i64>,
}

impl Slice {
    fn step(&self) -> i64 {
        self.step.unwrap_or(1)
    }

    /// The sequence of array indices this slice selects, per RFC 9535 §2.3.4.2.2
    pub fn indices(&self, len: usize) -> Vec<usize> {
        let step = self.step();
        if step == 0 {
            return Vec::new();
        }
        let len_i = len as i64;
        let mut out = Vec::new();
        if step > 0 {
            let start = normalize(self.start.unwrap_or(0), len_i, step);
            let end = normalize(self.end.unwrap_or(len_i), len_i, step);
            let mut i = start;
            while i < end {
                out.push(i as usize);
                i += step;
            }
        } else {
            let start = normalize(self.start.unwrap_or(len_i - 1), len_i, step);
            let end = normalize(self.end.unwrap_or(-len_i - 1), len_i, step);
            let mut i = start;
            while i > end {
                out.push(i as usize);
                i += step;
            }
        }
        out
    }
}

/// RFC 9535 §2.3.4.2.2's `Normalize` followed by bounds-clamping, combined
fn normalize(index: i64, len: i64, step: i64) -> i64 {
    let n = if index >= 0 { index } else { len + index };
    if step >= 0 {
        n.clamp(0, len)
    } else {
        if n < 0 {
            -1
        } else {
            n.min(len - 1)
        }
    }
}

impl std::fmt::Display for Slice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(s) = self.start {
            write!(f, "{s}")?;
        }
        write!(f, ":")?;
        if let Some(e) = self.end {
            write!(f, "{e}")?;
        }
        if let Some(step) = self.step {
            write!(f, ":{step}")?;
        }
        Ok(())
    }
}

impl Queryable for Slice {
    fn query<'b>(
        &self,
        current: &'b Value,
        _root: &'b Value,
        _ctx: &mut EvalContext<'_>,
    ) -> Vec<&'b Value> {
        match current.as_array() {
            Some(arr) => self.indices(arr.len()).into_iter().map(|i| &arr[i]).collect(),
            None => Vec::new(),
        }
    }

    fn query_located<'b>(
        &self,
        current: &'b Value,
        _root: &'b Value,
        parent: NormalizedPath<'b>,
        _ctx: &mut EvalContext<'_>,
    ) -> Vec<LocatedNode<'b>> {
        match current.as_array() {
            Some(arr) => self
                .indices(arr.len())
                .into_iter()
                .map(|i| LocatedNode {
                    loc: parent.clone_and_push(i),
                    node: &arr[i],
                })
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Slice;

    #[test]
    fn default_slice_selects_everything() {
        let s = Slice::default();
        assert_eq!(s.indices(5), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn negative_step_reverses() {
        let s = Slice {
            start: None,
            end: None,
            step: Some(-1),
        };
        assert_eq!(s.indices(3), vec![2, 1, 0]);
    }

    #[test]
    fn zero_step_selects_nothing() {
        let s = Slice {
            start: None,
            end: None,
            step: Some(0),
        };
        assert!(s.indices(5).is_empty());
    }

    #[test]
    fn bounded_positive_slice() {
        let s = Slice {
            start: Some(1),
            end: Some(3),
            step: None,
        };
        assert_eq!(s.indices(5), vec![1, 2]);
    }
}
