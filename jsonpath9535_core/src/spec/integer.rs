//! Bounded integers, per RFC 9535 §2.1
//!
//! Index and slice-bound literals in a JSONPath query must lie within
//! [-(2<sup>53</sup>)+1, (2<sup>53</sup>)-1], the safe-integer range for interoperable
//! JSON numbers ([RFC 7493][ijson] §2.2).
//!
//! [ijson]: https://www.rfc-editor.org/rfc/rfc7493#section-2.2

/// The maximum allowed value, 2^53 - 1
pub const MAX: i64 = 9_007_199_254_740_992 - 1;
/// The minimum allowed value, -(2^53) + 1
pub const MIN: i64 = -9_007_199_254_740_992 + 1;

/// An integer known to lie within the JSONPath-valid range
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Integer(i64);

#[inline]
fn in_range(v: i64) -> bool {
    (MIN..=MAX).contains(&v)
}

impl Integer {
    /// Build an [`Integer`], rejecting out-of-range values
    pub fn try_new(value: i64) -> Result<Self, IntegerError> {
        if in_range(value) {
            Ok(Self(value))
        } else {
            Err(IntegerError::OutOfBounds)
        }
    }

    /// The underlying `i64`
    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Integer {
    type Error = IntegerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl std::fmt::Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An error constructing an [`Integer`]
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum IntegerError {
    /// The value fell outside [-(2**53)+1, (2**53)-1]
    #[error("integer literal is out of the valid range, see https://www.rfc-editor.org/rfc/rfc9535.html#section-2.1-4.1")]
    OutOfBounds,
}
