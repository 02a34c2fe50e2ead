//! Read-only queries over an id-ordered record sequence

pub mod range;
pub mod search;

use crate::error::QueryError;
use std::num::NonZeroU32;

pub use range::{select, RangeSelector};
pub use search::{search, SearchSelector};

/// How many levels below the anchor a range query returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthLimit {
    Levels(NonZeroU32),
    Unbounded,
}

impl DepthLimit {
    /// Validate a caller-supplied depth; zero and negatives are rejected.
    pub fn levels(depth: i64) -> Result<Self, QueryError> {
        if depth <= 0 {
            return Err(QueryError::InvalidDepth(depth));
        }
        let clamped = u32::try_from(depth).unwrap_or(u32::MAX);
        Ok(NonZeroU32::new(clamped).map_or(DepthLimit::Unbounded, DepthLimit::Levels))
    }

    /// Validate an optional depth, falling back to `default` when absent
    pub fn from_option(depth: Option<i64>, default: DepthLimit) -> Result<Self, QueryError> {
        match depth {
            Some(depth) => Self::levels(depth),
            None => Ok(default),
        }
    }

    pub fn one() -> Self {
        DepthLimit::Levels(NonZeroU32::MIN)
    }

    /// Number of levels in the window, `None` when unbounded
    pub fn as_levels(&self) -> Option<u32> {
        match self {
            DepthLimit::Levels(n) => Some(n.get()),
            DepthLimit::Unbounded => None,
        }
    }
}

impl Default for DepthLimit {
    fn default() -> Self {
        Self::one()
    }
}
