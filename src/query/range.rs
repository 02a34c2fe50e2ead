//! Range selection
//!
//! Selects the records below a materialized path within a depth window. The
//! input is id ordered and so is the output, which is what lets the
//! reconstructor rebuild nesting from the result in a single pass.

use super::DepthLimit;
use crate::record::FlatRecord;
use crate::tree::path;

/// A prefix plus depth-window query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSelector<'p> {
    path: Option<&'p str>,
    depth: DepthLimit,
    include_root: bool,
}

impl<'p> RangeSelector<'p> {
    /// Query below `path`; an absent or empty path is the root.
    pub fn new(path: Option<&'p str>, depth: DepthLimit) -> Self {
        Self {
            path: path::normalize_path(path),
            depth,
            include_root: false,
        }
    }

    /// Also return the anchor node itself, as depth 0 of the result.
    pub fn including_root(mut self) -> Self {
        self.include_root = true;
        self
    }

    /// Exclusive lower bound and inclusive upper bound on `level`
    fn window(&self) -> (i64, Option<i64>) {
        let mut base = path::path_depth(self.path) as i64;
        let mut levels = self.depth.as_levels().map(i64::from);
        if self.include_root {
            base -= 1;
            levels = levels.map(|n| n + 1);
        }
        (base, levels.map(|n| base + n))
    }

    fn matches_path(&self, name: &str) -> bool {
        match self.path {
            None => true,
            Some(prefix) if self.include_root => path::is_at_or_under(name, prefix),
            Some(prefix) => path::is_under(name, prefix),
        }
    }

    /// Borrowing selection, in id order
    pub fn iter<'a>(&'a self, records: &'a [FlatRecord]) -> impl Iterator<Item = &'a FlatRecord> + 'a {
        let (lower, upper) = self.window();
        records.iter().filter(move |record| {
            let level = i64::from(record.level);
            lower < level
                && upper.map_or(true, |upper| level <= upper)
                && self.matches_path(&record.name)
        })
    }

    pub fn select(&self, records: &[FlatRecord]) -> Vec<FlatRecord> {
        self.iter(records).cloned().collect()
    }
}

/// Select records below `path` within `depth` levels.
///
/// With `include_root` the anchor is returned too and the window is measured
/// from the anchor itself.
pub fn select(
    records: &[FlatRecord],
    path: Option<&str>,
    depth: DepthLimit,
    include_root: bool,
) -> Vec<FlatRecord> {
    let selector = RangeSelector::new(path, depth);
    let selector = if include_root {
        selector.including_root()
    } else {
        selector
    };
    selector.select(records)
}
