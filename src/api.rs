//! Query surface
//!
//! `TreeApi` answers subtree and search queries against a seeded store. A
//! present path is resolved to its record first and only that record's
//! contiguous id range is read; an absent path scans the whole sequence.

use crate::config::QueryConfig;
use crate::error::ApiError;
use crate::query::{DepthLimit, RangeSelector, SearchSelector};
use crate::record::FlatRecord;
use crate::store::RecordStore;
use crate::tree::{path, reconstruct, TreeNode};
use tracing::debug;

pub struct TreeApi<S: RecordStore> {
    store: S,
    query: QueryConfig,
}

impl<S: RecordStore> TreeApi<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, &QueryConfig::default())
    }

    pub fn with_config(store: S, config: &QueryConfig) -> Self {
        Self {
            store,
            query: config.clone(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records below `path` within `max_depth` levels, anchor excluded.
    ///
    /// An unknown path yields an empty list.
    pub fn get_subtree_flat(
        &self,
        path: Option<&str>,
        max_depth: Option<i64>,
    ) -> Result<Vec<FlatRecord>, ApiError> {
        let depth = match max_depth {
            Some(depth) => DepthLimit::levels(depth)?,
            None => self.query.flat_depth()?,
        };
        let path = path::normalize_path(path);

        let scope = match self.scope(path)? {
            Some(scope) => scope,
            None => return Ok(Vec::new()),
        };
        let selected = RangeSelector::new(path, depth).select(&scope);
        debug!(path = ?path, scanned = scope.len(), selected = selected.len(), "Flat subtree query");
        Ok(selected)
    }

    /// The node at `path` with its descendants nested, up to `max_depth`
    /// levels below it (unbounded when absent).
    pub fn get_subtree_tree(
        &self,
        path: Option<&str>,
        max_depth: Option<i64>,
    ) -> Result<TreeNode, ApiError> {
        let depth = DepthLimit::from_option(max_depth, DepthLimit::Unbounded)?;
        let path = path::normalize_path(path);

        let not_found = || ApiError::NotFound(path.unwrap_or("<root>").to_string());
        let anchor = self.anchor(path)?.ok_or_else(not_found)?;
        let scope = self.store.subtree(&anchor)?;

        let selected = RangeSelector::new(path, depth)
            .including_root()
            .select(&scope);
        debug!(path = ?path, selected = selected.len(), "Tree subtree query");
        reconstruct(&selected, anchor.level)?.ok_or_else(not_found)
    }

    /// Records at or below `path` whose title contains `term`, ignoring case.
    pub fn search(&self, path: Option<&str>, term: Option<&str>) -> Result<Vec<FlatRecord>, ApiError> {
        let path = path::normalize_path(path);
        let selector = SearchSelector::new(path, term)?;

        let scope = match self.scope(path)? {
            Some(scope) => scope,
            None => return Ok(Vec::new()),
        };
        let hits = selector.select(&scope);
        debug!(path = ?path, term = ?term, hits = hits.len(), "Search query");
        Ok(hits)
    }

    /// The record named `path`, or the root when `path` is absent
    fn anchor(&self, path: Option<&str>) -> Result<Option<FlatRecord>, ApiError> {
        Ok(match path {
            Some(name) => self.store.get_by_name(name)?,
            None => self.store.root()?,
        })
    }

    /// Records a query under `path` has to look at; `None` for an unknown path
    fn scope(&self, path: Option<&str>) -> Result<Option<Vec<FlatRecord>>, ApiError> {
        match path {
            None => Ok(Some(self.store.all()?)),
            Some(name) => match self.store.get_by_name(name)? {
                Some(anchor) => Ok(Some(self.store.subtree(&anchor)?)),
                None => Ok(None),
            },
        }
    }
}
