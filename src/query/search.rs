//! Title search within a subtree

use crate::error::QueryError;
use crate::record::FlatRecord;
use crate::tree::path;

/// Case-insensitive substring search on titles at or below a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSelector<'p> {
    path: Option<&'p str>,
    needle: String,
}

impl<'p> SearchSelector<'p> {
    /// Rejects an absent or empty term. Whitespace is part of the term.
    pub fn new(path: Option<&'p str>, term: Option<&str>) -> Result<Self, QueryError> {
        let term = term.unwrap_or_default();
        if term.is_empty() {
            return Err(QueryError::EmptySearchTerm);
        }
        Ok(Self {
            path: path::normalize_path(path),
            needle: term.to_lowercase(),
        })
    }

    pub fn matches(&self, record: &FlatRecord) -> bool {
        let in_scope = match self.path {
            Some(prefix) => path::is_at_or_under(&record.name, prefix),
            None => true,
        };
        in_scope && record.title.to_lowercase().contains(&self.needle)
    }

    pub fn select(&self, records: &[FlatRecord]) -> Vec<FlatRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

/// Records at or below `path` whose title contains `term`, in id order
pub fn search(
    records: &[FlatRecord],
    path: Option<&str>,
    term: Option<&str>,
) -> Result<Vec<FlatRecord>, QueryError> {
    Ok(SearchSelector::new(path, term)?.select(records))
}
