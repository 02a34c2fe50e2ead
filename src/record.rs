//! Flat records
//!
//! One record per tree node. A sequence of records sorted by id is the tree's
//! preorder, and every record carries enough (path, level, parent, size) to
//! query and rebuild subtrees from a linear scan.

use crate::error::BuildError;
use crate::tree::path;
use crate::types::{Level, RecordId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// FlatRecord: one flattened tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatRecord {
    /// Materialized path, ancestor titles joined by the separator
    pub name: String,
    /// The node's own label
    pub title: String,
    /// Number of descendants, excluding the node itself
    pub size: u64,
    /// Preorder position
    pub id: RecordId,
    /// Depth from the root
    pub level: Level,
    /// Owning record, `None` only for the root
    pub parent_id: Option<RecordId>,
}

impl FlatRecord {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.size == 0
    }

    /// Id of the last record in this node's subtree
    pub fn last_descendant_id(&self) -> RecordId {
        self.id + self.size
    }
}

/// Check every structural invariant of an id-ordered record sequence.
///
/// Ids must be gapless from the first record's id, the first record must be
/// the only root, each parent must be the nearest open ancestor one level up,
/// names must extend the parent's name by exactly one segment and be unique,
/// and sizes must equal the counted descendants.
pub fn validate_sequence(records: &[FlatRecord]) -> Result<(), BuildError> {
    let first = records.first().ok_or(BuildError::Empty)?;
    let base = first.id;

    let mut names: HashSet<&str> = HashSet::with_capacity(records.len());
    // Open ancestors as indexes into `records`, one per level
    let mut open: Vec<usize> = Vec::new();

    for (position, record) in records.iter().enumerate() {
        let expected_id = base + position as RecordId;
        if record.id != expected_id {
            return Err(BuildError::IdMismatch {
                position,
                expected: expected_id,
                found: record.id,
            });
        }
        path::check_title(&record.title)?;
        if !names.insert(record.name.as_str()) {
            return Err(BuildError::DuplicatePath(record.name.clone()));
        }

        if position == 0 {
            if !record.is_root() || record.level != 0 {
                return Err(BuildError::MissingRoot { id: record.id });
            }
            if record.name != record.title {
                return Err(BuildError::PathMismatch {
                    id: record.id,
                    name: record.name.clone(),
                    expected: record.title.clone(),
                });
            }
            open.push(position);
            continue;
        }

        let parent_id = record
            .parent_id
            .ok_or(BuildError::MultipleRoots { id: record.id })?;
        let level = record.level as usize;
        if level == 0 || level > open.len() {
            return Err(BuildError::InvalidParent {
                id: record.id,
                parent: record.parent_id,
                reason: format!("level {} does not follow the previous record", record.level),
            });
        }

        close_levels(records, &mut open, level, position)?;

        let parent_index = open[level - 1];
        let parent = &records[parent_index];
        if parent.id != parent_id {
            return Err(BuildError::InvalidParent {
                id: record.id,
                parent: record.parent_id,
                reason: format!("nearest open ancestor at level {} is {}", level - 1, parent.id),
            });
        }
        let expected_name = path::child_name(&parent.name, &record.title);
        if record.name != expected_name {
            return Err(BuildError::PathMismatch {
                id: record.id,
                name: record.name.clone(),
                expected: expected_name,
            });
        }
        open.push(position);
    }

    close_levels(records, &mut open, 0, records.len())
}

/// Close every open node at `level` or deeper; `end` is the index just past
/// their subtrees, which fixes their size.
fn close_levels(
    records: &[FlatRecord],
    open: &mut Vec<usize>,
    level: usize,
    end: usize,
) -> Result<(), BuildError> {
    while open.len() > level {
        let Some(index) = open.pop() else { break };
        let record = &records[index];
        let counted = (end - index - 1) as u64;
        if record.size != counted {
            return Err(BuildError::SizeMismatch {
                id: record.id,
                expected: counted,
                found: record.size,
            });
        }
    }
    Ok(())
}
