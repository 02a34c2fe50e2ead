//! Tree reconstruction
//!
//! Rebuilds nesting from a preorder slice of records using only their levels.
//! The records are read once, front to back, through a [`RecordCursor`]; open
//! nodes live on an explicit stack rather than the call stack.

use crate::error::ReconstructError;
use crate::record::FlatRecord;
use crate::tree::node::TreeNode;
use crate::types::Level;

/// Forward-only cursor over an id-ordered record slice.
///
/// The cursor has a single owner; whoever holds `&mut` to it is the only
/// party allowed to advance it.
#[derive(Debug)]
pub struct RecordCursor<'a> {
    records: &'a [FlatRecord],
    position: usize,
}

impl<'a> RecordCursor<'a> {
    pub fn new(records: &'a [FlatRecord]) -> Self {
        Self {
            records,
            position: 0,
        }
    }

    /// Current record, if any
    pub fn peek(&self) -> Option<&'a FlatRecord> {
        self.records.get(self.position)
    }

    pub fn advance(&mut self) {
        if self.position < self.records.len() {
            self.position += 1;
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.records.len()
    }

    /// Records consumed so far
    pub fn consumed(&self) -> usize {
        self.position
    }
}

/// Rebuild the subtree whose root is the first record.
///
/// Returns `Ok(None)` for an empty slice. Every record must belong to that
/// one subtree; anything left after it is `Malformed`.
pub fn reconstruct(
    records: &[FlatRecord],
    starting_level: Level,
) -> Result<Option<TreeNode>, ReconstructError> {
    let mut cursor = RecordCursor::new(records);
    let tree = reconstruct_from(&mut cursor, starting_level)?;
    if let Some(rest) = cursor.peek() {
        return Err(ReconstructError::Malformed {
            id: rest.id,
            level: rest.level,
            expected: format!("end of the subtree rooted at level {}", starting_level),
        });
    }
    Ok(tree)
}

/// Rebuild one subtree from the cursor's current position.
///
/// Consumes records until one at or above `starting_level` shows up (that
/// record belongs to the caller and is left unconsumed) or the cursor runs out.
pub fn reconstruct_from(
    cursor: &mut RecordCursor<'_>,
    starting_level: Level,
) -> Result<Option<TreeNode>, ReconstructError> {
    let Some(first) = cursor.peek() else {
        return Ok(None);
    };
    if first.level != starting_level {
        return Err(ReconstructError::Malformed {
            id: first.id,
            level: first.level,
            expected: format!("subtree root at level {}", starting_level),
        });
    }
    cursor.advance();

    let mut open: Vec<(TreeNode, Level)> = vec![(TreeNode::from(first), first.level)];
    while let Some(record) = cursor.peek() {
        if record.level <= starting_level {
            break;
        }

        // Step back out of every node that cannot be this record's parent
        while open.len() > 1 && open.last().is_some_and(|(_, level)| *level >= record.level) {
            close_top(&mut open);
        }

        let parent_level = open.last().map_or(starting_level, |(_, level)| *level);
        if record.level != parent_level + 1 {
            return Err(ReconstructError::Malformed {
                id: record.id,
                level: record.level,
                expected: format!("at most level {}", parent_level + 1),
            });
        }

        open.push((TreeNode::from(record), record.level));
        cursor.advance();
    }

    while open.len() > 1 {
        close_top(&mut open);
    }
    Ok(open.pop().map(|(node, _)| node))
}

/// Rebuild consecutive sibling subtrees rooted at `level`, for example the
/// result of a range query that excludes its anchor.
pub fn reconstruct_forest(
    records: &[FlatRecord],
    level: Level,
) -> Result<Vec<TreeNode>, ReconstructError> {
    let mut cursor = RecordCursor::new(records);
    let mut forest = Vec::new();
    while !cursor.is_exhausted() {
        match reconstruct_from(&mut cursor, level)? {
            Some(node) => forest.push(node),
            None => break,
        }
    }
    Ok(forest)
}

fn close_top(open: &mut Vec<(TreeNode, Level)>) {
    if open.len() < 2 {
        return;
    }
    if let Some((node, _)) = open.pop() {
        if let Some((parent, _)) = open.last_mut() {
            parent.children.push(node);
        }
    }
}
