//! Flattener
//!
//! Turns a [`SourceNode`] tree into id-ordered [`FlatRecord`]s in two passes:
//! a bottom-up size fold, then a preorder emission that assigns ids, levels,
//! parents and materialized paths. Both passes use explicit stacks so deep
//! hierarchies cannot exhaust the call stack.

use crate::error::BuildError;
use crate::record::FlatRecord;
use crate::tree::path;
use crate::tree::source::SourceNode;
use crate::types::{Level, RecordId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Length bounds for the stored fields, in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenOptions {
    pub max_name_len: Option<usize>,
    pub max_title_len: Option<usize>,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            max_name_len: Some(512),
            max_title_len: Some(192),
        }
    }
}

impl FlattenOptions {
    pub fn unbounded() -> Self {
        Self {
            max_name_len: None,
            max_title_len: None,
        }
    }
}

/// Diagnostics gathered during a build, useful for sizing storage columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenStats {
    pub node_count: usize,
    pub max_level: Level,
    pub max_name_len: usize,
    pub max_title_len: usize,
    pub placeholder_titles: usize,
}

/// Output of a successful build
#[derive(Debug, Clone)]
pub struct Flattened {
    pub records: Vec<FlatRecord>,
    pub stats: FlattenStats,
}

/// A source node paired with its descendant count
struct SizedNode<'a> {
    source: &'a SourceNode,
    size: u64,
    children: Vec<SizedNode<'a>>,
}

/// Post-order fold computing every subtree size exactly once
fn fold_sizes(root: &SourceNode) -> Option<SizedNode<'_>> {
    // (node, next child to visit, finished children)
    let mut frames: Vec<(&SourceNode, usize, Vec<SizedNode<'_>>)> =
        vec![(root, 0, Vec::with_capacity(root.children.len()))];
    let mut finished = None;

    while let Some((source, next, children)) = frames.pop() {
        if let Some(child) = source.children.get(next) {
            frames.push((source, next + 1, children));
            frames.push((child, 0, Vec::with_capacity(child.children.len())));
            continue;
        }

        let size = children.iter().map(|c| c.size + 1).sum();
        let sized = SizedNode {
            source,
            size,
            children,
        };
        match frames.last_mut() {
            Some(parent) => parent.2.push(sized),
            None => finished = Some(sized),
        }
    }
    finished
}

/// Flattener with configurable length bounds
#[derive(Debug, Clone, Default)]
pub struct Flattener {
    options: FlattenOptions,
}

impl Flattener {
    pub fn new(options: FlattenOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FlattenOptions {
        &self.options
    }

    /// Build the ordered record sequence for a tree.
    ///
    /// Aborts on duplicate paths, reserved separators in titles, and fields
    /// longer than the configured bounds; no partial output is returned.
    pub fn flatten(&self, root: &SourceNode) -> Result<Flattened, BuildError> {
        let sized = fold_sizes(root).ok_or(BuildError::Empty)?;
        let mut records: Vec<FlatRecord> = Vec::with_capacity(sized.size as usize + 1);
        let mut names: HashSet<String> = HashSet::with_capacity(sized.size as usize + 1);
        let mut stats = FlattenStats::default();

        // (node, index of parent record, level)
        let mut stack: Vec<(&SizedNode<'_>, Option<usize>, Level)> = vec![(&sized, None, 0)];
        while let Some((node, parent_index, level)) = stack.pop() {
            let id = records.len() as RecordId;
            let (title, placeholder) = path::normalize_title(node.source.title.as_deref(), id)?;
            if placeholder {
                stats.placeholder_titles += 1;
                warn!(id, title = %title, "Source node has no label, using placeholder");
            }

            let (name, parent_id) = match parent_index {
                Some(index) => {
                    let parent = &records[index];
                    (path::child_name(&parent.name, &title), Some(parent.id))
                }
                None => (title.clone(), None),
            };

            let name_len = name.chars().count();
            let title_len = title.chars().count();
            self.check_lengths(id, name_len, title_len)?;

            if !names.insert(name.clone()) {
                return Err(BuildError::DuplicatePath(name));
            }

            stats.node_count += 1;
            stats.max_level = stats.max_level.max(level);
            stats.max_name_len = stats.max_name_len.max(name_len);
            stats.max_title_len = stats.max_title_len.max(title_len);

            records.push(FlatRecord {
                name,
                title,
                size: node.size,
                id,
                level,
                parent_id,
            });

            let index = records.len() - 1;
            for child in node.children.iter().rev() {
                stack.push((child, Some(index), level + 1));
            }
        }

        debug!(
            nodes = stats.node_count,
            max_level = stats.max_level,
            "Flattened source tree"
        );
        Ok(Flattened { records, stats })
    }

    fn check_lengths(&self, id: RecordId, name_len: usize, title_len: usize) -> Result<(), BuildError> {
        if let Some(limit) = self.options.max_title_len {
            if title_len > limit {
                return Err(BuildError::TitleTooLong {
                    id,
                    len: title_len,
                    limit,
                });
            }
        }
        if let Some(limit) = self.options.max_name_len {
            if name_len > limit {
                return Err(BuildError::NameTooLong {
                    id,
                    len: name_len,
                    limit,
                });
            }
        }
        Ok(())
    }
}

/// Flatten with the default length bounds
pub fn flatten(root: &SourceNode) -> Result<Flattened, BuildError> {
    Flattener::default().flatten(root)
}
