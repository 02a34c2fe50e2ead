//! Reconstructed tree nodes

use crate::record::FlatRecord;
use serde::{Deserialize, Serialize};

/// Nested node rebuilt from flat records.
///
/// Leaves and nodes cut off by a depth window both serialize without a
/// `children` field; a cut-off node still reports its full `size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub title: String,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(title: impl Into<String>, size: u64) -> Self {
        Self {
            title: title.into(),
            size,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    /// Nodes present in this tree, including self
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Whether children exist beyond the loaded window
    pub fn is_truncated(&self) -> bool {
        self.size > 0 && self.children.is_empty()
    }
}

impl From<&FlatRecord> for TreeNode {
    fn from(record: &FlatRecord) -> Self {
        TreeNode::leaf(record.title.clone(), record.size)
    }
}
