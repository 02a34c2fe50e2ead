//! Source tree read by the importer

use serde::{Deserialize, Serialize};

/// A labeled node of the input hierarchy.
///
/// `words` is accepted for `title` since that is the label attribute of the
/// ImageNet structure dump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceNode {
    #[serde(default, alias = "words", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SourceNode>,
}

impl SourceNode {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            children: Vec::new(),
        }
    }

    /// A node without a label
    pub fn untitled() -> Self {
        Self::default()
    }

    pub fn with_child(mut self, child: SourceNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = SourceNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Total node count, walked without recursion
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}
