use flattree::record::FlatRecord;
use flattree::tree::{flatten, SourceNode};

/// Root{A{A1,A2},B}
pub fn small_tree() -> SourceNode {
    SourceNode::new("Root")
        .with_child(
            SourceNode::new("A")
                .with_child(SourceNode::new("A1"))
                .with_child(SourceNode::new("A2")),
        )
        .with_child(SourceNode::new("B"))
}

/// Siblings whose titles share a prefix, the case a bare `starts_with` gets wrong
pub fn animals() -> SourceNode {
    SourceNode::new("Animals")
        .with_child(
            SourceNode::new("Cat")
                .with_child(SourceNode::new("Tabby"))
                .with_child(SourceNode::new("Siamese")),
        )
        .with_child(
            SourceNode::new("Caterpillar").with_child(SourceNode::new("Silkworm")),
        )
        .with_child(SourceNode::new("Dog").with_child(SourceNode::new("Hound")))
        .with_child(
            SourceNode::new("Dogfish").with_child(SourceNode::new("Spiny dogfish")),
        )
}

pub fn records_of(tree: &SourceNode) -> Vec<FlatRecord> {
    flatten(tree).unwrap().records
}

pub fn titles(records: &[FlatRecord]) -> Vec<&str> {
    records.iter().map(|r| r.title.as_str()).collect()
}

/// Build a tree from a parent table: node `i + 1` hangs under `parents[i]`.
///
/// Titles are `n<index>`, so `n1` and `n12` can end up as siblings.
pub fn tree_from_parents(parents: &[usize]) -> SourceNode {
    let count = parents.len() + 1;
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); count];
    for (index, &parent) in parents.iter().enumerate() {
        children[parent].push(index + 1);
    }
    let mut built: Vec<Option<SourceNode>> = (0..count).map(|_| None).collect();
    for index in (0..count).rev() {
        let kids: Vec<SourceNode> = children[index]
            .iter()
            .map(|&child| built[child].take().unwrap())
            .collect();
        built[index] = Some(SourceNode::new(format!("n{}", index)).with_children(kids));
    }
    built[0].take().unwrap()
}
