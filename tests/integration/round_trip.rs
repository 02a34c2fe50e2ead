use flattree::record::validate_sequence;
use flattree::tree::{reconstruct, SourceNode, TreeNode};

use crate::support::{records_of, small_tree};

fn expected_from_source(node: &SourceNode) -> TreeNode {
    let children: Vec<TreeNode> = node.children.iter().map(expected_from_source).collect();
    let size = children.iter().map(|c| c.size + 1).sum();
    TreeNode::leaf(node.title.clone().unwrap_or_default(), size).with_children(children)
}

#[test]
fn flatten_then_reconstruct_returns_the_source_shape() {
    let source = small_tree();
    let records = records_of(&source);
    validate_sequence(&records).unwrap();

    let rebuilt = reconstruct(&records, 0).unwrap().unwrap();
    assert_eq!(rebuilt, expected_from_source(&source));
}

#[test]
fn flat_records_match_the_documented_layout() {
    let records = records_of(&small_tree());
    let rows: Vec<(&str, u64, u64, u32, Option<u64>)> = records
        .iter()
        .map(|r| (r.name.as_str(), r.size, r.id, r.level, r.parent_id))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Root", 4, 0, 0, None),
            ("Root > A", 2, 1, 1, Some(0)),
            ("Root > A > A1", 0, 2, 2, Some(1)),
            ("Root > A > A2", 0, 3, 2, Some(1)),
            ("Root > B", 0, 4, 1, Some(0)),
        ]
    );
}

#[test]
fn untitled_nodes_get_stable_placeholders() {
    let source = SourceNode::new("Root")
        .with_child(SourceNode::untitled())
        .with_child(SourceNode::new("   "));
    let first = records_of(&source);
    let second = records_of(&source);
    assert_eq!(first, second);
    assert_eq!(first[1].name, "Root > untitled-1");
    assert_eq!(first[2].title, "untitled-2");
}

#[test]
fn records_file_json_round_trips() {
    let records = records_of(&small_tree());
    let json = serde_json::to_string(&records).unwrap();
    assert!(json.contains("\"parentId\":0"));
    let back: Vec<flattree::FlatRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, records);
}
