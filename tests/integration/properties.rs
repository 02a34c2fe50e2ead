use std::collections::HashMap;

use flattree::query::{select, DepthLimit};
use flattree::record::{validate_sequence, FlatRecord};
use flattree::tree::{path, reconstruct, reconstruct_forest, TreeNode};
use proptest::prelude::*;

use crate::support::{records_of, tree_from_parents};

fn arb_parents() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(any::<prop::sample::Index>(), 0..60).prop_map(|picks| {
        picks
            .iter()
            .enumerate()
            .map(|(index, pick)| pick.index(index + 1))
            .collect()
    })
}

/// Depth of `record` below `anchor` by walking parent ids, None if unrelated
fn depth_below(by_id: &HashMap<u64, &FlatRecord>, record: &FlatRecord, anchor: u64) -> Option<u32> {
    let mut depth = 0;
    let mut current = record;
    while let Some(parent) = current.parent_id {
        depth += 1;
        if parent == anchor {
            return Some(depth);
        }
        current = by_id[&parent];
    }
    None
}

fn preorder_titles(node: &TreeNode, out: &mut Vec<String>) {
    out.push(node.title.clone());
    for child in &node.children {
        preorder_titles(child, out);
    }
}

proptest! {
    #[test]
    fn prop_sequence_is_valid(parents in arb_parents()) {
        let records = records_of(&tree_from_parents(&parents));
        prop_assert_eq!(records.len(), parents.len() + 1);
        prop_assert!(validate_sequence(&records).is_ok());
    }

    #[test]
    fn prop_subtrees_are_contiguous(parents in arb_parents()) {
        let records = records_of(&tree_from_parents(&parents));
        for record in &records {
            let end = record.last_descendant_id() as usize;
            for inside in &records[record.id as usize + 1..=end] {
                prop_assert!(path::is_under(&inside.name, &record.name));
            }
            if let Some(after) = records.get(end + 1) {
                prop_assert!(!path::is_under(&after.name, &record.name));
            }
        }
    }

    #[test]
    fn prop_range_matches_parent_walk(parents in arb_parents(), depth in 1i64..5, pick in any::<prop::sample::Index>()) {
        let records = records_of(&tree_from_parents(&parents));
        let by_id: HashMap<u64, &FlatRecord> = records.iter().map(|r| (r.id, r)).collect();
        let anchor = &records[pick.index(records.len())];

        let selected = select(&records, Some(anchor.name.as_str()), DepthLimit::levels(depth).unwrap(), false);
        let expected: Vec<FlatRecord> = records
            .iter()
            .filter(|r| depth_below(&by_id, r, anchor.id).is_some_and(|d| i64::from(d) <= depth))
            .cloned()
            .collect();
        prop_assert_eq!(selected, expected);
    }

    #[test]
    fn prop_reconstruct_round_trips(parents in arb_parents()) {
        let records = records_of(&tree_from_parents(&parents));
        let tree = reconstruct(&records, 0).unwrap().unwrap();
        let mut titles = Vec::new();
        preorder_titles(&tree, &mut titles);
        let expected: Vec<String> = records.iter().map(|r| r.title.clone()).collect();
        prop_assert_eq!(titles, expected);
        prop_assert_eq!(tree.size as usize, records.len() - 1);
    }

    #[test]
    fn prop_select_with_root_then_reconstruct_is_lossless(parents in arb_parents()) {
        let records = records_of(&tree_from_parents(&parents));
        let selected = select(&records, Some(records[0].name.as_str()), DepthLimit::Unbounded, true);
        prop_assert_eq!(&selected, &records);
        let tree = reconstruct(&selected, 0).unwrap().unwrap();
        prop_assert_eq!(tree.node_count(), records.len());
    }

    #[test]
    fn prop_parent_links_step_one_level(parents in arb_parents()) {
        let records = records_of(&tree_from_parents(&parents));
        for record in &records[1..] {
            let parent = &records[record.parent_id.unwrap() as usize];
            prop_assert_eq!(record.level, parent.level + 1);
            prop_assert_eq!(path::last_segment(&record.name), record.title.as_str());
        }
    }

    #[test]
    fn prop_forest_below_root_covers_everything(parents in arb_parents()) {
        let records = records_of(&tree_from_parents(&parents));
        let forest = reconstruct_forest(&records[1..], 1).unwrap();
        let total: usize = forest.iter().map(TreeNode::node_count).sum();
        prop_assert_eq!(total, records.len() - 1);
    }
}
