use flattree::store::{MemoryRecordStore, SledRecordStore};
use flattree::{ApiError, QueryError, TreeApi, TreeNode};

use crate::support::{animals, records_of, small_tree, titles};

fn sled_api() -> TreeApi<SledRecordStore> {
    let store = SledRecordStore::temporary().unwrap();
    flattree::seed::Seeder::new(&store)
        .seed_records(&records_of(&small_tree()), false)
        .unwrap();
    TreeApi::new(store)
}

#[test]
fn subtree_tree_two_levels_from_root() {
    let tree = sled_api().get_subtree_tree(Some("Root"), Some(2)).unwrap();
    let expected = TreeNode::leaf("Root", 4).with_children(vec![
        TreeNode::leaf("A", 2).with_children(vec![TreeNode::leaf("A1", 0), TreeNode::leaf("A2", 0)]),
        TreeNode::leaf("B", 0),
    ]);
    assert_eq!(tree, expected);

    let json = serde_json::to_value(&tree).unwrap();
    assert!(json["children"][1].get("children").is_none());
}

#[test]
fn subtree_tree_defaults_to_unbounded() {
    let api = sled_api();
    let tree = api.get_subtree_tree(None, None).unwrap();
    assert_eq!(tree.node_count(), 5);
}

#[test]
fn subtree_flat_uses_configured_default_depth() {
    let store = MemoryRecordStore::with_records(&records_of(&small_tree())).unwrap();
    let config = flattree::config::QueryConfig {
        default_flat_depth: 2,
    };
    let api = TreeApi::with_config(store, &config);
    assert_eq!(
        titles(&api.get_subtree_flat(None, None).unwrap()),
        vec!["A", "A1", "A2", "B"]
    );
    assert_eq!(titles(&api.get_subtree_flat(None, Some(1)).unwrap()), vec!["A", "B"]);
}

#[test]
fn narrowed_scan_matches_full_scan() {
    let records = records_of(&animals());
    let api = TreeApi::new(MemoryRecordStore::with_records(&records).unwrap());
    for record in &records {
        for depth in 1..=3 {
            let narrowed = api.get_subtree_flat(Some(record.name.as_str()), Some(depth)).unwrap();
            let full = flattree::query::select(
                &records,
                Some(record.name.as_str()),
                flattree::DepthLimit::levels(depth).unwrap(),
                false,
            );
            assert_eq!(narrowed, full, "path {} depth {}", record.name, depth);
        }
    }
}

#[test]
fn validation_errors_come_before_lookups() {
    let api = TreeApi::new(MemoryRecordStore::new());
    assert!(matches!(
        api.get_subtree_flat(Some("Nowhere"), Some(0)),
        Err(ApiError::Validation(QueryError::InvalidDepth(0)))
    ));
    assert!(matches!(
        api.search(Some("Nowhere"), None),
        Err(ApiError::Validation(QueryError::EmptySearchTerm))
    ));
    assert!(matches!(
        api.get_subtree_tree(Some("Nowhere"), None),
        Err(ApiError::NotFound(_))
    ));
}

#[test]
fn empty_path_means_root() {
    let api = sled_api();
    assert_eq!(
        api.get_subtree_flat(Some(""), None).unwrap(),
        api.get_subtree_flat(None, None).unwrap()
    );
    assert_eq!(api.get_subtree_tree(Some(""), Some(1)).unwrap().title, "Root");
}
