use std::sync::Arc;
use std::thread;

use flattree::seed::{import, read_records, Seeder};
use flattree::store::{RecordStore, SeedOutcome, SledRecordStore};
use flattree::tree::FlattenOptions;
use flattree::{ApiError, BuildError};
use tempfile::TempDir;

use crate::support::{records_of, small_tree};

#[test]
fn concurrent_seeders_write_once() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(SledRecordStore::new(&temp_dir.path().join("store")).unwrap());
    let records = Arc::new(records_of(&small_tree()));

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let store = Arc::clone(&store);
            let records = Arc::clone(&records);
            thread::spawn(move || Seeder::new(store.as_ref()).seed_records(&records, false).unwrap())
        })
        .collect();
    let outcomes: Vec<SeedOutcome> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(outcomes.iter().filter(|o| o.is_seeded()).count(), 1);
    assert_eq!(store.len().unwrap(), 5);
    assert_eq!(store.all().unwrap(), *records);
}

#[test]
fn import_then_seed_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("tree.json");
    std::fs::write(&input, serde_json::to_string(&small_tree()).unwrap()).unwrap();
    let output = temp_dir.path().join("records.json");

    let stats = import(&input, &output, FlattenOptions::default()).unwrap();
    assert_eq!(stats.node_count, 5);
    assert_eq!(stats.max_name_len, "Root > A > A1".len());

    let store = SledRecordStore::temporary().unwrap();
    let outcome = Seeder::new(&store).seed_file(&output, false).unwrap();
    let info = match outcome {
        SeedOutcome::Seeded(info) => info,
        other => panic!("expected a fresh seed, got {:?}", other),
    };
    assert_eq!(info.record_count, 5);
    assert_eq!(store.seed_info().unwrap(), Some(info));
    assert_eq!(read_records(&output).unwrap(), store.all().unwrap());
}

#[test]
fn imported_tree_accepts_words_label() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("tree.json");
    std::fs::write(
        &input,
        r#"{"words": "ImageNet 2011 Fall Release", "children": [{"words": "plant, flora, plant life"}]}"#,
    )
    .unwrap();
    let output = temp_dir.path().join("records.json");
    import(&input, &output, FlattenOptions::default()).unwrap();

    let records = read_records(&output).unwrap();
    assert_eq!(
        records[1].name,
        "ImageNet 2011 Fall Release > plant, flora, plant life"
    );
}

#[test]
fn corrupt_records_file_is_refused() {
    let mut records = records_of(&small_tree());
    records[1].size = 7;

    let store = SledRecordStore::temporary().unwrap();
    let err = Seeder::new(&store).seed_records(&records, false).unwrap_err();
    assert!(matches!(err, ApiError::Build(BuildError::SizeMismatch { id: 1, .. })));
    assert_eq!(err.status_code(), 409);
    assert!(store.is_empty().unwrap());
}

#[test]
fn force_reseed_replaces_contents() {
    let store = SledRecordStore::temporary().unwrap();
    let seeder = Seeder::new(&store);
    seeder.seed_records(&records_of(&small_tree()), false).unwrap();

    let other = records_of(&flattree::SourceNode::new("Other"));
    assert!(!seeder.seed_records(&other, false).unwrap().is_seeded());
    assert!(seeder.seed_records(&other, true).unwrap().is_seeded());
    assert_eq!(store.len().unwrap(), 1);
    assert_eq!(store.get_by_name("Root > A").unwrap(), None);
}
