use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use wordtracker::{TrackerConfig, TrackerError};
use wordtracker::index::{Indexer, WordIndex};
use wordtracker::model::WordRecord;
use wordtracker::store::{FileStore, IndexStore, MemoryStore};

fn sample_index() -> WordIndex {
    let mut indexer = Indexer::new();
    indexer.ingest("poem.txt", ["Ruru calls", "at night, ruru", "kiwi forage at night"]);
    indexer.ingest("notes.txt", ["kiwi"]);
    indexer.into_index()
}

fn assert_same_records(left: &WordIndex, right: &WordIndex) {
    assert_eq!(left.len(), right.len());
    assert_eq!(left.height(), right.height());
    for (a, b) in left.in_order_iter().zip(right.in_order_iter()) {
        assert_eq!(a.word(), b.word());
        assert_eq!(a.locations(), b.locations());
    }
    // Same shape, not only same content
    let left_pre: Vec<&WordRecord> = left.pre_order_iter().collect();
    let right_pre: Vec<&WordRecord> = right.pre_order_iter().collect();
    assert_eq!(left_pre, right_pre);
}

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("repository.ser"));
    let index = sample_index();

    store.save(&index).unwrap();
    let loaded = store.try_load().unwrap();

    assert_same_records(&index, &loaded);
    assert!(loaded.is_valid());
}

#[test]
fn test_memory_store_round_trip() {
    let store = MemoryStore::new();
    assert!(!store.has_snapshot());
    assert!(store.load().is_empty());

    let index = sample_index();
    store.save(&index).unwrap();
    assert!(store.has_snapshot());
    assert_same_records(&index, &store.load());
}

#[test]
fn test_round_trip_after_removals() {
    let mut index = sample_index();
    index.remove_min();
    index.remove_max();

    let store = MemoryStore::new();
    store.save(&index).unwrap();
    let loaded = store.try_load().unwrap();
    assert_same_records(&index, &loaded);

    // Recycled slots keep working after a reload
    let mut indexer = Indexer::with_index(loaded);
    indexer.ingest("more.txt", ["zebra apple"]);
    assert!(indexer.index().is_valid());
    assert_eq!(indexer.index().len(), index.len() + 2);
}

#[test]
fn test_missing_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("absent.ser"));
    assert!(store.try_load().unwrap().is_empty());
    assert!(store.load().is_empty());
}

#[test]
fn test_corrupt_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repository.ser");
    fs::write(&path, b"definitely not a snapshot").unwrap();

    let store = FileStore::new(&path);
    assert!(store.try_load().is_err());
    assert!(store.load().is_empty());
}

#[test]
fn test_truncated_snapshot_starts_empty() {
    let bytes = bincode::serialize(&sample_index()).unwrap();

    let truncated = MemoryStore::from_bytes(bytes[..bytes.len() / 2].to_vec());
    assert!(truncated.try_load().is_err());
    assert!(truncated.load().is_empty());
}

#[test]
fn test_save_replaces_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("repository.ser"));

    store.save(&sample_index()).unwrap();
    store.save(&WordIndex::new()).unwrap();
    assert!(store.try_load().unwrap().is_empty());
}

// ============= Structurally broken snapshots =============

// Same field layout as the stored tree, but free to hold any shape
#[derive(Serialize)]
struct RawRecord {
    word: String,
    locations: BTreeMap<String, BTreeSet<usize>>,
}

#[derive(Serialize)]
struct RawNode {
    element: RawRecord,
    left: Option<usize>,
    right: Option<usize>,
}

#[derive(Serialize)]
struct RawTree {
    nodes: Vec<Option<RawNode>>,
    free: Vec<usize>,
    root: Option<usize>,
    len: usize,
}

fn raw_node(word: &str, left: Option<usize>, right: Option<usize>) -> Option<RawNode> {
    let locations = BTreeMap::from([("raw.txt".to_string(), BTreeSet::from([1]))]);
    Some(RawNode {
        element: RawRecord {
            word: word.to_string(),
            locations,
        },
        left,
        right,
    })
}

fn raw_tree(nodes: Vec<Option<RawNode>>, len: usize) -> RawTree {
    RawTree {
        nodes,
        free: Vec::new(),
        root: Some(0),
        len,
    }
}

fn assert_rejected(tree: RawTree) {
    let store = MemoryStore::from_bytes(bincode::serialize(&tree).unwrap());
    assert!(matches!(store.try_load(), Err(TrackerError::Snapshot(_))));
    assert!(store.load().is_empty());
}

#[test]
fn test_well_formed_raw_snapshot_loads() {
    let tree = raw_tree(vec![raw_node("kea", Some(1), None), raw_node("ant", None, None)], 2);
    let store = MemoryStore::from_bytes(bincode::serialize(&tree).unwrap());

    let index = store.try_load().unwrap();
    assert_eq!(index.len(), 2);
    assert!(index.contains("ant"));
    assert!(index.contains("kea"));
}

#[test]
fn test_snapshot_with_cycle_is_rejected() {
    assert_rejected(raw_tree(
        vec![raw_node("kea", Some(1), None), raw_node("ant", None, Some(0))],
        2,
    ));
}

#[test]
fn test_snapshot_with_dangling_child_is_rejected() {
    assert_rejected(raw_tree(vec![raw_node("kea", Some(5), None)], 1));
}

#[test]
fn test_snapshot_with_shared_child_is_rejected() {
    assert_rejected(raw_tree(
        vec![raw_node("kea", Some(1), Some(1)), raw_node("ant", None, None)],
        2,
    ));
}

#[test]
fn test_snapshot_out_of_order_is_rejected() {
    assert_rejected(raw_tree(
        vec![raw_node("ant", Some(1), None), raw_node("kea", None, None)],
        2,
    ));
}

#[test]
fn test_snapshot_with_wrong_len_is_rejected() {
    assert_rejected(raw_tree(vec![raw_node("kea", None, None)], 2));
}

#[test]
fn test_snapshot_with_unnormalized_word_is_rejected() {
    assert_rejected(raw_tree(vec![raw_node("Kea 42", None, None)], 1));
}

#[test]
fn test_file_snapshot_with_cycle_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repository.ser");
    let tree = raw_tree(vec![raw_node("kea", Some(0), None)], 1);
    fs::write(&path, bincode::serialize(&tree).unwrap()).unwrap();

    let store = FileStore::new(&path);
    assert!(matches!(store.try_load(), Err(TrackerError::Snapshot(_))));
    assert!(store.load().is_empty());
}

// ============= Full runs =============

#[test]
fn test_run_augments_index_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let repository = dir.path().join("repository.ser");
    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");
    let output = dir.path().join("report.txt");
    fs::write(&first, "The cat sat.\nThe Cat ran.\n").unwrap();
    fs::write(&second, "A cat.\n").unwrap();

    let config = TrackerConfig::new(&first, "-pf")
        .with_repository(&repository)
        .with_output(&output);
    wordtracker::run(&config).unwrap();
    // Same file again must not duplicate anything
    wordtracker::run(&config).unwrap();

    let config = TrackerConfig::new(&second, "-po")
        .with_repository(&repository)
        .with_output(&output);
    wordtracker::run(&config).unwrap();

    let index = FileStore::new(&repository).try_load().unwrap();
    let cat = index.get("cat").unwrap();
    assert_eq!(cat.occurrences(), 3);
    assert_eq!(cat.num_files(), 2);

    let report = fs::read_to_string(&output).unwrap();
    assert!(report.starts_with("Word: a, Occurrences: 1\n"));
}

#[test]
fn test_run_with_unknown_flag_still_saves_index() {
    let dir = tempfile::tempdir().unwrap();
    let repository = dir.path().join("repository.ser");
    let input = dir.path().join("input.txt");
    let output = dir.path().join("report.txt");
    fs::write(&input, "kea\n").unwrap();

    let config = TrackerConfig::new(&input, "-px")
        .with_repository(&repository)
        .with_output(&output);
    let err = wordtracker::run(&config).unwrap_err();

    assert!(err.is_invalid_argument());
    assert!(!output.exists());
    assert!(FileStore::new(&repository).try_load().unwrap().contains("kea"));
}

#[test]
fn test_run_with_unknown_flag_on_empty_index_reports_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let repository = dir.path().join("repository.ser");
    let input = dir.path().join("digits.txt");
    let output = dir.path().join("report.txt");
    fs::write(&input, "42 7\n\n").unwrap();

    let config = TrackerConfig::new(&input, "-px")
        .with_repository(&repository)
        .with_output(&output);
    let summary = wordtracker::run(&config).unwrap();

    assert_eq!(summary.tokens, 0);
    assert!(!output.exists());
    assert!(FileStore::new(&repository).try_load().unwrap().is_empty());
}

#[test]
fn test_run_with_missing_input_saves_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let repository = dir.path().join("repository.ser");

    let config =
        TrackerConfig::new(dir.path().join("missing.txt"), "-pf").with_repository(&repository);
    assert!(wordtracker::run(&config).is_err());
    assert!(!repository.exists());
}
