use std::collections::BTreeSet;
use wordtracker::model::{OrderedTree, WordRecord};

#[test]
fn test_new_record_has_no_locations() {
    let record = WordRecord::new("pukeko").unwrap();
    assert_eq!(record.word(), "pukeko");
    assert_eq!(record.occurrences(), 0);
    assert_eq!(record.num_files(), 0);
    assert!(record.locations().is_empty());
}

#[test]
fn test_new_rejects_unnormalized_words() {
    assert!(WordRecord::new("").unwrap_err().is_invalid_argument());
    assert!(WordRecord::new("Kea").unwrap_err().is_invalid_argument());
    assert!(WordRecord::new("kea2").unwrap_err().is_invalid_argument());
    assert!(WordRecord::new("black robin").unwrap_err().is_invalid_argument());
}

#[test]
fn test_add_location_is_idempotent() {
    let mut once = WordRecord::new("kaka").unwrap();
    assert!(once.add_location("a.txt", 3));

    let mut twice = WordRecord::new("kaka").unwrap();
    assert!(twice.add_location("a.txt", 3));
    assert!(!twice.add_location("a.txt", 3));

    assert_eq!(once.locations(), twice.locations());
    assert_eq!(twice.occurrences(), 1);
}

#[test]
fn test_occurrences_count_distinct_file_line_pairs() {
    let mut record = WordRecord::new("weka").unwrap();
    record.add_location("north.txt", 1);
    record.add_location("north.txt", 4);
    record.add_location("north.txt", 4);
    record.add_location("south.txt", 4);
    record.add_location("south.txt", 2);

    assert_eq!(record.occurrences(), 4);
    assert_eq!(record.num_files(), 2);
    assert_eq!(record.files().collect::<Vec<_>>(), vec!["north.txt", "south.txt"]);
    assert_eq!(record.lines_in("south.txt"), Some(&BTreeSet::from([2, 4])));
    assert_eq!(record.lines_in("east.txt"), None);
}

#[test]
fn test_records_order_by_word_only() {
    let mut kea = WordRecord::new("kea").unwrap();
    kea.add_location("a.txt", 1);
    let bare_kea = WordRecord::new("kea").unwrap();
    let tui = WordRecord::new("tui").unwrap();

    assert_eq!(kea, bare_kea);
    assert!(kea < tui);
    assert!(WordRecord::new("ab").unwrap() < WordRecord::new("b").unwrap());
}

#[test]
fn test_tree_of_records_searchable_by_str() {
    let mut tree = OrderedTree::new();
    for word in ["tui", "kea", "moa"] {
        tree.insert(WordRecord::new(word).unwrap());
    }

    assert!(tree.contains("kea"));
    assert!(!tree.contains("kiwi"));
    tree.get_mut("moa").unwrap().add_location("extinct.txt", 9);
    assert_eq!(tree.get("moa").unwrap().occurrences(), 1);
}
