//! Word record module for the word index.
//!
//! - `WordRecord`: A word together with every (file, line) location it was seen at.

use crate::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// 1-based line number within a file.
pub type LineNumber = usize;

// =#========================================================================#=
// WORD RECORD
// =#========================================================================#=
/// Aggregates all locations of one word across all indexed files.
///
/// Maps each filename to the ordered set of line numbers the word occurs on.
/// A line is recorded at most once per file, no matter how often the word
/// appears on it.
///
/// Records are ordered and compared by their word only, so that an
/// [OrderedTree](crate::model::OrderedTree) of records acts as a map keyed
/// by word. Via [`Borrow<str>`] a tree of records can be searched by `&str`.
///
/// # Example
/// ```
/// use wordtracker::model::WordRecord;
///
/// let mut record = WordRecord::new("kea").unwrap();
/// record.add_location("alpine.txt", 3);
/// record.add_location("alpine.txt", 3);
/// record.add_location("alpine.txt", 7);
/// record.add_location("forest.txt", 1);
///
/// assert_eq!(record.occurrences(), 3);
/// assert_eq!(record.num_files(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordRecord {
    /// Normalized word (lowercase ASCII letters)
    word: String,
    /// Map from filename to line numbers the word occurs on
    locations: BTreeMap<String, BTreeSet<LineNumber>>,
}

impl WordRecord {
    /// Creates a new record without any locations.
    ///
    /// # Arguments
    /// * `word` - Normalized word; must be non-empty and consist of
    ///   lowercase ASCII letters only
    ///
    /// # Errors
    /// [TrackerError::InvalidArgument] if `word` is empty or not normalized.
    pub fn new(word: impl Into<String>) -> Result<Self> {
        let word = word.into();
        if !is_normalized_word(&word) {
            return Err(TrackerError::InvalidArgument(format!(
                "not a normalized word: {word:?}"
            )));
        }
        Ok(Self::from_normalized(word))
    }

    /// Creates a record for a word already known to be normalized.
    pub(crate) fn from_normalized(word: String) -> Self {
        debug_assert!(is_normalized_word(&word));
        WordRecord {
            word,
            locations: BTreeMap::new(),
        }
    }

    /// Records that the word occurs on `line_number` of `filename`.
    ///
    /// Idempotent: adding the same location twice has no further effect.
    ///
    /// # Returns
    /// `true` if the location was new, `false` otherwise.
    pub fn add_location(&mut self, filename: &str, line_number: LineNumber) -> bool {
        if let Some(lines) = self.locations.get_mut(filename) {
            lines.insert(line_number)
        } else {
            self.locations
                .insert(filename.to_string(), BTreeSet::from([line_number]));
            true
        }
    }

    /// Returns the word of this record.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Returns the number of distinct (file, line) locations of this word.
    ///
    /// This counts lines, not individual tokens: a word appearing twice on
    /// the same line counts once.
    pub fn occurrences(&self) -> usize {
        self.locations.values().map(BTreeSet::len).sum()
    }

    /// Returns the map from filename to line numbers.
    pub fn locations(&self) -> &BTreeMap<String, BTreeSet<LineNumber>> {
        &self.locations
    }

    /// Returns the filenames this word occurs in, in ascending order.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.locations.keys().map(String::as_str)
    }

    /// Returns the line numbers of this word in `filename`, if any.
    pub fn lines_in(&self, filename: &str) -> Option<&BTreeSet<LineNumber>> {
        self.locations.get(filename)
    }

    /// Returns the number of files this word occurs in.
    pub fn num_files(&self) -> usize {
        self.locations.len()
    }
}

/// Checks that `word` is non-empty and made of lowercase ASCII letters.
pub(crate) fn is_normalized_word(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_lowercase())
}

// ============================================================================
// Ordering by word (pub)
// ============================================================================
impl PartialEq for WordRecord {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
    }
}

impl Eq for WordRecord {}

impl PartialOrd for WordRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WordRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.word.cmp(&other.word)
    }
}

impl Borrow<str> for WordRecord {
    fn borrow(&self) -> &str {
        &self.word
    }
}

impl fmt::Display for WordRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({} occurrences)", self.word, self.occurrences())
    }
}
