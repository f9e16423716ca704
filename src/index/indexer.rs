//! Ingestion of text into the word index.

use crate::error::{Result, TrackerError};
use crate::index::tokenizer::tokenize;
use crate::model::{LineNumber, OrderedTree, WordRecord};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// The complete word index: one [WordRecord] per distinct word, in word order.
pub type WordIndex = OrderedTree<WordRecord>;

// =#========================================================================#=
// INGEST SUMMARY
// =#========================================================================#=
/// Counts collected while ingesting one input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Number of lines read
    pub lines: usize,
    /// Number of words seen (every occurrence counts)
    pub tokens: usize,
    /// Number of words not in the index before
    pub new_words: usize,
    /// Number of (word, file, line) locations not recorded before
    pub new_locations: usize,
}

impl fmt::Display for IngestSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} lines, {} tokens, {} new words, {} new locations",
            self.lines, self.tokens, self.new_words, self.new_locations
        )
    }
}

// =#========================================================================#=
// INDEXER
// =#========================================================================#=
/// Feeds lines of text into a [WordIndex].
///
/// For every word of every line, the indexer finds the word's record (creating
/// it on first sighting) and records the current file and 1-based line number
/// on it. Re-ingesting identical content leaves the index unchanged.
///
/// # Example
/// ```
/// use wordtracker::index::Indexer;
///
/// let mut indexer = Indexer::new();
/// indexer.ingest("birds.txt", ["The cat sat.", "The Cat ran."]);
///
/// let cat = indexer.index().get("cat").unwrap();
/// assert_eq!(cat.occurrences(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Indexer {
    index: WordIndex,
}

impl Indexer {
    /// Creates an indexer with an empty index.
    pub fn new() -> Self {
        Indexer {
            index: WordIndex::new(),
        }
    }

    /// Creates an indexer that augments an existing index,
    /// e.g. one loaded from a snapshot.
    pub fn with_index(index: WordIndex) -> Self {
        Indexer { index }
    }

    /// Returns a reference to the index.
    pub fn index(&self) -> &WordIndex {
        &self.index
    }

    /// Consumes the indexer and returns its index.
    pub fn into_index(self) -> WordIndex {
        self.index
    }

    /// Ingests `lines` as the content of `filename`.
    ///
    /// The first line is line 1. Lines without any words leave the index
    /// untouched but still count towards the line numbers.
    ///
    /// # Arguments
    /// * `filename` - Name under which locations are recorded
    /// * `lines` - Lines of the file, in order
    pub fn ingest<I, S>(&mut self, filename: &str, lines: I) -> IngestSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut summary = IngestSummary::default();

        for (position, line) in lines.into_iter().enumerate() {
            let line_number: LineNumber = position + 1;
            summary.lines += 1;

            for word in tokenize(line.as_ref()) {
                summary.tokens += 1;
                let len_before = self.index.len();
                let record = self.index.get_or_insert_with(word.as_str(), || {
                    WordRecord::from_normalized(word.clone())
                });
                if record.add_location(filename, line_number) {
                    summary.new_locations += 1;
                }
                if self.index.len() > len_before {
                    summary.new_words += 1;
                }
            }
        }

        debug!(filename, %summary, "Ingested lines");
        summary
    }

    /// Ingests a whole string, split into lines at `\n` (or `\r\n`).
    pub fn ingest_str(&mut self, filename: &str, text: &str) -> IngestSummary {
        self.ingest(filename, text.lines())
    }

    /// Reads the file at `path` and ingests its content, recording locations
    /// under the path as given.
    ///
    /// Invalid UTF-8 sequences are replaced, which only ever splits words.
    ///
    /// # Errors
    /// [TrackerError::Io] if the file cannot be read; the index is left unchanged.
    pub fn ingest_file<P: AsRef<Path>>(&mut self, path: P) -> Result<IngestSummary> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|err| TrackerError::io(path, err))?;
        let text = String::from_utf8_lossy(&bytes);

        let filename = path.to_string_lossy();
        let summary = self.ingest_str(&filename, &text);
        info!(
            file = %filename,
            lines = summary.lines,
            new_words = summary.new_words,
            total_words = self.index.len(),
            "Indexed file"
        );
        Ok(summary)
    }
}
