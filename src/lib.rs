//! Wordtracker is a library to index the words of text files by file and
//! line number, persist that index across runs, and report on it.
//!
//! Core functionality provided:
//! - [OrderedTree](model::OrderedTree): Generic, unbalanced binary search
//!   tree using the arena pattern, with find-or-insert, min/max removal and
//!   in-, pre- and post-order iterators.
//! - [WordRecord](model::WordRecord): A word with the set of lines it occurs
//!   on per file; ordered by word.
//! - [Indexer](index::Indexer): Splits lines into lowercase words (maximal
//!   runs of ASCII letters) and records each word's (file, line) location.
//! - [report]: Renders the index in ascending word order as file list, line
//!   list or occurrence report.
//! - [store]: Loads and saves the whole index as one snapshot, so that a
//!   new run augments the index of earlier runs.
//!
//! Limitations:
//! - The tree is not balanced; sorted input yields a degenerate tree.
//! - Single-threaded: the index has no internal synchronization.
//! - Snapshots are only readable by the same version of this crate.
//!
//! # Usage patterns
//! 1. [`run`] performs a whole run (load, ingest, save, report) for a
//!    [TrackerConfig], as the `wordtracker` binary does.
//! 2. Use [Indexer](index::Indexer), [report] and [store] directly for full
//!    control.
//!
//! ## Example
//! ```
//! use wordtracker::index::Indexer;
//! use wordtracker::report::{ReportKind, render};
//!
//! let mut indexer = Indexer::new();
//! indexer.ingest("cats.txt", ["The cat sat.", "The Cat ran."]);
//!
//! let report = render(ReportKind::Files, indexer.index());
//! assert_eq!(report[0], "Word: cat, Files: cats.txt");
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod report;
pub mod store;

pub use crate::config::TrackerConfig;
pub use crate::error::{Result, TrackerError};

use crate::index::{IngestSummary, Indexer};
use crate::report::ReportKind;
use crate::store::{FileStore, IndexStore};
use std::io;
use tracing::{error, warn};

// ============================================================================
// Quick Run API
// ============================================================================
/// Performs one complete run for `config`:
///
/// 1. Load the index from the repository snapshot (empty on any failure)
/// 2. Ingest the input file
/// 3. Save the index (failure is logged, the report is still produced)
/// 4. Render the requested report to the output file or standard output
///
/// # Errors
/// - [TrackerError::Io] if the input cannot be read; nothing is saved then.
/// - [TrackerError::InvalidArgument] if the report flag is unknown and the
///   index holds at least one word; the index has been ingested and saved at
///   that point. With an empty index nothing is written and `Ok` is returned.
/// - [TrackerError::Io] if the report cannot be written.
pub fn run(config: &TrackerConfig) -> Result<IngestSummary> {
    let store = FileStore::new(&config.repository);
    let mut indexer = Indexer::with_index(store.load());

    let summary = indexer.ingest_file(&config.input)?;

    if let Err(err) = store.save(indexer.index()) {
        error!(error = %err, "Could not save index");
    }

    let kind = match ReportKind::from_flag(&config.report) {
        Ok(kind) => kind,
        // Unknown kinds are reported per word; without words there is nothing to report
        Err(err) if indexer.index().is_empty() => {
            warn!(error = %err, "Empty index, no report written");
            return Ok(summary);
        }
        Err(err) => return Err(err),
    };
    match &config.output {
        Some(path) => report::write_report_file(path, kind, indexer.index())?,
        None => report::write_report(io::stdout().lock(), kind, indexer.index())
            .map_err(|err| TrackerError::io("<stdout>", err))?,
    }

    Ok(summary)
}
