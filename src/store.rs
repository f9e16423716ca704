//! Whole-index persistence.
//!
//! The index is stored as one opaque snapshot: [IndexStore::load] before any
//! ingestion, [IndexStore::save] after it. Snapshots are bincode encodings of
//! the in-memory [WordIndex]; compatibility across versions of this crate is
//! not managed.
//!
//! * [FileStore] - snapshot in a file (default `repository.ser`)
//! * [MemoryStore] - snapshot in memory, e.g. for tests

use crate::error::{Result, TrackerError};
use crate::index::WordIndex;
use crate::model::word_record::is_normalized_word;
use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default snapshot file name, relative to the working directory.
pub const DEFAULT_REPOSITORY: &str = "repository.ser";

// =#========================================================================#=
// INDEX STORE (Trait)
// =#========================================================================#=
/// Capability to load and save a complete [WordIndex].
pub trait IndexStore {
    /// Loads the stored index, or an empty one if nothing is stored.
    fn try_load(&self) -> Result<WordIndex>;

    /// Stores `index`, replacing any previous snapshot.
    fn save(&self, index: &WordIndex) -> Result<()>;

    /// Loads the stored index, falling back to an empty index if the
    /// snapshot cannot be read. Failures are logged, never returned.
    fn load(&self) -> WordIndex {
        match self.try_load() {
            Ok(index) => index,
            Err(err) => {
                warn!(error = %err, "Could not load index, starting with an empty one");
                WordIndex::new()
            }
        }
    }
}

/// Decodes a snapshot and checks the tree invariants and the stored words
/// of the result.
fn decode(bytes: &[u8]) -> Result<WordIndex> {
    let index: WordIndex = bincode::deserialize(bytes)?;
    if !index.is_valid() {
        return Err(TrackerError::Snapshot(
            "decoded tree violates ordering or size invariants".to_string(),
        ));
    }
    if let Some(record) = index.iter().find(|record| !is_normalized_word(record.word())) {
        return Err(TrackerError::Snapshot(format!(
            "decoded index holds a non-normalized word: {:?}",
            record.word()
        )));
    }
    Ok(index)
}

// =#========================================================================#=
// FILE STORE
// =#========================================================================#=
/// Stores the index as a snapshot file.
///
/// Saving writes to a sibling temporary file first and then renames it over
/// the snapshot, so an interrupted save leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store for the snapshot file at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for FileStore {
    fn default() -> Self {
        FileStore::new(DEFAULT_REPOSITORY)
    }
}

impl IndexStore for FileStore {
    fn try_load(&self) -> Result<WordIndex> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %self.path.display(),
                    "No stored index, starting with an empty one"
                );
                return Ok(WordIndex::new());
            }
            Err(err) => return Err(TrackerError::io(&self.path, err)),
        };

        let index = decode(&bytes)?;
        info!(path = %self.path.display(), words = index.len(), "Loaded index");
        Ok(index)
    }

    fn save(&self, index: &WordIndex) -> Result<()> {
        let bytes = bincode::serialize(index)?;
        let temp_path = self.temp_path();
        fs::write(&temp_path, &bytes).map_err(|err| TrackerError::io(&temp_path, err))?;
        fs::rename(&temp_path, &self.path).map_err(|err| TrackerError::io(&self.path, err))?;
        info!(
            path = %self.path.display(),
            words = index.len(),
            bytes = bytes.len(),
            "Saved index"
        );
        Ok(())
    }
}

// =#========================================================================#=
// MEMORY STORE
// =#========================================================================#=
/// Keeps the latest snapshot in memory.
///
/// Goes through the same encoding as [FileStore], so a round trip through it
/// exercises the snapshot format. Single-threaded use only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: RefCell<Option<Vec<u8>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Creates a store holding the given raw snapshot bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        MemoryStore {
            snapshot: RefCell::new(Some(bytes)),
        }
    }

    /// Returns `true` if a snapshot has been saved.
    pub fn has_snapshot(&self) -> bool {
        self.snapshot.borrow().is_some()
    }
}

impl IndexStore for MemoryStore {
    fn try_load(&self) -> Result<WordIndex> {
        match self.snapshot.borrow().as_deref() {
            Some(bytes) => decode(bytes),
            None => Ok(WordIndex::new()),
        }
    }

    fn save(&self, index: &WordIndex) -> Result<()> {
        let bytes = bincode::serialize(index)?;
        self.snapshot.replace(Some(bytes));
        Ok(())
    }
}
