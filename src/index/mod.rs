//! Building the word index from text.
//!
//! * [tokenize] - splits a line into normalized words
//! * [Indexer] - runs find-or-insert for every word into a [WordIndex]
//!   and records the (file, line) location on the resolved record

pub mod indexer;
pub mod tokenizer;

pub use indexer::{IngestSummary, Indexer, WordIndex};
pub use tokenizer::{Tokens, tokenize};
