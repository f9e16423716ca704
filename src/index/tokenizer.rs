//! Word tokenization of input lines.
//!
//! A word is a maximal run of ASCII letters; every other byte (digits,
//! punctuation, whitespace, non-ASCII characters) separates words.
//! Words are normalized to lowercase.

use std::iter::FusedIterator;

/// Returns an iterator over the normalized words of `line`.
///
/// # Example
/// ```
/// use wordtracker::index::tokenize;
///
/// let words: Vec<String> = tokenize("The Cat's 9 lives!").collect();
/// assert_eq!(words, vec!["the", "cat", "s", "lives"]);
/// ```
pub fn tokenize(line: &str) -> Tokens<'_> {
    Tokens {
        bytes: line.as_bytes(),
        position: 0,
    }
}

/// Iterator over the words of a line, created by [tokenize].
///
/// Scans the line byte by byte; since separators include all non-ASCII
/// bytes, every word is pure ASCII.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl Iterator for Tokens<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.bytes[self.position..];
        let start = self.position + rest.iter().position(u8::is_ascii_alphabetic)?;
        let len = self.bytes[start..]
            .iter()
            .position(|b| !b.is_ascii_alphabetic())
            .unwrap_or(self.bytes.len() - start);
        self.position = start + len;

        let word = self.bytes[start..self.position]
            .iter()
            .map(|b| char::from(b.to_ascii_lowercase()))
            .collect();
        Some(word)
    }
}

impl FusedIterator for Tokens<'_> {}
