//! Report rendering for the word index.
//!
//! Walks the index in ascending word order and renders one of three
//! [ReportKind]s, one record per word:
//!
//! | Flag | Kind | Record |
//! |------|------|--------|
//! | `-pf` | [ReportKind::Files] | `Word: <w>, Files: <f1>, <f2>` |
//! | `-pl` | [ReportKind::Lines] | `Word: <w>` + one `  File: <f>, Lines: [<l1>, <l2>]` per file |
//! | `-po` | [ReportKind::Occurrences] | `Word: <w>, Occurrences: <n>` + the per-file lines |
//!
//! Files of a word are listed in ascending filename order.

use crate::error::{Result, TrackerError};
use crate::index::WordIndex;
use crate::model::{LineNumber, WordRecord};
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Shape of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Per word, the files it occurs in (`-pf`)
    Files,
    /// Per word, the files and line numbers it occurs on (`-pl`)
    Lines,
    /// Per word, its occurrence count plus files and line numbers (`-po`)
    Occurrences,
}

impl ReportKind {
    /// All report kinds, in flag order.
    pub const ALL: [ReportKind; 3] = [
        ReportKind::Files,
        ReportKind::Lines,
        ReportKind::Occurrences,
    ];

    /// Parses a command line flag (`-pf`, `-pl` or `-po`).
    ///
    /// # Errors
    /// [TrackerError::InvalidArgument] for any other flag.
    pub fn from_flag(flag: &str) -> Result<Self> {
        match flag {
            "-pf" => Ok(ReportKind::Files),
            "-pl" => Ok(ReportKind::Lines),
            "-po" => Ok(ReportKind::Occurrences),
            _ => Err(TrackerError::InvalidArgument(format!(
                "invalid report type {flag:?}, expected one of -pf, -pl, -po"
            ))),
        }
    }

    /// Returns the command line flag of this kind.
    pub fn flag(&self) -> &'static str {
        match self {
            ReportKind::Files => "-pf",
            ReportKind::Lines => "-pl",
            ReportKind::Occurrences => "-po",
        }
    }
}

impl FromStr for ReportKind {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        ReportKind::from_flag(s)
    }
}

// ============================================================================
// Rendering (pub)
// ============================================================================
/// Renders the report of the given kind as a list of lines
/// (without line terminators), in ascending word order.
///
/// # Example
/// ```
/// use wordtracker::index::Indexer;
/// use wordtracker::report::{ReportKind, render};
///
/// let mut indexer = Indexer::new();
/// indexer.ingest("a.txt", ["Kea kea", "tui"]);
///
/// let report = render(ReportKind::Occurrences, indexer.index());
/// assert_eq!(report, vec![
///     "Word: kea, Occurrences: 1",
///     "  File: a.txt, Lines: [1]",
///     "Word: tui, Occurrences: 1",
///     "  File: a.txt, Lines: [2]",
/// ]);
/// ```
pub fn render(kind: ReportKind, index: &WordIndex) -> Vec<String> {
    let mut lines = Vec::with_capacity(index.len());
    for record in index.in_order_iter() {
        render_record(kind, record, &mut lines);
    }
    lines
}

/// Renders the report selected by a command line flag.
///
/// # Errors
/// [TrackerError::InvalidArgument] if `flag` names no [ReportKind].
pub fn render_flag(flag: &str, index: &WordIndex) -> Result<Vec<String>> {
    let kind = ReportKind::from_flag(flag)?;
    Ok(render(kind, index))
}

/// Writes the report of the given kind to `writer`, one line per entry.
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_report<W: Write>(writer: W, kind: ReportKind, index: &WordIndex) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    let mut lines = Vec::new();
    for record in index.in_order_iter() {
        lines.clear();
        render_record(kind, record, &mut lines);
        for line in &lines {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
    }

    writer.flush()
}

/// Writes the report of the given kind to the file at `path`,
/// creating or truncating it.
///
/// # Errors
/// [TrackerError::Io] if the file cannot be created or written.
pub fn write_report_file<P: AsRef<Path>>(
    path: P,
    kind: ReportKind,
    index: &WordIndex,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|err| TrackerError::io(path, err))?;
    write_report(file, kind, index).map_err(|err| TrackerError::io(path, err))
}

// ============================================================================
// Helpers (private)
// ============================================================================
/// Appends the lines of one record to `lines`.
fn render_record(kind: ReportKind, record: &WordRecord, lines: &mut Vec<String>) {
    match kind {
        ReportKind::Files => {
            let files: Vec<&str> = record.files().collect();
            lines.push(format!("Word: {}, Files: {}", record.word(), files.join(", ")));
        }
        ReportKind::Lines => {
            lines.push(format!("Word: {}", record.word()));
            render_locations(record, lines);
        }
        ReportKind::Occurrences => {
            lines.push(format!(
                "Word: {}, Occurrences: {}",
                record.word(),
                record.occurrences()
            ));
            render_locations(record, lines);
        }
    }
}

fn render_locations(record: &WordRecord, lines: &mut Vec<String>) {
    for (file, line_numbers) in record.locations() {
        lines.push(format!(
            "  File: {}, Lines: {}",
            file,
            format_line_numbers(line_numbers)
        ));
    }
}

/// Formats line numbers as `[1, 2, 3]`.
fn format_line_numbers(line_numbers: &BTreeSet<LineNumber>) -> String {
    let mut out = String::with_capacity(2 + 4 * line_numbers.len());
    out.push('[');
    for (i, line_number) in line_numbers.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        // Writing into a String cannot fail
        let _ = write!(out, "{line_number}");
    }
    out.push(']');
    out
}
