//! Parse progress as a whole percentage of a file.
//!
//! Large article dumps take a while to load, so readers report how far
//! through a file they are. The total is the file's line count, taken up
//! front with [`count_lines`]; [`ProgressTracker`] then turns "one more line
//! read" into a new percentage only when the integer value actually changes.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;
use crate::records::RecordKind;

/// A progress update for one record file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Which kind of file is being read.
    pub kind: RecordKind,
    /// Whole percentage of lines read so far, `0..=100`.
    pub percent: u8,
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parsing {}: {}% complete", self.kind.plural(), self.percent)
    }
}

/// Tracks lines read against a known total and reports percentage changes.
///
/// # Examples
///
/// ```
/// use linkgraph_records::{ProgressTracker, RecordKind};
///
/// let mut tracker = ProgressTracker::new(RecordKind::Edge, 4);
/// assert_eq!(tracker.advance().map(|p| p.percent), Some(25));
/// assert_eq!(tracker.advance().map(|p| p.percent), Some(50));
/// ```
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    kind: RecordKind,
    total: usize,
    processed: usize,
    last_percent: Option<u8>,
}

impl ProgressTracker {
    /// Creates a tracker for a file of `total` lines.
    #[must_use]
    pub fn new(kind: RecordKind, total: usize) -> Self {
        Self {
            kind,
            total,
            processed: 0,
            last_percent: None,
        }
    }

    /// Lines counted so far.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Records one more line and returns the new percentage if it changed.
    ///
    /// Reads past the announced total are clamped to 100%.
    pub fn advance(&mut self) -> Option<Progress> {
        self.processed += 1;
        let percent = self.percent();
        if self.last_percent == Some(percent) {
            return None;
        }
        self.last_percent = Some(percent);
        Some(Progress {
            kind: self.kind,
            percent,
        })
    }

    fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let percent = (self.processed.min(self.total) * 100) / self.total;
        u8::try_from(percent).unwrap_or(100)
    }
}

/// Counts the lines in a file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened or read.
pub fn count_lines(path: &Path) -> Result<usize> {
    let reader = BufReader::new(File::open(path)?);
    let mut count = 0;
    for line in reader.split(b'\n') {
        line?;
        count += 1;
    }
    tracing::trace!(path = %path.display(), lines = count, "Counted lines");
    Ok(count)
}
