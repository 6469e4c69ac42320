//! Line reading with line number tracking.
//!
//! This module provides buffered, line-by-line reading of flat record files.
//! Line numbers are tracked so that parse problems can be reported precisely.

use std::io::{BufRead, BufReader, Read};

/// Buffered line reader for flat record files.
///
/// `LineReader` wraps a reader in a [`BufReader`] and hands out one line at a
/// time with its 1-based line number. Trailing `\n` and `\r\n` terminators are
/// stripped.
///
/// # Examples
///
/// ```
/// use linkgraph_records::LineReader;
/// use std::io::Cursor;
///
/// let mut reader = LineReader::new(Cursor::new("0 Alpha\r\n1 Beta\n"));
/// assert_eq!(reader.next_line().unwrap(), Some((1, "0 Alpha".to_string())));
/// assert_eq!(reader.next_line().unwrap(), Some((2, "1 Beta".to_string())));
/// assert_eq!(reader.next_line().unwrap(), None);
/// ```
pub struct LineReader<R> {
    /// Buffered reader wrapping the underlying reader.
    reader: BufReader<R>,
    /// Current line number (1-based counting, 0 before any lines are read).
    line_number: usize,
    /// Reused line buffer.
    buffer: String,
}

impl<R> LineReader<R> {
    /// Returns the line number of the last line read, or 0 before any read.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: Read> LineReader<R> {
    /// Creates a new `LineReader` wrapping the given reader.
    ///
    /// The counter starts at 0 and increments after each line is read, so the
    /// first line read is numbered 1.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buffer: String::new(),
        }
    }

    /// Creates a new `LineReader` with a custom buffer capacity.
    ///
    /// Useful for very large edge files where a bigger buffer cuts the number
    /// of read syscalls.
    #[must_use]
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
            buffer: String::new(),
        }
    }

    /// Reads the next line, returning it with its 1-based line number.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the underlying reader fails or the line is not
    /// valid UTF-8.
    pub fn next_line(&mut self) -> std::io::Result<Option<(usize, String)>> {
        self.buffer.clear();
        let read = self.reader.read_line(&mut self.buffer)?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let trimmed = self.buffer.trim_end_matches(['\n', '\r']);
        Ok(Some((self.line_number, trimmed.to_string())))
    }

    /// Consumes the reader, returning the underlying buffered reader.
    #[must_use]
    pub fn into_inner(self) -> BufReader<R> {
        self.reader
    }
}
