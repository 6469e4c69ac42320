//! Error types for linkgraph-records operations.

use std::io;
use thiserror::Error;

use crate::records::RecordKind;

/// The error type for linkgraph-records operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while opening or reading a file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A line could not be parsed as the expected record kind.
    ///
    /// Only returned when the stream runs in strict mode; lenient streams
    /// record a [`Warning::MalformedLine`](crate::Warning::MalformedLine) instead.
    #[error("malformed {kind} record on line {line_number}: {reason}")]
    Malformed {
        /// The kind of record the line was expected to hold.
        kind: RecordKind,
        /// The 1-based line number of the offending line.
        line_number: usize,
        /// Why the line was rejected.
        reason: String,
    },
}

/// A specialized Result type for linkgraph-records operations.
pub type Result<T> = std::result::Result<T, Error>;
