//! Error types for linkgraph operations.
//!
//! Errors come in two layers:
//!
//! - **`GraphError`**: contract violations raised by the graph engine itself.
//!   There are exactly two: an id outside the loaded range, and a record that
//!   references an id no earlier record introduced.
//! - **`Error`**: everything a caller loading and querying a graph can hit,
//!   wrapping `GraphError` together with file, parse and configuration failures.
//!
//! Neither layer has a transient case, so nothing here is retried.

use std::io;

use linkgraph_records::RecordKind;
use thiserror::Error;

use crate::types::IdKind;

/// Result type for linkgraph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Contract violations raised by the graph engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An id outside the loaded range was passed to an accessor or mutator.
    ///
    /// Vertex ids are valid in `[0, count)`, category ids in `[1, count]`.
    #[error("{kind} id {id} is out of range ({count} {} loaded)", .kind.plural())]
    OutOfRange {
        /// Whether the id names a vertex or a category.
        kind: IdKind,
        /// The offending id.
        id: usize,
        /// How many ids of this kind exist.
        count: usize,
    },

    /// A stream record referenced an id that no earlier record introduced.
    #[error("{record} record #{position} references unknown {kind} id {id}")]
    UnresolvedReference {
        /// The stream the record came from.
        record: RecordKind,
        /// 0-based position of the record within its stream.
        position: usize,
        /// Whether the dangling id names a vertex or a category.
        kind: IdKind,
        /// The dangling id.
        id: usize,
    },
}

/// Top-level error type for loading and querying a graph.
#[derive(Debug, Error)]
pub enum Error {
    /// The graph engine rejected an id.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A record file could not be read or parsed.
    #[error("failed to read records: {0}")]
    Records(#[from] linkgraph_records::Error),

    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration or arguments.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` if this error is an engine contract violation rather
    /// than an I/O or configuration failure.
    #[must_use]
    pub fn is_graph_error(&self) -> bool {
        matches!(self, Self::Graph(_))
    }
}
