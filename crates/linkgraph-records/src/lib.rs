//! Line-oriented readers for the three flat files a link graph is built from.
//!
//! - **Vertex files**: one article per line, `<token> <name>`
//! - **Edge files**: one directed link per line, `<tail> <head>`
//! - **Category files**: one category per line, `Category:<name>; <id> <id> ...`
//!
//! Each file is exposed as a lazy [`RecordStream`] of parsed records. Streams track
//! line numbers for error reporting, collect non-fatal problems as [`Warning`]s, and
//! can report parse progress as a whole percentage of the file.
//!
//! ```no_run
//! use linkgraph_records::{EdgeRecord, ReadOptions, RecordStream};
//!
//! # fn example() -> linkgraph_records::Result<()> {
//! let stream = RecordStream::<_, EdgeRecord>::open("links.txt", &ReadOptions::default())?;
//! for record in stream {
//!     let (line_number, edge) = record?;
//!     println!("line {line_number}: {} -> {}", edge.tail, edge.head);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod progress;
pub mod reader;
pub mod records;
pub mod stream;
pub mod warning;

pub use error::{Error, Result};
pub use progress::{Progress, ProgressTracker, count_lines};
pub use reader::LineReader;
pub use records::{CategoryRecord, EdgeRecord, Record, RecordKind, VertexRecord};
pub use stream::{ReadOptions, RecordStream};
pub use warning::{Warning, WarningCollector};
