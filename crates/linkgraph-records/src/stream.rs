//! Lazy record streams over line-oriented files.
//!
//! A [`RecordStream`] reads one line at a time and yields `(line_number, record)`
//! pairs. A blank line is recorded as a [`Warning::SkippedLine`]. What happens
//! to a line that does not parse depends on [`ReadOptions::strict`]:
//!
//! - **lenient** (default): a [`Warning::MalformedLine`] is recorded, reading
//!   continues
//! - **strict**: the stream yields [`Error::Malformed`] and then ends
//!
//! For record kinds whose ids are line positions (see [`Record::placeholder`])
//! a blank or tolerated malformed line still yields the placeholder record, so
//! the n-th yielded record always comes from the n-th line.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::marker::PhantomData;
use std::path::Path;

use crate::error::{Error, Result};
use crate::progress::{Progress, ProgressTracker};
use crate::reader::LineReader;
use crate::records::Record;
use crate::warning::{Warning, WarningCollector};

/// Options controlling how a record file is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Fail on the first malformed line instead of skipping it.
    pub strict: bool,
    /// Read buffer capacity in bytes. `None` uses the standard default.
    pub buffer_capacity: Option<usize>,
}

impl ReadOptions {
    /// Lenient options: malformed lines become warnings.
    #[must_use]
    pub fn lenient() -> Self {
        Self::default()
    }

    /// Strict options: malformed lines are fatal.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }
}

type ProgressSink = Box<dyn FnMut(Progress)>;

/// A lazy stream of parsed records of type `T`.
///
/// # Examples
///
/// ```
/// use linkgraph_records::{ReadOptions, RecordStream, VertexRecord};
/// use std::io::Cursor;
///
/// let input = Cursor::new("0 Alpha\n\n2 Beta\n");
/// let stream = RecordStream::<_, VertexRecord>::new(input, &ReadOptions::default());
/// let warnings = stream.warnings().clone();
///
/// let names: Vec<String> = stream
///     .map(|r| r.map(|(_, v)| v.name))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(names, ["Alpha", "", "Beta"]);
/// assert_eq!(warnings.len(), 1); // the blank line
/// ```
pub struct RecordStream<R, T> {
    reader: LineReader<R>,
    strict: bool,
    warnings: WarningCollector,
    progress: Option<(ProgressTracker, ProgressSink)>,
    finished: bool,
    _record: PhantomData<fn() -> T>,
}

impl<R, T> fmt::Debug for RecordStream<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStream")
            .field("line_number", &self.reader.line_number())
            .field("strict", &self.strict)
            .field("warnings", &self.warnings.len())
            .field("progress", &self.progress.as_ref().map(|(tracker, _)| tracker))
            .field("finished", &self.finished)
            .finish()
    }
}

impl<R: Read, T: Record> RecordStream<R, T> {
    /// Creates a stream over any reader.
    #[must_use]
    pub fn new(reader: R, options: &ReadOptions) -> Self {
        let reader = match options.buffer_capacity {
            Some(capacity) => LineReader::with_capacity(reader, capacity),
            None => LineReader::new(reader),
        };
        Self {
            reader,
            strict: options.strict,
            warnings: WarningCollector::new(),
            progress: None,
            finished: false,
            _record: PhantomData,
        }
    }

    /// Records warnings into an existing (possibly shared) collector.
    #[must_use]
    pub fn with_warnings(mut self, collector: WarningCollector) -> Self {
        self.warnings = collector;
        self
    }

    /// Reports progress against `total_lines` to `sink` whenever the whole
    /// percentage changes.
    #[must_use]
    pub fn with_progress(mut self, total_lines: usize, sink: impl FnMut(Progress) + 'static) -> Self {
        self.progress = Some((ProgressTracker::new(T::KIND, total_lines), Box::new(sink)));
        self
    }

    /// The collector receiving this stream's warnings.
    #[must_use]
    pub fn warnings(&self) -> &WarningCollector {
        &self.warnings
    }

    /// The 1-based number of the last line read.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.reader.line_number()
    }

    fn report_progress(&mut self) {
        if let Some((tracker, sink)) = self.progress.as_mut() {
            if let Some(update) = tracker.advance() {
                tracing::debug!(kind = %update.kind, percent = update.percent, "Parse progress");
                sink(update);
            }
        }
    }
}

impl<T: Record> RecordStream<File, T> {
    /// Opens a file as a record stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>, options: &ReadOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        tracing::debug!(path = %path.display(), kind = %T::KIND, strict = options.strict, "Opened record file");
        Ok(Self::new(file, options))
    }
}

impl<R: Read, T: Record> Iterator for RecordStream<R, T> {
    type Item = Result<(usize, T)>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let (line_number, line) = match self.reader.next_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(Error::Io(e)));
                }
            };
            self.report_progress();

            if line.trim().is_empty() {
                let placeholder = T::placeholder();
                let reason = if placeholder.is_some() {
                    "blank line, kept as an empty record"
                } else {
                    "blank line"
                };
                self.warnings.add(Warning::SkippedLine {
                    line_number,
                    reason: reason.to_string(),
                });
                match placeholder {
                    Some(record) => return Some(Ok((line_number, record))),
                    None => continue,
                }
            }

            match T::parse(&line) {
                Ok(record) => return Some(Ok((line_number, record))),
                Err(reason) if self.strict => {
                    self.finished = true;
                    return Some(Err(Error::Malformed {
                        kind: T::KIND,
                        line_number,
                        reason,
                    }));
                }
                Err(reason) => {
                    tracing::warn!(kind = %T::KIND, line_number, %reason, "Tolerating malformed line");
                    self.warnings.add(Warning::MalformedLine {
                        kind: T::KIND,
                        line_number,
                        reason,
                    });
                    if let Some(record) = T::placeholder() {
                        return Some(Ok((line_number, record)));
                    }
                }
            }
        }
        None
    }
}
