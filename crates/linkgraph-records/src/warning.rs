//! Warning types for non-fatal problems found while reading record files.
//!
//! Real dumps of article data are rarely perfectly clean. When a stream runs in
//! lenient mode, a line that cannot be parsed is reported as a [`Warning`]
//! instead of aborting the whole load. The [`WarningCollector`]
//! accumulates them so the caller can report everything at the end.
//!
//! # Examples
//!
//! ```
//! use linkgraph_records::{RecordKind, Warning, WarningCollector};
//!
//! let collector = WarningCollector::new();
//!
//! collector.add(Warning::MalformedLine {
//!     kind: RecordKind::Edge,
//!     line_number: 5,
//!     reason: "expected exactly two vertex ids".to_string(),
//! });
//! collector.add(Warning::SkippedLine {
//!     line_number: 10,
//!     reason: "blank line".to_string(),
//! });
//!
//! let warnings = collector.into_warnings();
//! assert_eq!(warnings.len(), 2);
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::records::RecordKind;

/// A non-fatal problem found while reading a record file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A line did not match the grammar of its record kind. It was dropped, or
    /// replaced by a placeholder for kinds whose ids are line positions.
    MalformedLine {
        /// The record kind the line was expected to hold.
        kind: RecordKind,
        /// The 1-based line number of the rejected line.
        line_number: usize,
        /// Why the line was rejected.
        reason: String,
    },

    /// A line carried no record (for example a blank line).
    SkippedLine {
        /// The 1-based line number that was skipped.
        line_number: usize,
        /// The reason the line was skipped.
        reason: String,
    },
}

impl Warning {
    /// Returns the line number associated with this warning.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::MalformedLine { line_number, .. } | Self::SkippedLine { line_number, .. } => {
                *line_number
            }
        }
    }

    /// Returns a human-readable description of the warning.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkgraph_records::{RecordKind, Warning};
    ///
    /// let warning = Warning::MalformedLine {
    ///     kind: RecordKind::Category,
    ///     line_number: 5,
    ///     reason: "missing category name".to_string(),
    /// };
    /// let desc = warning.description();
    /// assert!(desc.contains("line 5"));
    /// assert!(desc.contains("category"));
    /// ```
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::MalformedLine {
                kind,
                line_number,
                reason,
            } => format!("line {line_number}: malformed {kind} record: {reason}"),
            Self::SkippedLine {
                line_number,
                reason,
            } => format!("line {line_number}: skipped: {reason}"),
        }
    }

    /// Returns a static string identifying the warning kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedLine { .. } => "malformed_line",
            Self::SkippedLine { .. } => "skipped_line",
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::error::Error for Warning {}

/// A thread-safe collector for warnings.
///
/// Clones share the same storage, so a collector can be handed to several
/// streams (one per file) and drained once at the end.
///
/// A poisoned lock is recovered rather than propagated: the stored warnings
/// are plain data and stay valid even if a holder panicked.
#[derive(Debug, Clone, Default)]
pub struct WarningCollector {
    warnings: Arc<Mutex<Vec<Warning>>>,
}

impl WarningCollector {
    /// Creates a new empty `WarningCollector`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Warning>> {
        self.warnings.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a warning to the collector.
    pub fn add(&self, warning: Warning) {
        self.lock().push(warning);
    }

    /// Returns the number of warnings collected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if no warnings have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of all collected warnings, leaving the collector intact.
    #[must_use]
    pub fn warnings(&self) -> Vec<Warning> {
        self.lock().clone()
    }

    /// Clears all collected warnings.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Consumes the collector and returns all collected warnings.
    ///
    /// If this is the last handle the warnings are moved out, otherwise they
    /// are cloned.
    #[must_use]
    pub fn into_warnings(self) -> Vec<Warning> {
        match Arc::try_unwrap(self.warnings) {
            Ok(mutex) => mutex.into_inner().unwrap_or_else(PoisonError::into_inner),
            Err(shared) => shared
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn malformed(line_number: usize) -> Warning {
        Warning::MalformedLine {
            kind: RecordKind::Edge,
            line_number,
            reason: "bad".to_string(),
        }
    }

    mod warning_tests {
        use super::*;

        #[test]
        fn line_number_is_reported_for_both_variants() {
            assert_eq!(malformed(42).line_number(), 42);
            let skipped = Warning::SkippedLine {
                line_number: 10,
                reason: "blank line".to_string(),
            };
            assert_eq!(skipped.line_number(), 10);
        }

        #[test]
        fn description_formats_malformed_line() {
            let desc = malformed(5).description();
            assert!(desc.contains("line 5"));
            assert!(desc.contains("malformed edge record"));
            assert!(desc.contains("bad"));
        }

        #[test]
        fn description_formats_skipped_line() {
            let warning = Warning::SkippedLine {
                line_number: 15,
                reason: "blank line".to_string(),
            };

            let desc = warning.description();
            assert!(desc.contains("line 15"));
            assert!(desc.contains("skipped"));
        }

        #[test]
        fn display_matches_description() {
            let warning = malformed(1);
            assert_eq!(warning.to_string(), warning.description());
        }

        #[test]
        fn kind_enables_filtering_by_type() {
            let warnings = [
                malformed(1),
                Warning::SkippedLine {
                    line_number: 2,
                    reason: "blank line".to_string(),
                },
                malformed(3),
            ];

            let malformed_count = warnings
                .iter()
                .filter(|w| w.kind() == "malformed_line")
                .count();
            assert_eq!(malformed_count, 2);
        }
    }

    mod collector_tests {
        use super::*;

        #[test]
        fn new_creates_empty_collector() {
            let collector = WarningCollector::new();
            assert!(collector.is_empty());
            assert_eq!(collector.len(), 0);
        }

        #[test]
        fn clone_shares_state() {
            let first = WarningCollector::new();
            let second = first.clone();

            first.add(malformed(1));
            second.add(malformed(2));

            assert_eq!(first.len(), 2);
            assert_eq!(second.len(), 2);
        }

        #[test]
        fn clear_removes_all_warnings() {
            let collector = WarningCollector::new();
            collector.add(malformed(1));
            collector.clear();
            assert!(collector.is_empty());
        }

        #[test]
        fn into_warnings_preserves_order() {
            let collector = WarningCollector::new();
            for i in 1..=10 {
                collector.add(malformed(i));
            }

            let warnings = collector.into_warnings();
            for (i, warning) in warnings.iter().enumerate() {
                assert_eq!(warning.line_number(), i + 1);
            }
        }

        #[test]
        fn into_warnings_with_live_clone_copies() {
            let collector = WarningCollector::new();
            let other = collector.clone();
            collector.add(malformed(1));

            let warnings = collector.into_warnings();
            assert_eq!(warnings.len(), 1);
            assert_eq!(other.len(), 1);
        }

        #[test]
        fn concurrent_adds() {
            let collector = WarningCollector::new();

            std::thread::scope(|scope| {
                for i in 0..8 {
                    let handle = collector.clone();
                    scope.spawn(move || {
                        for j in 0..50 {
                            handle.add(malformed(i * 50 + j));
                        }
                    });
                }
            });

            assert_eq!(collector.len(), 400);
        }
    }
}
