use std::time::Duration;

use crate::entry::FileEntry;
use crate::error::SortError;

/// The output of a completed folder scan.
pub struct Scan {
    /// Matching files, most recent first.
    pub entries: Vec<FileEntry>,

    /// Scan counters.
    pub stats: ScanStats,
}

/// Counters for a completed scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Directory entries looked at (matching or not).
    pub seen: usize,

    /// Entries kept: regular files with the target extension.
    pub matched: usize,

    /// Files that disappeared between listing and timestamp read. Not in `entries`.
    pub vanished: usize,

    /// Files whose timestamp could not be read. Kept with the zero sentinel.
    pub unreadable: usize,

    /// Wall-clock time from scan start to completion.
    pub duration: Duration,
}

/// The output of an apply batch.
///
/// `failures` holds one [`SortError::TimestampWrite`] (or whatever the
/// [`Timestamps`](crate::Timestamps) implementation returned) per file that
/// could not be written. A failed file never stops the batch.
#[derive(Debug, Default)]
pub struct ApplyReport {
    /// Files in the batch.
    pub total: usize,

    /// Files whose timestamps were written.
    pub succeeded: usize,

    /// Per-file write failures, in list order.
    pub failures: Vec<SortError>,

    /// Wall-clock time spent writing.
    pub duration: Duration,

    /// Set when the rescan that follows an apply hit a folder error.
    pub rescan_error: Option<SortError>,
}

impl ApplyReport {
    /// Number of files whose write failed.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// True when every file in the batch was written.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.succeeded == self.total
    }
}

/// Emitted after each file while an apply batch runs.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// Files handled so far, including this one.
    pub completed: usize,

    /// Files in the batch.
    pub total: usize,

    /// The file just handled.
    pub entry: &'a FileEntry,

    /// Whether this file's write succeeded.
    pub succeeded: bool,
}

impl Progress<'_> {
    /// Completed fraction in `0.0..=1.0`; an empty batch counts as done.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            (self.completed as f64 / self.total as f64).clamp(0.0, 1.0)
        }
    }
}
