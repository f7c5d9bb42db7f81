use std::path::PathBuf;

use filetime::FileTime;

/// A single disc-image file found by a scan.
///
/// `observed` is the timestamp read at scan time: creation time when the
/// active [`CreationTime`](crate::stamp::CreationTime) capability can also
/// write it, otherwise modification time. Unreadable timestamps are recorded
/// as [`FileTime::zero()`] so those files sort last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Full path to the file.
    pub path: PathBuf,

    /// File name, for display.
    pub name: String,

    /// Timestamp last read from the filesystem.
    pub observed: FileTime,

    /// Position in the scan that produced this entry. Breaks observed-time
    /// ties on reset so tied files return to their scan order.
    pub scan_rank: usize,
}

impl FileEntry {
    /// An entry named after the last component of `path`, with scan rank 0.
    pub fn new(path: impl Into<PathBuf>, observed: FileTime) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            name,
            observed,
            scan_rank: 0,
        }
    }

    /// Whether the observed time is the unreadable sentinel.
    pub fn is_unread(&self) -> bool {
        self.observed == FileTime::zero()
    }
}
