use std::path::Path;

use filetime::FileTime;

use crate::error::SortError;

/// Read and write access to file timestamps.
///
/// Implement this to put something other than the local filesystem behind a
/// [`Session`](crate::Session): a fake clock in tests, a remote mount, or a
/// writer that refuses certain paths. The default implementation is
/// [`FsTimestamps`](crate::stamp::FsTimestamps).
///
/// # Error Handling
///
/// `read_time` may fail freely: the scanner skips files whose read fails with
/// `NotFound` and records the sentinel for every other failure, so a read
/// error never reaches the user.
///
/// `write_time` failures are per file. [`apply`](crate::apply) records them
/// in [`ApplyReport::failures`](crate::ApplyReport::failures) and moves on to
/// the next file.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use filetime::FileTime;
/// use isosort::{SortError, Timestamps};
///
/// struct Frozen(FileTime);
///
/// impl Timestamps for Frozen {
///     fn read_time(&self, _path: &Path) -> Result<FileTime, SortError> {
///         Ok(self.0)
///     }
///
///     fn write_time(&self, _path: &Path, _time: FileTime) -> Result<(), SortError> {
///         Ok(())
///     }
/// }
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait Timestamps {
    /// Read the timestamp that orders `path`.
    fn read_time(&self, path: &Path) -> Result<FileTime, SortError>;

    /// Set `path`'s timestamps to `time`.
    ///
    /// Must update at least the modification time. Creation time is a
    /// best-effort enhancement whose failure must not fail the write.
    fn write_time(&self, path: &Path, time: FileTime) -> Result<(), SortError>;
}
