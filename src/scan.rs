use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use filetime::FileTime;
use ignore::{DirEntry, WalkBuilder};
use tracing::{debug, info};

use crate::config::has_extension;
use crate::entry::FileEntry;
use crate::error::SortError;
use crate::registry::sort_most_recent_first;
use crate::results::{Scan, ScanStats};
use crate::traits::Timestamps;

// ---------------------------------------------------------------------------
// scan()
// ---------------------------------------------------------------------------

/// List the disc images directly inside `folder`, most recent first.
///
/// Only regular files (symlinks followed) whose name ends in
/// [`EXTENSION`](crate::config::EXTENSION), ignoring case, are kept;
/// subfolders are not entered. Each file's observed time comes from
/// `timestamps`:
///
/// - a file that disappears before its timestamp is read is left out;
/// - any other read failure keeps the file with [`FileTime::zero()`].
///
/// Ties keep directory enumeration order.
///
/// # Errors
///
/// Fails with a folder error when `folder` is missing, is not a directory, or
/// cannot be listed.
pub fn scan(folder: &Path, timestamps: &dyn Timestamps) -> Result<Scan, SortError> {
    check_folder(folder)?;

    let walker = WalkBuilder::new(folder)
        .standard_filters(false)
        .hidden(false)
        .follow_links(true)
        .max_depth(Some(1))
        .build();

    let mut stats = ScanStats::default();
    let mut entries = Vec::new();
    let start = Instant::now();

    for res in walker {
        let entry = match res {
            Ok(e) => e,
            Err(e) => {
                let err = map_ignore_error(e, folder);
                if err.is_folder_error() && err.path().is_some_and(|p| p == folder) {
                    return Err(err);
                }
                debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        // Skip the folder itself
        if entry.depth() == 0 {
            continue;
        }
        stats.seen += 1;

        if !is_candidate(&entry) {
            continue;
        }

        let path = entry.into_path();
        let observed = match timestamps.read_time(&path) {
            Ok(t) => t,
            Err(err) if err.is_vanished() => {
                debug!(path = %path.display(), "file vanished during scan");
                stats.vanished += 1;
                continue;
            }
            Err(err) => {
                debug!(path = %path.display(), error = %err, "timestamp unreadable, sorting last");
                stats.unreadable += 1;
                FileTime::zero()
            }
        };

        entries.push(FileEntry::new(path, observed));
    }

    sort_most_recent_first(&mut entries);
    for (rank, entry) in entries.iter_mut().enumerate() {
        entry.scan_rank = rank;
    }

    stats.matched = entries.len();
    stats.duration = start.elapsed();
    info!(
        folder = %folder.display(),
        matched = stats.matched,
        seen = stats.seen,
        "scan complete"
    );

    Ok(Scan { entries, stats })
}

/// Fail early with a folder error instead of an empty walk.
fn check_folder(folder: &Path) -> Result<(), SortError> {
    let meta =
        fs::metadata(folder).map_err(|e| SortError::from_folder_io(folder.to_path_buf(), e))?;
    if !meta.is_dir() {
        return Err(SortError::NotAFolder(folder.to_path_buf()));
    }
    // metadata() succeeds on folders we may not list
    fs::read_dir(folder)
        .map(drop)
        .map_err(|e| SortError::from_folder_io(folder.to_path_buf(), e))
}

fn is_candidate(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|ft| ft.is_file())
        && has_extension(&entry.file_name().to_string_lossy())
}

// ---------------------------------------------------------------------------
// Map ignore::Error to SortError
// ---------------------------------------------------------------------------

fn map_ignore_error(e: ignore::Error, folder: &Path) -> SortError {
    match e {
        ignore::Error::WithPath { path, err } => match *err {
            ignore::Error::Io(io_err) => SortError::from_folder_io(path, io_err),
            other => io_error(path, other.to_string()),
        },
        ignore::Error::WithDepth { err, .. } => map_ignore_error(*err, folder),
        ignore::Error::Io(io_err) => SortError::from_folder_io(folder.to_path_buf(), io_err),
        other => io_error(folder.to_path_buf(), other.to_string()),
    }
}

fn io_error(path: PathBuf, message: String) -> SortError {
    SortError::Io {
        path,
        source: std::io::Error::other(message),
    }
}
