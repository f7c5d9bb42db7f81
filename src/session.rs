use std::path::{Path, PathBuf};

use filetime::FileTime;
use tracing::{info, warn};

use crate::assign::{apply, assign, Assignment};
use crate::entry::FileEntry;
use crate::error::SortError;
use crate::registry::Registry;
use crate::results::{ApplyReport, Progress, Scan, ScanStats};
use crate::scan::scan;
use crate::traits::Timestamps;

/// Where a session stands.
///
/// `Empty → Scanned → Reordered* → (apply) → Scanned`. Reset re-sorts the
/// list but does not change the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No folder scanned, or the last scan failed.
    Empty,
    /// The list is in scan order.
    Scanned,
    /// At least one move since the last scan.
    Reordered,
}

/// One folder's worth of work: the chosen folder, its ordered file list and
/// the timestamp capability used to read and write it.
///
/// Build with [`isosort::session()`](crate::session()).
pub struct Session {
    folder: Option<PathBuf>,
    registry: Registry,
    timestamps: Box<dyn Timestamps>,
    state: SessionState,
    last_scan: Option<ScanStats>,
}

impl Session {
    pub(crate) fn new(timestamps: Box<dyn Timestamps>, folder: Option<PathBuf>) -> Self {
        Self {
            folder,
            registry: Registry::default(),
            timestamps,
            state: SessionState::Empty,
            last_scan: None,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    pub fn entries(&self) -> &[FileEntry] {
        self.registry.entries()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Counters of the last successful scan.
    pub fn last_scan(&self) -> Option<&ScanStats> {
        self.last_scan.as_ref()
    }

    // ── Scanning ──────────────────────────────────────────────────────────

    /// Switch to `folder` and scan it.
    ///
    /// The folder is remembered even when the scan fails, so
    /// [`rescan`](Self::rescan) can retry it.
    ///
    /// # Errors
    ///
    /// Folder errors from [`scan`](crate::scan()). The list is left empty.
    pub fn open(&mut self, folder: impl Into<PathBuf>) -> Result<ScanStats, SortError> {
        self.folder = Some(folder.into());
        self.rescan()
    }

    /// Scan the current folder again, replacing the list.
    ///
    /// # Errors
    ///
    /// [`SortError::NoFolder`] before any folder was chosen, otherwise folder
    /// errors from [`scan`](crate::scan()). The list is left empty.
    pub fn rescan(&mut self) -> Result<ScanStats, SortError> {
        let Some(folder) = self.folder.clone() else {
            return Err(SortError::NoFolder);
        };

        match scan(&folder, self.timestamps.as_ref()) {
            Ok(Scan { entries, stats }) => {
                self.registry.replace(entries);
                self.state = SessionState::Scanned;
                self.last_scan = Some(stats.clone());
                Ok(stats)
            }
            Err(err) => {
                warn!(folder = %folder.display(), error = %err, "scan failed");
                self.registry.clear();
                self.state = SessionState::Empty;
                self.last_scan = None;
                Err(err)
            }
        }
    }

    // ── Reordering ────────────────────────────────────────────────────────

    /// Move one file from `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`SortError::IndexOutOfRange`] when either index is outside the list.
    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<(), SortError> {
        self.registry.move_entry(from, to)?;
        if from != to {
            self.state = SessionState::Reordered;
        }
        Ok(())
    }

    /// Put the list back in scan order using the timestamps already read.
    pub fn reset(&mut self) {
        self.registry.reset();
    }

    // ── Applying ──────────────────────────────────────────────────────────

    /// Target times the current list order calls for, starting at `base`.
    pub fn assignments(&self, base: FileTime) -> Vec<Assignment<'_>> {
        assign(self.registry.entries(), base)
    }

    /// Write the current order to disk, then rescan.
    ///
    /// Position 0 gets `base`, every later position one tick less. Failed files
    /// are collected in the report; the batch always runs to the end. An empty
    /// list is a no-op that reports zero files and skips the rescan.
    pub fn apply<F>(&mut self, base: FileTime, on_progress: F) -> ApplyReport
    where
        F: FnMut(Progress<'_>),
    {
        if self.registry.is_empty() {
            return ApplyReport::default();
        }

        let mut report = {
            let assignments = assign(self.registry.entries(), base);
            apply(&assignments, self.timestamps.as_ref(), on_progress)
        };

        if let Err(err) = self.rescan() {
            report.rescan_error = Some(err);
        }
        info!(
            succeeded = report.succeeded,
            failed = report.failed(),
            "order applied"
        );
        report
    }

    /// [`apply`](Self::apply) with the current wall-clock time as base.
    pub fn apply_now<F>(&mut self, on_progress: F) -> ApplyReport
    where
        F: FnMut(Progress<'_>),
    {
        self.apply(FileTime::now(), on_progress)
    }
}
