use std::path::PathBuf;

use crate::error::SortError;
use crate::session::Session;
use crate::stamp::{CreationTime, FsTimestamps};
use crate::traits::Timestamps;

// ---------------------------------------------------------------------------
// SessionBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring a [`Session`].
///
/// Created via [`isosort::session()`](crate::session()). Configure with chained
/// builder methods, then call [`build()`](SessionBuilder::build) for an empty
/// session or [`open()`](SessionBuilder::open) to scan the folder straight away.
///
/// # Example
///
/// ```rust,ignore
/// let session = isosort::session()
///     .folder("/media/psp/ISO")
///     .creation_time(CreationTime::Unsupported)
///     .open()?;
/// ```
#[derive(Default)]
pub struct SessionBuilder {
    folder:     Option<PathBuf>,
    creation:   Option<CreationTime>,
    timestamps: Option<Box<dyn Timestamps>>,
}

impl SessionBuilder {
    // ── Folder ────────────────────────────────────────────────────────────

    /// The folder to work on. Not scanned until [`open()`](Self::open) or
    /// [`Session::rescan`].
    pub fn folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    // ── Timestamps ────────────────────────────────────────────────────────

    /// Creation-time support for the default filesystem timestamps.
    ///
    /// Defaults to [`CreationTime::from_env()`]. A mode the platform cannot
    /// honour is downgraded to [`CreationTime::Unsupported`]. Ignored when
    /// [`timestamps()`](Self::timestamps) is set.
    pub fn creation_time(mut self, creation: CreationTime) -> Self {
        self.creation = Some(creation);
        self
    }

    /// Replace the filesystem with a custom [`Timestamps`] implementation.
    pub fn timestamps(mut self, t: impl Timestamps + 'static) -> Self {
        self.timestamps = Some(Box::new(t));
        self
    }

    // ── Finish ────────────────────────────────────────────────────────────

    /// Build the session without scanning.
    pub fn build(self) -> Session {
        let timestamps = match self.timestamps {
            Some(t) => t,
            None => {
                let creation = match self.creation {
                    Some(c) => c,
                    None => CreationTime::from_env(),
                };
                Box::new(FsTimestamps::new(creation))
            }
        };
        Session::new(timestamps, self.folder)
    }

    /// Build the session and scan its folder, if one was set.
    ///
    /// # Errors
    ///
    /// Folder errors from the initial scan.
    pub fn open(self) -> Result<Session, SortError> {
        let has_folder = self.folder.is_some();
        let mut session = self.build();
        if has_folder {
            session.rescan()?;
        }
        Ok(session)
    }
}
