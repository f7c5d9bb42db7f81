use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SortError {
    // Folder
    #[error("folder not found")]
    FolderNotFound(PathBuf),

    #[error("not a folder")]
    NotAFolder(PathBuf),

    #[error("permission denied")]
    PermissionDenied(PathBuf),

    #[error("no folder selected")]
    NoFolder,

    #[error("IO error")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Per-file timestamps
    #[error("could not read timestamp")]
    TimestampRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write timestamp")]
    TimestampWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Creation-time enhancement
    #[error("creation time not supported")]
    CreationTimeUnavailable(PathBuf),

    #[error("shell command failed: {detail}")]
    ShellCommand { path: PathBuf, detail: String },

    // Reordering
    #[error("index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
}

impl SortError {
    /// The path this error occurred at, if applicable.
    /// Callers use this to present "Failed: <path>" without pattern matching on variants.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::FolderNotFound(p)
            | Self::NotAFolder(p)
            | Self::PermissionDenied(p)
            | Self::CreationTimeUnavailable(p)
            | Self::Io { path: p, .. }
            | Self::TimestampRead { path: p, .. }
            | Self::TimestampWrite { path: p, .. }
            | Self::ShellCommand { path: p, .. } => Some(p),
            Self::NoFolder | Self::IndexOutOfRange { .. } => None,
        }
    }

    /// Whether the surrounding operation can continue after this error.
    ///
    /// Per-file errors (timestamp reads and writes, creation-time fallbacks)
    /// are absorbed into counts and the batch keeps going.
    ///
    /// Folder errors abort the scan and leave the registry empty.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::TimestampRead { .. }
                | Self::TimestampWrite { .. }
                | Self::CreationTimeUnavailable(_)
                | Self::ShellCommand { .. }
        )
    }

    /// Whether this error concerns the folder as a whole.
    pub fn is_folder_error(&self) -> bool {
        matches!(
            self,
            Self::FolderNotFound(_)
                | Self::NotAFolder(_)
                | Self::PermissionDenied(_)
                | Self::NoFolder
                | Self::Io { .. }
        )
    }

    /// True when a timestamp read failed because the file no longer exists.
    pub(crate) fn is_vanished(&self) -> bool {
        matches!(
            self,
            Self::TimestampRead { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Map an IO error raised while opening `path` as a folder.
    pub(crate) fn from_folder_io(path: PathBuf, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::FolderNotFound(path),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Io { path, source },
        }
    }
}
