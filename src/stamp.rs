//! Filesystem timestamp capability.
//!
//! Modification time is always writable. Creation time is a platform
//! enhancement; which way (if any) it gets written is decided once, when the
//! [`CreationTime`] value is chosen, rather than at every write.

use std::fmt;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::str::FromStr;

use filetime::FileTime;
use tracing::{debug, warn};

use crate::config::CREATION_TIME_ENV;
use crate::error::SortError;
use crate::traits::Timestamps;

// ---------------------------------------------------------------------------
// CreationTime
// ---------------------------------------------------------------------------

/// How creation time gets written, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationTime {
    /// Through the standard library's platform file-times extension
    /// (Windows and macOS).
    Native,

    /// Through a PowerShell `CreationTimeUtc` assignment (Windows).
    Shell,

    /// Creation time is neither read nor written; modification time only.
    Unsupported,
}

impl CreationTime {
    /// The best support this platform offers.
    pub fn detect() -> Self {
        if native_available() {
            Self::Native
        } else {
            Self::Unsupported
        }
    }

    /// `$ISOSORT_CREATION_TIME` when set and valid, otherwise [`detect`](Self::detect).
    pub fn from_env() -> Self {
        match std::env::var(CREATION_TIME_ENV) {
            Ok(value) => match value.parse::<Self>() {
                Ok(requested) => requested.resolve(),
                Err(err) => {
                    warn!(%err, "ignoring {CREATION_TIME_ENV}");
                    Self::detect()
                }
            },
            Err(_) => Self::detect(),
        }
    }

    /// Downgrade a request this platform cannot honour to [`Unsupported`](Self::Unsupported).
    pub fn resolve(self) -> Self {
        let available = match self {
            Self::Native => native_available(),
            Self::Shell => shell_available(),
            Self::Unsupported => true,
        };
        if available {
            self
        } else {
            warn!(requested = %self, "creation time support unavailable on this platform");
            Self::Unsupported
        }
    }

    /// Whether creation time is read and written.
    pub fn is_supported(self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

impl fmt::Display for CreationTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Native => "native",
            Self::Shell => "shell",
            Self::Unsupported => "off",
        })
    }
}

impl FromStr for CreationTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "shell" | "powershell" => Ok(Self::Shell),
            "off" | "none" | "unsupported" => Ok(Self::Unsupported),
            other => Err(format!("unknown creation time mode `{other}`")),
        }
    }
}

fn native_available() -> bool {
    cfg!(any(windows, target_os = "macos"))
}

fn shell_available() -> bool {
    cfg!(windows)
}

// ---------------------------------------------------------------------------
// FsTimestamps
// ---------------------------------------------------------------------------

/// [`Timestamps`] on the local filesystem.
#[derive(Debug, Clone, Copy)]
pub struct FsTimestamps {
    creation: CreationTime,
}

impl FsTimestamps {
    /// Filesystem timestamps with `creation` support, downgraded to what this
    /// platform can write. A creation time that cannot be written is never read.
    pub fn new(creation: CreationTime) -> Self {
        Self {
            creation: creation.resolve(),
        }
    }

    /// The creation-time support in effect after resolving.
    pub fn creation(&self) -> CreationTime {
        self.creation
    }

    fn write_creation(&self, path: &Path, time: FileTime) -> Result<(), SortError> {
        match self.creation {
            CreationTime::Native => set_created_native(path, time),
            CreationTime::Shell => set_created_shell(path, time),
            CreationTime::Unsupported => Err(SortError::CreationTimeUnavailable(path.to_path_buf())),
        }
    }
}

impl Timestamps for FsTimestamps {
    /// Creation time is only read when it can also be written, so a rescan
    /// after apply sees the values apply wrote.
    fn read_time(&self, path: &Path) -> Result<FileTime, SortError> {
        let meta = fs::metadata(path).map_err(|source| SortError::TimestampRead {
            path: path.to_path_buf(),
            source,
        })?;

        if self.creation.is_supported() {
            if let Some(created) = FileTime::from_creation_time(&meta) {
                return Ok(created);
            }
        }
        Ok(FileTime::from_last_modification_time(&meta))
    }

    fn write_time(&self, path: &Path, time: FileTime) -> Result<(), SortError> {
        filetime::set_file_times(path, time, time).map_err(|source| SortError::TimestampWrite {
            path: path.to_path_buf(),
            source,
        })?;

        if let Err(err) = self.write_creation(path, time) {
            debug!(path = %path.display(), error = %err, "creation time left unchanged");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Creation-time writers
// ---------------------------------------------------------------------------

#[cfg(any(windows, target_os = "macos"))]
fn set_created_native(path: &Path, time: FileTime) -> Result<(), SortError> {
    use std::fs::{FileTimes, OpenOptions};
    #[cfg(target_os = "macos")]
    use std::os::macos::fs::FileTimesExt;
    #[cfg(windows)]
    use std::os::windows::fs::FileTimesExt;

    let to_error = |source| SortError::TimestampWrite {
        path: path.to_path_buf(),
        source,
    };
    let file = OpenOptions::new().write(true).open(path).map_err(to_error)?;
    file.set_times(FileTimes::new().set_created(system_time(time)))
        .map_err(to_error)
}

#[cfg(not(any(windows, target_os = "macos")))]
fn set_created_native(path: &Path, _time: FileTime) -> Result<(), SortError> {
    Err(SortError::CreationTimeUnavailable(path.to_path_buf()))
}

#[cfg(any(windows, target_os = "macos"))]
fn system_time(time: FileTime) -> std::time::SystemTime {
    use std::time::{Duration, UNIX_EPOCH};

    let secs = time.unix_seconds();
    let nanos = Duration::from_nanos(u64::from(time.nanoseconds()));
    if secs >= 0 {
        UNIX_EPOCH + Duration::from_secs(secs.unsigned_abs()) + nanos
    } else {
        UNIX_EPOCH - Duration::from_secs(secs.unsigned_abs()) + nanos
    }
}

fn set_created_shell(path: &Path, time: FileTime) -> Result<(), SortError> {
    let script = powershell_script(path, time);
    let output = Command::new("powershell")
        .args(["-NoProfile", "-NonInteractive", "-Command", &script])
        .output()
        .map_err(|err| SortError::ShellCommand {
            path: path.to_path_buf(),
            detail: err.to_string(),
        })?;

    if output.status.success() {
        Ok(())
    } else {
        Err(SortError::ShellCommand {
            path: path.to_path_buf(),
            detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// PowerShell that sets `path`'s creation time to `time` (UTC, millisecond precision).
fn powershell_script(path: &Path, time: FileTime) -> String {
    let literal = path.to_string_lossy().replace('\'', "''");
    let millis = time
        .unix_seconds()
        .saturating_mul(1000)
        .saturating_add(i64::from(time.nanoseconds() / 1_000_000));
    format!(
        "(Get-Item -LiteralPath '{literal}').CreationTimeUtc = \
         [DateTimeOffset]::FromUnixTimeMilliseconds({millis}).UtcDateTime"
    )
}
