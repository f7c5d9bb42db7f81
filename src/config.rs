use std::path::PathBuf;

/// File-name suffix of the files a scan picks up, compared case-insensitively.
pub const EXTENSION: &str = ".iso";

/// Seconds subtracted per list position when assigning target times.
pub const TICK_SECS: i64 = 1;

/// Overrides creation-time support: `native`, `shell` or `off`.
pub const CREATION_TIME_ENV: &str = "ISOSORT_CREATION_TIME";

/// Path of the log file written by the `isosort` binary.
pub const LOG_FILE_ENV: &str = "ISOSORT_LOG";

const DEFAULT_LOG_FILE: &str = "isosort.log";

/// Where the binary writes its log: `$ISOSORT_LOG`, else the temp directory.
pub fn log_path() -> PathBuf {
    match std::env::var_os(LOG_FILE_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => std::env::temp_dir().join(DEFAULT_LOG_FILE),
    }
}

/// Whether `name` carries [`EXTENSION`], ignoring case.
pub fn has_extension(name: &str) -> bool {
    name.to_lowercase().ends_with(EXTENSION)
}
