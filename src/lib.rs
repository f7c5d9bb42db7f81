//! # isosort
//!
//! Reorder disc-image files by rewriting their timestamps.
//!
//! Consoles and media players that list games by file date show them in
//! whatever order the files happened to be copied. isosort scans a folder for
//! `.iso` files, lets the caller rearrange the list, and then stamps each file
//! with a fresh timestamp one second apart so the new order is the
//! "most recent first" order every date-sorting consumer sees.
//!
//! The crate owns the scan, the ordered list, the position-to-timestamp
//! mapping and the batch write. It does **not** own the user interface; the
//! `isosort` binary is a terminal front end built on these functions.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use isosort::stamp::CreationTime;
//!
//! let mut session = isosort::session()
//!     .folder("/media/psp/ISO")
//!     .creation_time(CreationTime::detect())
//!     .open()?;
//!
//! // Bring the last file to the top of the list
//! let last = session.entries().len() - 1;
//! session.move_entry(last, 0)?;
//!
//! let report = session.apply_now(|p| println!("{}/{} {}", p.completed, p.total, p.entry.name));
//! println!("rewrote {} of {} files", report.succeeded, report.total);
//! # Ok::<(), isosort::SortError>(())
//! ```
//!
//! # Position to timestamp
//!
//! The mapping is pure and needs no filesystem:
//!
//! ```rust
//! use filetime::FileTime;
//! use isosort::{assign, FileEntry};
//!
//! let list = vec![
//!     FileEntry::new("/iso/b.iso", FileTime::from_unix_time(100, 0)),
//!     FileEntry::new("/iso/a.iso", FileTime::from_unix_time(300, 0)),
//! ];
//!
//! let targets: Vec<i64> = assign(&list, FileTime::from_unix_time(1000, 0))
//!     .iter()
//!     .map(|a| a.target.unix_seconds())
//!     .collect();
//!
//! assert_eq!(targets, vec![1000, 999]);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod stamp;

mod assign;
mod builder;
mod entry;
mod error;
mod registry;
mod results;
mod scan;
mod session;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use assign::{apply, assign, target_time, Assignment};
pub use builder::SessionBuilder;
pub use entry::FileEntry;
pub use error::SortError;
pub use registry::{is_most_recent_first, move_item, sort_most_recent_first, Registry};
pub use results::{ApplyReport, Progress, Scan, ScanStats};
pub use scan::scan;
pub use session::{Session, SessionState};
pub use traits::Timestamps;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`SessionBuilder`] to configure a session.
///
/// # Example
///
/// ```rust
/// use isosort::stamp::CreationTime;
///
/// let session = isosort::session()
///     .creation_time(CreationTime::Unsupported)
///     .build();
///
/// assert!(session.entries().is_empty());
/// assert!(session.folder().is_none());
/// ```
pub fn session() -> SessionBuilder {
    SessionBuilder::default()
}
