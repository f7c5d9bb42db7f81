use std::time::Instant;

use filetime::FileTime;
use tracing::{debug, info, warn};

use crate::config::TICK_SECS;
use crate::entry::FileEntry;
use crate::results::{ApplyReport, Progress};
use crate::traits::Timestamps;

/// A file paired with the timestamp its list position calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment<'a> {
    pub entry: &'a FileEntry,
    pub target: FileTime,
}

/// Target time for list position `position`: `base` minus one tick per position.
///
/// Gaps between files are always exactly one tick, whatever the spacing of
/// their observed times, so a later scan reproduces the order even on coarse
/// filesystems.
pub fn target_time(base: FileTime, position: usize) -> FileTime {
    let offset = i64::try_from(position)
        .unwrap_or(i64::MAX)
        .saturating_mul(TICK_SECS);
    FileTime::from_unix_time(base.unix_seconds().saturating_sub(offset), base.nanoseconds())
}

/// Pair every entry with its target time. Position 0 gets `base`.
pub fn assign(entries: &[FileEntry], base: FileTime) -> Vec<Assignment<'_>> {
    entries
        .iter()
        .enumerate()
        .map(|(position, entry)| Assignment {
            entry,
            target: target_time(base, position),
        })
        .collect()
}

/// Write every assignment, in order.
///
/// A file that fails is recorded in [`ApplyReport::failures`] and the batch
/// moves on; nothing is retried. `on_progress` runs after each file.
pub fn apply<F>(
    assignments: &[Assignment<'_>],
    timestamps: &dyn Timestamps,
    mut on_progress: F,
) -> ApplyReport
where
    F: FnMut(Progress<'_>),
{
    let start = Instant::now();
    let total = assignments.len();
    let mut report = ApplyReport {
        total,
        ..ApplyReport::default()
    };

    for (i, assignment) in assignments.iter().enumerate() {
        let path = &assignment.entry.path;
        let succeeded = match timestamps.write_time(path, assignment.target) {
            Ok(()) => {
                debug!(path = %path.display(), target = assignment.target.unix_seconds(), "timestamp written");
                report.succeeded += 1;
                true
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "timestamp write failed");
                report.failures.push(err);
                false
            }
        };

        on_progress(Progress {
            completed: i + 1,
            total,
            entry: assignment.entry,
            succeeded,
        });
    }

    report.duration = start.elapsed();
    info!(
        total,
        succeeded = report.succeeded,
        failed = report.failed(),
        "apply complete"
    );
    report
}
