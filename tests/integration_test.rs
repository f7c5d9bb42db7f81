use std::fs;
use std::path::{Path, PathBuf};

use filetime::{set_file_mtime, FileTime};
use isosort::stamp::{CreationTime, FsTimestamps};
use isosort::{assign, scan, session, SessionState, SortError, Timestamps};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Create a temporary folder of disc images.
///
/// Structure:
/// ```
/// tmp/
///   alpha.iso      (t=100)
///   Bravo.ISO      (t=300)
///   charlie.iso    (t=200)
///   notes.txt      (t=900)
///   subdir/
///     delta.iso    (t=800)
/// ```
fn setup_test_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write_at(root, "alpha.iso", 100);
    write_at(root, "Bravo.ISO", 300);
    write_at(root, "charlie.iso", 200);
    write_at(root, "notes.txt", 900);

    let sub = root.join("subdir");
    fs::create_dir(&sub).unwrap();
    write_at(&sub, "delta.iso", 800);

    dir
}

fn write_at(dir: &Path, name: &str, secs: i64) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, name).unwrap();
    set_file_mtime(&path, FileTime::from_unix_time(secs, 0)).unwrap();
    path
}

fn mtime(path: &Path) -> i64 {
    FileTime::from_last_modification_time(&fs::metadata(path).unwrap()).unix_seconds()
}

/// Modification time only, so fixtures set with `set_file_mtime` are what the
/// scan observes on every platform.
fn fs_stamps() -> FsTimestamps {
    FsTimestamps::new(CreationTime::Unsupported)
}

/// Filesystem timestamps that refuse to write one file.
struct FailOn {
    inner: FsTimestamps,
    name: &'static str,
}

impl Timestamps for FailOn {
    fn read_time(&self, path: &Path) -> Result<FileTime, SortError> {
        self.inner.read_time(path)
    }

    fn write_time(&self, path: &Path, time: FileTime) -> Result<(), SortError> {
        if path.ends_with(self.name) {
            return Err(SortError::TimestampWrite {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.inner.write_time(path, time)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn scan_finds_images_most_recent_first() {
    let dir = setup_test_dir();

    let scan = scan(dir.path(), &fs_stamps()).unwrap();

    let names: Vec<&str> = scan.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Bravo.ISO", "charlie.iso", "alpha.iso"]);
    for pair in scan.entries.windows(2) {
        assert!(pair[0].observed >= pair[1].observed);
    }
}

#[test]
fn scan_is_not_recursive() {
    let dir = setup_test_dir();

    let scan = scan(dir.path(), &fs_stamps()).unwrap();

    assert!(scan.entries.iter().all(|e| e.name != "delta.iso"));
    assert_eq!(scan.stats.matched, 3);
    // 4 files + 1 subdir
    assert_eq!(scan.stats.seen, 5);
}

#[test]
fn scan_of_missing_folder_is_folder_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = scan(&dir.path().join("nope"), &fs_stamps()).err().unwrap();

    assert!(matches!(err, SortError::FolderNotFound(_)));
    assert!(err.is_folder_error());
}

#[test]
fn reorder_then_assign_scenario() {
    let dir = tempfile::tempdir().unwrap();
    write_at(dir.path(), "a.iso", 100);
    write_at(dir.path(), "b.iso", 300);
    write_at(dir.path(), "c.iso", 200);
    let mut session = session()
        .creation_time(CreationTime::Unsupported)
        .folder(dir.path())
        .open()
        .unwrap();
    let observed = |s: &isosort::Session| -> Vec<i64> {
        s.entries().iter().map(|e| e.observed.unix_seconds()).collect()
    };
    assert_eq!(observed(&session), vec![300, 200, 100]);

    session.move_entry(2, 0).unwrap();
    assert_eq!(observed(&session), vec![100, 300, 200]);

    let targets: Vec<i64> = assign(session.entries(), FileTime::from_unix_time(1000, 0))
        .iter()
        .map(|a| a.target.unix_seconds())
        .collect();
    assert_eq!(targets, vec![1000, 999, 998]);
}

#[test]
fn apply_rewrites_files_and_rescan_keeps_order() {
    let dir = setup_test_dir();
    let mut session = session()
        .creation_time(CreationTime::Unsupported)
        .folder(dir.path())
        .open()
        .unwrap();
    session.move_entry(2, 0).unwrap();
    assert_eq!(session.state(), SessionState::Reordered);

    let report = session.apply(FileTime::from_unix_time(5000, 0), |_| {});

    assert!(report.is_complete());
    assert_eq!(mtime(&dir.path().join("alpha.iso")), 5000);
    assert_eq!(mtime(&dir.path().join("Bravo.ISO")), 4999);
    assert_eq!(mtime(&dir.path().join("charlie.iso")), 4998);
    // untouched
    assert_eq!(mtime(&dir.path().join("notes.txt")), 900);
    assert_eq!(mtime(&dir.path().join("subdir").join("delta.iso")), 800);

    let names: Vec<&str> = session.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["alpha.iso", "Bravo.ISO", "charlie.iso"]);
    assert_eq!(session.state(), SessionState::Scanned);
}

#[test]
fn second_of_five_failing_does_not_stop_apply() {
    let dir = tempfile::tempdir().unwrap();
    for (i, name) in ["v.iso", "w.iso", "x.iso", "y.iso", "z.iso"].iter().enumerate() {
        write_at(dir.path(), name, 500 - i as i64);
    }
    let mut session = session()
        .timestamps(FailOn {
            inner: fs_stamps(),
            name: "w.iso",
        })
        .folder(dir.path())
        .open()
        .unwrap();
    let mut progress = Vec::new();

    let report = session.apply(FileTime::from_unix_time(9000, 0), |p| {
        progress.push((p.entry.name.clone(), p.succeeded));
    });

    assert_eq!(report.succeeded, 4);
    assert_eq!(report.failed(), 1);
    assert_eq!(progress.len(), 5);
    assert_eq!(progress[1], ("w.iso".to_string(), false));

    let rescanned = scan(dir.path(), &fs_stamps()).unwrap();
    let times: Vec<(&str, i64)> = rescanned
        .entries
        .iter()
        .map(|e| (e.name.as_str(), e.observed.unix_seconds()))
        .collect();
    assert_eq!(
        times,
        vec![
            ("v.iso", 9000),
            ("x.iso", 8998),
            ("y.iso", 8997),
            ("z.iso", 8996),
            ("w.iso", 499),
        ]
    );
}

#[cfg(target_os = "linux")]
#[test]
fn unwritable_creation_time_request_still_keeps_applied_order() {
    let dir = setup_test_dir();
    let mut session = session()
        .timestamps(FsTimestamps::new(CreationTime::Native))
        .folder(dir.path())
        .open()
        .unwrap();
    session.move_entry(2, 0).unwrap();

    let report = session.apply(FileTime::from_unix_time(7000, 0), |_| {});

    assert!(report.is_complete());
    let times: Vec<(&str, i64)> = session
        .entries()
        .iter()
        .map(|e| (e.name.as_str(), e.observed.unix_seconds()))
        .collect();
    assert_eq!(
        times,
        vec![("alpha.iso", 7000), ("Bravo.ISO", 6999), ("charlie.iso", 6998)]
    );
}

#[test]
fn empty_folder_scans_empty_and_apply_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    write_at(dir.path(), "readme.txt", 10);
    let mut session = session()
        .creation_time(CreationTime::Unsupported)
        .folder(dir.path())
        .open()
        .unwrap();
    assert!(session.entries().is_empty());
    let mut calls = 0;

    let report = session.apply_now(|_| calls += 1);

    assert_eq!(report.succeeded, 0);
    assert_eq!(report.total, 0);
    assert_eq!(calls, 0);
    assert_eq!(mtime(&dir.path().join("readme.txt")), 10);
}

#[test]
fn reset_after_moves_restores_scan_order() {
    let dir = setup_test_dir();
    let mut session = session()
        .creation_time(CreationTime::Unsupported)
        .folder(dir.path())
        .open()
        .unwrap();
    let scanned: Vec<PathBuf> = session.entries().iter().map(|e| e.path.clone()).collect();

    session.move_entry(0, 2).unwrap();
    session.move_entry(1, 0).unwrap();
    session.reset();

    let reset: Vec<PathBuf> = session.entries().iter().map(|e| e.path.clone()).collect();
    assert_eq!(reset, scanned);
}
