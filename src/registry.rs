use crate::entry::FileEntry;
use crate::error::SortError;

// ---------------------------------------------------------------------------
// Sequence primitives
// ---------------------------------------------------------------------------

/// Remove the item at `from` and reinsert it at `to`.
///
/// Both indices must be in `0..items.len()`; otherwise the sequence is left
/// untouched. `from == to` is a no-op.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), SortError> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(SortError::IndexOutOfRange { index, len });
        }
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    Ok(())
}

/// Stable sort by observed time, most recent first; ties by scan rank.
pub fn sort_most_recent_first(entries: &mut [FileEntry]) {
    entries.sort_by(|a, b| {
        b.observed
            .cmp(&a.observed)
            .then(a.scan_rank.cmp(&b.scan_rank))
    });
}

/// Whether `entries` is in the order a fresh scan would produce.
pub fn is_most_recent_first(entries: &[FileEntry]) -> bool {
    entries.windows(2).all(|w| {
        w[0].observed > w[1].observed
            || (w[0].observed == w[1].observed && w[0].scan_rank <= w[1].scan_rank)
    })
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// The ordered file list of one folder.
///
/// Replaced wholesale by each scan, reordered in place by [`move_entry`](Self::move_entry).
#[derive(Debug, Default, Clone)]
pub struct Registry {
    entries: Vec<FileEntry>,
}

impl Registry {
    /// A registry holding `entries` in the given order.
    pub fn new(entries: Vec<FileEntry>) -> Self {
        Self { entries }
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Number of files listed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the folder held no matching files.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&FileEntry> {
        self.entries.get(index)
    }

    /// Swap in the result of a new scan.
    pub fn replace(&mut self, entries: Vec<FileEntry>) {
        self.entries = entries;
    }

    /// Drop every entry, as after a failed scan.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Move one entry. See [`move_item`].
    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<(), SortError> {
        move_item(&mut self.entries, from, to)
    }

    /// Restore scan order from the last-read timestamps. No filesystem access.
    pub fn reset(&mut self) {
        sort_most_recent_first(&mut self.entries);
    }

    /// Whether the list is still in scan order.
    pub fn is_natural_order(&self) -> bool {
        is_most_recent_first(&self.entries)
    }
}
