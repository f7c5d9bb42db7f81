use std::path::PathBuf;

use isosort::config::EXTENSION;
use isosort::{ApplyReport, Progress, ScanStats, Session, SortError};
use ratatui::layout::Rect;
use ratatui::widgets::TableState;
use time::UtcOffset;
use tracing::debug;

use crate::tui::model::{AppMode, Drag, Notice, NoticeLevel};

const MAX_LISTED_FAILURES: usize = 5;

pub struct App {
    pub session: Session,
    pub table_state: TableState,
    pub mode: AppMode,
    pub status: String,
    pub drag: Option<Drag>,
    /// Screen area holding the table rows, updated on every render.
    pub list_area: Rect,
    pub offset: UtcOffset,
}

impl App {
    pub fn new(session: Session, offset: UtcOffset) -> Self {
        let mut app = Self {
            session,
            table_state: TableState::default(),
            mode: AppMode::List,
            status: "Ready".to_string(),
            drag: None,
            list_area: Rect::default(),
            offset,
        };
        app.select_first();
        app
    }

    // ── Folder ────────────────────────────────────────────────────────────

    pub fn open_folder(&mut self, folder: PathBuf) {
        let result = self.session.open(folder);
        self.after_scan(result);
    }

    pub fn refresh(&mut self) {
        let result = self.session.rescan();
        self.after_scan(result);
    }

    /// Folder text the chooser prompt starts with.
    pub fn folder_input(&self) -> String {
        self.session
            .folder()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    }

    fn after_scan(&mut self, result: Result<ScanStats, SortError>) {
        match result {
            Ok(stats) => {
                self.status = format!(
                    "Found {} {EXTENSION} files, most recent first",
                    stats.matched
                );
                self.select_first();
            }
            Err(err) => {
                self.status = "Scan failed".to_string();
                self.table_state.select(None);
                self.mode = AppMode::Notice(Notice::new(
                    NoticeLevel::Error,
                    "Scan failed",
                    describe_error(&err),
                ));
            }
        }
    }

    // ── Selection ─────────────────────────────────────────────────────────

    pub fn next(&mut self) {
        let len = self.session.entries().len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.session.entries().len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    fn select_first(&mut self) {
        let first = (!self.session.entries().is_empty()).then_some(0);
        self.table_state.select(first);
    }

    // ── Reordering ────────────────────────────────────────────────────────

    pub fn move_selected_up(&mut self) {
        if let Some(i) = self.table_state.selected() {
            if i > 0 {
                self.commit_move(i, i - 1);
            }
        }
    }

    pub fn move_selected_down(&mut self) {
        if let Some(i) = self.table_state.selected() {
            if i + 1 < self.session.entries().len() {
                self.commit_move(i, i + 1);
            }
        }
    }

    pub fn reset_order(&mut self) {
        if self.session.entries().is_empty() {
            return;
        }
        self.session.reset();
        self.status = "Reset to timestamp order".to_string();
    }

    fn commit_move(&mut self, from: usize, to: usize) {
        match self.session.move_entry(from, to) {
            Ok(()) => {
                self.table_state.select(Some(to));
                if from != to {
                    self.status = "Order changed, press 'a' to apply".to_string();
                }
            }
            Err(err) => debug!(error = %err, "move ignored"),
        }
    }

    // ── Mouse ─────────────────────────────────────────────────────────────

    /// List index under the screen cell, if any.
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.list_area;
        let inside = column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height);
        if !inside {
            return None;
        }
        let index = self.table_state.offset() + usize::from(row - area.y);
        (index < self.session.entries().len()).then_some(index)
    }

    pub fn begin_drag(&mut self, index: usize) {
        self.table_state.select(Some(index));
        self.drag = Some(Drag {
            from: index,
            over: index,
        });
    }

    pub fn drag_over(&mut self, index: usize) {
        if let Some(drag) = &mut self.drag {
            drag.over = index;
        }
    }

    /// Finish a drag with exactly one move. Released off the list, the last
    /// hovered row is the target.
    pub fn end_drag(&mut self, index: Option<usize>) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        self.commit_move(drag.from, index.unwrap_or(drag.over));
    }

    // ── Apply ─────────────────────────────────────────────────────────────

    /// Ask for confirmation, or warn when there is nothing to write.
    pub fn request_apply(&mut self) {
        if self.session.entries().is_empty() {
            self.mode = AppMode::Notice(Notice::new(
                NoticeLevel::Warning,
                "Nothing to apply",
                format!("There are no {EXTENSION} files in this folder."),
            ));
        } else {
            self.mode = AppMode::Confirm;
        }
    }

    pub fn confirm_message(&self) -> String {
        format!(
            "Rewrite the timestamps of {} files?\nThis cannot be undone.",
            self.session.entries().len()
        )
    }

    pub fn cancel_apply(&mut self) {
        self.mode = AppMode::List;
        self.status = "Apply cancelled".to_string();
    }

    /// Run the batch. Blocks until every file has been handled.
    pub fn apply<F>(&mut self, on_progress: F)
    where
        F: FnMut(Progress<'_>),
    {
        self.mode = AppMode::List;
        let report = self.session.apply_now(on_progress);
        self.finish_apply(&report);
    }

    fn finish_apply(&mut self, report: &ApplyReport) {
        self.status = format!(
            "Done: rewrote {} of {} files",
            report.succeeded, report.total
        );

        let notice = if let Some(err) = &report.rescan_error {
            Notice::new(NoticeLevel::Error, "Rescan failed", describe_error(err))
        } else if report.failures.is_empty() {
            Notice::new(
                NoticeLevel::Info,
                "Done",
                format!("Rewrote the timestamps of {} files.", report.succeeded),
            )
        } else {
            let mut body = format!(
                "Rewrote {} of {} files. Failed:",
                report.succeeded, report.total
            );
            for err in report.failures.iter().take(MAX_LISTED_FAILURES) {
                body.push('\n');
                body.push_str(&describe_error(err));
            }
            if report.failed() > MAX_LISTED_FAILURES {
                body.push_str(&format!("\n… and {} more", report.failed() - MAX_LISTED_FAILURES));
            }
            Notice::new(NoticeLevel::Warning, "Done with errors", body)
        };

        self.mode = AppMode::Notice(notice);
        self.select_first();
    }

    pub fn dismiss_notice(&mut self) {
        self.mode = AppMode::List;
    }
}

fn describe_error(err: &SortError) -> String {
    match err.path() {
        Some(path) => format!("{err}: {}", path.display()),
        None => err.to_string(),
    }
}
