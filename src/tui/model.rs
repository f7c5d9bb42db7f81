use ratatui::style::Color;

pub enum AppMode {
    List,
    /// Folder chooser. Esc cancels without touching the session.
    Prompt { input: String },
    /// Yes/no before rewriting timestamps.
    Confirm,
    Notice(Notice),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub body: String,
}

/// A mouse drag in progress: the row it started on and the row under the pointer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Drag {
    pub from: usize,
    pub over: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EventResult {
    Continue,
    Quit,
    /// The user confirmed; the caller runs the batch so it can draw progress.
    Apply,
}

impl NoticeLevel {
    pub fn color(self) -> Color {
        match self {
            NoticeLevel::Info => Color::Green,
            NoticeLevel::Warning => Color::Yellow,
            NoticeLevel::Error => Color::Red,
        }
    }
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            body: body.into(),
        }
    }
}
