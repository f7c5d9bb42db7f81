use filetime::FileTime;
use isosort::config::EXTENSION;
use isosort::{Progress, SessionState};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, Wrap},
};
use time::{OffsetDateTime, UtcOffset};

use crate::tui::app::App;
use crate::tui::model::{AppMode, Notice};

const HELP: &str =
    "drag or J/K move · j/k select · o folder · r rescan · R reset · a apply · q quit";

pub fn render(f: &mut Frame, app: &mut App) {
    let rects = Layout::default()
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .margin(1)
        .split(f.area());

    render_header(f, app, rects[0]);
    render_list(f, app, rects[1]);

    let status = Paragraph::new(app.status.as_str()).style(Style::default().fg(Color::Cyan));
    f.render_widget(status, rects[2]);
    let help = Paragraph::new(HELP).style(Style::default().fg(Color::Gray));
    f.render_widget(help, rects[3]);

    match &app.mode {
        AppMode::List => {}
        AppMode::Prompt { input } => render_prompt(f, input),
        AppMode::Confirm => render_confirm(f, &app.confirm_message()),
        AppMode::Notice(notice) => render_notice(f, notice),
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let folder = app
        .session
        .folder()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(no folder)".to_string());
    let marker = match app.session.state() {
        SessionState::Reordered if !app.session.registry().is_natural_order() => " [modified]",
        _ => "",
    };
    let header = Paragraph::new(format!("Folder: {folder}{marker}"))
        .style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(header, area);
}

fn render_list(f: &mut Frame, app: &mut App, area: Rect) {
    // Rows start below the top border, the header row and its margin.
    app.list_area = Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(3),
        area.width.saturating_sub(2),
        area.height.saturating_sub(4),
    );

    let header_style = Style::default().bg(Color::Gray).fg(Color::Black);
    let header = Row::new(["#", "File", "Timestamp"])
        .style(header_style)
        .height(1)
        .bottom_margin(1);

    let drag = app.drag;
    let rows = app.session.entries().iter().enumerate().map(|(i, entry)| {
        let time = if entry.is_unread() {
            "unknown".to_string()
        } else {
            format_time(entry.observed, app.offset)
        };
        let row = Row::new(vec![
            Cell::from(format!("{:2}.", i + 1)),
            Cell::from(entry.name.as_str()),
            Cell::from(time),
        ])
        .height(1);
        match drag {
            Some(d) if d.over == i && d.from != i => {
                row.style(Style::default().fg(Color::Black).bg(Color::Yellow))
            }
            _ => row,
        }
    });

    let title = format!("{EXTENSION} files, most recent first (drag to reorder)");
    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Percentage(65),
            Constraint::Min(19),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title))
    .row_highlight_style(Style::default().bg(Color::DarkGray))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_prompt(f: &mut Frame, input: &str) {
    let area = centered(f.area(), 70, 3);
    let prompt = Paragraph::new(input).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Open folder (Enter to scan, Esc to cancel)"),
    );
    f.render_widget(Clear, area);
    f.render_widget(prompt, area);
}

fn render_confirm(f: &mut Frame, message: &str) {
    let area = centered(f.area(), 50, 6);
    let confirm = Paragraph::new(format!("{message}\n\n[y] yes   [n] no"))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm")
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(Clear, area);
    f.render_widget(confirm, area);
}

fn render_notice(f: &mut Frame, notice: &Notice) {
    let lines = u16::try_from(notice.body.lines().count()).unwrap_or(u16::MAX);
    let area = centered(f.area(), 60, lines.saturating_add(4));
    let body = Paragraph::new(format!("{}\n\npress any key", notice.body))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(notice.title.as_str())
                .border_style(Style::default().fg(notice.level.color())),
        );
    f.render_widget(Clear, area);
    f.render_widget(body, area);
}

/// Full-screen progress drawn between file writes while a batch runs.
pub fn render_progress(f: &mut Frame, progress: &Progress<'_>) {
    let area = centered(f.area(), 60, 3);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Rewriting timestamps"))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(progress.ratio())
        .label(format!(
            "{}/{}  {}",
            progress.completed, progress.total, progress.entry.name
        ));
    f.render_widget(Clear, f.area());
    f.render_widget(gauge, area);
}

/// `YYYY-MM-DD HH:MM:SS` in `offset`.
pub fn format_time(time: FileTime, offset: UtcOffset) -> String {
    match OffsetDateTime::from_unix_timestamp(time.unix_seconds()) {
        Ok(utc) => {
            let t = utc.to_offset(offset);
            format!(
                "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                t.year(),
                u8::from(t.month()),
                t.day(),
                t.hour(),
                t.minute(),
                t.second()
            )
        }
        Err(_) => "-".to_string(),
    }
}

/// A `width`% wide, `height` rows tall rectangle centred in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let row = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .split(area)[0];
    Layout::horizontal([Constraint::Percentage(width.min(100))])
        .flex(Flex::Center)
        .split(row)[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_utc() {
        // Arrange
        let time = FileTime::from_unix_time(1_700_000_000, 0);

        // Act
        let text = format_time(time, UtcOffset::UTC);

        // Assert
        assert_eq!(text, "2023-11-14 22:13:20");
    }

    #[test]
    fn test_format_time_applies_offset() {
        // Arrange
        let offset = UtcOffset::from_hms(8, 0, 0).expect("test expectation should hold");

        // Act
        let text = format_time(FileTime::from_unix_time(0, 0), offset);

        // Assert
        assert_eq!(text, "1970-01-01 08:00:00");
    }

    #[test]
    fn test_centered_stays_inside_area() {
        // Arrange
        let area = Rect::new(0, 0, 100, 40);

        // Act
        let inner = centered(area, 50, 6);

        // Assert
        assert_eq!(inner.height, 6);
        assert_eq!(inner.width, 50);
        assert_eq!((inner.x, inner.y), (25, 17));
    }
}
