use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::tui::app::App;
use crate::tui::model::{AppMode, EventResult};

pub fn handle_key(app: &mut App, key: KeyEvent) -> EventResult {
    if key.kind != KeyEventKind::Press {
        return EventResult::Continue;
    }

    match &mut app.mode {
        AppMode::List => {
            let shift = key.modifiers.contains(KeyModifiers::SHIFT);
            match key.code {
                KeyCode::Char('q') => return EventResult::Quit,
                KeyCode::Char('J') => app.move_selected_down(),
                KeyCode::Char('K') => app.move_selected_up(),
                KeyCode::Down if shift => app.move_selected_down(),
                KeyCode::Up if shift => app.move_selected_up(),
                KeyCode::Char('j') | KeyCode::Down => app.next(),
                KeyCode::Char('k') | KeyCode::Up => app.previous(),
                KeyCode::Char('o') => {
                    app.mode = AppMode::Prompt {
                        input: app.folder_input(),
                    };
                }
                KeyCode::Char('r') | KeyCode::F(5) => app.refresh(),
                KeyCode::Char('R') => app.reset_order(),
                KeyCode::Char('a') | KeyCode::Enter => app.request_apply(),
                _ => {}
            }
        }
        AppMode::Prompt { input } => match key.code {
            KeyCode::Enter => {
                let folder = input.trim().to_string();
                app.mode = AppMode::List;
                if !folder.is_empty() {
                    app.open_folder(PathBuf::from(folder));
                }
            }
            KeyCode::Esc => {
                app.mode = AppMode::List;
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                input.push(c);
            }
            _ => {}
        },
        AppMode::Confirm => match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => return EventResult::Apply,
            KeyCode::Char('n' | 'N') | KeyCode::Esc => app.cancel_apply(),
            _ => {}
        },
        AppMode::Notice(_) => app.dismiss_notice(),
    }

    EventResult::Continue
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) -> EventResult {
    if !matches!(app.mode, AppMode::List) {
        return EventResult::Continue;
    }

    let row = app.row_at(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = row {
                app.begin_drag(index);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(index) = row {
                app.drag_over(index);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => app.end_drag(row),
        MouseEventKind::ScrollDown => app.next(),
        MouseEventKind::ScrollUp => app.previous(),
        _ => {}
    }

    EventResult::Continue
}

#[cfg(test)]
mod tests {
    use filetime::{set_file_mtime, FileTime};
    use isosort::stamp::CreationTime;
    use ratatui::layout::Rect;
    use tempfile::TempDir;
    use time::UtcOffset;

    use super::*;

    fn setup() -> (TempDir, App) {
        let dir = TempDir::new().expect("test expectation should hold");
        for (name, secs) in [("a.iso", 1), ("b.iso", 2), ("c.iso", 3)] {
            let path = dir.path().join(name);
            std::fs::write(&path, name).expect("test expectation should hold");
            set_file_mtime(&path, FileTime::from_unix_time(secs, 0))
                .expect("test expectation should hold");
        }
        let session = isosort::session()
            .creation_time(CreationTime::Unsupported)
            .folder(dir.path())
            .open()
            .expect("test expectation should hold");
        let mut app = App::new(session, UtcOffset::UTC);
        app.list_area = Rect::new(1, 4, 60, 10);
        (dir, app)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column: 10,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn names(app: &App) -> Vec<&str> {
        app.session.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_quit_key() {
        // Arrange
        let (_dir, mut app) = setup();

        // Act
        let result = handle_key(&mut app, key(KeyCode::Char('q')));

        // Assert
        assert_eq!(result, EventResult::Quit);
    }

    #[test]
    fn test_escape_in_list_does_not_quit() {
        // Arrange
        let (_dir, mut app) = setup();

        // Act
        let result = handle_key(&mut app, key(KeyCode::Esc));

        // Assert
        assert_eq!(result, EventResult::Continue);
        assert!(matches!(app.mode, AppMode::List));
    }

    #[test]
    fn test_prompt_ignores_control_and_alt_characters() {
        // Arrange
        let (_dir, mut app) = setup();
        handle_key(&mut app, key(KeyCode::Char('o')));
        let start = app.folder_input();

        // Act
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('Z'), KeyModifiers::SHIFT));

        // Assert
        let AppMode::Prompt { input } = &app.mode else {
            panic!("folder prompt should still be open");
        };
        assert_eq!(*input, format!("{start}Z"));
    }

    #[test]
    fn test_shift_down_moves_selected_file() {
        // Arrange
        let (_dir, mut app) = setup();

        // Act
        handle_key(&mut app, KeyEvent::new(KeyCode::Down, KeyModifiers::SHIFT));

        // Assert
        assert_eq!(names(&app), vec!["b.iso", "c.iso", "a.iso"]);
    }

    #[test]
    fn test_confirm_flow_returns_apply() {
        // Arrange
        let (_dir, mut app) = setup();

        // Act
        handle_key(&mut app, key(KeyCode::Char('a')));
        let result = handle_key(&mut app, key(KeyCode::Char('y')));

        // Assert
        assert_eq!(result, EventResult::Apply);
    }

    #[test]
    fn test_declined_confirmation_returns_to_list() {
        // Arrange
        let (_dir, mut app) = setup();
        handle_key(&mut app, key(KeyCode::Char('a')));

        // Act
        let result = handle_key(&mut app, key(KeyCode::Char('n')));

        // Assert
        assert_eq!(result, EventResult::Continue);
        assert!(matches!(app.mode, AppMode::List));
        assert_eq!(app.status, "Apply cancelled");
    }

    #[test]
    fn test_cancelled_folder_prompt_keeps_session() {
        // Arrange
        let (dir, mut app) = setup();
        handle_key(&mut app, key(KeyCode::Char('o')));
        handle_key(&mut app, key(KeyCode::Char('x')));

        // Act
        handle_key(&mut app, key(KeyCode::Esc));

        // Assert
        assert!(matches!(app.mode, AppMode::List));
        assert_eq!(app.session.folder(), Some(dir.path()));
        assert_eq!(app.session.entries().len(), 3);
    }

    #[test]
    fn test_mouse_drag_moves_one_file() {
        // Arrange
        let (_dir, mut app) = setup();

        // Act
        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 6));
        handle_mouse(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 5));
        handle_mouse(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 4));
        handle_mouse(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 4));

        // Assert
        assert_eq!(names(&app), vec!["a.iso", "c.iso", "b.iso"]);
    }

    #[test]
    fn test_mouse_ignored_while_confirming() {
        // Arrange
        let (_dir, mut app) = setup();
        app.mode = AppMode::Confirm;

        // Act
        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 6));

        // Assert
        assert!(app.drag.is_none());
    }
}
