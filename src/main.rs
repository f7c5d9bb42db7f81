use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use crossterm::event::{self, Event};
use time::UtcOffset;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::tui::app::App;
use crate::tui::input;
use crate::tui::model::EventResult;
use crate::tui::terminal::{self, TerminalGuard, TuiTerminal};
use crate::tui::ui;

mod tui;

fn main() -> io::Result<()> {
    // Must run before any other thread exists; Unix refuses it afterwards.
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    init_logging();

    let mut app = App::new(isosort::session().build(), offset);
    let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    app.open_folder(working_dir);

    let _terminal_guard = TerminalGuard;
    let mut terminal = terminal::setup_terminal()?;

    run(&mut terminal, &mut app)
}

fn run(terminal: &mut TuiTerminal, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if !event::poll(tick_rate)? {
            continue;
        }

        let result = match event::read()? {
            Event::Key(key) => input::handle_key(app, key),
            Event::Mouse(mouse) => input::handle_mouse(app, mouse),
            _ => EventResult::Continue,
        };

        match result {
            EventResult::Continue => {}
            EventResult::Quit => return Ok(()),
            EventResult::Apply => app.apply(|progress| {
                if let Err(err) = terminal.draw(|f| ui::render_progress(f, &progress)) {
                    warn!(error = %err, "progress redraw failed");
                }
            }),
        }
    }
}

/// Log to a file; the terminal belongs to the UI.
fn init_logging() {
    let path = isosort::config::log_path();
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(_) => return,
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "isosort=info".into()))
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .init();

    info!(log = %path.display(), "isosort starting");
}
