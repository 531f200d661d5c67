use std::io::{self, Stdout};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    self as crossterm_terminal, disable_raw_mode, enable_raw_mode, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tracing::debug;

use crate::worker::FetchOutcome;

use super::app::App;
use super::layout::Regions;

/// Short poll so worker outcomes and banner expiry show up promptly.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Spin up the terminal backend, start the initial load, and keep drawing and
/// processing input until the user quits. Refuses to start when the terminal
/// cannot host every screen region.
pub fn run_app(app: &mut App, outcomes: &Receiver<FetchOutcome>) -> Result<()> {
    let (width, height) = crossterm_terminal::size().context("failed to read terminal size")?;
    Regions::split(Rect::new(0, 0, width, height), 0)?;

    let mut stdout = io::stdout();
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal backend")?;

    app.start();
    let result = event_loop(&mut terminal, app, outcomes);

    cleanup_terminal(&mut terminal)?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    outcomes: &Receiver<FetchOutcome>,
) -> Result<()> {
    loop {
        drain_outcomes(app, outcomes);
        app.tick(Instant::now());

        terminal
            .draw(|frame| app.draw(frame))
            .context("failed to draw frame")?;

        if event::poll(POLL_INTERVAL).context("event polling failed")? {
            if let Event::Key(key_event) = event::read().context("failed to read event")? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                if key_event.modifiers.contains(KeyModifiers::CONTROL)
                    && key_event.code == KeyCode::Char('c')
                {
                    return Ok(());
                }
                if app.handle_key(key_event.code) {
                    return Ok(());
                }
            }
        }
    }
}

/// Apply every outcome the worker has produced since the last frame.
fn drain_outcomes(app: &mut App, outcomes: &Receiver<FetchOutcome>) {
    loop {
        match outcomes.try_recv() {
            Ok(outcome) => app.apply(outcome),
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                debug!("outcome channel closed");
                break;
            }
        }
    }
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal
        .show_cursor()
        .context("failed to restore cursor visibility")
}
