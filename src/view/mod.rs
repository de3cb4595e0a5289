//! TUI rendering and terminal management (impure shell).
//!
//! The event loop owns the [`AppState`] and is the single place state is
//! mutated: key events become [`UiAction`]s, actions may yield fetch
//! commands, commands run as spawned tasks, and completions come back over a
//! channel tagged with their token for the controller to accept or discard.

pub mod rows;
mod search_input;
mod table;

pub use rows::{Column, TableRow};
pub use search_input::SearchBar;
pub use table::ResultsTable;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::{self, Stdout};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::model::TransportError;
use crate::query::ResultEnvelope;
use crate::state::{AppState, FetchCommand, Focus, UiAction};
use crate::transport::SearchClient;

/// Errors during TUI operations.
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error from the terminal layer.
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// A completed fetch delivered back to the event loop.
struct FetchOutcome<R> {
    token: u64,
    result: Result<ResultEnvelope<R>, TransportError>,
}

/// Run the dashboard for resource `R` until the user quits.
///
/// Installs the terminal, runs the event loop, and restores the terminal
/// even when the loop fails.
pub async fn run<R: TableRow>(client: SearchClient, app: AppState<R>) -> Result<(), TuiError> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, client, app).await;

    io::stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}

async fn event_loop<R: TableRow>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    client: SearchClient,
    mut app: AppState<R>,
) -> Result<(), TuiError> {
    // Blocking crossterm reads happen on a dedicated thread; the loop itself
    // never blocks on input.
    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        while let Ok(event) = event::read() {
            if input_tx.send(event).is_err() {
                break;
            }
        }
    });

    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel::<FetchOutcome<R>>();

    // Initial load: submit a pre-filled query if one was given, otherwise
    // fetch the default spec.
    let mount = if app.input().is_empty() {
        UiAction::Refresh
    } else {
        UiAction::SubmitSearch
    };
    if let Some(command) = app.dispatch(mount) {
        spawn_fetch(&client, command, &fetch_tx);
    }

    loop {
        terminal.draw(|frame| render(frame, &app))?;

        if app.should_quit() {
            info!("quit requested");
            return Ok(());
        }

        tokio::select! {
            Some(event) = input_rx.recv() => {
                if let Event::Key(key) = event {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if let Some(action) = map_key(key, app.focus()) {
                        debug!(?action, "dispatching action");
                        if let Some(command) = app.dispatch(action) {
                            spawn_fetch(&client, command, &fetch_tx);
                        }
                    }
                }
            }
            Some(outcome) = fetch_rx.recv() => {
                app.query.complete_fetch(outcome.token, outcome.result);
            }
            else => return Ok(()),
        }
    }
}

/// Execute a fetch command as a detached task.
///
/// Superseded requests are not cancelled; their completions arrive with an
/// old token and the controller discards them.
fn spawn_fetch<R: TableRow>(
    client: &SearchClient,
    command: FetchCommand,
    fetch_tx: &mpsc::UnboundedSender<FetchOutcome<R>>,
) {
    let client = client.clone();
    let fetch_tx = fetch_tx.clone();
    tokio::spawn(async move {
        let result = client.search::<R>(&command.spec).await;
        // A closed channel just means the loop already exited.
        let _ = fetch_tx.send(FetchOutcome {
            token: command.token,
            result,
        });
    });
}

/// Map a key event to a semantic action, depending on focus.
pub fn map_key(key: KeyEvent, focus: Focus) -> Option<UiAction> {
    match focus {
        Focus::SearchInput => match key.code {
            KeyCode::Esc => Some(UiAction::CancelSearch),
            KeyCode::Enter => Some(UiAction::SubmitSearch),
            KeyCode::Backspace => Some(UiAction::InputBackspace),
            KeyCode::Char(c) => Some(UiAction::InputChar(c)),
            _ => None,
        },
        Focus::Table => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(UiAction::Quit),
            KeyCode::Char('/') => Some(UiAction::FocusSearch),
            KeyCode::Left | KeyCode::Char('h') => Some(UiAction::PrevPage),
            KeyCode::Right | KeyCode::Char('l') => Some(UiAction::NextPage),
            KeyCode::Char('s') => Some(UiAction::CycleSortColumn),
            KeyCode::Char('o') => Some(UiAction::ToggleSortDirection),
            KeyCode::Char('r') => Some(UiAction::Refresh),
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                Some(UiAction::GotoPage(c.to_digit(10).unwrap_or(1)))
            }
            _ => None,
        },
    }
}

/// Draw one frame: search bar, results table, status line.
pub fn render<R: TableRow>(frame: &mut Frame, app: &AppState<R>) {
    let [search_area, table_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(SearchBar::new(app), search_area);
    frame.render_widget(ResultsTable::new(app), table_area);
    frame.render_widget(status_line(app), status_area);
}

/// The status line: fetch errors in red, rejected intents in yellow,
/// otherwise the key hints.
fn status_line<R: TableRow>(app: &AppState<R>) -> Paragraph<'static> {
    if let Some(err) = app.query.last_error() {
        return Paragraph::new(Line::styled(
            format!("{err} (press r to retry)"),
            Style::default().fg(Color::Red),
        ));
    }
    if let Some(notice) = app.notice() {
        return Paragraph::new(Line::styled(
            notice.to_string(),
            Style::default().fg(Color::Yellow),
        ));
    }
    Paragraph::new(Line::styled(
        "←/→ page  1-9 jump  s sort  o order  / search  r reload  q quit".to_string(),
        Style::default().fg(Color::DarkGray),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn table_focus_maps_navigation_keys() {
        assert_eq!(
            map_key(key(KeyCode::Left), Focus::Table),
            Some(UiAction::PrevPage)
        );
        assert_eq!(
            map_key(key(KeyCode::Right), Focus::Table),
            Some(UiAction::NextPage)
        );
        assert_eq!(
            map_key(key(KeyCode::Char('3')), Focus::Table),
            Some(UiAction::GotoPage(3))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('q')), Focus::Table),
            Some(UiAction::Quit)
        );
    }

    #[test]
    fn zero_is_not_a_page_jump() {
        assert_eq!(map_key(key(KeyCode::Char('0')), Focus::Table), None);
    }

    #[test]
    fn search_focus_routes_characters_to_input() {
        assert_eq!(
            map_key(key(KeyCode::Char('s')), Focus::SearchInput),
            Some(UiAction::InputChar('s'))
        );
        assert_eq!(
            map_key(key(KeyCode::Enter), Focus::SearchInput),
            Some(UiAction::SubmitSearch)
        );
        assert_eq!(
            map_key(key(KeyCode::Esc), Focus::SearchInput),
            Some(UiAction::CancelSearch)
        );
    }

    #[test]
    fn escape_quits_only_from_table_focus() {
        assert_eq!(
            map_key(key(KeyCode::Esc), Focus::Table),
            Some(UiAction::Quit)
        );
        assert_eq!(
            map_key(key(KeyCode::Esc), Focus::SearchInput),
            Some(UiAction::CancelSearch)
        );
    }
}
