use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;
use crate::query::FetchTicket;

/// Applies one key press to the app state.
///
/// Typing only edits the draft; the committed term (and with it the active
/// lookup) changes on Enter alone. Returns a ticket when a fetch must start.
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) -> Option<FetchTicket> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
            None
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            None
        }
        KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.theme = app.theme.toggled();
            tracing::debug!(mode = app.theme.mode_label(), "theme toggled");
            None
        }
        KeyCode::Enter => app.submit(now),
        KeyCode::Backspace => {
            app.draft.pop();
            None
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.draft.push(c);
            None
        }
        _ => None,
    }
}
