use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{Event, EventStream};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use dictionary::{Dictionary, DictionaryError, Word};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::select;
use tokio::sync::mpsc;

use crate::events::handle_key;
use crate::query::{FetchTicket, QueryCache, QueryState};
use crate::theme::Theme;
use crate::ui;

/// Completed fetch travelling back to the event loop. Carries the term it
/// was issued for so the cache can file it under the right key.
pub struct LookupOutcome {
    pub term: String,
    pub result: Result<Word, DictionaryError>,
}

pub struct App {
    /// What the user is typing; display only until submitted.
    pub draft: String,
    /// The term actually driving the active lookup.
    pub committed: String,
    pub theme: Theme,
    pub cache: QueryCache,
    pub should_quit: bool,
}

impl App {
    pub fn new(theme: Theme) -> Self {
        Self {
            draft: String::new(),
            committed: String::new(),
            theme,
            cache: QueryCache::new(),
            should_quit: false,
        }
    }

    /// Copies the trimmed draft into the committed term. An empty draft
    /// clears the results back to the prompt.
    pub fn submit(&mut self, now: Instant) -> Option<FetchTicket> {
        self.committed = self.draft.trim().to_owned();
        tracing::info!(term = %self.committed, "search submitted");
        self.cache.lookup(&self.committed, now)
    }

    /// State of the lookup the view is bound to.
    pub fn state(&self) -> QueryState<'_> {
        self.cache.state(&self.committed)
    }
}

pub async fn run() -> anyhow::Result<()> {
    setup_terminal()?;
    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;
    let result = event_loop(&mut terminal).await;
    restore_terminal()?;
    result
}

/// Single cooperative loop: draw, then wait for either a key press or a
/// finished lookup. Network fetches run on spawned tasks and report back
/// over the channel; the loop task is the only owner of the app state.
async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
) -> anyhow::Result<()> {
    let dict = Arc::new(Dictionary::new());
    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<LookupOutcome>();
    let mut events = EventStream::new();
    let mut app = App::new(Theme::from_system());

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;
        select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => {
                    if let Some(ticket) = handle_key(&mut app, key, Instant::now()) {
                        spawn_lookup(Arc::clone(&dict), ticket, outcome_tx.clone());
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(error)) => return Err(error.into()),
                None => break,
            },
            Some(outcome) = outcome_rx.recv() => {
                let result = outcome.result.map_err(|error| error.to_string());
                app.cache.resolve(&outcome.term, result, Instant::now());
            }
        }
        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn spawn_lookup(
    dict: Arc<Dictionary>,
    ticket: FetchTicket,
    outcome_tx: mpsc::UnboundedSender<LookupOutcome>,
) {
    tokio::spawn(async move {
        let term = ticket.term;
        tracing::info!(%term, "fetching definition");
        let result = dict.get_definition(&term).await;
        if let Err(error) = &result {
            tracing::warn!(%term, %error, "lookup failed");
        }
        // The receiver is gone only during shutdown.
        let _ = outcome_tx.send(LookupOutcome { term, result });
    });
}

fn setup_terminal() -> anyhow::Result<()> {
    enable_raw_mode()?;
    execute!(std::io::stdout(), EnterAlternateScreen)?;
    Ok(())
}

fn restore_terminal() -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(std::io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
