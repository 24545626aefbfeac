use chrono::Datelike;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::query::QueryState;
use crate::theme::Theme;

const PLACEHOLDER: &str = "Type any word...";
const PROMPT: &str = "Search your word";
const ERROR_MESSAGE: &str =
    "Sorry, there was an error fetching the word. Please try again later.";

pub fn draw(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = frame.size();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);
    draw_search_bar(frame, app, rows[0]);
    draw_content(frame, app, rows[1]);
    draw_footer(frame, app, rows[2]);
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let mut spans = vec![Span::styled("> ", Style::default().fg(theme.accent))];
    if app.draft.is_empty() {
        spans.push(Span::styled(
            PLACEHOLDER,
            Style::default()
                .fg(theme.muted)
                .add_modifier(Modifier::ITALIC),
        ));
    } else {
        spans.push(Span::styled(
            app.draft.as_str(),
            Style::default().fg(theme.fg),
        ));
    }
    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .title(Span::styled(
                " Dictionary ",
                Style::default()
                    .fg(theme.fg)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    frame.render_widget(input, area);
    let caret = app.draft.chars().count() as u16;
    frame.set_cursor(area.x.saturating_add(3).saturating_add(caret), area.y + 1);
}

fn draw_content(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let body = Paragraph::new(content(&app.state(), theme))
        .style(Style::default().fg(theme.fg))
        .wrap(Wrap { trim: false })
        .block(Block::default().padding(Padding::horizontal(2)));
    frame.render_widget(body, area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let key = Style::default().fg(theme.accent);
    let hint = Style::default().fg(theme.muted);
    let year = chrono::Local::now().year();
    let line = Line::from(vec![
        Span::styled(" Enter", key),
        Span::styled(" search   ", hint),
        Span::styled("Ctrl+T", key),
        Span::styled(format!(" theme ({})   ", app.theme.mode_label()), hint),
        Span::styled("Esc", key),
        Span::styled(" quit   ", hint),
        Span::styled(format!("copyright © {year}"), hint),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Builds the body for the current lookup state. Pure: the same state and
/// theme always produce the same lines, and every list stays in the order
/// the service sent it.
///
/// Precedence note: an error always renders as an error, even when a stale
/// success for the same term is still cached.
pub fn content<'a>(state: &QueryState<'a>, theme: &Theme) -> Vec<Line<'a>> {
    match state {
        QueryState::Idle => status_lines(PROMPT, Style::default().fg(theme.muted)),
        QueryState::Pending => status_lines("Loading...", Style::default().fg(theme.muted)),
        QueryState::Error(_) => status_lines(ERROR_MESSAGE, Style::default().fg(theme.error)),
        QueryState::Refetching { .. } => {
            status_lines("Fetching...", Style::default().fg(theme.muted))
        }
        QueryState::Success(word) => entry_lines(word, theme),
    }
}

fn status_lines(message: &str, style: Style) -> Vec<Line<'_>> {
    vec![
        Line::default(),
        Line::from(Span::styled(message, style)).alignment(Alignment::Center),
    ]
}

fn entry_lines<'a>(word: &'a dictionary::Word, theme: &Theme) -> Vec<Line<'a>> {
    let heading = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let section = Style::default()
        .fg(theme.fg)
        .add_modifier(Modifier::BOLD | Modifier::ITALIC);
    let muted = Style::default().fg(theme.muted);

    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(word.word.as_str(), heading)),
        Line::default(),
        Line::from(Span::styled(
            "Pronunciation",
            Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
        )),
    ];
    for phonetic in &word.phonetics {
        if let Some(text) = &phonetic.text {
            lines.push(Line::from(vec![
                Span::raw("  • "),
                Span::styled(text.as_str(), Style::default().fg(theme.accent)),
            ]));
        }
    }
    for meaning in &word.meanings {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            meaning.part_of_speech.as_str(),
            section,
        )));
        for definition in &meaning.definitions {
            lines.push(Line::from(vec![
                Span::raw("  • "),
                Span::raw(definition.definition.as_str()),
            ]));
        }
    }
    if !word.source_urls.is_empty() {
        lines.push(Line::default());
        for url in &word.source_urls {
            lines.push(Line::from(vec![
                Span::raw("Source: "),
                Span::styled(
                    url.as_str(),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]));
        }
    }
    if let Some(license) = &word.license {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("Powered by {} - {}", license.name, license.url),
            muted,
        )));
    }
    lines
}
