pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, FetchState, InputMode};

pub use terminal::{AppTerminal as Terminal, install_panic_hook, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();

    // Shell layout: info bar, statistics, filter bar, history, bottom bar.
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(7),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    screens::history::render_statistics(frame, layout[1], state, &theme);
    screens::history::render_filter_bar(frame, layout[2], state, &theme);
    screens::history::render(frame, layout[3], state, &theme);
    render_bottom_bar(frame, layout[4], state, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let fetch = match &state.history.fetch {
        FetchState::Loading => Span::styled("LOADING", Style::default().fg(theme.warning)),
        FetchState::Ready => Span::styled("OK", Style::default().fg(theme.positive)),
        FetchState::Failed(_) => Span::styled("ERR", Style::default().fg(theme.error)),
    };

    let mut parts = vec![
        Span::styled("User", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.user_id)),
        Span::styled("Server", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.base_url)),
        fetch,
    ];

    if let Some(status) = &state.status {
        parts.push(Span::raw("  "));
        parts.push(Span::styled(
            status.clone(),
            Style::default().fg(theme.accent),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let hint = |key: &'static str| Span::styled(key, Style::default().fg(theme.accent));

    let parts = match state.input_mode {
        InputMode::Search => vec![
            hint("Enter"),
            Span::raw(" apply  "),
            hint("Esc"),
            Span::raw(" cancel"),
        ],
        InputMode::Normal => vec![
            hint("/"),
            Span::raw(" search  "),
            hint("b"),
            Span::raw(" balance  "),
            hint("t"),
            Span::raw(" type  "),
            hint("d"),
            Span::raw(" direction  "),
            hint("c"),
            Span::raw(" clear  "),
            hint("n"),
            Span::raw("/"),
            hint("p"),
            Span::raw(" page  "),
            hint("e"),
            Span::raw(" export  "),
            hint("r"),
            Span::raw(" refresh  "),
            hint("q"),
            Span::raw(" quit"),
        ],
    };

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
