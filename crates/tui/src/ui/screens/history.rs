use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Row, Table, TableState},
};

use engine::{classify, status_badge};

use crate::{
    app::{AppState, FetchState, InputMode},
    ui::{Theme, components},
};

/// Below this width the table no longer fits and rows render as cards.
const CARD_BREAKPOINT_COLS: u16 = 100;

pub fn render_statistics(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default().borders(Borders::ALL).title("BSK Rewards");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(stats) = &state.history.statistics else {
        frame.render_widget(
            Paragraph::new("Loading totals...").style(Style::default().fg(theme.dim)),
            inner,
        );
        return;
    };

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ])
        .split(inner);

    let cell = |title: &'static str, value: Span<'static>| {
        Paragraph::new(vec![
            Line::from(Span::styled(title, Style::default().fg(theme.dim))),
            Line::from(value),
        ])
    };

    frame.render_widget(
        cell(
            "Total Earned",
            components::money::styled_amount_no_sign(stats.total_earned, theme),
        ),
        cells[0],
    );
    frame.render_widget(
        cell(
            "Total Spent",
            Span::styled(
                format!("{} BSK", stats.total_spent),
                Style::default().fg(theme.negative),
            ),
        ),
        cells[1],
    );
    frame.render_widget(
        cell(
            "Net Change",
            components::money::styled_amount_bold(stats.net_change, theme),
        ),
        cells[2],
    );
    frame.render_widget(
        cell(
            "Withdrawable",
            components::money::styled_amount(stats.withdrawable_total, theme),
        ),
        cells[3],
    );
    frame.render_widget(
        cell(
            "Holding",
            components::money::styled_amount(stats.holding_total, theme),
        ),
        cells[4],
    );
}

pub fn render_filter_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let filters = &state.filters;
    let searching = state.input_mode == InputMode::Search;

    let search = if searching {
        format!("{}_", filters.search_input)
    } else {
        filters
            .search_term
            .clone()
            .unwrap_or_else(|| "-".to_string())
    };
    let search_style = if searching {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };

    let tag = filters.tx_type.as_deref().unwrap_or("All");
    let page = format!("{} / {}", filters.page, state.total_pages());
    let shown = shown_of_total(state.history.items.len(), state.history.total_count);

    let line = Line::from(vec![
        Span::styled("Search", Style::default().fg(theme.dim)),
        Span::raw(": "),
        Span::styled(search, search_style),
        Span::raw("   "),
        Span::styled("Wallet", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}   ", filters.balance.label())),
        Span::styled("Type", Style::default().fg(theme.dim)),
        Span::raw(format!(": {tag}   ")),
        Span::styled("Direction", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}   ", filters.direction.label())),
        Span::styled("Page", Style::default().fg(theme.dim)),
        Span::raw(format!(": {page}   ")),
        Span::styled(shown, Style::default().fg(theme.dim)),
    ]);

    let block = Block::default().borders(Borders::ALL).title("Filters");
    frame.render_widget(Paragraph::new(line).block(block), area);
}

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    match &state.history.fetch {
        FetchState::Loading => {
            render_notice(frame, area, "Loading transactions...", theme.dim);
        }
        FetchState::Failed(reason) => {
            let lines = vec![
                Line::from(Span::styled(
                    reason.clone(),
                    Style::default().fg(theme.error),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::raw("Press "),
                    Span::styled("r", Style::default().fg(theme.accent)),
                    Span::raw(" to retry."),
                ]),
            ];
            let block = Block::default().borders(Borders::ALL).title("History");
            frame.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center).block(block),
                area,
            );
        }
        FetchState::Ready if state.history.items.is_empty() => {
            let message = empty_state_message(state.filters.has_active_filters());
            render_notice(frame, area, message, theme.text);
        }
        FetchState::Ready => {
            if area.width < CARD_BREAKPOINT_COLS {
                render_cards(frame, area, state, theme);
            } else {
                render_table(frame, area, state, theme);
            }
        }
    }
}

fn shown_of_total(shown: usize, total: u64) -> String {
    format!("Showing {shown} of {total}")
}

/// Distinct empty states: a virgin history vs a result filtered to zero.
fn empty_state_message(has_active_filters: bool) -> &'static str {
    if has_active_filters {
        "No transactions match the current filters."
    } else {
        "No transactions yet."
    }
}

fn render_notice(frame: &mut Frame<'_>, area: Rect, message: &str, color: ratatui::style::Color) {
    let block = Block::default().borders(Borders::ALL).title("History");
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(color),
        )))
        .alignment(Alignment::Center)
        .block(block),
        area,
    );
}

fn render_table(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let header = Row::new(vec!["Date", "Time", "Activity", "Details", "Amount", "Wallet", "Status"])
        .style(Style::default().fg(theme.dim));

    let rows = state
        .history
        .items
        .iter()
        .map(|tx| {
            let descriptor = classify(tx);
            let local = tx.created_at.with_timezone(&state.timezone);
            let badge = status_badge(tx.status.as_deref());

            Row::new(vec![
                Line::from(local.format("%d %b %Y").to_string()),
                Line::from(local.format("%H:%M").to_string()),
                Line::from(vec![
                    Span::styled(
                        descriptor.icon.glyph(),
                        Style::default().fg(theme.tone_color(descriptor.tone)),
                    ),
                    Span::raw(" "),
                    Span::raw(descriptor.label),
                ]),
                Line::from(Span::styled(
                    descriptor.secondary,
                    Style::default().fg(theme.dim),
                )),
                Line::from(components::money::styled_amount(tx.amount, theme)),
                Line::from(tx.balance_type.label()),
                Line::from(
                    components::badge::badge_span(badge, theme)
                        .map(|span| vec![span])
                        .unwrap_or_default(),
                ),
            ])
        })
        .collect::<Vec<_>>();

    let widths = [
        Constraint::Length(11),
        Constraint::Length(5),
        Constraint::Length(24),
        Constraint::Min(20),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(12),
    ];

    let mut table_state = TableState::default();
    if !state.history.items.is_empty() {
        table_state.select(Some(state.history.selected));
    }

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("History"))
        .row_highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_cards(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let items = state
        .history
        .items
        .iter()
        .map(|tx| {
            let descriptor = classify(tx);
            let local = tx.created_at.with_timezone(&state.timezone);
            let badge = status_badge(tx.status.as_deref());

            let mut title = vec![
                Span::styled(
                    descriptor.icon.glyph(),
                    Style::default().fg(theme.tone_color(descriptor.tone)),
                ),
                Span::raw(" "),
                Span::raw(descriptor.label),
                Span::raw("  "),
                components::money::styled_amount(tx.amount, theme),
            ];
            if let Some(span) = components::badge::badge_span(badge, theme) {
                title.push(Span::raw("  "));
                title.push(span);
            }

            let detail = Line::from(Span::styled(
                descriptor.secondary,
                Style::default().fg(theme.dim),
            ));
            let footer = Line::from(Span::styled(
                format!(
                    "{}  {} {}",
                    tx.balance_type.label(),
                    local.format("%d %b %Y"),
                    local.format("%H:%M"),
                ),
                Style::default().fg(theme.dim),
            ));

            ListItem::new(vec![Line::from(title), detail, footer, Line::from("")])
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    if !state.history.items.is_empty() {
        list_state.select(Some(state.history.selected));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("History"))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_count_formats_shown_against_total() {
        assert_eq!(shown_of_total(20, 134), "Showing 20 of 134");
        assert_eq!(shown_of_total(0, 0), "Showing 0 of 0");
    }

    #[test]
    fn empty_states_are_mutually_exclusive() {
        assert_eq!(empty_state_message(false), "No transactions yet.");
        assert_eq!(
            empty_state_message(true),
            "No transactions match the current filters."
        );
        assert_ne!(empty_state_message(false), empty_state_message(true));
    }
}
