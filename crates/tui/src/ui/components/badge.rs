use engine::{BadgeTone, StatusBadge};
use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// Renders a status badge as a bracketed span. Returns `None` when the
/// transaction has no recognized status, in which case nothing is drawn.
#[must_use]
pub fn badge_span(badge: Option<StatusBadge>, theme: &Theme) -> Option<Span<'static>> {
    let badge = badge?;
    let text = match badge.tone {
        BadgeTone::Outline => format!("({})", badge.label),
        _ => format!("[{}]", badge.label),
    };
    Some(Span::styled(
        text,
        Style::default().fg(theme.badge_color(badge.tone)),
    ))
}
