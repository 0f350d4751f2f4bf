use engine::Bsk;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Styled span for a signed BSK amount.
///
/// Credits render green with a `+` prefix, debits red with `-`, zero in the
/// neutral text color.
#[must_use]
pub fn styled_amount(amount: Bsk, theme: &Theme) -> Span<'static> {
    let color = if amount.is_positive() {
        theme.positive
    } else if amount.is_negative() {
        theme.negative
    } else {
        theme.text
    };

    Span::styled(
        format!("{} BSK", amount.format_signed()),
        Style::default().fg(color),
    )
}

/// Bold variant for totals in the statistics panel.
#[must_use]
pub fn styled_amount_bold(amount: Bsk, theme: &Theme) -> Span<'static> {
    let base = styled_amount(amount, theme);
    base.patch_style(Style::default().add_modifier(Modifier::BOLD))
}

/// Unsigned variant for contexts where the label carries the sign
/// (e.g. "Total Spent").
#[must_use]
pub fn styled_amount_no_sign(amount: Bsk, theme: &Theme) -> Span<'static> {
    let color = if amount.is_positive() {
        theme.positive
    } else if amount.is_negative() {
        theme.negative
    } else {
        theme.text
    };

    Span::styled(
        format!("{} BSK", Bsk::new(amount.minor().abs())),
        Style::default().fg(color),
    )
}
