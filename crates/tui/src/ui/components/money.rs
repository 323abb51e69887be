use funding::Money;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// A money amount styled for lists and cards.
#[must_use]
pub fn styled_amount(amount: Money, theme: &Theme) -> Span<'static> {
    Span::styled(amount.to_string(), Style::default().fg(theme.positive))
}

/// A money amount with bold emphasis, for totals.
#[must_use]
pub fn styled_amount_bold(amount: Money, theme: &Theme) -> Span<'static> {
    Span::styled(
        amount.to_string(),
        Style::default()
            .fg(theme.positive)
            .add_modifier(Modifier::BOLD),
    )
}

/// A text progress bar for funding progress, like `████████░░`.
#[must_use]
pub fn funding_bar(collected: Money, goal: Money, width: usize) -> String {
    if !goal.is_positive() {
        return "━".repeat(width);
    }

    let ratio = (collected.minor().max(0) as f64 / goal.minor() as f64).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// `funding_bar` with usage-based coloring: calm below 70%, warning up to
/// 90%, urgent above.
#[must_use]
pub fn styled_funding_bar(
    collected: Money,
    goal: Money,
    width: usize,
    theme: &Theme,
) -> Span<'static> {
    let bar = funding_bar(collected, goal, width);

    let color = if goal.is_positive() {
        let ratio = collected.minor().max(0) as f64 / goal.minor() as f64;
        if ratio < 0.7 {
            theme.positive
        } else if ratio < 0.9 {
            theme.warning
        } else {
            theme.error
        }
    } else {
        theme.dim
    };

    Span::styled(bar, Style::default().fg(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn funding_bar_fills_by_ratio() {
        let bar = funding_bar(Money::new(500_00), Money::new(1000_00), 10);
        assert_eq!(bar, format!("{}{}", "█".repeat(5), "░".repeat(5)));
    }

    #[test]
    fn funding_bar_handles_zero_goal() {
        assert_eq!(funding_bar(Money::new(100), Money::ZERO, 4), "━━━━");
    }

    #[test]
    fn funding_bar_caps_at_full() {
        let bar = funding_bar(Money::new(1500_00), Money::new(1000_00), 4);
        assert_eq!(bar, "█".repeat(4));
    }
}
