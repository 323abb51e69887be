use std::collections::BTreeMap;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use funding::Money;

use crate::{
    app::AppState,
    ui::{components::money::styled_amount_bold, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    if let Some(error) = &state.dashboard.error {
        let block = bordered(" Dashboard ", &theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(error.clone(), Style::default().fg(theme.error)),
                Span::raw(" Press "),
                Span::styled("r", Style::default().fg(theme.accent)),
                Span::raw(" to refresh."),
            ]))
            .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(5)])
        .split(area);

    render_cards(frame, layout[0], state, &theme);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(layout[1]);

    render_rollup(
        frame,
        halves[0],
        " Donations by Category ",
        &state.dashboard.by_category,
        &theme,
    );
    render_rollup(
        frame,
        halves[1],
        " Donations by Campaign ",
        &state.dashboard.by_campaign,
        &theme,
    );
}

fn render_cards(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

    let total = state
        .dashboard
        .server_total
        .map(|t| styled_amount_bold(t, theme))
        .unwrap_or_else(|| Span::styled("—", Style::default().fg(theme.dim)));

    stat_card(frame, cols[0], "Total Donated", total, theme);
    stat_card(
        frame,
        cols[1],
        "Donations",
        Span::styled(
            state.dashboard.donation_count.to_string(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        theme,
    );
    stat_card(
        frame,
        cols[2],
        "Active Campaigns",
        Span::styled(
            state.dashboard.active_count.to_string(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        theme,
    );
    stat_card(
        frame,
        cols[3],
        "Top Campaign",
        Span::styled(
            state
                .dashboard
                .top_campaign
                .clone()
                .unwrap_or_else(|| "—".to_string()),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        theme,
    );
}

fn stat_card(frame: &mut Frame<'_>, area: Rect, label: &str, value: Span<'static>, theme: &Theme) {
    let block = bordered("", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(theme.dim),
        )),
        Line::from(value),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// A rollup rendered as label, bar, and exact amount per grouping key.
fn render_rollup(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    rollup: &BTreeMap<String, Money>,
    theme: &Theme,
) {
    let block = bordered(title, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if rollup.is_empty() {
        frame.render_widget(
            Paragraph::new("No donations yet.")
                .style(Style::default().fg(theme.dim))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let max = rollup
        .values()
        .map(|amount| amount.minor())
        .max()
        .unwrap_or(0)
        .max(1);

    let lines = rollup
        .iter()
        .map(|(key, amount)| {
            let width = 14usize;
            let filled = ((amount.minor().max(0) as f64 / max as f64) * width as f64) as usize;
            let bar = format!(
                "{}{}",
                "█".repeat(filled.min(width)),
                "░".repeat(width.saturating_sub(filled))
            );

            Line::from(vec![
                Span::styled(format!("{key:<16.16} "), Style::default().fg(theme.text)),
                Span::styled(bar, Style::default().fg(theme.accent)),
                Span::raw(" "),
                Span::styled(amount.to_string(), Style::default().fg(theme.positive)),
            ])
        })
        .collect::<Vec<_>>();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn bordered(title: &str, theme: &Theme) -> Block<'static> {
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
}
