use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
};

use crate::{app::AppState, ui::theme::Theme};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let block = Block::default()
        .title(" My Donations ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(error) = &state.donations.error {
        frame.render_widget(
            Paragraph::new(Span::styled(
                error.clone(),
                Style::default().fg(theme.error),
            ))
            .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    if state.donations.items.is_empty() {
        frame.render_widget(
            Paragraph::new("You have not donated yet.")
                .style(Style::default().fg(theme.dim))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let header = Row::new(vec![
        Cell::from("Campaign"),
        Cell::from("Category"),
        Cell::from("Donated"),
        Cell::from("Goal"),
        Cell::from("Date"),
    ])
    .style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );

    let rows = state.donations.items.iter().map(|donation| {
        let goal = donation
            .campaign_goal
            .map(|g| g.to_string())
            .unwrap_or_else(|| "—".to_string());
        let date = donation
            .date
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "—".to_string());

        Row::new(vec![
            Cell::from(donation.campaign_key()),
            Cell::from(donation.category_key()),
            Cell::from(Span::styled(
                donation.amount.to_string(),
                Style::default().fg(theme.positive),
            )),
            Cell::from(goal),
            Cell::from(date),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(24),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(18),
        ],
    )
    .header(header)
    .column_spacing(2);

    frame.render_widget(table, inner);
}
