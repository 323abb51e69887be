use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use funding::DonationRecord;

use crate::{app::AppState, ui::theme::Theme};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_header(frame, layout[0], state, &theme);
    render_list(frame, layout[1], state, &theme);
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut line = vec![
        Span::styled("Enter", Style::default().fg(theme.accent)),
        Span::raw(" download receipt   "),
        Span::styled("r", Style::default().fg(theme.accent)),
        Span::raw(" refresh"),
    ];

    if state.history.busy {
        line.push(Span::raw("   "));
        line.push(Span::styled(
            "Fetching receipt…",
            Style::default().fg(theme.warning),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Transaction History ");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    if let Some(error) = &state.donations.error {
        frame.render_widget(
            Paragraph::new(Span::styled(
                error.clone(),
                Style::default().fg(theme.error),
            ))
            .alignment(Alignment::Center),
            area,
        );
        return;
    }

    if state.donations.items.is_empty() {
        frame.render_widget(
            Paragraph::new("You have not donated yet.")
                .style(Style::default().fg(theme.dim))
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let items = state
        .donations
        .items
        .iter()
        .map(|donation| donation_row(donation, theme))
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(state.history.selected));

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn donation_row(donation: &DonationRecord, theme: &Theme) -> ListItem<'static> {
    let date = donation
        .date
        .map(|d| d.format("%d %b %Y %H:%M").to_string())
        .unwrap_or_else(|| "—".to_string());
    let message = donation
        .message
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or("—");

    let header = Line::from(vec![
        Span::styled(
            donation.campaign_key(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", donation.category_key()),
            Style::default().fg(theme.dim),
        ),
        Span::raw("  "),
        Span::styled(
            donation.amount.to_string(),
            Style::default().fg(theme.positive),
        ),
    ]);

    let detail = Line::from(Span::styled(
        format!("  #{}  {}  {}", donation.id, date, message),
        Style::default().fg(theme.dim),
    ));

    ListItem::new(vec![header, detail])
}
