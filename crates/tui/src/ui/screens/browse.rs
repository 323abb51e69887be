use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use funding::Campaign;

use crate::{
    app::{AppState, DonateField, DonateForm},
    ui::{
        components::money::{styled_amount, styled_funding_bar},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_filters(frame, layout[0], state, &theme);
    render_list(frame, layout[1], state, &theme);

    if let Some(form) = &state.donate {
        render_donate_modal(frame, area, state, form, &theme);
    }
}

fn render_filters(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let search_style = if state.browse.search_focus {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };

    let mut line = vec![
        Span::styled("Search", Style::default().fg(theme.dim)),
        Span::raw(": "),
        Span::styled(format!("{:<24}", state.browse.search), search_style),
        Span::raw("  "),
        Span::styled("Category", Style::default().fg(theme.dim)),
        Span::raw(": "),
        Span::styled(state.browse.category_label(), Style::default().fg(theme.text)),
    ];

    if let Some(err) = &state.browse.error {
        line.push(Span::raw("  "));
        line.push(Span::styled(err.as_str(), Style::default().fg(theme.error)));
    }

    let block = Block::default()
        .title(" Browse Campaigns ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    if state.browse.visible.is_empty() {
        frame.render_widget(
            Paragraph::new("No active campaigns available.")
                .style(Style::default().fg(theme.dim))
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let items = state
        .browse
        .visible
        .iter()
        .filter_map(|&index| state.cache.as_slice().get(index))
        .map(|campaign| campaign_row(campaign, theme))
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(state.browse.selected));
    }

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn campaign_row(campaign: &Campaign, theme: &Theme) -> ListItem<'static> {
    let category = campaign.category.as_deref().unwrap_or("General");
    let description: String = campaign.description.chars().take(60).collect();

    let title_line = Line::from(vec![
        Span::styled(
            campaign.title.clone(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("[{category}]"), Style::default().fg(theme.dim)),
    ]);

    let funding_line = Line::from(vec![
        Span::raw("  Goal: "),
        styled_amount(campaign.goal, theme),
        Span::raw("  Raised: "),
        styled_amount(campaign.collected, theme),
        Span::raw("  "),
        styled_funding_bar(campaign.collected, campaign.goal, 16, theme),
        Span::styled(
            format!(" {}% funded", campaign.percent_funded()),
            Style::default().fg(theme.dim),
        ),
    ]);

    let description_line = Line::from(Span::styled(
        format!("  {description}"),
        Style::default().fg(theme.dim),
    ));

    ListItem::new(vec![title_line, funding_line, description_line])
}

fn render_donate_modal(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    form: &DonateForm,
    theme: &Theme,
) {
    let Some(campaign) = state.cache.get(form.campaign_id) else {
        return;
    };

    let modal = centered_rect(area, 56, 12);
    frame.render_widget(Clear, modal);

    let title = format!(" Donate to {} ", campaign.title);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let amount_style = field_style(form.focus == DonateField::Amount, theme);
    let message_style = field_style(form.focus == DonateField::Message, theme);

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Goal: "),
            styled_amount(campaign.goal, theme),
            Span::raw("  Raised: "),
            styled_amount(campaign.collected, theme),
            Span::raw("  Remaining: "),
            styled_amount(campaign.remaining(), theme),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Amount (₹): ", Style::default().fg(theme.dim)),
            Span::styled(form.amount.clone(), amount_style),
        ]),
        Line::from(vec![
            Span::styled("Message:    ", Style::default().fg(theme.dim)),
            Span::styled(form.message.clone(), message_style),
        ]),
        Line::raw(""),
    ];

    if form.in_flight {
        lines.push(Line::from(Span::styled(
            "Submitting…",
            Style::default().fg(theme.warning),
        )));
    } else if let Some(err) = &form.error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(theme.error),
        )));
    } else {
        lines.push(Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" confirm  "),
            Span::styled("Tab", Style::default().fg(theme.accent)),
            Span::raw(" next field  "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" cancel"),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn field_style(focused: bool, theme: &Theme) -> Style {
    if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
