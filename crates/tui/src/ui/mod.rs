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

use crate::app::{AppState, BannerKind, Section};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    // Main layout: info bar, tabs, banner, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Length(1), // Page banner
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);
    render_banner(frame, layout[2], state, &theme);

    match state.section {
        Section::Browse => screens::browse::render(frame, layout[3], state),
        Section::Donations => screens::donations::render(frame, layout[3], state),
        Section::History => screens::history::render(frame, layout[3], state),
        Section::Dashboard => screens::dashboard::render(frame, layout[3], state),
    }

    render_bottom_bar(frame, layout[4], state, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let donor = state
        .donor
        .as_ref()
        .map(|d| d.name.clone())
        .unwrap_or_else(|| "not signed in".to_string());

    let line = Line::from(vec![
        Span::styled(" HopeRaise ", Style::default().fg(theme.accent)),
        Span::styled(state.base_url.clone(), Style::default().fg(theme.dim)),
        Span::raw("  "),
        Span::styled("Donor: ", Style::default().fg(theme.dim)),
        Span::styled(donor, Style::default().fg(theme.text)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_banner(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(banner) = &state.banner else {
        return;
    };

    let color = match banner.kind {
        BannerKind::Success => theme.positive,
        BannerKind::Error => theme.error,
    };

    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", banner.text),
            Style::default().fg(color),
        )),
        area,
    );
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut spans = vec![Span::raw(" ")];
    spans.extend(components::tabs::tab_shortcuts(theme));
    spans.push(Span::raw("   "));

    match state.section {
        Section::Browse => {
            spans.push(Span::styled("Enter", Style::default().fg(theme.accent)));
            spans.push(Span::raw(" donate  "));
            spans.push(Span::styled("/", Style::default().fg(theme.accent)));
            spans.push(Span::raw(" search  "));
            spans.push(Span::styled("c", Style::default().fg(theme.accent)));
            spans.push(Span::raw(" category  "));
            spans.push(Span::styled("r", Style::default().fg(theme.accent)));
            spans.push(Span::raw(" refresh"));
        }
        Section::Donations => {
            spans.push(Span::styled("e", Style::default().fg(theme.accent)));
            spans.push(Span::raw(" export csv  "));
            spans.push(Span::styled("r", Style::default().fg(theme.accent)));
            spans.push(Span::raw(" refresh"));
        }
        Section::History => {
            spans.push(Span::styled("Enter", Style::default().fg(theme.accent)));
            spans.push(Span::raw(" receipt  "));
            spans.push(Span::styled("j/k", Style::default().fg(theme.accent)));
            spans.push(Span::raw(" select"));
        }
        Section::Dashboard => {
            spans.push(Span::styled("r", Style::default().fg(theme.accent)));
            spans.push(Span::raw(" refresh"));
        }
    }

    spans.push(Span::raw("   "));
    spans.push(Span::styled("q", Style::default().fg(theme.accent)));
    spans.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
