use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::app::{AppState, Modal, Screen};
use super::components::{
    Component, ConfirmComponent, DetailComponent, FormComponent, ListScreenComponent,
    StatsComponent, StatusBarComponent,
};

pub(crate) fn draw(f: &mut Frame, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], state);

    match state.screen {
        Screen::List => ListScreenComponent.render(f, chunks[1], state),
        Screen::Stats => StatsComponent.render(f, chunks[1], state),
    }

    StatusBarComponent.render(f, chunks[2], state);

    match state.modals.last() {
        Some(Modal::Form(_)) => FormComponent.render(f, f.area(), state),
        Some(Modal::Confirm(_)) => ConfirmComponent.render(f, f.area(), state),
        Some(Modal::Detail { .. }) => DetailComponent.render(f, f.area(), state),
        None => {}
    }
}

fn render_title_bar(f: &mut Frame, area: ratatui::layout::Rect, state: &AppState) {
    let title = Line::from(vec![
        Span::styled(
            "━━ ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "QHSE",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" → {}", state.module.display_name()),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            " ━━",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        if state.loading {
            Span::styled("  chargement…", Style::default().fg(Color::Yellow))
        } else {
            Span::raw("")
        },
    ]);
    f.render_widget(Paragraph::new(title), area);
}
