use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;
use crate::tui::app::{AppState, Screen};

pub(crate) struct StatusBarComponent;

impl Component for StatusBarComponent {
    fn render(&self, f: &mut Frame, area: Rect, state: &mut AppState) {
        let mut lines = Vec::new();

        if state.search_active || !state.search.is_empty() {
            let cursor = if state.search_active { "▏" } else { "" };
            lines.push(Line::from(vec![
                Span::styled("/", Style::default().fg(Color::Yellow)),
                Span::raw(format!("{}{}", state.search, cursor)),
            ]));
        } else if let Some(notice) = &state.notice {
            let style = if notice.error {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Green)
            };
            lines.push(Line::from(Span::styled(notice.text.clone(), style)));
        } else {
            let mut chips: Vec<String> = state
                .counts
                .iter()
                .map(|(status, count)| format!("{}: {}", status, count))
                .collect();
            if chips.is_empty() {
                chips.push(format!("Total: {}", state.rows.len()));
            }
            lines.push(Line::from(Span::styled(
                chips.join(" · "),
                Style::default().fg(Color::Gray),
            )));
        }

        let hints = match state.screen {
            Screen::List => {
                "j/k naviguer · v voir · n nouveau · e modifier · d supprimer · / rechercher · f filtrer · s stats · Tab module · q quitter"
            }
            Screen::Stats => "p période · Tab module · s/Esc retour · r rafraîchir · q quitter",
        };
        lines.push(Line::from(Span::styled(
            hints,
            Style::default().fg(Color::DarkGray),
        )));

        let widget = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(widget, area);
    }
}
