use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::form::centered;
use super::Component;
use crate::tui::app::{AppState, Modal};

pub(crate) struct ConfirmComponent;

impl Component for ConfirmComponent {
    fn render(&self, f: &mut Frame, area: Rect, state: &mut AppState) {
        let Some(Modal::Confirm(confirm)) = state.modals.last() else {
            return;
        };

        let popup = centered(area, 50, 20);
        f.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(Span::styled(
                " Supprimer ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let lines = vec![
            Line::from(format!(
                "Supprimer {} {} ?",
                confirm.module.display_name(),
                confirm.label
            )),
            Line::from(""),
            Line::from(Span::styled(
                "y confirmer · n / Esc annuler",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        f.render_widget(Paragraph::new(lines), inner);
    }
}
