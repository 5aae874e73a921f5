use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use super::Component;
use crate::display::{cell, view_for};
use crate::tui::app::AppState;
use crate::tui::theme;

pub(crate) struct ListScreenComponent;

/// Expired equipment shows red, equipment inside the warning window
/// yellow.
fn expiry_style(text: &str) -> Style {
    let Ok(date) = chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d") else {
        return Style::default();
    };
    match qhse_types::classify_expiry(date, chrono::Local::now().date_naive()) {
        qhse_types::ExpiryStatus::Expired => Style::default().fg(Color::Red),
        qhse_types::ExpiryStatus::ExpiringSoon => Style::default().fg(Color::Yellow),
        qhse_types::ExpiryStatus::Valid => Style::default(),
    }
}

impl Component for ListScreenComponent {
    fn render(&self, f: &mut Frame, area: Rect, state: &mut AppState) {
        let view = view_for(state.module);
        let visible = state.visible();

        let header = Row::new(
            view.columns
                .iter()
                .map(|column| Cell::from(column.header))
                .collect::<Vec<_>>(),
        )
        .style(
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = visible
            .iter()
            .map(|index| {
                let row = &state.rows[*index];
                Row::new(
                    view.columns
                        .iter()
                        .map(|column| {
                            let text = cell(row, column.field);
                            let style = match column.field {
                                "statut" => Style::default().fg(theme::statut_color(&text)),
                                "niveauRisque" => {
                                    Style::default().fg(theme::niveau_color(&text))
                                }
                                "dateExpiration" => expiry_style(&text),
                                _ => Style::default(),
                            };
                            Cell::from(text).style(style)
                        })
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let widths: Vec<Constraint> = view
            .columns
            .iter()
            .map(|_| Constraint::Ratio(1, view.columns.len() as u32))
            .collect();

        let mut title = format!(" {} ({}) ", state.module.display_name(), visible.len());
        if let Some(statut) = state.status_filter {
            title.push_str(&format!("[{}] ", statut));
        }
        if state.loading {
            title.push_str("… ");
        }

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(Span::styled(
                        title,
                        Style::default()
                            .fg(Color::LightCyan)
                            .add_modifier(Modifier::BOLD),
                    )),
            );

        let mut table_state = TableState::default();
        if !visible.is_empty() {
            table_state.select(Some(state.selected.min(visible.len() - 1)));
        }
        f.render_stateful_widget(table, area, &mut table_state);

        if visible.is_empty() && !state.loading {
            let empty = Line::from(Span::styled(
                "Aucune entrée",
                Style::default().fg(Color::DarkGray),
            ));
            let inner = Rect {
                x: area.x + 2,
                y: area.y + 2,
                width: area.width.saturating_sub(4),
                height: 1,
            };
            f.render_widget(ratatui::widgets::Paragraph::new(empty), inner);
        }
    }
}
