use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::form::centered;
use super::Component;
use crate::display::cell;
use crate::tui::app::{AppState, Modal};
use qhse_forms::entities::schema_for;
use serde_json::Value;

pub(crate) struct DetailComponent;

impl Component for DetailComponent {
    fn render(&self, f: &mut Frame, area: Rect, state: &mut AppState) {
        let Some(Modal::Detail { module, entity }) = state.modals.last() else {
            return;
        };
        let schema = schema_for(*module);

        let popup = centered(area, 70, 80);
        f.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Span::styled(
                format!(" {} ", module.display_name()),
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let label_width = schema
            .fields
            .iter()
            .map(|field| field.label.chars().count())
            .max()
            .unwrap_or(0);

        let mut lines = Vec::new();
        for field in &schema.fields {
            let value = cell(entity, field.name);
            let shown = if value.is_empty() {
                "—".to_string()
            } else {
                value
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<width$}  ", field.label, width = label_width),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(shown),
            ]));
        }

        for group in &schema.groups {
            let items = entity
                .get(group.name)
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("{} ({})", group.label, items.len()),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for (index, item) in items.iter().enumerate() {
                let parts: Vec<String> = group
                    .item_fields
                    .iter()
                    .map(|field| {
                        let value = cell(item, field.name);
                        if value.is_empty() {
                            format!("{}: —", field.label)
                        } else {
                            format!("{}: {}", field.label, value)
                        }
                    })
                    .collect();
                lines.push(Line::from(format!("  {}. {}", index + 1, parts.join(" · "))));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Esc fermer",
            Style::default().fg(Color::DarkGray),
        )));

        f.render_widget(Paragraph::new(lines), inner);
    }
}
