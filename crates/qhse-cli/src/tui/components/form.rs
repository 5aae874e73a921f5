use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::Component;
use crate::tui::app::{AppState, FormMode, FormRow, FormState, Modal};
use qhse_forms::FieldKind;
use serde_json::Value;

pub(crate) struct FormComponent;

impl Component for FormComponent {
    fn render(&self, f: &mut Frame, area: Rect, state: &mut AppState) {
        let Some(Modal::Form(form)) = state.modals.last() else {
            return;
        };

        let popup = centered(area, 80, 85);
        f.render_widget(Clear, popup);

        let title = match &form.mode {
            FormMode::Create => format!(" Nouveau · {} ", form.module.display_name()),
            FormMode::Edit { id } => {
                format!(" Modifier · {} · {} ", form.module.display_name(), id)
            }
        };
        let border_color = if form.success_close.is_some() {
            Color::Green
        } else if !form.errors.is_empty() {
            Color::Red
        } else {
            Color::Cyan
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let error_height = (form.errors.len().min(4) + usize::from(form.input_error.is_some()))
            as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(error_height),
                Constraint::Length(1),
            ])
            .split(inner);

        render_fields(f, chunks[0], form);
        render_errors(f, chunks[1], form);
        render_footer(f, chunks[2], form);
    }
}

fn render_fields(f: &mut Frame, area: Rect, form: &FormState) {
    let rows = form.rows();
    let label_width = rows
        .iter()
        .map(|row| match row {
            FormRow::Field { label, .. } | FormRow::ItemField { label, .. } => {
                label.chars().count()
            }
            FormRow::GroupHeader { .. } => 0,
        })
        .max()
        .unwrap_or(0);

    // Scroll so the focused row stays inside the viewport.
    let height = area.height as usize;
    let offset = form.cursor.saturating_sub(height.saturating_sub(1));

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(index, row)| render_row(form, index, row, label_width))
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

fn render_row(form: &FormState, index: usize, row: &FormRow, label_width: usize) -> Line<'static> {
    let focused = index == form.cursor;
    match row {
        FormRow::GroupHeader { label, .. } => Line::from(Span::styled(
            format!("── {} ──", label),
            Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
        )),
        FormRow::Field {
            path, kind, label, ..
        }
        | FormRow::ItemField {
            path, kind, label, ..
        } => {
            let marker = if focused { "▸ " } else { "  " };
            let value = display_value(form, path, *kind);
            let value_style = if focused {
                Style::default()
                    .fg(Color::White)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(vec![
                Span::styled(
                    format!("{}{:<width$}  ", marker, label, width = label_width),
                    if focused {
                        Style::default().fg(Color::LightCyan)
                    } else {
                        Style::default().fg(Color::Cyan)
                    },
                ),
                Span::styled(value, value_style),
            ])
        }
    }
}

fn display_value(form: &FormState, path: &str, kind: FieldKind) -> String {
    match kind {
        FieldKind::Checkbox => {
            let checked = qhse_forms::get_path(&form.draft, path)
                .and_then(Value::as_bool)
                .unwrap_or(false);
            if checked { "[x]" } else { "[ ]" }.to_string()
        }
        FieldKind::Select => {
            let value = form.raw_value(path);
            if value.is_empty() {
                "— (espace pour choisir)".to_string()
            } else {
                format!("◂ {} ▸", value)
            }
        }
        FieldKind::Password => "•".repeat(form.raw_value(path).chars().count()),
        _ => form.raw_value(path),
    }
}

fn render_errors(f: &mut Frame, area: Rect, form: &FormState) {
    let mut lines: Vec<Line> = Vec::new();
    if let Some(input_error) = &form.input_error {
        lines.push(Line::from(Span::styled(
            input_error.clone(),
            Style::default().fg(Color::Yellow),
        )));
    }
    for error in form.errors.iter().take(4) {
        lines.push(Line::from(Span::styled(
            format!("✗ {}", error),
            Style::default().fg(Color::Red),
        )));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn render_footer(f: &mut Frame, area: Rect, form: &FormState) {
    let text = if form.success_close.is_some() {
        Span::styled(
            "✓ Enregistré",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else if form.submitting {
        Span::styled("Envoi…", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            "Ctrl+S enregistrer · Ctrl+A ajouter · Ctrl+D retirer · Esc fermer",
            Style::default().fg(Color::DarkGray),
        )
    };
    f.render_widget(Paragraph::new(Line::from(text)), area);
}

pub(crate) fn centered(area: Rect, pct_x: u16, pct_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - pct_y) / 2),
            Constraint::Percentage(pct_y),
            Constraint::Percentage((100 - pct_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - pct_x) / 2),
            Constraint::Percentage(pct_x),
            Constraint::Percentage((100 - pct_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
