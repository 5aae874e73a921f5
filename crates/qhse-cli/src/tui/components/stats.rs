use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;
use crate::tui::app::AppState;
use crate::tui::theme;
use qhse_types::bar_width_pct;
use std::collections::BTreeMap;

const BAR_CELLS: usize = 24;

pub(crate) struct StatsComponent;

impl Component for StatsComponent {
    fn render(&self, f: &mut Frame, area: Rect, state: &mut AppState) {
        let title = format!(
            " Statistiques · {} · {} ",
            state.module.display_name(),
            state.periode.display_name()
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let Some(stats) = &state.stats else {
            let placeholder = if state.loading {
                "Chargement…"
            } else {
                "Aucune donnée"
            };
            f.render_widget(
                Paragraph::new(Span::styled(
                    placeholder,
                    Style::default().fg(Color::DarkGray),
                )),
                inner,
            );
            return;
        };

        let mut lines = vec![Line::from(vec![
            Span::raw("Total: "),
            Span::styled(
                stats.total.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ])];

        section(&mut lines, "Par statut", &stats.par_statut, theme::statut_color);
        section(&mut lines, "Par gravité", &stats.par_gravite, |_| Color::Yellow);
        section(&mut lines, "Par type", &stats.par_type, |_| Color::Cyan);

        if !stats.top_zones.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Top zones",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for zone in &stats.top_zones {
                lines.push(Line::from(format!("  {:<20} {}", zone.zone, zone.count)));
            }
        }

        f.render_widget(Paragraph::new(lines), inner);
    }
}

fn section(
    lines: &mut Vec<Line<'static>>,
    title: &str,
    counts: &BTreeMap<String, u64>,
    color: fn(&str) -> Color,
) {
    if counts.is_empty() {
        return;
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        title.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    let label_width = counts.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    let values: Vec<u64> = counts.values().copied().collect();
    for (label, count) in counts {
        let pct = bar_width_pct(*count, &values);
        let filled = ((pct * BAR_CELLS as f64 / 100.0).round() as usize).min(BAR_CELLS);
        lines.push(Line::from(vec![
            Span::raw(format!("  {:<width$} ", label, width = label_width)),
            Span::styled(
                "█".repeat(filled),
                Style::default().fg(color(label)),
            ),
            Span::styled(
                "░".repeat(BAR_CELLS - filled),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(format!(" {}", count)),
        ]));
    }
}
