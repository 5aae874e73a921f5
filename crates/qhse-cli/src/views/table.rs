use crate::display::{cell, ModuleView};
use owo_colors::OwoColorize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Print the collection as a fixed-width table, one row per entity.
pub fn print(view: &ModuleView, rows: &[Value]) {
    if rows.is_empty() {
        println!("{}", "No entries".dimmed());
        return;
    }

    // Column width = widest cell, capped so one long title cannot push
    // the table off screen.
    const MAX_WIDTH: usize = 32;
    let widths: Vec<usize> = view
        .columns
        .iter()
        .map(|column| {
            let content = rows
                .iter()
                .map(|row| cell(row, column.field).chars().count())
                .max()
                .unwrap_or(0);
            content.max(column.header.chars().count()).min(MAX_WIDTH)
        })
        .collect();

    let header: Vec<String> = view
        .columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| format!("{:<width$}", column.header, width = *width))
        .collect();
    println!("{}", header.join("  ").bold());

    let rule: Vec<String> = widths.iter().map(|width| "─".repeat(*width)).collect();
    println!("{}", rule.join("──").dimmed());

    for row in rows {
        let line: Vec<String> = view
            .columns
            .iter()
            .zip(&widths)
            .map(|(column, width)| {
                let mut text = cell(row, column.field);
                if text.chars().count() > *width {
                    text = text.chars().take(width.saturating_sub(1)).collect();
                    text.push('…');
                }
                format!("{:<width$}", text, width = *width)
            })
            .collect();
        println!("{}", line.join("  "));
    }
}

/// One summary line under the table: total plus the derived status chips.
pub fn print_summary(total: usize, counts: &BTreeMap<String, u64>) {
    let mut parts = vec![format!("Total: {}", total)];
    for (status, count) in counts {
        parts.push(format!("{}: {}", status, count));
    }
    println!();
    println!("{}", parts.join(" · ").dimmed());
}
