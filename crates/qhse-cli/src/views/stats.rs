use owo_colors::OwoColorize;
use qhse_types::{bar_width_pct, Module, ModuleStats};
use std::collections::BTreeMap;

const BAR_CELLS: usize = 30;

/// Print one module's statistics block: total, per-bucket bars, top zones.
pub fn print(module: Module, stats: &ModuleStats) {
    println!("{}", module.display_name().bold());
    println!("  Total: {}", stats.total);

    section("Par statut", &stats.par_statut);
    section("Par gravité", &stats.par_gravite);
    section("Par type", &stats.par_type);

    if !stats.top_zones.is_empty() {
        println!();
        println!("  {}", "Top zones".bold());
        for zone in &stats.top_zones {
            println!("    {:<20} {}", zone.zone, zone.count);
        }
    }
}

/// A module whose stats endpoint failed; noted instead of aborting the
/// whole report.
pub fn print_unavailable(module: Module, reason: &str) {
    println!("{}", module.display_name().bold());
    println!("  {}", format!("unavailable: {}", reason).dimmed());
}

fn section(title: &str, counts: &BTreeMap<String, u64>) {
    if counts.is_empty() {
        return;
    }
    println!();
    println!("  {}", title.bold());
    let label_width = counts.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    let values: Vec<u64> = counts.values().copied().collect();
    for (label, count) in counts {
        let pct = bar_width_pct(*count, &values);
        let filled = (pct * BAR_CELLS as f64 / 100.0).round() as usize;
        let bar = format!(
            "{}{}",
            "█".repeat(filled),
            "░".repeat(BAR_CELLS - filled.min(BAR_CELLS))
        );
        println!(
            "    {:<width$}  {} {}",
            label,
            bar.cyan(),
            count,
            width = label_width
        );
    }
}
