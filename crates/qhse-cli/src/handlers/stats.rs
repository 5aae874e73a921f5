use crate::args::OutputFormat;
use crate::context::ExecutionContext;
use crate::views;
use anyhow::Result;
use qhse_types::{Module, Periode};
use serde_json::json;

pub fn handle(
    ctx: &ExecutionContext,
    module: Option<Module>,
    periode: Periode,
    format: OutputFormat,
) -> Result<()> {
    let modules: Vec<Module> = match module {
        Some(module) => vec![module],
        None => Module::ALL.to_vec(),
    };

    let client = ctx.client()?;

    if format != OutputFormat::Plain {
        let mut all = serde_json::Map::new();
        for module in &modules {
            let stats = client.module(*module).stats(periode)?;
            all.insert(
                module.path_segment().to_string(),
                serde_json::to_value(&stats)?,
            );
        }
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "periode": periode.token(),
                "modules": all,
            }))?
        );
        return Ok(());
    }

    println!("Période: {}", periode.display_name());
    println!();
    for module in &modules {
        match client.module(*module).stats(periode) {
            Ok(stats) => views::stats::print(*module, &stats),
            // A module whose stats endpoint fails renders a placeholder;
            // the others still print.
            Err(err) => views::stats::print_unavailable(*module, &err.to_string()),
        }
        println!();
    }

    Ok(())
}
