use crate::aggregates;
use crate::args::OutputFormat;
use crate::context::ExecutionContext;
use crate::display::view_for;
use crate::export;
use crate::views;
use anyhow::{anyhow, bail, Context, Result};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use qhse_forms::{entities, get_path, new_draft, seed_from, to_wire_payload, validate};
use qhse_types::Module;
use serde_json::Value;
use std::io::Write;
use std::path::Path;

pub fn list(
    ctx: &ExecutionContext,
    module: Module,
    statut: Option<String>,
    zone: Option<String>,
    search: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let service = ctx.client()?.module(module);

    // Status/zone go to the server as query filters; search is applied
    // client-side over the declared display fields.
    let mut filters = Vec::new();
    if let Some(statut) = &statut {
        filters.push(("statut", statut.clone()));
    }
    if let Some(zone) = &zone {
        filters.push(("zone", zone.clone()));
    }

    let view = view_for(module);
    let rows: Vec<Value> = service
        .list(&filters)?
        .into_iter()
        .filter(|row| {
            aggregates::matches_search(
                row,
                view.search_fields,
                search.as_deref().unwrap_or(""),
            )
        })
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Csv => export::write_csv(&mut std::io::stdout(), view, &rows)?,
        OutputFormat::Plain => {
            views::table::print(view, &rows);
            let counts = aggregates::count_by(&rows, view.status_field);
            views::table::print_summary(rows.len(), &counts);
        }
    }

    Ok(())
}

pub fn show(
    ctx: &ExecutionContext,
    module: Module,
    id: &str,
    format: OutputFormat,
) -> Result<()> {
    let raw = ctx.client()?.module(module).get(id)?;

    match format {
        // The plain view decodes through the typed DTO: a payload whose
        // types drifted from the wire schema is an error, not a
        // half-blank screen, and server-only extras never render.
        OutputFormat::Plain => {
            let entity = qhse_types::Entity::decode(module, &raw).map_err(|err| {
                anyhow!(
                    "payload for {} {} does not match the wire schema: {}",
                    module.display_name(),
                    id,
                    err
                )
            })?;
            views::detail::print(module, &entity.canonical()?);
        }
        _ => println!("{}", serde_json::to_string_pretty(&raw)?),
    }

    Ok(())
}

pub fn create(
    ctx: &ExecutionContext,
    module: Module,
    file: &Path,
    format: OutputFormat,
) -> Result<()> {
    let schema = entities::schema_for(module);
    let input = read_draft_file(file)?;

    // The file seeds a draft exactly like an edit-mode form would; missing
    // declared fields default, undeclared fields are ignored.
    let mut draft = seed_from(&schema, &input);
    fill_reference_if_blank(&schema, &mut draft);

    let errors = validate(&schema, &draft);
    if !errors.is_empty() {
        print_validation_errors(&errors);
        bail!("draft failed validation");
    }

    let payload = to_wire_payload(&schema, &draft);
    let created = ctx.client()?.module(module).create(&payload)?;

    match format {
        OutputFormat::Plain => {
            let view = view_for(module);
            let reference = crate::display::cell(&created, view.reference_field);
            println!("{} {} created", "✓".green().bold(), reference);
        }
        _ => println!("{}", serde_json::to_string_pretty(&created)?),
    }

    Ok(())
}

pub fn edit(
    ctx: &ExecutionContext,
    module: Module,
    id: &str,
    file: &Path,
    format: OutputFormat,
) -> Result<()> {
    let schema = entities::schema_for(module);
    let service = ctx.client()?.module(module);

    // Partial edits: overlay the file on the server's current copy so a
    // draft file only has to name the fields it changes.
    let mut base = service.get(id)?;
    let input = read_draft_file(file)?;
    if let (Some(base_map), Some(input_map)) = (base.as_object_mut(), input.as_object()) {
        for (key, value) in input_map {
            base_map.insert(key.clone(), value.clone());
        }
    }

    let draft = seed_from(&schema, &base);
    let errors = validate(&schema, &draft);
    if !errors.is_empty() {
        print_validation_errors(&errors);
        bail!("draft failed validation");
    }

    let payload = to_wire_payload(&schema, &draft);
    let updated = service.update(id, &payload)?;

    match format {
        OutputFormat::Plain => println!("{} {} updated", "✓".green().bold(), id),
        _ => println!("{}", serde_json::to_string_pretty(&updated)?),
    }

    Ok(())
}

pub fn delete(ctx: &ExecutionContext, module: Module, id: &str, yes: bool) -> Result<()> {
    if !yes {
        if !std::io::stdin().is_terminal() {
            bail!("refusing to delete without --yes in a non-interactive session");
        }
        print!("Delete {} {}? [y/N] ", module.display_name(), id);
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes" | "oui") {
            println!("Aborted");
            return Ok(());
        }
    }

    ctx.client()?.module(module).delete(id)?;
    println!("{} {} deleted", "✓".green().bold(), id);
    Ok(())
}

fn read_draft_file(file: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("could not read draft file {}", file.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("draft file {} is not valid JSON", file.display()))?;
    if !value.is_object() {
        return Err(anyhow!("draft file must contain a JSON object"));
    }
    Ok(value)
}

fn fill_reference_if_blank(schema: &qhse_forms::FormSchema, draft: &mut Value) {
    let Some((field, _prefix)) = schema.reference_field else {
        return;
    };
    let blank = get_path(draft, field)
        .and_then(Value::as_str)
        .map(|s| s.trim().is_empty())
        .unwrap_or(true);
    if blank {
        let generated = new_draft(schema);
        if let (Some(map), Some(reference)) = (draft.as_object_mut(), get_path(&generated, field))
        {
            map.insert(field.to_string(), reference.clone());
        }
    }
}

fn print_validation_errors(errors: &[String]) {
    eprintln!("{}", "Validation errors:".red().bold());
    for error in errors {
        eprintln!("  • {}", error.red());
    }
}
