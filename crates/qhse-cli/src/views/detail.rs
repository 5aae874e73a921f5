use crate::display::cell;
use owo_colors::OwoColorize;
use qhse_forms::entities::schema_for;
use qhse_types::Module;
use serde_json::Value;

/// Print one entity field-by-field in schema declaration order, repeatable
/// groups as indented sub-blocks.
pub fn print(module: Module, entity: &Value) {
    let schema = schema_for(module);

    println!("{}", module.display_name().bold());
    if let Some(id) = entity.get("id").and_then(Value::as_str) {
        println!("{}", format!("id: {}", id).dimmed());
    }
    println!();

    let label_width = schema
        .fields
        .iter()
        .map(|field| field.label.chars().count())
        .max()
        .unwrap_or(0);

    for field in &schema.fields {
        let value = cell(entity, field.name);
        let shown = if value.is_empty() { "—" } else { &value };
        println!(
            "  {:<width$}  {}",
            field.label.cyan(),
            shown,
            width = label_width
        );
    }

    for group in &schema.groups {
        let items = entity
            .get(group.name)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        println!();
        println!("  {} ({})", group.label.bold(), items.len());
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
            println!("    {}. {}", index + 1, parts.join(" · "));
        }
    }
}
