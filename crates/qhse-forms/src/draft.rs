use crate::schema::{FieldKind, FormSchema, GroupSpec};
use crate::ITEM_KEY;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Type-appropriate empty value for a field kind.
fn default_for(kind: FieldKind) -> Value {
    match kind {
        FieldKind::Number => Value::from(0.0),
        FieldKind::Checkbox => Value::Bool(false),
        _ => Value::String(String::new()),
    }
}

fn default_item(group: &GroupSpec) -> Value {
    let mut item = Map::new();
    item.insert(
        ITEM_KEY.to_string(),
        Value::String(Uuid::new_v4().to_string()),
    );
    for field in &group.item_fields {
        item.insert(field.name.to_string(), default_for(field.kind));
    }
    Value::Object(item)
}

fn set_default(draft: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            draft.insert(path.to_string(), value);
        }
        Some((parent, child)) => {
            let nested = draft
                .entry(parent.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(map) = nested {
                map.insert(child.to_string(), value);
            }
        }
    }
}

/// Build an all-default draft for create mode. Reference fields are seeded
/// with a generated `<PREFIX>-<year>-<4 digits>` number.
pub fn new_draft(schema: &FormSchema) -> Value {
    let mut draft = Map::new();
    for field in &schema.fields {
        set_default(&mut draft, field.name, default_for(field.kind));
    }
    for group in &schema.groups {
        draft.insert(group.name.to_string(), Value::Array(Vec::new()));
    }
    if let Some((name, prefix)) = schema.reference_field {
        set_default(
            &mut draft,
            name,
            Value::String(qhse_types::generate_reference(prefix)),
        );
    }
    Value::Object(draft)
}

/// Seed a draft from an existing entity for edit/view mode: every declared
/// field is copied, missing ones fall back to defaults, group items get a
/// stable key if the wire payload did not carry one.
pub fn seed_from(schema: &FormSchema, entity: &Value) -> Value {
    let mut draft = Map::new();
    for field in &schema.fields {
        let value = lookup(entity, field.name)
            .cloned()
            .unwrap_or_else(|| default_for(field.kind));
        set_default(&mut draft, field.name, value);
    }
    for group in &schema.groups {
        let items = match entity.get(group.name).and_then(Value::as_array) {
            Some(items) => items
                .iter()
                .map(|item| {
                    let mut seeded = Map::new();
                    if let Some(key) = item.get(ITEM_KEY).and_then(Value::as_str) {
                        seeded.insert(ITEM_KEY.to_string(), Value::String(key.to_string()));
                    } else {
                        seeded.insert(
                            ITEM_KEY.to_string(),
                            Value::String(Uuid::new_v4().to_string()),
                        );
                    }
                    for field in &group.item_fields {
                        let value = item
                            .get(field.name)
                            .cloned()
                            .unwrap_or_else(|| default_for(field.kind));
                        seeded.insert(field.name.to_string(), value);
                    }
                    Value::Object(seeded)
                })
                .collect(),
            None => Vec::new(),
        };
        draft.insert(group.name.to_string(), Value::Array(items));
    }
    Value::Object(draft)
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    match path.split_once('.') {
        None => value.get(path),
        Some((parent, child)) => value.get(parent)?.get(child),
    }
}

/// Read a value out of a draft by edit path (one or two levels, or a
/// `group.<index>.field` triple).
pub fn get_path<'a>(draft: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = draft;
    for segment in path.split('.') {
        current = match segment.parse::<usize>() {
            Ok(index) => current.get(index)?,
            Err(_) => current.get(segment)?,
        };
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities;

    #[test]
    fn test_new_draft_has_declared_defaults() {
        let schema = entities::chemical_schema();
        let draft = new_draft(&schema);

        assert_eq!(draft["nomProduit"], "");
        assert_eq!(draft["stock"]["quantiteDisponible"], 0.0);
        assert_eq!(draft["fds"]["disponible"], false);
        // Reference number is pre-generated
        let numero = draft["numeroProduit"].as_str().unwrap();
        assert!(numero.starts_with("PRD-"), "got {}", numero);
    }

    #[test]
    fn test_seed_from_copies_and_defaults() {
        let schema = entities::risk_schema();
        let entity = serde_json::json!({
            "intitule": "Bruit",
            "probabilite": "Faible",
            "mesurePreventive": [{"description": "Casque", "statut": "Fait"}],
            "unrelatedServerField": 42
        });
        let draft = seed_from(&schema, &entity);

        assert_eq!(draft["intitule"], "Bruit");
        assert_eq!(draft["probabilite"], "Faible");
        // Missing declared field defaults
        assert_eq!(draft["zone"], "");
        // Undeclared server fields are not dragged into the draft
        assert!(draft.get("unrelatedServerField").is_none());
        // Group items gain a stable key and declared defaults
        let item = &draft["mesurePreventive"][0];
        assert!(item[crate::ITEM_KEY].is_string());
        assert_eq!(item["description"], "Casque");
        assert_eq!(item["responsable"], "");
    }

    #[test]
    fn test_get_path_variants() {
        let draft = serde_json::json!({
            "titre": "x",
            "stock": {"unite": "L"},
            "participant": [{"nom": "Durand"}]
        });
        assert_eq!(get_path(&draft, "titre").unwrap(), "x");
        assert_eq!(get_path(&draft, "stock.unite").unwrap(), "L");
        assert_eq!(get_path(&draft, "participant.0.nom").unwrap(), "Durand");
        assert!(get_path(&draft, "participant.3.nom").is_none());
        assert!(get_path(&draft, "absent").is_none());
    }
}
