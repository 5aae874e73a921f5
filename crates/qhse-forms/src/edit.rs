use crate::error::{Error, Result};
use crate::schema::{FieldKind, GroupSpec};
use crate::ITEM_KEY;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Coerce the raw string reported by the field renderer into the drafted
/// value. Numbers parse (empty counts as zero), checkboxes become bools,
/// everything else stays a string.
fn coerce(raw: &str, kind: FieldKind, field: &str) -> Result<Value> {
    match kind {
        FieldKind::Number => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(Value::from(0.0));
            }
            trimmed
                .parse::<f64>()
                .map(Value::from)
                .map_err(|_| Error::InvalidNumber {
                    field: field.to_string(),
                    raw: raw.to_string(),
                })
        }
        FieldKind::Checkbox => Ok(Value::Bool(matches!(raw, "true" | "1" | "on" | "oui"))),
        _ => Ok(Value::String(raw.to_string())),
    }
}

/// Apply one field edit to a draft. Dispatches on the path shape:
///
/// - `name`                 → top-level set
/// - `parent.child`         → nested-object set (skeleton created if absent)
/// - `group.<index>.field`  → repeatable-group element set
///
/// Anything deeper is an error, as is an out-of-range group index.
/// Applying the same edit twice yields the same draft.
pub fn apply_edit(draft: &mut Value, path: &str, raw: &str, kind: FieldKind) -> Result<()> {
    let segments: Vec<&str> = path.split('.').collect();
    let root = draft
        .as_object_mut()
        .ok_or_else(|| Error::NotAGroup(path.to_string()))?;

    match segments.as_slice() {
        [name] => {
            root.insert(name.to_string(), coerce(raw, kind, path)?);
            Ok(())
        }
        [parent, child] => {
            let nested = root
                .entry(parent.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            let map = nested
                .as_object_mut()
                .ok_or_else(|| Error::NotAGroup(parent.to_string()))?;
            map.insert(child.to_string(), coerce(raw, kind, path)?);
            Ok(())
        }
        [group, index, field] => {
            let index: usize = index
                .parse()
                .map_err(|_| Error::PathTooDeep(path.to_string()))?;
            let items = root
                .get_mut(*group)
                .and_then(Value::as_array_mut)
                .ok_or_else(|| Error::NotAGroup(group.to_string()))?;
            let len = items.len();
            let item = items.get_mut(index).ok_or(Error::IndexOutOfRange {
                group: group.to_string(),
                index,
                len,
            })?;
            let map = item
                .as_object_mut()
                .ok_or_else(|| Error::NotAGroup(group.to_string()))?;
            map.insert(field.to_string(), coerce(raw, kind, path)?);
            Ok(())
        }
        _ => Err(Error::PathTooDeep(path.to_string())),
    }
}

/// Append a fresh default item to a repeatable group and return its stable
/// key.
pub fn add_item(draft: &mut Value, group: &GroupSpec) -> Result<String> {
    let items = draft
        .get_mut(group.name)
        .and_then(Value::as_array_mut)
        .ok_or_else(|| Error::NotAGroup(group.name.to_string()))?;

    let key = Uuid::new_v4().to_string();
    let mut item = Map::new();
    item.insert(ITEM_KEY.to_string(), Value::String(key.clone()));
    for field in &group.item_fields {
        let default = match field.kind {
            FieldKind::Number => Value::from(0.0),
            FieldKind::Checkbox => Value::Bool(false),
            _ => Value::String(String::new()),
        };
        item.insert(field.name.to_string(), default);
    }
    items.push(Value::Object(item));
    Ok(key)
}

/// Remove the item at `index`, preserving the relative order of the rest.
pub fn remove_item(draft: &mut Value, group: &str, index: usize) -> Result<()> {
    let items = draft
        .get_mut(group)
        .and_then(Value::as_array_mut)
        .ok_or_else(|| Error::NotAGroup(group.to_string()))?;
    if index >= items.len() {
        return Err(Error::IndexOutOfRange {
            group: group.to_string(),
            index,
            len: items.len(),
        });
    }
    items.remove(index);
    Ok(())
}

/// Remove an item by its stable key. Resilient to a stale index held by a
/// caller that raced a prior removal; removing an unknown key is a no-op.
pub fn remove_item_by_key(draft: &mut Value, group: &str, key: &str) -> Result<()> {
    let items = draft
        .get_mut(group)
        .and_then(Value::as_array_mut)
        .ok_or_else(|| Error::NotAGroup(group.to_string()))?;
    items.retain(|item| item.get(ITEM_KEY).and_then(Value::as_str) != Some(key));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::get_path;
    use serde_json::json;

    #[test]
    fn test_top_level_set() {
        let mut draft = json!({"titre": ""});
        apply_edit(&mut draft, "titre", "Chute", FieldKind::Text).unwrap();
        assert_eq!(draft["titre"], "Chute");
    }

    #[test]
    fn test_nested_set_preserves_siblings() {
        let mut draft = json!({"stock": {"quantiteDisponible": 0.0, "unite": "L"}});
        apply_edit(&mut draft, "stock.quantiteDisponible", "7.5", FieldKind::Number).unwrap();
        assert_eq!(draft["stock"]["quantiteDisponible"], 7.5);
        assert_eq!(draft["stock"]["unite"], "L", "sibling must be untouched");
    }

    #[test]
    fn test_idempotent() {
        let mut draft = json!({"stock": {"seuilAlerte": 0.0}});
        apply_edit(&mut draft, "stock.seuilAlerte", "3", FieldKind::Number).unwrap();
        let once = draft.clone();
        apply_edit(&mut draft, "stock.seuilAlerte", "3", FieldKind::Number).unwrap();
        assert_eq!(draft, once, "applying the same edit twice must not drift");
    }

    #[test]
    fn test_group_element_set_only_touches_index() {
        let mut draft = json!({"mesurePreventive": [
            {"statut": "A faire"},
            {"statut": "A faire"},
            {"statut": "A faire"}
        ]});
        apply_edit(&mut draft, "mesurePreventive.1.statut", "Fait", FieldKind::Text).unwrap();
        assert_eq!(draft["mesurePreventive"][0]["statut"], "A faire");
        assert_eq!(draft["mesurePreventive"][1]["statut"], "Fait");
        assert_eq!(draft["mesurePreventive"][2]["statut"], "A faire");
    }

    #[test]
    fn test_group_out_of_range_is_explicit_error() {
        let mut draft = json!({"participant": []});
        let err = apply_edit(&mut draft, "participant.0.nom", "Durand", FieldKind::Text)
            .unwrap_err();
        assert_eq!(
            err,
            Error::IndexOutOfRange {
                group: "participant".to_string(),
                index: 0,
                len: 0
            }
        );
    }

    #[test]
    fn test_path_too_deep_rejected() {
        let mut draft = json!({});
        let err = apply_edit(&mut draft, "a.b.c.d", "x", FieldKind::Text).unwrap_err();
        assert!(matches!(err, Error::PathTooDeep(_)));
    }

    #[test]
    fn test_number_coercion() {
        let mut draft = json!({"joursArret": 0.0});
        apply_edit(&mut draft, "joursArret", "", FieldKind::Number).unwrap();
        assert_eq!(draft["joursArret"], 0.0, "empty input counts as zero");
        apply_edit(&mut draft, "joursArret", "4", FieldKind::Number).unwrap();
        assert_eq!(draft["joursArret"], 4.0);
        let err = apply_edit(&mut draft, "joursArret", "abc", FieldKind::Number).unwrap_err();
        assert!(matches!(err, Error::InvalidNumber { .. }));
    }

    #[test]
    fn test_checkbox_coercion() {
        let mut draft = json!({"fds": {"disponible": false}});
        apply_edit(&mut draft, "fds.disponible", "true", FieldKind::Checkbox).unwrap();
        assert_eq!(draft["fds"]["disponible"], true);
        apply_edit(&mut draft, "fds.disponible", "anything", FieldKind::Checkbox).unwrap();
        assert_eq!(draft["fds"]["disponible"], false);
    }

    #[test]
    fn test_remove_item_preserves_order() {
        let mut draft = json!({"participant": [
            {"nom": "A"}, {"nom": "B"}, {"nom": "C"}
        ]});
        remove_item(&mut draft, "participant", 1).unwrap();
        let items = draft["participant"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["nom"], "A");
        assert_eq!(items[1]["nom"], "C");
    }

    #[test]
    fn test_remove_item_out_of_range() {
        let mut draft = json!({"participant": [{"nom": "A"}]});
        let err = remove_item(&mut draft, "participant", 5).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { .. }));
    }

    #[test]
    fn test_remove_by_key_ignores_unknown() {
        let mut draft = json!({"participant": [
            {"_key": "k1", "nom": "A"},
            {"_key": "k2", "nom": "B"}
        ]});
        remove_item_by_key(&mut draft, "participant", "k1").unwrap();
        assert_eq!(draft["participant"].as_array().unwrap().len(), 1);
        assert_eq!(get_path(&draft, "participant.0.nom").unwrap(), "B");
        // Stale key from a double-action removes nothing further
        remove_item_by_key(&mut draft, "participant", "k1").unwrap();
        assert_eq!(draft["participant"].as_array().unwrap().len(), 1);
    }
}
