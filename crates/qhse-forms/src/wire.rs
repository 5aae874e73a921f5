use crate::schema::FormSchema;
use crate::ITEM_KEY;
use serde_json::Value;

/// Whether a repeatable-group item carries no user input at all (ignoring
/// its UI-only key). Blank items are dropped from the payload.
fn is_blank_item(item: &Value) -> bool {
    match item.as_object() {
        Some(map) => map.iter().all(|(name, value)| {
            name == ITEM_KEY
                || match value {
                    Value::String(s) => s.trim().is_empty(),
                    Value::Number(n) => n.as_f64() == Some(0.0),
                    Value::Bool(b) => !b,
                    Value::Null => true,
                    _ => false,
                }
        }),
        None => true,
    }
}

/// Transform a validated draft into the wire shape the create/update
/// endpoints accept: UI-only helper keys are stripped, blank repeatable
/// items filtered out, and derived fields recomputed via the schema's
/// finalize hook. Fields the wire format preserves survive a round trip
/// through `seed_from` unchanged.
pub fn to_wire_payload(schema: &FormSchema, draft: &Value) -> Value {
    let mut payload = draft.as_object().cloned().unwrap_or_default();

    for group in &schema.groups {
        if let Some(items) = payload.get_mut(group.name).and_then(Value::as_array_mut) {
            items.retain(|item| !is_blank_item(item));
            for item in items {
                if let Some(map) = item.as_object_mut() {
                    map.remove(ITEM_KEY);
                }
            }
        }
    }

    if let Some(finalize) = schema.finalize {
        finalize(&mut payload);
    }

    Value::Object(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::seed_from;
    use crate::entities;
    use serde_json::json;

    #[test]
    fn test_strips_keys_and_blank_items() {
        let schema = entities::training_schema();
        let draft = json!({
            "intitule": "Gestes et postures",
            "participant": [
                {"_key": "k1", "nom": "Durand", "prenom": "Anne", "fonction": "", "resultat": ""},
                {"_key": "k2", "nom": "", "prenom": "", "fonction": "", "resultat": ""}
            ]
        });

        let payload = to_wire_payload(&schema, &draft);
        let items = payload["participant"].as_array().unwrap();
        assert_eq!(items.len(), 1, "blank row must be dropped");
        assert!(items[0].get(ITEM_KEY).is_none(), "_key must not be sent");
        assert_eq!(items[0]["nom"], "Durand");
    }

    #[test]
    fn test_round_trip_is_stable() {
        let schema = entities::training_schema();
        let draft = json!({
            "numeroFormation": "FOR-2025-0001",
            "intitule": "Incendie",
            "description": "",
            "typeFormation": "Sécurité",
            "organisme": "APAVE",
            "dateDebut": "2025-03-01",
            "dateFin": "2025-03-02",
            "dureeHeures": 7.0,
            "statut": "Planifiée",
            "validiteMois": 24.0,
            "participant": [
                {"_key": "k", "nom": "Petit", "prenom": "Luc", "fonction": "Cariste", "resultat": ""}
            ]
        });

        let wire = to_wire_payload(&schema, &draft);
        let reseeded = seed_from(&schema, &wire);
        let wire_again = to_wire_payload(&schema, &reseeded);
        assert_eq!(wire, wire_again);
    }

    #[test]
    fn test_risk_finalize_recomputes_score() {
        let schema = entities::risk_schema();
        let draft = json!({
            "probabilite": "Moyenne",
            "gravite": "Grave",
            "scoreRisque": 0.0,
            "niveauRisque": "",
            "mesurePreventive": []
        });

        let payload = to_wire_payload(&schema, &draft);
        assert_eq!(payload["scoreRisque"], 12.0);
        assert_eq!(payload["niveauRisque"], "Élevé");
    }
}
