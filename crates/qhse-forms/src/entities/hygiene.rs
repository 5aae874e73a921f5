use super::ZONES;
use crate::{FieldSpec, FormSchema, GroupSpec};
use serde_json::{Map, Value};

pub const TYPES_CONTROLE: &[&str] = &["Surfaces", "Air", "Eau", "Personnel", "Locaux"];

pub const STATUTS_CONTROLE: &[&str] = &["Planifié", "Réalisé", "Clôturé"];

pub const CONFORMITES: &[&str] = &["Conforme", "Conforme avec réserves", "Non conforme"];

pub const STATUTS_ACTION: &[&str] = &["A faire", "En cours", "Fait"];

fn action_required_when_non_conforme(draft: &Map<String, Value>) -> Option<String> {
    let conformite = draft.get("conformite").and_then(Value::as_str).unwrap_or("");
    if conformite != "Non conforme" {
        return None;
    }
    let has_action = draft
        .get("actionCorrective")
        .and_then(Value::as_array)
        .map(|items| {
            items.iter().any(|item| {
                item.get("description")
                    .and_then(Value::as_str)
                    .map(|d| !d.trim().is_empty())
                    .unwrap_or(false)
            })
        })
        .unwrap_or(false);
    if has_action {
        None
    } else {
        Some("a corrective action is required for a non-compliant check".to_string())
    }
}

pub fn hygiene_schema() -> FormSchema {
    FormSchema {
        entity: "hygiene",
        reference_field: Some(("numeroControle", "HYG")),
        fields: vec![
            FieldSpec::text("numeroControle", "Numéro de contrôle").required(),
            FieldSpec::select("typeControle", "Type de contrôle", TYPES_CONTROLE).required(),
            FieldSpec::select("zone", "Zone", ZONES).required(),
            FieldSpec::date("dateControle", "Date du contrôle").required(),
            FieldSpec::time("heureControle", "Heure du contrôle"),
            FieldSpec::text("controleur", "Contrôleur").required(),
            FieldSpec::select("statut", "Statut", STATUTS_CONTROLE).required(),
            FieldSpec::select("conformite", "Conformité", CONFORMITES).required(),
            FieldSpec::textarea("observations", "Observations"),
        ],
        groups: vec![GroupSpec::new(
            "actionCorrective",
            "Actions correctives",
            vec![
                FieldSpec::text("description", "Description"),
                FieldSpec::text("responsable", "Responsable"),
                FieldSpec::date("echeance", "Échéance"),
                FieldSpec::select("statut", "Statut", STATUTS_ACTION),
            ],
        )],
        rules: vec![action_required_when_non_conforme],
        finalize: None,
    }
}
