use crate::{FieldSpec, FormSchema, GroupSpec};
use serde_json::{Map, Value};

pub const TYPES_FORMATION: &[&str] = &[
    "Sécurité",
    "Qualité",
    "Environnement",
    "Habilitation",
    "Secourisme",
];

pub const STATUTS_FORMATION: &[&str] = &["Planifiée", "En cours", "Réalisée", "Annulée"];

pub const RESULTATS: &[&str] = &["Admis", "Ajourné", "Absent"];

fn has_complete_participant(draft: &Map<String, Value>) -> Option<String> {
    let items = draft.get("participant").and_then(Value::as_array)?;
    if items.is_empty() {
        return None;
    }
    let complete = items.iter().any(|item| {
        let nom = item.get("nom").and_then(Value::as_str).unwrap_or("");
        let prenom = item.get("prenom").and_then(Value::as_str).unwrap_or("");
        !nom.trim().is_empty() && !prenom.trim().is_empty()
    });
    if complete {
        None
    } else {
        Some("at least one participant with name and surname is required".to_string())
    }
}

fn dates_ordered(draft: &Map<String, Value>) -> Option<String> {
    let debut = draft.get("dateDebut").and_then(Value::as_str).unwrap_or("");
    let fin = draft.get("dateFin").and_then(Value::as_str).unwrap_or("");
    // ISO dates compare lexicographically
    if !debut.is_empty() && !fin.is_empty() && fin < debut {
        Some("End date must not precede start date".to_string())
    } else {
        None
    }
}

pub fn training_schema() -> FormSchema {
    FormSchema {
        entity: "training",
        reference_field: Some(("numeroFormation", "FOR")),
        fields: vec![
            FieldSpec::text("numeroFormation", "Numéro de formation").required(),
            FieldSpec::text("intitule", "Intitulé").required(),
            FieldSpec::textarea("description", "Description"),
            FieldSpec::select("typeFormation", "Type de formation", TYPES_FORMATION).required(),
            FieldSpec::text("organisme", "Organisme").required(),
            FieldSpec::date("dateDebut", "Date de début").required(),
            FieldSpec::date("dateFin", "Date de fin").required(),
            FieldSpec::number("dureeHeures", "Durée (heures)").range(0.0, 999.0),
            FieldSpec::select("statut", "Statut", STATUTS_FORMATION).required(),
            FieldSpec::number("validiteMois", "Validité (mois)").range(0.0, 120.0),
        ],
        groups: vec![GroupSpec::new(
            "participant",
            "Participants",
            vec![
                FieldSpec::text("nom", "Nom"),
                FieldSpec::text("prenom", "Prénom"),
                FieldSpec::text("fonction", "Fonction"),
                FieldSpec::select("resultat", "Résultat", RESULTATS),
            ],
        )],
        rules: vec![has_complete_participant, dates_ordered],
        finalize: None,
    }
}
