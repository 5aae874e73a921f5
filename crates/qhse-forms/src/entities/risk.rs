use super::ZONES;
use crate::{FieldSpec, FormSchema, GroupSpec};
use serde_json::{Map, Value};
use qhse_types::{niveau_for_score, risk_score, Gravite, Probabilite};

pub const CATEGORIES_RISQUE: &[&str] = &[
    "Mécanique",
    "Chimique",
    "Biologique",
    "Ergonomique",
    "Psychosocial",
    "Incendie",
];

pub const STATUTS_RISQUE: &[&str] = &["Identifié", "En traitement", "Maîtrisé", "Archivé"];

pub const STATUTS_MESURE: &[&str] = &["A faire", "En cours", "Fait"];

fn scales_must_parse(draft: &Map<String, Value>) -> Option<String> {
    let probabilite = draft.get("probabilite").and_then(Value::as_str).unwrap_or("");
    if !probabilite.is_empty() && Probabilite::parse(probabilite).is_err() {
        return Some(format!("'{}' is not a known probability level", probabilite));
    }
    let gravite = draft.get("gravite").and_then(Value::as_str).unwrap_or("");
    if !gravite.is_empty() && Gravite::parse(gravite).is_err() {
        return Some(format!("'{}' is not a known severity level", gravite));
    }
    None
}

/// Derive scoreRisque/niveauRisque from the selected scales. Runs at
/// submit time so the stored score can never disagree with its inputs.
fn finalize_score(payload: &mut Map<String, Value>) {
    let probabilite = payload
        .get("probabilite")
        .and_then(Value::as_str)
        .and_then(|label| Probabilite::parse(label).ok());
    let gravite = payload
        .get("gravite")
        .and_then(Value::as_str)
        .and_then(|label| Gravite::parse(label).ok());

    if let (Some(probabilite), Some(gravite)) = (probabilite, gravite) {
        let score = risk_score(probabilite, gravite);
        payload.insert("scoreRisque".to_string(), Value::from(score as f64));
        payload.insert(
            "niveauRisque".to_string(),
            Value::String(niveau_for_score(score).label().to_string()),
        );
    }
}

pub fn risk_schema() -> FormSchema {
    FormSchema {
        entity: "risk",
        reference_field: Some(("numeroRisque", "RSK")),
        fields: vec![
            FieldSpec::text("numeroRisque", "Numéro de risque").required(),
            FieldSpec::text("intitule", "Intitulé").required(),
            FieldSpec::textarea("description", "Description"),
            FieldSpec::select("categorie", "Catégorie", CATEGORIES_RISQUE).required(),
            FieldSpec::select("zone", "Zone", ZONES).required(),
            FieldSpec::select("probabilite", "Probabilité", &Probabilite::LABELS).required(),
            FieldSpec::select("gravite", "Gravité", &Gravite::LABELS).required(),
            FieldSpec::select("statut", "Statut", STATUTS_RISQUE).required(),
            FieldSpec::date("dateIdentification", "Date d'identification").required(),
        ],
        groups: vec![GroupSpec::new(
            "mesurePreventive",
            "Mesures préventives",
            vec![
                FieldSpec::text("description", "Description"),
                FieldSpec::text("responsable", "Responsable"),
                FieldSpec::date("echeance", "Échéance"),
                FieldSpec::select("statut", "Statut", STATUTS_MESURE),
            ],
        )],
        rules: vec![scales_must_parse],
        finalize: Some(finalize_score),
    }
}
