use crate::{FieldSpec, FormSchema};
use serde_json::{Map, Value};

pub const TYPES_EPI: &[&str] = &[
    "Casque",
    "Gants",
    "Chaussures de sécurité",
    "Lunettes",
    "Protection auditive",
    "Harnais",
    "Masque respiratoire",
];

pub const STATUTS_EPI: &[&str] = &["En stock", "Attribué", "A remplacer", "Rebuté"];

fn expiry_after_attribution(draft: &Map<String, Value>) -> Option<String> {
    let attribution = draft
        .get("dateAttribution")
        .and_then(Value::as_str)
        .unwrap_or("");
    let expiration = draft
        .get("dateExpiration")
        .and_then(Value::as_str)
        .unwrap_or("");
    if !attribution.is_empty() && !expiration.is_empty() && expiration < attribution {
        Some("Expiration date must not precede attribution date".to_string())
    } else {
        None
    }
}

pub fn ppe_schema() -> FormSchema {
    FormSchema {
        entity: "ppe",
        reference_field: Some(("numeroEpi", "EPI")),
        fields: vec![
            FieldSpec::text("numeroEpi", "Numéro d'EPI").required(),
            FieldSpec::select("typeEpi", "Type d'EPI", TYPES_EPI).required(),
            FieldSpec::text("marque", "Marque"),
            FieldSpec::text("modele", "Modèle"),
            FieldSpec::text("taille", "Taille"),
            FieldSpec::select("statut", "Statut", STATUTS_EPI).required(),
            FieldSpec::date("dateAttribution", "Date d'attribution"),
            FieldSpec::date("dateExpiration", "Date d'expiration").required(),
            FieldSpec::text("attributionA", "Attribué à"),
            FieldSpec::number("stock.quantiteDisponible", "Quantité disponible")
                .range(0.0, 100_000.0),
            FieldSpec::number("stock.seuilAlerte", "Seuil d'alerte").range(0.0, 100_000.0),
        ],
        groups: vec![],
        rules: vec![expiry_after_attribution],
        finalize: None,
    }
}
