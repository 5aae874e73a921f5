use crate::{FieldSpec, FormSchema};
use serde_json::{Map, Value};

pub const MENTIONS_DANGER: &[&str] = &[
    "Inflammable",
    "Corrosif",
    "Toxique",
    "Irritant",
    "Comburant",
    "Dangereux pour l'environnement",
];

pub const STATUTS_PRODUIT: &[&str] = &["Actif", "Quarantaine", "Retiré"];

pub const UNITES: &[&str] = &["L", "kg", "g", "mL", "unités"];

fn fds_date_when_available(draft: &Map<String, Value>) -> Option<String> {
    let available = draft
        .get("fds")
        .and_then(|fds| fds.get("disponible"))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let date = draft
        .get("fds")
        .and_then(|fds| fds.get("dateFds"))
        .and_then(Value::as_str)
        .unwrap_or("");
    if available && date.trim().is_empty() {
        Some("FDS date is required when the safety data sheet is available".to_string())
    } else {
        None
    }
}

pub fn chemical_schema() -> FormSchema {
    FormSchema {
        entity: "chemical",
        reference_field: Some(("numeroProduit", "PRD")),
        fields: vec![
            FieldSpec::text("numeroProduit", "Numéro de produit").required(),
            FieldSpec::text("nomProduit", "Nom du produit").required(),
            FieldSpec::text("fournisseur", "Fournisseur").required(),
            FieldSpec::select("mentionDanger", "Mention de danger", MENTIONS_DANGER).required(),
            FieldSpec::select("statut", "Statut", STATUTS_PRODUIT).required(),
            FieldSpec::date("dateReception", "Date de réception"),
            FieldSpec::number("stock.quantiteDisponible", "Quantité disponible")
                .range(0.0, 1_000_000.0),
            FieldSpec::select("stock.unite", "Unité", UNITES).required(),
            FieldSpec::number("stock.seuilAlerte", "Seuil d'alerte").range(0.0, 1_000_000.0),
            FieldSpec::text("stock.emplacement", "Emplacement"),
            FieldSpec::checkbox("fds.disponible", "FDS disponible"),
            FieldSpec::date("fds.dateFds", "Date de la FDS"),
        ],
        groups: vec![],
        rules: vec![fds_date_when_available],
        finalize: None,
    }
}
