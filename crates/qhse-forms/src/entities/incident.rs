use super::ZONES;
use crate::{FieldSpec, FormSchema};
use qhse_types::Gravite;

pub const TYPES_INCIDENT: &[&str] = &[
    "Accident",
    "Presqu'accident",
    "Blessure",
    "Dommage matériel",
    "Environnement",
];

pub const STATUTS_INCIDENT: &[&str] = &[
    "Déclaré",
    "En cours d'analyse",
    "Actions en cours",
    "Clôturé",
];

pub fn incident_schema() -> FormSchema {
    FormSchema {
        entity: "incident",
        reference_field: Some(("numeroIncident", "INC")),
        fields: vec![
            FieldSpec::text("numeroIncident", "Numéro d'incident").required(),
            FieldSpec::text("titre", "Titre").required(),
            FieldSpec::textarea("description", "Description"),
            FieldSpec::select("typeIncident", "Type d'incident", TYPES_INCIDENT).required(),
            FieldSpec::select("gravite", "Gravité", &Gravite::LABELS).required(),
            FieldSpec::select("statut", "Statut", STATUTS_INCIDENT).required(),
            FieldSpec::date("dateIncident", "Date de l'incident").required(),
            FieldSpec::time("heureIncident", "Heure de l'incident"),
            FieldSpec::text("lieu", "Lieu").required(),
            FieldSpec::select("zone", "Zone", ZONES).required(),
            FieldSpec::text("personneImpliquee", "Personne impliquée"),
            FieldSpec::textarea("actionsImmediates", "Actions immédiates"),
            FieldSpec::number("joursArret", "Jours d'arrêt").range(0.0, 365.0),
        ],
        groups: vec![],
        rules: vec![],
        finalize: None,
    }
}
