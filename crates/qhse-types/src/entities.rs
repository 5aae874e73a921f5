use serde::{Deserialize, Serialize};
use serde_json::Value;

// NOTE: DTO Design
//
// Every struct here mirrors the wire schema of the remote API, field names
// included (French camelCase). These are transient projections: a list
// screen replaces its rows wholesale on every refetch and drafts live only
// for the duration of an open form, so nothing below carries local-only
// state. Optional fields default rather than fail so that a server adding
// a column never breaks deserialization.

/// Identifier of a QHSE module on the API side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Module {
    Incidents,
    Risques,
    Formations,
    Chimique,
    Epi,
    Hygiene,
}

impl Module {
    pub const ALL: [Module; 6] = [
        Module::Incidents,
        Module::Risques,
        Module::Formations,
        Module::Chimique,
        Module::Epi,
        Module::Hygiene,
    ];

    /// URL segment for the module root, e.g. `/api/incidents/...`
    pub fn path_segment(self) -> &'static str {
        match self {
            Module::Incidents => "incidents",
            Module::Risques => "risques",
            Module::Formations => "formations",
            Module::Chimique => "chimique",
            Module::Epi => "epi",
            Module::Hygiene => "hygiene",
        }
    }

    /// URL segment for the collection inside the module
    pub fn collection_segment(self) -> &'static str {
        match self {
            Module::Incidents => "incidents",
            Module::Risques => "risques",
            Module::Formations => "formations",
            Module::Chimique => "produits",
            Module::Epi => "equipements",
            Module::Hygiene => "controles",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Module::Incidents => "Incidents",
            Module::Risques => "Risques",
            Module::Formations => "Formations",
            Module::Chimique => "Produits chimiques",
            Module::Epi => "EPI",
            Module::Hygiene => "Contrôles hygiène",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub numero_incident: String,
    #[serde(default)]
    pub titre: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub type_incident: String,
    #[serde(default)]
    pub gravite: String,
    #[serde(default)]
    pub statut: String,
    #[serde(default)]
    pub date_incident: String,
    #[serde(default)]
    pub heure_incident: String,
    #[serde(default)]
    pub lieu: String,
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub personne_impliquee: String,
    #[serde(default)]
    pub actions_immediates: String,
    #[serde(default)]
    pub jours_arret: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MesurePreventive {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub responsable: String,
    #[serde(default)]
    pub echeance: String,
    #[serde(default)]
    pub statut: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub numero_risque: String,
    #[serde(default)]
    pub intitule: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categorie: String,
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub probabilite: String,
    #[serde(default)]
    pub gravite: String,
    #[serde(default)]
    pub score_risque: f64,
    #[serde(default)]
    pub niveau_risque: String,
    #[serde(default)]
    pub statut: String,
    #[serde(default)]
    pub date_identification: String,
    #[serde(default)]
    pub mesure_preventive: Vec<MesurePreventive>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub prenom: String,
    #[serde(default)]
    pub fonction: String,
    #[serde(default)]
    pub resultat: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub numero_formation: String,
    #[serde(default)]
    pub intitule: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub type_formation: String,
    #[serde(default)]
    pub organisme: String,
    #[serde(default)]
    pub date_debut: String,
    #[serde(default)]
    pub date_fin: String,
    #[serde(default)]
    pub duree_heures: f64,
    #[serde(default)]
    pub statut: String,
    #[serde(default)]
    pub participant: Vec<Participant>,
    #[serde(default)]
    pub validite_mois: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    #[serde(default)]
    pub quantite_disponible: f64,
    #[serde(default)]
    pub unite: String,
    #[serde(default)]
    pub seuil_alerte: f64,
    #[serde(default)]
    pub emplacement: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fds {
    #[serde(default)]
    pub disponible: bool,
    #[serde(default)]
    pub date_fds: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChemicalProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub numero_produit: String,
    #[serde(default)]
    pub nom_produit: String,
    #[serde(default)]
    pub fournisseur: String,
    #[serde(default)]
    pub mention_danger: String,
    #[serde(default)]
    pub statut: String,
    #[serde(default)]
    pub date_reception: String,
    #[serde(default)]
    pub stock: Stock,
    #[serde(default)]
    pub fds: Fds,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PpeStock {
    #[serde(default)]
    pub quantite_disponible: f64,
    #[serde(default)]
    pub seuil_alerte: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ppe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub numero_epi: String,
    #[serde(default)]
    pub type_epi: String,
    #[serde(default)]
    pub marque: String,
    #[serde(default)]
    pub modele: String,
    #[serde(default)]
    pub taille: String,
    #[serde(default)]
    pub statut: String,
    #[serde(default)]
    pub date_attribution: String,
    #[serde(default)]
    pub date_expiration: String,
    #[serde(default)]
    pub attribution_a: String,
    #[serde(default)]
    pub stock: PpeStock,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionCorrective {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub responsable: String,
    #[serde(default)]
    pub echeance: String,
    #[serde(default)]
    pub statut: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HygieneCheck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub numero_controle: String,
    #[serde(default)]
    pub type_controle: String,
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub date_controle: String,
    #[serde(default)]
    pub heure_controle: String,
    #[serde(default)]
    pub controleur: String,
    #[serde(default)]
    pub statut: String,
    #[serde(default)]
    pub conformite: String,
    #[serde(default)]
    pub observations: String,
    #[serde(default)]
    pub action_corrective: Vec<ActionCorrective>,
}

/// One decoded entity, tagged by the module that produced it.
///
/// Detail views decode through here before rendering: a payload whose
/// field types drifted from the wire schema is rejected instead of shown
/// half-blank, and `canonical()` re-serializes with server-only extras
/// dropped and declared fields defaulted.
#[derive(Debug, Clone)]
pub enum Entity {
    Incident(Incident),
    Risk(Risk),
    Training(Training),
    ChemicalProduct(ChemicalProduct),
    Ppe(Ppe),
    HygieneCheck(HygieneCheck),
}

impl Entity {
    pub fn decode(module: Module, raw: &Value) -> serde_json::Result<Self> {
        Ok(match module {
            Module::Incidents => Entity::Incident(serde_json::from_value(raw.clone())?),
            Module::Risques => Entity::Risk(serde_json::from_value(raw.clone())?),
            Module::Formations => Entity::Training(serde_json::from_value(raw.clone())?),
            Module::Chimique => Entity::ChemicalProduct(serde_json::from_value(raw.clone())?),
            Module::Epi => Entity::Ppe(serde_json::from_value(raw.clone())?),
            Module::Hygiene => Entity::HygieneCheck(serde_json::from_value(raw.clone())?),
        })
    }

    /// The wire-shape JSON of the decoded entity.
    pub fn canonical(&self) -> serde_json::Result<Value> {
        match self {
            Entity::Incident(inner) => serde_json::to_value(inner),
            Entity::Risk(inner) => serde_json::to_value(inner),
            Entity::Training(inner) => serde_json::to_value(inner),
            Entity::ChemicalProduct(inner) => serde_json::to_value(inner),
            Entity::Ppe(inner) => serde_json::to_value(inner),
            Entity::HygieneCheck(inner) => serde_json::to_value(inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_deserializes_wire_names() {
        let raw = r#"{
            "id": "abc",
            "numeroRisque": "RSK-2025-0042",
            "intitule": "Chute de hauteur",
            "probabilite": "Moyenne",
            "gravite": "Grave",
            "scoreRisque": 12,
            "niveauRisque": "Élevé",
            "mesurePreventive": [
                {"description": "Garde-corps", "responsable": "J. Martin", "echeance": "2025-07-01", "statut": "En cours"}
            ]
        }"#;
        let risk: Risk = serde_json::from_str(raw).unwrap();
        assert_eq!(risk.numero_risque, "RSK-2025-0042");
        assert_eq!(risk.score_risque, 12.0);
        assert_eq!(risk.mesure_preventive.len(), 1);
        assert_eq!(risk.mesure_preventive[0].responsable, "J. Martin");
        // Unset fields fall back to defaults instead of failing
        assert_eq!(risk.statut, "");
    }

    #[test]
    fn test_id_absent_on_serialize_when_none() {
        let incident = Incident {
            titre: "Coupure".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&incident).unwrap();
        assert!(value.get("id").is_none(), "unset id must not be sent");
        assert_eq!(value["titre"], "Coupure");
        assert_eq!(value["joursArret"], 0.0);
    }

    #[test]
    fn test_chemical_nested_stock() {
        let raw = r#"{
            "nomProduit": "Acétone",
            "stock": {"quantiteDisponible": 12.5, "unite": "L", "seuilAlerte": 5, "emplacement": "Local B"},
            "fds": {"disponible": true, "dateFds": "2024-11-02"}
        }"#;
        let product: ChemicalProduct = serde_json::from_str(raw).unwrap();
        assert_eq!(product.stock.quantite_disponible, 12.5);
        assert!(product.fds.disponible);
    }

    #[test]
    fn test_entity_decode_normalizes_payload() {
        let raw = serde_json::json!({
            "numeroEpi": "EPI-2025-0007",
            "typeEpi": "Casque",
            "stock": {"quantiteDisponible": 4, "seuilAlerte": 2},
            "_serverInternal": "dropped"
        });
        let entity = Entity::decode(Module::Epi, &raw).unwrap();
        let canonical = entity.canonical().unwrap();
        assert_eq!(canonical["numeroEpi"], "EPI-2025-0007");
        // Declared fields come back defaulted, server extras do not
        assert_eq!(canonical["marque"], "");
        assert!(canonical.get("_serverInternal").is_none());
    }

    #[test]
    fn test_entity_decode_rejects_type_drift() {
        let raw = serde_json::json!({
            "numeroIncident": "INC-2025-0001",
            "joursArret": "trois"
        });
        assert!(Entity::decode(Module::Incidents, &raw).is_err());
    }

    #[test]
    fn test_module_paths() {
        assert_eq!(Module::Chimique.path_segment(), "chimique");
        assert_eq!(Module::Chimique.collection_segment(), "produits");
        assert_eq!(Module::Incidents.collection_segment(), "incidents");
    }
}
