use qhse_forms::entities;
use qhse_forms::get_path;
use qhse_types::Module;
use serde_json::Value;

/// One table column: header plus the row path it reads (dots address
/// nested objects, e.g. `stock.quantiteDisponible`).
pub struct Column {
    pub header: &'static str,
    pub field: &'static str,
}

/// Per-module display declaration: which fields identify a row, which are
/// searched, which drive the status chips, and what the list table shows.
pub struct ModuleView {
    pub module: Module,
    pub reference_field: &'static str,
    pub title_field: &'static str,
    /// Case-insensitive substring search targets: title, reference, and
    /// one denormalized name field.
    pub search_fields: &'static [&'static str],
    pub status_field: &'static str,
    pub columns: &'static [Column],
}

pub fn view_for(module: Module) -> &'static ModuleView {
    match module {
        Module::Incidents => &INCIDENTS_VIEW,
        Module::Risques => &RISQUES_VIEW,
        Module::Formations => &FORMATIONS_VIEW,
        Module::Chimique => &CHIMIQUE_VIEW,
        Module::Epi => &EPI_VIEW,
        Module::Hygiene => &HYGIENE_VIEW,
    }
}

/// Status labels used for filter cycling, shared with the form selects.
pub fn statuses_for(module: Module) -> &'static [&'static str] {
    match module {
        Module::Incidents => entities::incident::STATUTS_INCIDENT,
        Module::Risques => entities::risk::STATUTS_RISQUE,
        Module::Formations => entities::training::STATUTS_FORMATION,
        Module::Chimique => entities::chemical::STATUTS_PRODUIT,
        Module::Epi => entities::ppe::STATUTS_EPI,
        Module::Hygiene => entities::hygiene::STATUTS_CONTROLE,
    }
}

/// Render one cell value. Numbers drop a trailing `.0`, everything else is
/// the raw string.
pub fn cell(row: &Value, path: &str) -> String {
    match get_path(row, path) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => {
            let number = n.as_f64().unwrap_or(0.0);
            if number.fract() == 0.0 {
                format!("{}", number as i64)
            } else {
                format!("{}", number)
            }
        }
        Some(Value::Bool(true)) => "oui".to_string(),
        Some(Value::Bool(false)) => "non".to_string(),
        Some(Value::Array(items)) => format!("{} élément(s)", items.len()),
        _ => String::new(),
    }
}

static INCIDENTS_VIEW: ModuleView = ModuleView {
    module: Module::Incidents,
    reference_field: "numeroIncident",
    title_field: "titre",
    search_fields: &["titre", "numeroIncident", "personneImpliquee"],
    status_field: "statut",
    columns: &[
        Column { header: "Numéro", field: "numeroIncident" },
        Column { header: "Titre", field: "titre" },
        Column { header: "Type", field: "typeIncident" },
        Column { header: "Gravité", field: "gravite" },
        Column { header: "Zone", field: "zone" },
        Column { header: "Date", field: "dateIncident" },
        Column { header: "Statut", field: "statut" },
    ],
};

static RISQUES_VIEW: ModuleView = ModuleView {
    module: Module::Risques,
    reference_field: "numeroRisque",
    title_field: "intitule",
    search_fields: &["intitule", "numeroRisque", "zone"],
    status_field: "statut",
    columns: &[
        Column { header: "Numéro", field: "numeroRisque" },
        Column { header: "Intitulé", field: "intitule" },
        Column { header: "Catégorie", field: "categorie" },
        Column { header: "Score", field: "scoreRisque" },
        Column { header: "Niveau", field: "niveauRisque" },
        Column { header: "Zone", field: "zone" },
        Column { header: "Statut", field: "statut" },
    ],
};

static FORMATIONS_VIEW: ModuleView = ModuleView {
    module: Module::Formations,
    reference_field: "numeroFormation",
    title_field: "intitule",
    search_fields: &["intitule", "numeroFormation", "organisme"],
    status_field: "statut",
    columns: &[
        Column { header: "Numéro", field: "numeroFormation" },
        Column { header: "Intitulé", field: "intitule" },
        Column { header: "Type", field: "typeFormation" },
        Column { header: "Organisme", field: "organisme" },
        Column { header: "Début", field: "dateDebut" },
        Column { header: "Participants", field: "participant" },
        Column { header: "Statut", field: "statut" },
    ],
};

static CHIMIQUE_VIEW: ModuleView = ModuleView {
    module: Module::Chimique,
    reference_field: "numeroProduit",
    title_field: "nomProduit",
    search_fields: &["nomProduit", "numeroProduit", "fournisseur"],
    status_field: "statut",
    columns: &[
        Column { header: "Numéro", field: "numeroProduit" },
        Column { header: "Produit", field: "nomProduit" },
        Column { header: "Danger", field: "mentionDanger" },
        Column { header: "Stock", field: "stock.quantiteDisponible" },
        Column { header: "Unité", field: "stock.unite" },
        Column { header: "Seuil", field: "stock.seuilAlerte" },
        Column { header: "Statut", field: "statut" },
    ],
};

static EPI_VIEW: ModuleView = ModuleView {
    module: Module::Epi,
    reference_field: "numeroEpi",
    title_field: "typeEpi",
    search_fields: &["typeEpi", "numeroEpi", "attributionA"],
    status_field: "statut",
    columns: &[
        Column { header: "Numéro", field: "numeroEpi" },
        Column { header: "Type", field: "typeEpi" },
        Column { header: "Attribué à", field: "attributionA" },
        Column { header: "Expiration", field: "dateExpiration" },
        Column { header: "Stock", field: "stock.quantiteDisponible" },
        Column { header: "Statut", field: "statut" },
    ],
};

static HYGIENE_VIEW: ModuleView = ModuleView {
    module: Module::Hygiene,
    reference_field: "numeroControle",
    title_field: "typeControle",
    search_fields: &["typeControle", "numeroControle", "controleur"],
    status_field: "statut",
    columns: &[
        Column { header: "Numéro", field: "numeroControle" },
        Column { header: "Type", field: "typeControle" },
        Column { header: "Zone", field: "zone" },
        Column { header: "Date", field: "dateControle" },
        Column { header: "Conformité", field: "conformite" },
        Column { header: "Statut", field: "statut" },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_formats() {
        let row = json!({
            "titre": "Fuite",
            "joursArret": 3.0,
            "stock": {"quantiteDisponible": 2.5},
            "fds": {"disponible": true},
            "participant": [{}, {}]
        });
        assert_eq!(cell(&row, "titre"), "Fuite");
        assert_eq!(cell(&row, "joursArret"), "3");
        assert_eq!(cell(&row, "stock.quantiteDisponible"), "2.5");
        assert_eq!(cell(&row, "fds.disponible"), "oui");
        assert_eq!(cell(&row, "participant"), "2 élément(s)");
        assert_eq!(cell(&row, "absent"), "");
    }

    #[test]
    fn test_every_module_has_a_view() {
        for module in Module::ALL {
            let view = view_for(module);
            assert_eq!(view.module, module);
            assert!(view.search_fields.len() >= 3);
            assert!(!view.columns.is_empty());
        }
    }
}
