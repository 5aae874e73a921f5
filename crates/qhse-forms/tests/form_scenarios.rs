//! End-to-end form flows: create-mode draft → edits → validation → wire
//! payload, the way the TUI form controller drives the engine.

use qhse_forms::entities::{risk_schema, training_schema};
use qhse_forms::{add_item, apply_edit, new_draft, to_wire_payload, validate, FieldKind};

#[test]
fn risk_create_classifies_moyenne_grave_as_eleve_12() {
    let schema = risk_schema();
    let mut draft = new_draft(&schema);

    for (path, value) in [
        ("intitule", "Travail en hauteur"),
        ("categorie", "Mécanique"),
        ("zone", "Production"),
        ("probabilite", "Moyenne"),
        ("gravite", "Grave"),
        ("statut", "Identifié"),
        ("dateIdentification", "2025-04-14"),
    ] {
        apply_edit(&mut draft, path, value, FieldKind::Select).unwrap();
    }

    assert_eq!(validate(&schema, &draft), Vec::<String>::new());

    let payload = to_wire_payload(&schema, &draft);
    assert_eq!(payload["scoreRisque"], 12.0);
    assert_eq!(payload["niveauRisque"], "Élevé");
    // The generated reference survives untouched
    assert!(payload["numeroRisque"]
        .as_str()
        .unwrap()
        .starts_with("RSK-"));
}

#[test]
fn risk_rejects_unknown_scale_label() {
    let schema = risk_schema();
    let mut draft = new_draft(&schema);
    apply_edit(&mut draft, "probabilite", "Haute", FieldKind::Select).unwrap();

    let errors = validate(&schema, &draft);
    assert!(
        errors.iter().any(|e| e.contains("'Haute'")),
        "expected a scale error, got {:?}",
        errors
    );
}

#[test]
fn training_with_only_incomplete_participants_fails_validation() {
    let schema = training_schema();
    let mut draft = new_draft(&schema);

    for (path, value) in [
        ("intitule", "Habilitation électrique"),
        ("typeFormation", "Habilitation"),
        ("organisme", "Bureau Veritas"),
        ("dateDebut", "2025-09-01"),
        ("dateFin", "2025-09-03"),
        ("statut", "Planifiée"),
    ] {
        apply_edit(&mut draft, path, value, FieldKind::Text).unwrap();
    }

    // One participant row exists but has no surname
    let group = schema.group("participant").unwrap().clone();
    add_item(&mut draft, &group).unwrap();
    apply_edit(&mut draft, "participant.0.nom", "Durand", FieldKind::Text).unwrap();

    let errors = validate(&schema, &draft);
    assert_eq!(
        errors,
        vec!["at least one participant with name and surname is required".to_string()]
    );

    // Completing the row clears the violation
    apply_edit(&mut draft, "participant.0.prenom", "Anne", FieldKind::Text).unwrap();
    assert_eq!(validate(&schema, &draft), Vec::<String>::new());
}

#[test]
fn training_end_date_before_start_is_rejected() {
    let schema = training_schema();
    let mut draft = new_draft(&schema);
    apply_edit(&mut draft, "dateDebut", "2025-09-10", FieldKind::Date).unwrap();
    apply_edit(&mut draft, "dateFin", "2025-09-01", FieldKind::Date).unwrap();

    let errors = validate(&schema, &draft);
    assert!(errors
        .iter()
        .any(|e| e == "End date must not precede start date"));
}

#[test]
fn group_edit_after_removal_targets_the_right_row() {
    let schema = training_schema();
    let mut draft = new_draft(&schema);
    let group = schema.group("participant").unwrap().clone();

    add_item(&mut draft, &group).unwrap();
    let second = add_item(&mut draft, &group).unwrap();
    apply_edit(&mut draft, "participant.0.nom", "Martin", FieldKind::Text).unwrap();
    apply_edit(&mut draft, "participant.1.nom", "Durand", FieldKind::Text).unwrap();

    // Remove the first row through its key, then edit what is now row 0
    let first_key = qhse_forms::get_path(&draft, "participant.0._key")
        .unwrap()
        .as_str()
        .unwrap()
        .to_string();
    qhse_forms::remove_item_by_key(&mut draft, "participant", &first_key).unwrap();

    apply_edit(&mut draft, "participant.0.prenom", "Anne", FieldKind::Text).unwrap();
    let row = qhse_forms::get_path(&draft, "participant.0").unwrap();
    assert_eq!(row["nom"], "Durand");
    assert_eq!(row["prenom"], "Anne");
    assert_eq!(row["_key"], second);
}
