use crate::draft::get_path;
use crate::schema::{FieldKind, FormSchema};
use serde_json::Value;

fn is_blank(value: Option<&Value>, kind: FieldKind) -> bool {
    match value {
        None => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Number(n)) => kind == FieldKind::Number && n.as_f64() == Some(0.0),
        Some(Value::Null) => true,
        _ => false,
    }
}

/// Run client-side validation over a draft. Returns an empty list iff every
/// required field is non-empty/non-zero and every declared numeric range
/// holds. Exactly one message per violated rule, in declaration order:
/// field rules first, then cross-field rules.
///
/// This gates submission only; the API's own validation is a second,
/// authoritative layer whose rejections are surfaced through the same list.
pub fn validate(schema: &FormSchema, draft: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    for field in &schema.fields {
        let value = get_path(draft, field.name);

        if field.required && is_blank(value, field.kind) {
            errors.push(format!("{} is required", field.label));
            continue;
        }

        if field.kind == FieldKind::Number {
            if let (Some(min), Some(max)) = (field.min, field.max) {
                let number = value.and_then(Value::as_f64).unwrap_or(0.0);
                if number < min || number > max {
                    errors.push(format!(
                        "{} must be between {} and {}",
                        field.label, min, max
                    ));
                }
            }
        }
    }

    if let Some(map) = draft.as_object() {
        for rule in &schema.rules {
            if let Some(message) = rule(map) {
                errors.push(message);
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::new_draft;
    use crate::edit::apply_edit;
    use crate::entities;

    #[test]
    fn test_empty_draft_reports_each_required_field_once() {
        let schema = entities::incident_schema();
        let mut draft = new_draft(&schema);
        // Blank the generated reference so every required field is missing
        apply_edit(&mut draft, "numeroIncident", "", FieldKind::Text).unwrap();

        let errors = validate(&schema, &draft);
        let required = schema.fields.iter().filter(|f| f.required).count();
        assert_eq!(errors.len(), required);

        // Declaration order is preserved
        let labels: Vec<&str> = schema
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.label)
            .collect();
        for (error, label) in errors.iter().zip(labels) {
            assert!(error.starts_with(label), "{} vs {}", error, label);
        }
    }

    #[test]
    fn test_range_violation_message() {
        let schema = entities::incident_schema();
        let mut draft = new_draft(&schema);
        apply_edit(&mut draft, "joursArret", "400", FieldKind::Number).unwrap();

        let errors = validate(&schema, &draft);
        assert!(
            errors.iter().any(|e| e.contains("between 0 and 365")),
            "expected a range message, got {:?}",
            errors
        );
    }

    #[test]
    fn test_valid_draft_is_clean() {
        let schema = entities::incident_schema();
        let mut draft = new_draft(&schema);
        for (path, value) in [
            ("titre", "Coupure légère"),
            ("typeIncident", "Blessure"),
            ("gravite", "Légère"),
            ("statut", "Déclaré"),
            ("dateIncident", "2025-06-12"),
            ("lieu", "Atelier 2"),
            ("zone", "Production"),
        ] {
            apply_edit(&mut draft, path, value, FieldKind::Text).unwrap();
        }

        assert_eq!(validate(&schema, &draft), Vec::<String>::new());
    }
}
