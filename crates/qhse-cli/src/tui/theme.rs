use ratatui::style::Color;

/// Color for a computed risk level label.
pub fn niveau_color(label: &str) -> Color {
    match label {
        "Faible" => Color::Green,
        "Modéré" => Color::Yellow,
        "Élevé" => Color::LightRed,
        "Critique" => Color::Red,
        _ => Color::White,
    }
}

/// Color for an entity status chip. Closed states dim, fresh states cold,
/// in-flight states warm.
pub fn statut_color(label: &str) -> Color {
    match label {
        "Clôturé" | "Réalisée" | "Annulée" | "Archivé" | "Retiré" | "Rebuté" => {
            Color::DarkGray
        }
        "Déclaré" | "Identifié" | "Planifiée" | "Planifié" | "En stock" | "Actif" => {
            Color::Cyan
        }
        "En cours" | "En cours d'analyse" | "Actions en cours" | "En traitement"
        | "Quarantaine" | "A remplacer" => Color::Yellow,
        "Maîtrisé" | "Réalisé" | "Attribué" => Color::Green,
        _ => Color::White,
    }
}
