use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// NOTE: Scale Design
//
// The API stores probability/severity as the French display labels, not as
// numbers. The numeric weight lives only on this side and is recomputed
// whenever a risk draft is scored. Keeping labels as the wire format means
// a rescaled grid never invalidates stored rows.

/// Likelihood scale for a risk, weighted 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Probabilite {
    #[serde(rename = "Très faible")]
    TresFaible,
    #[serde(rename = "Faible")]
    Faible,
    #[serde(rename = "Moyenne")]
    Moyenne,
    #[serde(rename = "Élevée")]
    Elevee,
    #[serde(rename = "Très élevée")]
    TresElevee,
}

/// Severity scale for a risk or incident, weighted 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gravite {
    #[serde(rename = "Légère")]
    Legere,
    #[serde(rename = "Modérée")]
    Moderee,
    #[serde(rename = "Sérieuse")]
    Serieuse,
    #[serde(rename = "Grave")]
    Grave,
    #[serde(rename = "Catastrophique")]
    Catastrophique,
}

/// Risk classification bucket derived from the score grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NiveauRisque {
    #[serde(rename = "Faible")]
    Faible,
    #[serde(rename = "Modéré")]
    Modere,
    #[serde(rename = "Élevé")]
    Eleve,
    #[serde(rename = "Critique")]
    Critique,
}

impl Probabilite {
    pub const LABELS: [&'static str; 5] =
        ["Très faible", "Faible", "Moyenne", "Élevée", "Très élevée"];

    pub fn weight(self) -> u8 {
        match self {
            Probabilite::TresFaible => 1,
            Probabilite::Faible => 2,
            Probabilite::Moyenne => 3,
            Probabilite::Elevee => 4,
            Probabilite::TresElevee => 5,
        }
    }

    pub fn parse(label: &str) -> Result<Self> {
        match label {
            "Très faible" => Ok(Probabilite::TresFaible),
            "Faible" => Ok(Probabilite::Faible),
            "Moyenne" => Ok(Probabilite::Moyenne),
            "Élevée" => Ok(Probabilite::Elevee),
            "Très élevée" => Ok(Probabilite::TresElevee),
            other => Err(Error::UnknownScale {
                scale: "probabilite",
                value: other.to_string(),
            }),
        }
    }
}

impl Gravite {
    pub const LABELS: [&'static str; 5] =
        ["Légère", "Modérée", "Sérieuse", "Grave", "Catastrophique"];

    pub fn weight(self) -> u8 {
        match self {
            Gravite::Legere => 1,
            Gravite::Moderee => 2,
            Gravite::Serieuse => 3,
            Gravite::Grave => 4,
            Gravite::Catastrophique => 5,
        }
    }

    pub fn parse(label: &str) -> Result<Self> {
        match label {
            "Légère" => Ok(Gravite::Legere),
            "Modérée" => Ok(Gravite::Moderee),
            "Sérieuse" => Ok(Gravite::Serieuse),
            "Grave" => Ok(Gravite::Grave),
            "Catastrophique" => Ok(Gravite::Catastrophique),
            other => Err(Error::UnknownScale {
                scale: "gravite",
                value: other.to_string(),
            }),
        }
    }
}

impl NiveauRisque {
    pub fn label(self) -> &'static str {
        match self {
            NiveauRisque::Faible => "Faible",
            NiveauRisque::Modere => "Modéré",
            NiveauRisque::Eleve => "Élevé",
            NiveauRisque::Critique => "Critique",
        }
    }
}

/// Score grid: probability weight × severity weight, range 1..=25
pub fn risk_score(probabilite: Probabilite, gravite: Gravite) -> u8 {
    probabilite.weight() * gravite.weight()
}

/// Bucket thresholds: ≤4 Faible, ≤9 Modéré, ≤16 Élevé, else Critique
pub fn niveau_for_score(score: u8) -> NiveauRisque {
    match score {
        0..=4 => NiveauRisque::Faible,
        5..=9 => NiveauRisque::Modere,
        10..=16 => NiveauRisque::Eleve,
        _ => NiveauRisque::Critique,
    }
}

/// Expiry state of a dated certificate or piece of equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryStatus {
    Valid,
    ExpiringSoon,
    Expired,
}

/// Days ahead of expiry at which an item starts warning
pub const EXPIRY_WARNING_DAYS: i64 = 30;

pub fn classify_expiry(expires_on: NaiveDate, today: NaiveDate) -> ExpiryStatus {
    let remaining = (expires_on - today).num_days();
    if remaining < 0 {
        ExpiryStatus::Expired
    } else if remaining <= EXPIRY_WARNING_DAYS {
        ExpiryStatus::ExpiringSoon
    } else {
        ExpiryStatus::Valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_grid_corners() {
        assert_eq!(risk_score(Probabilite::TresFaible, Gravite::Legere), 1);
        assert_eq!(
            risk_score(Probabilite::TresElevee, Gravite::Catastrophique),
            25
        );
    }

    #[test]
    fn test_moyenne_grave_is_eleve_12() {
        let score = risk_score(Probabilite::Moyenne, Gravite::Grave);
        assert_eq!(score, 12);
        assert_eq!(niveau_for_score(score), NiveauRisque::Eleve);
    }

    #[test]
    fn test_niveau_thresholds() {
        assert_eq!(niveau_for_score(4), NiveauRisque::Faible);
        assert_eq!(niveau_for_score(5), NiveauRisque::Modere);
        assert_eq!(niveau_for_score(9), NiveauRisque::Modere);
        assert_eq!(niveau_for_score(10), NiveauRisque::Eleve);
        assert_eq!(niveau_for_score(16), NiveauRisque::Eleve);
        assert_eq!(niveau_for_score(17), NiveauRisque::Critique);
        assert_eq!(niveau_for_score(25), NiveauRisque::Critique);
    }

    #[test]
    fn test_scale_parse_round_trip() {
        for label in Probabilite::LABELS {
            assert!(Probabilite::parse(label).is_ok(), "should parse {}", label);
        }
        for label in Gravite::LABELS {
            assert!(Gravite::parse(label).is_ok(), "should parse {}", label);
        }
        assert!(Probabilite::parse("Haute").is_err());
    }

    #[test]
    fn test_expiry_classification() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let past = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        let soon = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        let far = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

        assert_eq!(classify_expiry(past, today), ExpiryStatus::Expired);
        assert_eq!(classify_expiry(soon, today), ExpiryStatus::ExpiringSoon);
        assert_eq!(classify_expiry(far, today), ExpiryStatus::Valid);

        // Boundary: exactly 30 days out still warns, 31 does not
        let edge = today + chrono::Duration::days(EXPIRY_WARNING_DAYS);
        assert_eq!(classify_expiry(edge, today), ExpiryStatus::ExpiringSoon);
        let beyond = today + chrono::Duration::days(EXPIRY_WARNING_DAYS + 1);
        assert_eq!(classify_expiry(beyond, today), ExpiryStatus::Valid);
    }
}
