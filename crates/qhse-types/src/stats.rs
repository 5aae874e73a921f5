use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Date range token accepted by the stats endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Periode {
    #[serde(rename = "7j")]
    SeptJours,
    #[default]
    #[serde(rename = "30j")]
    TrenteJours,
    #[serde(rename = "90j")]
    QuatreVingtDixJours,
    #[serde(rename = "12m")]
    DouzeMois,
}

impl Periode {
    pub const ALL: [Periode; 4] = [
        Periode::SeptJours,
        Periode::TrenteJours,
        Periode::QuatreVingtDixJours,
        Periode::DouzeMois,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Periode::SeptJours => "7j",
            Periode::TrenteJours => "30j",
            Periode::QuatreVingtDixJours => "90j",
            Periode::DouzeMois => "12m",
        }
    }

    pub fn parse(token: &str) -> Result<Self> {
        match token {
            "7j" => Ok(Periode::SeptJours),
            "30j" => Ok(Periode::TrenteJours),
            "90j" => Ok(Periode::QuatreVingtDixJours),
            "12m" => Ok(Periode::DouzeMois),
            other => Err(Error::UnknownPeriode(other.to_string())),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Periode::SeptJours => "7 derniers jours",
            Periode::TrenteJours => "30 derniers jours",
            Periode::QuatreVingtDixJours => "90 derniers jours",
            Periode::DouzeMois => "12 derniers mois",
        }
    }
}

/// One ranked entry in a top-N list (e.g. zones by incident count)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneCount {
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub count: u64,
}

/// Server-computed aggregates for one module over a periode.
///
/// Bucket keys are whatever the API groups by (statut, gravité, type);
/// a BTreeMap keeps rendering order stable across refetches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub par_statut: BTreeMap<String, u64>,
    #[serde(default)]
    pub par_gravite: BTreeMap<String, u64>,
    #[serde(default)]
    pub par_type: BTreeMap<String, u64>,
    #[serde(default)]
    pub top_zones: Vec<ZoneCount>,
}

/// Proportional bar width for a ranked entry, as a percentage of the
/// largest count in the list. Empty lists and all-zero lists render at 0.
pub fn bar_width_pct(count: u64, counts: &[u64]) -> f64 {
    let max = counts.iter().copied().max().unwrap_or(0);
    if max == 0 {
        0.0
    } else {
        count as f64 / max as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periode_tokens_round_trip() {
        for periode in Periode::ALL {
            assert_eq!(Periode::parse(periode.token()).unwrap(), periode);
        }
        assert!(Periode::parse("1y").is_err());
    }

    #[test]
    fn test_bar_width_proportions() {
        let counts = [10, 5, 0];
        assert_eq!(bar_width_pct(10, &counts), 100.0);
        assert_eq!(bar_width_pct(5, &counts), 50.0);
        assert_eq!(bar_width_pct(0, &counts), 0.0);
    }

    #[test]
    fn test_bar_width_degenerate() {
        assert_eq!(bar_width_pct(3, &[]), 0.0);
        assert_eq!(bar_width_pct(0, &[0, 0]), 0.0);
    }

    #[test]
    fn test_stats_deserialize_partial_payload() {
        let raw = r#"{"total": 7, "parStatut": {"Ouvert": 3, "Clôturé": 4}}"#;
        let stats: ModuleStats = serde_json::from_str(raw).unwrap();
        assert_eq!(stats.total, 7);
        assert_eq!(stats.par_statut["Ouvert"], 3);
        assert!(stats.top_zones.is_empty());
    }
}
