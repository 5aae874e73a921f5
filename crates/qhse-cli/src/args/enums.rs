use clap::ValueEnum;
use qhse_types::{Module, Periode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModuleArg {
    Incident,
    Risk,
    Training,
    Chemical,
    Ppe,
    Hygiene,
}

impl From<ModuleArg> for Module {
    fn from(arg: ModuleArg) -> Self {
        match arg {
            ModuleArg::Incident => Module::Incidents,
            ModuleArg::Risk => Module::Risques,
            ModuleArg::Training => Module::Formations,
            ModuleArg::Chemical => Module::Chimique,
            ModuleArg::Ppe => Module::Epi,
            ModuleArg::Hygiene => Module::Hygiene,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PeriodeArg {
    #[value(name = "7j")]
    SeptJours,
    #[value(name = "30j")]
    TrenteJours,
    #[value(name = "90j")]
    QuatreVingtDixJours,
    #[value(name = "12m")]
    DouzeMois,
}

impl From<PeriodeArg> for Periode {
    fn from(arg: PeriodeArg) -> Self {
        match arg {
            PeriodeArg::SeptJours => Periode::SeptJours,
            PeriodeArg::TrenteJours => Periode::TrenteJours,
            PeriodeArg::QuatreVingtDixJours => Periode::QuatreVingtDixJours,
            PeriodeArg::DouzeMois => Periode::DouzeMois,
        }
    }
}
