//! One `FormSchema` constructor per entity. Schemas are configuration:
//! adding an entity means adding a constructor here, not new control flow
//! in the engine.

pub mod chemical;
pub mod hygiene;
pub mod incident;
pub mod ppe;
pub mod risk;
pub mod training;

pub use chemical::chemical_schema;
pub use hygiene::hygiene_schema;
pub use incident::incident_schema;
pub use ppe::ppe_schema;
pub use risk::risk_schema;
pub use training::training_schema;

use crate::FormSchema;
use qhse_types::Module;

/// Zones shared by every screen's zone select.
pub const ZONES: &[&str] = &[
    "Production",
    "Entrepôt",
    "Laboratoire",
    "Bureaux",
    "Maintenance",
    "Extérieur",
];

/// Schema for a module's primary entity.
pub fn schema_for(module: Module) -> FormSchema {
    match module {
        Module::Incidents => incident_schema(),
        Module::Risques => risk_schema(),
        Module::Formations => training_schema(),
        Module::Chimique => chemical_schema(),
        Module::Epi => ppe_schema(),
        Module::Hygiene => hygiene_schema(),
    }
}
