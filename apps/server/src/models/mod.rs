//! Domain models for the clinical resources exposed by the API

pub mod encounter;
pub mod patient;
pub mod practitioner;

pub use encounter::{Encounter, EncounterStatus, PartialEncounter, Period};
pub use patient::{PartialPatient, Patient};
pub use practitioner::{PartialPractitioner, Practitioner};

use std::fmt;

/// The resource kinds served by this API, one document collection each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Encounter,
    Patient,
    Practitioner,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Encounter,
        ResourceKind::Patient,
        ResourceKind::Practitioner,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Encounter => "Encounter",
            ResourceKind::Patient => "Patient",
            ResourceKind::Practitioner => "Practitioner",
        }
    }

    /// Collection (table) holding documents of this kind. Also the path
    /// segment under `/api/v1`.
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceKind::Encounter => "encounters",
            ResourceKind::Patient => "patients",
            ResourceKind::Practitioner => "practitioners",
        }
    }

    /// Operation name used to tag log records of a projected read.
    pub fn read_operation(&self) -> &'static str {
        match self {
            ResourceKind::Encounter => "GetEncounter",
            ResourceKind::Patient => "GetPatient",
            ResourceKind::Practitioner => "GetPractitioner",
        }
    }

    pub fn from_collection(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.collection() == segment)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
