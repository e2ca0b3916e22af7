//! Encounter documents, their partial projection and the status vocabulary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::ResourceKind;
use crate::projection::{FieldBinding, Projectable};

/// Encounter as stored in the `encounters` collection.
///
/// Missing keys decode to defaults because reads are projected at the store,
/// so a document usually carries only the requested subset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Encounter {
    pub fhir_id: String,
    pub full_url: String,
    pub status: String,
    pub class: String,
    pub period: Period,
    pub practitioner_id: Option<String>,
    pub patient_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub start: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
}

/// Encounter restricted to the fields a client asked for.
///
/// The optional references use a nested `Option`: the outer level says
/// whether the field was requested, the inner one whether the document has
/// it. A requested but absent reference serializes as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialEncounter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fhir_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub practitioner_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<Option<String>>,
}

static ENCOUNTER_FIELDS: &[FieldBinding<Encounter>] = &[
    FieldBinding {
        name: "fhirId",
        copy: |src, dst| dst.fhir_id = Some(src.fhir_id.clone()),
    },
    FieldBinding {
        name: "fullUrl",
        copy: |src, dst| dst.full_url = Some(src.full_url.clone()),
    },
    FieldBinding {
        name: "status",
        copy: |src, dst| dst.status = Some(src.status.clone()),
    },
    FieldBinding {
        name: "class",
        copy: |src, dst| dst.class = Some(src.class.clone()),
    },
    FieldBinding {
        name: "period",
        copy: |src, dst| dst.period = Some(src.period.clone()),
    },
    FieldBinding {
        name: "practitionerId",
        copy: |src, dst| dst.practitioner_id = Some(src.practitioner_id.clone()),
    },
    FieldBinding {
        name: "patientId",
        copy: |src, dst| dst.patient_id = Some(src.patient_id.clone()),
    },
];

impl Projectable for Encounter {
    type Partial = PartialEncounter;

    const KIND: ResourceKind = ResourceKind::Encounter;

    fn bindings() -> &'static [FieldBinding<Self>] {
        ENCOUNTER_FIELDS
    }
}

/// Closed vocabulary for `Encounter.status`. Any value may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncounterStatus {
    Planned,
    InProgress,
    OnHold,
    Discharged,
    Completed,
    Finished,
    Cancelled,
    Discontinued,
    EnteredInError,
    Unknown,
}

impl EncounterStatus {
    pub const ALL: [EncounterStatus; 10] = [
        EncounterStatus::Planned,
        EncounterStatus::InProgress,
        EncounterStatus::OnHold,
        EncounterStatus::Discharged,
        EncounterStatus::Completed,
        EncounterStatus::Finished,
        EncounterStatus::Cancelled,
        EncounterStatus::Discontinued,
        EncounterStatus::EnteredInError,
        EncounterStatus::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EncounterStatus::Planned => "planned",
            EncounterStatus::InProgress => "in-progress",
            EncounterStatus::OnHold => "on-hold",
            EncounterStatus::Discharged => "discharged",
            EncounterStatus::Completed => "completed",
            EncounterStatus::Finished => "finished",
            EncounterStatus::Cancelled => "cancelled",
            EncounterStatus::Discontinued => "discontinued",
            EncounterStatus::EnteredInError => "entered-in-error",
            EncounterStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EncounterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status string is outside the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for EncounterStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}
