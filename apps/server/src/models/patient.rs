//! Patient documents

use serde::{Deserialize, Serialize};

use super::ResourceKind;
use crate::projection::{FieldBinding, Projectable};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Patient {
    pub fhir_id: String,
    pub given_name: String,
    pub family_name: String,
    /// Kept as received; never parsed.
    pub birth_date: String,
    pub gender: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialPatient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fhir_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

static PATIENT_FIELDS: &[FieldBinding<Patient>] = &[
    FieldBinding {
        name: "fhirId",
        copy: |src, dst| dst.fhir_id = Some(src.fhir_id.clone()),
    },
    FieldBinding {
        name: "givenName",
        copy: |src, dst| dst.given_name = Some(src.given_name.clone()),
    },
    FieldBinding {
        name: "familyName",
        copy: |src, dst| dst.family_name = Some(src.family_name.clone()),
    },
    FieldBinding {
        name: "birthDate",
        copy: |src, dst| dst.birth_date = Some(src.birth_date.clone()),
    },
    FieldBinding {
        name: "gender",
        copy: |src, dst| dst.gender = Some(src.gender.clone()),
    },
];

impl Projectable for Patient {
    type Partial = PartialPatient;

    const KIND: ResourceKind = ResourceKind::Patient;

    fn bindings() -> &'static [FieldBinding<Self>] {
        PATIENT_FIELDS
    }
}
