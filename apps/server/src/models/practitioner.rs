//! Practitioner documents

use serde::{Deserialize, Serialize};

use super::ResourceKind;
use crate::projection::{FieldBinding, Projectable};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Practitioner {
    pub fhir_id: String,
    pub given_name: String,
    pub family_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialPractitioner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fhir_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
}

static PRACTITIONER_FIELDS: &[FieldBinding<Practitioner>] = &[
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
];

impl Projectable for Practitioner {
    type Partial = PartialPractitioner;

    const KIND: ResourceKind = ResourceKind::Practitioner;

    fn bindings() -> &'static [FieldBinding<Self>] {
        PRACTITIONER_FIELDS
    }
}
