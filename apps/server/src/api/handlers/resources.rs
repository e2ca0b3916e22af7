//! Resource read and encounter review handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use validator::Validate;

use crate::{
    api::extractors::{Fields, JsonBody},
    auth::AuthenticatedClient,
    models::{PartialEncounter, PartialPatient, PartialPractitioner},
    state::AppState,
    Result,
};

#[derive(Debug, Deserialize, Validate)]
pub struct StatusUpdateRequest {
    #[validate(length(min = 1))]
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

fn client_span(client: &AuthenticatedClient) -> tracing::Span {
    tracing::info_span!("client_request", client_code = %client.0.client_code)
}

/// `GET /api/v1/patients/{id}?fields=...`
pub async fn get_patient(
    State(state): State<AppState>,
    client: AuthenticatedClient,
    Path(id): Path<String>,
    Fields(fields): Fields,
) -> Result<Json<PartialPatient>> {
    let partial = state
        .patients
        .get(&id, &fields)
        .instrument(client_span(&client))
        .await?;
    Ok(Json(partial))
}

/// `GET /api/v1/practitioners/{id}?fields=...`
pub async fn get_practitioner(
    State(state): State<AppState>,
    client: AuthenticatedClient,
    Path(id): Path<String>,
    Fields(fields): Fields,
) -> Result<Json<PartialPractitioner>> {
    let partial = state
        .practitioners
        .get(&id, &fields)
        .instrument(client_span(&client))
        .await?;
    Ok(Json(partial))
}

/// `GET /api/v1/encounters/{id}?fields=...`
pub async fn get_encounter(
    State(state): State<AppState>,
    client: AuthenticatedClient,
    Path(id): Path<String>,
    Fields(fields): Fields,
) -> Result<Json<PartialEncounter>> {
    let partial = state
        .encounters
        .get(&id, &fields)
        .instrument(client_span(&client))
        .await?;
    Ok(Json(partial))
}

/// `POST /api/v1/encounters/{id}/review-request`
pub async fn request_encounter_review(
    State(state): State<AppState>,
    client: AuthenticatedClient,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<StatusUpdateRequest>,
) -> Result<Json<MessageResponse>> {
    state
        .encounters
        .update_status(&id, &body.status)
        .instrument(client_span(&client))
        .await?;

    Ok(Json(MessageResponse {
        message: "status updated successfully",
    }))
}
