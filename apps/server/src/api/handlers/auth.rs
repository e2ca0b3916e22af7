//! Token issuing endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{state::AppState, Result};

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// `POST /api/v1/auth/token`
pub async fn issue_token(State(state): State<AppState>) -> Result<Json<TokenResponse>> {
    let token = state.auth.issue_token().map_err(|err| {
        let err = crate::Error::from(err);
        tracing::error!(error = %err, "Failed to issue access token");
        err
    })?;

    tracing::info!(client_code = %state.auth.client_code(), "Access token issued");
    Ok(Json(TokenResponse { token }))
}
