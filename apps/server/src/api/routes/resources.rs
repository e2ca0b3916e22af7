//! Protected resource routes
//!
//! Ids are the store keys (UUIDs), not `fhirId`. Every route here sits
//! behind the bearer-token middleware.

use crate::api::handlers::resources;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn resource_routes() -> Router<AppState> {
    Router::new()
        .route("/patients/:id", get(resources::get_patient))
        .route("/practitioners/:id", get(resources::get_practitioner))
        .route("/encounters/:id", get(resources::get_encounter))
        .route(
            "/encounters/:id/review-request",
            post(resources::request_encounter_review),
        )
}
