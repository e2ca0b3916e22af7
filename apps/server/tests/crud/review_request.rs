//! Encounter status updates (POST /api/v1/encounters/{id}/review-request)

use crate::support::{
    assert_error_code, assert_status, encounter_document, json_body, FailingStore, TestApp,
};
use axum::body::Bytes;
use axum::http::{Method, StatusCode};
use clinical_api::models::{EncounterStatus, ResourceKind};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[tokio::test]
async fn review_request_updates_status() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let id = app.seed(ResourceKind::Encounter, encounter_document())?;

    let (status, _headers, body) = app
        .request(
            Method::POST,
            &format!("/api/v1/encounters/{id}/review-request"),
            Some(json!({ "status": "finished" })),
        )
        .await?;

    assert_status(status, StatusCode::OK, "review request");
    assert_eq!(
        json_body(&body)?,
        json!({ "message": "status updated successfully" })
    );

    let (status, _headers, body) = app
        .request(
            Method::GET,
            &format!("/api/v1/encounters/{id}?fields=status"),
            None,
        )
        .await?;
    assert_status(status, StatusCode::OK, "read back");
    assert_eq!(json_body(&body)?, json!({ "status": "finished" }));
    Ok(())
}

#[tokio::test]
async fn every_vocabulary_value_is_accepted() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let id = app.seed(ResourceKind::Encounter, encounter_document())?;

    for status_value in EncounterStatus::ALL {
        let (status, _headers, _body) = app
            .request(
                Method::POST,
                &format!("/api/v1/encounters/{id}/review-request"),
                Some(json!({ "status": status_value.as_str() })),
            )
            .await?;
        assert_status(status, StatusCode::OK, status_value.as_str());
    }
    Ok(())
}

#[tokio::test]
async fn repeating_current_status_succeeds() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let id = app.seed(ResourceKind::Encounter, encounter_document())?;

    let (status, _headers, _body) = app
        .request(
            Method::POST,
            &format!("/api/v1/encounters/{id}/review-request"),
            Some(json!({ "status": "in-progress" })),
        )
        .await?;

    assert_status(status, StatusCode::OK, "unchanged status");
    Ok(())
}

#[tokio::test]
async fn status_outside_vocabulary_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let id = app.seed(ResourceKind::Encounter, encounter_document())?;

    for value in ["done", "Finished", "in progress"] {
        let (status, _headers, body) = app
            .request(
                Method::POST,
                &format!("/api/v1/encounters/{id}/review-request"),
                Some(json!({ "status": value })),
            )
            .await?;
        assert_status(status, StatusCode::BAD_REQUEST, value);
        let message = assert_error_code(&body, "INVALID_STATUS")?;
        assert_eq!(message, format!("invalid status: {value}"));
    }

    let stored = app
        .store
        .get_raw(ResourceKind::Encounter, id)
        .map_err(|e| anyhow::anyhow!("{e}"))?
        .expect("seeded encounter");
    assert_eq!(stored["status"], "in-progress");
    Ok(())
}

#[tokio::test]
async fn valid_status_for_unknown_encounter_is_not_found() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    let (status, _headers, body) = app
        .request(
            Method::POST,
            &format!("/api/v1/encounters/{}/review-request", Uuid::new_v4()),
            Some(json!({ "status": "cancelled" })),
        )
        .await?;

    assert_status(status, StatusCode::NOT_FOUND, "unknown encounter");
    assert_error_code(&body, "NOT_FOUND")?;
    Ok(())
}

#[tokio::test]
async fn malformed_id_is_bad_request() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    let (status, _headers, body) = app
        .request(
            Method::POST,
            "/api/v1/encounters/not-an-id/review-request",
            Some(json!({ "status": "cancelled" })),
        )
        .await?;

    assert_status(status, StatusCode::BAD_REQUEST, "malformed id");
    assert_error_code(&body, "INVALID_INPUT")?;
    Ok(())
}

#[tokio::test]
async fn invalid_body_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let id = app.seed(ResourceKind::Encounter, encounter_document())?;
    let path = format!("/api/v1/encounters/{id}/review-request");
    let authorization = format!("Bearer {}", app.token());

    let bodies = [
        "not json",
        "{}",
        r#"{"status": ""}"#,
        r#"{"status": 7}"#,
    ];
    for raw in bodies {
        let (status, _headers, body) = app
            .request_with_headers(
                Method::POST,
                &path,
                Some(Bytes::from(raw)),
                &[
                    ("authorization", authorization.as_str()),
                    ("content-type", "application/json"),
                ],
            )
            .await?;
        assert_status(status, StatusCode::BAD_REQUEST, raw);
        let message = assert_error_code(&body, "INVALID_INPUT")?;
        assert_eq!(message, "invalid request body");
    }
    Ok(())
}

#[tokio::test]
async fn store_failure_is_database_error() -> anyhow::Result<()> {
    let app = TestApp::with_document_store(Arc::new(FailingStore))?;

    let (status, _headers, body) = app
        .request(
            Method::POST,
            &format!("/api/v1/encounters/{}/review-request", Uuid::new_v4()),
            Some(json!({ "status": "finished" })),
        )
        .await?;

    assert_status(status, StatusCode::INTERNAL_SERVER_ERROR, "store failure");
    assert_error_code(&body, "DATABASE_ERROR")?;
    Ok(())
}
