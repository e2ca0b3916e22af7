//! Projected reads (GET /api/v1/{collection}/{id}?fields=...)
//!
//! Tests cover:
//! - Responses carry exactly the requested fields
//! - Unknown, empty and missing field lists are rejected with 400
//! - Malformed ids are 400, unknown ids are 404
//! - Store failures surface as 500 without driver details
//! - Reads past the request deadline answer 408 and keep the request id

use crate::support::{
    assert_error_code, assert_status, encounter_document, json_body, key_set, keys,
    patient_document, practitioner_document, FailingStore, HangingStore, TestApp,
};
use axum::http::{Method, StatusCode};
use clinical_api::models::ResourceKind;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[tokio::test]
async fn read_encounter_returns_only_requested_fields() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let id = app.seed(ResourceKind::Encounter, encounter_document())?;

    let (status, _headers, body) = app
        .request(
            Method::GET,
            &format!("/api/v1/encounters/{id}?fields=fhirId,status"),
            None,
        )
        .await?;

    assert_status(status, StatusCode::OK, "read encounter");
    assert_eq!(
        json_body(&body)?,
        json!({ "fhirId": "enc-1001", "status": "in-progress" })
    );
    Ok(())
}

#[tokio::test]
async fn read_encounter_with_every_field() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let id = app.seed(ResourceKind::Encounter, encounter_document())?;

    let (status, _headers, body) = app
        .request(
            Method::GET,
            &format!(
                "/api/v1/encounters/{id}?fields=fhirId,fullUrl,status,class,period,practitionerId,patientId"
            ),
            None,
        )
        .await?;

    assert_status(status, StatusCode::OK, "read encounter");
    assert_eq!(json_body(&body)?, encounter_document());
    Ok(())
}

#[tokio::test]
async fn populated_fields_match_requested_fields_for_each_kind() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let patient = app.seed(ResourceKind::Patient, patient_document())?;
    let practitioner = app.seed(ResourceKind::Practitioner, practitioner_document())?;
    let encounter = app.seed(ResourceKind::Encounter, encounter_document())?;

    let cases = [
        (
            format!("/api/v1/patients/{patient}?fields=gender,%20birthDate"),
            keys(["gender", "birthDate"]),
        ),
        (
            format!("/api/v1/practitioners/{practitioner}?fields=familyName"),
            keys(["familyName"]),
        ),
        (
            format!("/api/v1/encounters/{encounter}?fields=period,class,period"),
            keys(["period", "class"]),
        ),
    ];

    for (path, expected) in cases {
        let (status, _headers, body) = app.request(Method::GET, &path, None).await?;
        assert_status(status, StatusCode::OK, &path);
        assert_eq!(key_set(&json_body(&body)?)?, expected, "{path}");
    }
    Ok(())
}

#[tokio::test]
async fn requested_missing_reference_is_null() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let mut document = encounter_document();
    document
        .as_object_mut()
        .expect("fixture is an object")
        .remove("patientId");
    let id = app.seed(ResourceKind::Encounter, document)?;

    let (status, _headers, body) = app
        .request(
            Method::GET,
            &format!("/api/v1/encounters/{id}?fields=patientId"),
            None,
        )
        .await?;

    assert_status(status, StatusCode::OK, "read encounter");
    assert_eq!(json_body(&body)?, json!({ "patientId": null }));
    Ok(())
}

#[tokio::test]
async fn unknown_field_in_any_position_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let id = app.seed(ResourceKind::Patient, patient_document())?;

    for fields in ["ssn,fhirId", "fhirId,ssn", "fhirId,gender,ssn"] {
        let (status, _headers, body) = app
            .request(
                Method::GET,
                &format!("/api/v1/patients/{id}?fields={fields}"),
                None,
            )
            .await?;
        assert_status(status, StatusCode::BAD_REQUEST, fields);
        let message = assert_error_code(&body, "INVALID_FIELD")?;
        assert_eq!(message, "invalid field specified: ssn");
    }
    Ok(())
}

#[tokio::test]
async fn field_of_another_kind_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let id = app.seed(ResourceKind::Practitioner, practitioner_document())?;

    let (status, _headers, body) = app
        .request(
            Method::GET,
            &format!("/api/v1/practitioners/{id}?fields=birthDate"),
            None,
        )
        .await?;

    assert_status(status, StatusCode::BAD_REQUEST, "foreign field");
    assert_error_code(&body, "INVALID_FIELD")?;
    Ok(())
}

#[tokio::test]
async fn empty_or_missing_fields_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let id = app.seed(ResourceKind::Encounter, encounter_document())?;

    for query in ["", "?fields=", "?fields=%20%20", "?other=1"] {
        let (status, _headers, body) = app
            .request(Method::GET, &format!("/api/v1/encounters/{id}{query}"), None)
            .await?;
        assert_status(status, StatusCode::BAD_REQUEST, query);
        let message = assert_error_code(&body, "INVALID_FIELD")?;
        assert_eq!(message, "fields parameter is required");
    }
    Ok(())
}

#[tokio::test]
async fn malformed_id_is_bad_request_not_not_found() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    let (status, _headers, body) = app
        .request(Method::GET, "/api/v1/patients/12345?fields=fhirId", None)
        .await?;

    assert_status(status, StatusCode::BAD_REQUEST, "malformed id");
    assert_error_code(&body, "INVALID_INPUT")?;
    Ok(())
}

#[tokio::test]
async fn unknown_id_is_not_found() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    for collection in ["encounters", "patients", "practitioners"] {
        let (status, _headers, body) = app
            .request(
                Method::GET,
                &format!("/api/v1/{collection}/{}?fields=fhirId", Uuid::new_v4()),
                None,
            )
            .await?;
        assert_status(status, StatusCode::NOT_FOUND, collection);
        assert_error_code(&body, "NOT_FOUND")?;
    }
    Ok(())
}

#[tokio::test]
async fn store_failure_is_database_error_without_details() -> anyhow::Result<()> {
    let app = TestApp::with_document_store(Arc::new(FailingStore))?;

    let (status, _headers, body) = app
        .request(
            Method::GET,
            &format!("/api/v1/patients/{}?fields=fhirId", Uuid::new_v4()),
            None,
        )
        .await?;

    assert_status(status, StatusCode::INTERNAL_SERVER_ERROR, "store failure");
    let message = assert_error_code(&body, "DATABASE_ERROR")?;
    assert_eq!(message, "database operation failed");
    assert!(!String::from_utf8_lossy(&body).contains("connection refused"));
    Ok(())
}

#[tokio::test]
async fn timed_out_read_is_408_with_request_id() -> anyhow::Result<()> {
    let app = TestApp::with_document_store_and_config(Arc::new(HangingStore), |config| {
        config.server.request_timeout_seconds = 1;
    })?;

    let (status, headers, _body) = app
        .request(
            Method::GET,
            &format!("/api/v1/practitioners/{}?fields=fhirId", Uuid::new_v4()),
            None,
        )
        .await?;

    assert_status(status, StatusCode::REQUEST_TIMEOUT, "hanging store");
    assert!(headers.contains_key("x-request-id"));
    assert_eq!(
        headers.get("x-content-type-options").map(|v| v.as_bytes()),
        Some(&b"nosniff"[..])
    );
    Ok(())
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let id = app.seed(ResourceKind::Patient, patient_document())?;
    let authorization = format!("Bearer {}", app.token());

    let (status, headers, _body) = app
        .request_with_headers(
            Method::GET,
            &format!("/api/v1/patients/{id}?fields=fhirId"),
            None,
            &[
                ("authorization", authorization.as_str()),
                ("x-request-id", "client-trace-1"),
            ],
        )
        .await?;

    assert_status(status, StatusCode::OK, "read patient");
    assert!(headers.contains_key("x-request-id"));
    assert_eq!(
        headers.get("x-correlation-id").and_then(|v| v.to_str().ok()),
        Some("client-trace-1")
    );
    assert_eq!(
        headers.get("x-content-type-options").and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );
    assert_eq!(
        headers.get("cache-control").and_then(|v| v.to_str().ok()),
        Some("no-store")
    );
    Ok(())
}
