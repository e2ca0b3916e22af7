//! Bearer-token enforcement on every protected route

use crate::support::{
    assert_error_code, assert_status, encounter_document, TestApp, TEST_CLIENT, TEST_SECRET,
};
use axum::http::{header, Method, StatusCode};
use clinical_api::auth::{AuthService, Claims};
use clinical_api::config::AuthConfig;
use clinical_api::models::ResourceKind;

fn protected_routes(id: &str) -> Vec<(Method, String)> {
    vec![
        (Method::GET, format!("/api/v1/patients/{id}?fields=fhirId")),
        (Method::GET, format!("/api/v1/practitioners/{id}?fields=fhirId")),
        (Method::GET, format!("/api/v1/encounters/{id}?fields=fhirId")),
        (Method::POST, format!("/api/v1/encounters/{id}/review-request")),
    ]
}

fn signer(secret: &str, client: &str) -> AuthService {
    AuthService::new(&AuthConfig {
        jwt_secret: secret.to_string(),
        client_code: client.to_string(),
        token_ttl_seconds: 3600,
    })
}

async fn assert_rejected(app: &TestApp, authorization: Option<&str>) -> anyhow::Result<()> {
    let id = app.seed(ResourceKind::Encounter, encounter_document())?;
    let mut headers = vec![("content-type", "application/json")];
    if let Some(value) = authorization {
        headers.push(("authorization", value));
    }

    for (method, path) in protected_routes(&id.to_string()) {
        let body = (method == Method::POST).then(|| r#"{"status":"finished"}"#.into());
        let (status, response_headers, body) = app
            .request_with_headers(method, &path, body, &headers)
            .await?;

        assert_status(status, StatusCode::UNAUTHORIZED, &path);
        assert_error_code(&body, "UNAUTHORIZED")?;
        assert_eq!(
            response_headers
                .get(header::WWW_AUTHENTICATE)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer")
        );
    }

    let stored = app
        .store
        .get_raw(ResourceKind::Encounter, id)
        .map_err(|e| anyhow::anyhow!("{e}"))?
        .expect("seeded encounter");
    assert_eq!(stored["status"], "in-progress", "rejected update must not persist");
    Ok(())
}

#[tokio::test]
async fn missing_token_is_unauthorized() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    assert_rejected(&app, None).await
}

#[tokio::test]
async fn malformed_header_is_unauthorized() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let basic = format!("Basic {}", app.token());
    assert_rejected(&app, Some(&basic)).await?;
    assert_rejected(&app, Some("Bearer")).await
}

#[tokio::test]
async fn expired_token_is_unauthorized() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let token = signer(TEST_SECRET, TEST_CLIENT)
        .sign(&Claims {
            client_code: TEST_CLIENT.to_string(),
            exp: chrono::Utc::now().timestamp() - 60,
        })
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;

    assert_rejected(&app, Some(&format!("Bearer {token}"))).await
}

#[tokio::test]
async fn wrongly_signed_token_is_unauthorized() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let token = signer("some-other-secret", TEST_CLIENT)
        .issue_token()
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;

    assert_rejected(&app, Some(&format!("Bearer {token}"))).await
}

#[tokio::test]
async fn token_for_another_client_is_unauthorized() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let token = signer(TEST_SECRET, "another-app")
        .issue_token()
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;

    assert_rejected(&app, Some(&format!("Bearer {token}"))).await
}

#[tokio::test]
async fn unauthorized_is_checked_before_input_validation() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    let (status, _headers, body) = app
        .request_with_headers(Method::GET, "/api/v1/patients/not-an-id?fields=bogus", None, &[])
        .await?;

    assert_status(status, StatusCode::UNAUTHORIZED, "unauthenticated bad input");
    assert_error_code(&body, "UNAUTHORIZED")?;
    Ok(())
}
