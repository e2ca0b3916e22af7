//! Bearer-token access control.
//!
//! The API serves a single client application. `POST /api/v1/auth/token`
//! issues an HS256 JWT carrying that client's code; every resource route
//! then requires `Authorization: Bearer <token>` with a valid signature, an
//! unexpired `exp` and the configured `client_code`.

use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::{config::AuthConfig, request_context::RequestContext, state::AppState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub client_code: String,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    MalformedHeader,
    InvalidToken(String),
    Expired,
    ClientMismatch,
    Signing(String),
}

impl AuthError {
    fn diagnostics(&self) -> String {
        match self {
            Self::MissingToken => "missing bearer token".to_string(),
            Self::MalformedHeader => {
                "authorization header must be 'Bearer <token>'".to_string()
            }
            Self::InvalidToken(msg) => format!("invalid bearer token: {msg}"),
            Self::Expired => "token expired".to_string(),
            Self::ClientMismatch => "token issued for another client".to_string(),
            Self::Signing(msg) => format!("failed to sign token: {msg}"),
        }
    }
}

impl From<AuthError> for crate::Error {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Signing(_) => crate::Error::Internal(err.diagnostics()),
            other => crate::Error::Unauthorized(other.diagnostics()),
        }
    }
}

/// Issues and verifies access tokens for the configured client.
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    client_code: String,
    token_ttl_seconds: i64,
}

impl AuthService {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            client_code: config.client_code.clone(),
            token_ttl_seconds: i64::try_from(config.token_ttl_seconds).unwrap_or(i64::MAX),
        }
    }

    pub fn client_code(&self) -> &str {
        &self.client_code
    }

    /// Token for the configured client, valid for the configured TTL.
    pub fn issue_token(&self) -> Result<String, AuthError> {
        let claims = Claims {
            client_code: self.client_code.clone(),
            exp: Utc::now().timestamp().saturating_add(self.token_ttl_seconds),
        };
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        if data.claims.client_code != self.client_code {
            return Err(AuthError::ClientMismatch);
        }
        Ok(data.claims)
    }

    pub fn authenticate_headers(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let authz = headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::MalformedHeader)?;

        let token = bearer_token(authz).ok_or(AuthError::MalformedHeader)?;
        self.verify(token)
    }
}

fn bearer_token(authz: &str) -> Option<&str> {
    let (scheme, token) = authz.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Extractor for the claims attached by [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct AuthenticatedClient(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedClient
where
    S: Send + Sync,
{
    type Rejection = crate::Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthenticatedClient)
            .ok_or_else(|| AuthError::MissingToken.into())
    }
}

/// Middleware guarding the resource routes.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    match state.auth.authenticate_headers(req.headers()) {
        Ok(claims) => {
            req.extensions_mut().insert::<Claims>(claims);
            next.run(req).await
        }
        Err(err) => {
            let context = req.extensions().get::<RequestContext>();
            let request_id = context.map(|c| c.request_id.as_str()).unwrap_or("-");
            let correlation_id = context
                .and_then(|c| c.correlation_id.as_deref())
                .unwrap_or("-");
            tracing::warn!(
                method = %req.method(),
                path = %req.uri().path(),
                request_id = %request_id,
                correlation_id = %correlation_id,
                reason = %err.diagnostics(),
                "Rejected unauthenticated request"
            );
            crate::Error::from(err).into_response()
        }
    }
}
