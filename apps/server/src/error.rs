//! Error types for the clinical API
//!
//! Every failure surfaced to a client is one of the variants below. Each
//! variant carries a stable machine-readable code and an HTTP status; the
//! response body only ever contains the public message and the code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    InvalidField(String),

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    #[error("database error: {0}")]
    Database(#[from] StoreError),

    #[error("internal server error: {0}")]
    Internal(String),
}

/// Severity a failure is logged at on the server side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warn,
    Error,
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "INVALID_INPUT",
            Error::InvalidField(_) => "INVALID_FIELD",
            Error::InvalidStatus(_) => "INVALID_STATUS",
            Error::Unauthorized(_) => "UNAUTHORIZED",
            Error::Forbidden(_) => "FORBIDDEN",
            Error::NotFound { .. } => "NOT_FOUND",
            Error::Database(_) => "DATABASE_ERROR",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Error::InvalidInput(_) | Error::InvalidField(_) | Error::InvalidStatus(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Database(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Expected failures (bad input, missing records) are warnings; anything
    /// the client could not have caused is an error.
    pub fn severity(&self) -> Severity {
        if self.status().is_server_error() {
            Severity::Error
        } else {
            Severity::Warn
        }
    }

    /// Message safe to hand to a client. Server-side failures collapse to a
    /// fixed string so driver text never leaves the process.
    pub fn public_message(&self) -> String {
        match self {
            Error::Database(_) => "database operation failed".to_string(),
            Error::Internal(_) => "internal server error".to_string(),
            Error::NotFound { resource_type, .. } => {
                format!("{} not found", resource_type.to_lowercase())
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.public_message(),
            "code": self.code(),
        }));

        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                axum::http::header::WWW_AUTHENTICATE,
                axum::http::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}
