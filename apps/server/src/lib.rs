//! Clinical resource API
//!
//! Authenticated HTTP access to encounter, patient and practitioner
//! documents with client-controlled field projection:
//! - Every read names the fields it wants; unknown fields reject the request
//! - Responses carry exactly the requested fields
//! - Encounter status updates checked against a closed vocabulary
//! - HS256 bearer tokens for a single client application

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod projection;
pub mod request_context;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
