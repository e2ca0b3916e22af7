//! Request handlers for API endpoints
//!
//! Handlers extract and validate request input, call a service and shape
//! the response. Errors convert into responses through `crate::Error`.

pub mod auth;
pub mod metrics;
pub mod resources;
pub mod system;
