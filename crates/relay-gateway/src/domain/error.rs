//! Error taxonomy for the gateway.
//!
//! `ApiError` is the request-level error mapped to an HTTP response exactly
//! once, at the API boundary. `GatewayError` covers startup failures that
//! abort the process.

use crate::domain::config::ConfigError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// A request-level failure with the HTTP status it maps to.
///
/// Every 4xx/5xx body is `{"detail": "..."}` with the underlying message
/// attached.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status the error maps to.
    pub status: StatusCode,
    /// Human-readable failure detail.
    pub detail: String,
}

impl ApiError {
    /// Caller-supplied input failed validation.
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    /// Signing, derivation, or a remote integration failed.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }

    /// A dependency this service needs is not reachable.
    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status, self.detail)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

/// Gateway-level errors, fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Server socket bind error.
    #[error("server bind error: {0}")]
    Bind(String),

    /// Backend construction failed (bad key material, bad program id).
    #[error("backend error: {0}")]
    Backend(String),

    /// Serve loop error.
    #[error("server error: {0}")]
    Serve(String),
}
