//! Unified error types for the API service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to API callers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// The request named a region outside the supported set.
    #[error("unsupported region {code:?}; supported regions: {supported}")]
    UnsupportedRegion {
        /// The rejected region code as the caller sent it.
        code: String,
        /// Comma-separated supported codes.
        supported: String,
    },

    /// A privileged operation was called without any API key.
    #[error("API key required: provide the api_key query parameter or set FF_API_KEY")]
    MissingApiKey,

    /// Talking to the upstream provider failed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Upstream request and decoding errors.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The upstream request could not complete.
    #[error("upstream request to {endpoint} failed: {source}")]
    Request {
        /// Upstream endpoint name (e.g. "playerstats").
        endpoint: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The upstream answered with a non-success status.
    #[error("upstream returned HTTP {status} for {endpoint}")]
    Status {
        /// Upstream endpoint name.
        endpoint: String,
        /// Status code the upstream returned.
        status: StatusCode,
    },

    /// The upstream body was not the JSON we expected.
    #[error("failed to decode upstream response from {endpoint}: {reason}")]
    Decode {
        /// Upstream endpoint name.
        endpoint: String,
        /// Reason for failure.
        reason: String,
    },
}

impl UpstreamError {
    /// Whether this failure was an upstream timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Request { source, .. } if source.is_timeout())
    }
}

impl ApiError {
    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UnsupportedRegion { .. } => StatusCode::BAD_REQUEST,
            ApiError::MissingApiKey => StatusCode::UNAUTHORIZED,
            ApiError::Upstream(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable error description.
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ApiError>;
