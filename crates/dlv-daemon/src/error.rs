//! The single failure surface of the mock endpoints.
//!
//! Every variant renders as `500 {"error":"Internal server error"}`. The
//! variant only decides what gets logged.

use std::fmt;

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dlv_schemas::ErrorResponse;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    /// The request body could not be read (oversized, aborted, ...).
    Body(BytesRejection),
    /// The body is not valid JSON.
    Decode(serde_json::Error),
    /// The body is the JSON literal `null`; there is nothing to read fields from.
    NullBody,
    /// The session collaborator failed.
    Session(anyhow::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Body(r) => write!(f, "unreadable request body: {r}"),
            ApiError::Decode(e) => write!(f, "request body is not valid json: {e}"),
            ApiError::NullBody => f.write_str("request body is null"),
            ApiError::Session(e) => write!(f, "session termination failed: {e:#}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<BytesRejection> for ApiError {
    fn from(r: BytesRejection) -> Self {
        ApiError::Body(r)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal()),
        )
            .into_response()
    }
}
