// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types and handling for the server.

use archsplit_geometry::SplittingError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Structurally invalid request body (bad JSON, geometry or elevation).
    #[error("{0}")]
    InvalidInput(String),

    /// Well-formed input that cannot be split.
    #[error(transparent)]
    Splitting(#[from] SplittingError),

    #[error("'{0}' is not a valid id")]
    InvalidId(String),

    #[error("Project name must be between 1 and {max} characters")]
    InvalidProject { max: usize },

    #[error("{0}")]
    NotFound(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Join error")]
    Join(#[from] tokio::task::JoinError),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::InvalidInput(_) => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_INPUT"),
            ApiError::Splitting(_) => (StatusCode::BAD_REQUEST, "SPLITTING_ERROR"),
            ApiError::InvalidId(_) => (StatusCode::BAD_REQUEST, "INVALID_ID"),
            ApiError::InvalidProject { .. } => (StatusCode::BAD_REQUEST, "INVALID_PROJECT"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Processing(_) => (StatusCode::INTERNAL_SERVER_ERROR, "PROCESSING_ERROR"),
            ApiError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Join(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TASK_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, code, "Request failed");
        }

        let body = ErrorResponse {
            detail: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<archsplit_geometry::Error> for ApiError {
    fn from(err: archsplit_geometry::Error) -> Self {
        match err {
            archsplit_geometry::Error::Splitting(e) => ApiError::Splitting(e),
            archsplit_geometry::Error::CoreError(e) => ApiError::InvalidInput(e.to_string()),
            e @ archsplit_geometry::Error::UnexpectedGeometry(_) => {
                ApiError::Processing(e.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<cacache::Error> for ApiError {
    fn from(err: cacache::Error) -> Self {
        ApiError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("JSON error: {}", err))
    }
}
