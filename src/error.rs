//! Error types for rendering, storage, and the HTTP surface.

use std::io;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::markup;

/// Failures while laying out a report PDF.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The submitted text contained markup the parser rejected.
    #[error("invalid text markup: {0}")]
    Markup(#[from] markup::ParseError),
    /// Font resolution or page layout failed inside the PDF engine.
    #[error("pdf generation failed: {0}")]
    Pdf(#[from] genpdf::error::Error),
}

/// Failures while persisting or retrieving generated artifacts.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No artifact with the requested name exists.
    #[error("artifact not found: {name}")]
    NotFound { name: String },
    #[error("failed to create artifact directory {dir}: {source}")]
    CreateDir { dir: String, source: io::Error },
    #[error("failed to write artifact {name}: {source}")]
    Write { name: String, source: io::Error },
    #[error("failed to read artifact {name}: {source}")]
    Read { name: String, source: io::Error },
}

/// Unified error type for route handlers.
#[derive(Debug)]
pub enum ApiError {
    Internal(String),
}

/// JSON error payload returned by the HTTP surface.
#[derive(Serialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<RenderError> for ApiError {
    fn from(e: RenderError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Internal(e.to_string())
    }
}
