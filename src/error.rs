use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    ValidationError(String),

    #[error("Tool catalog error: {0}")]
    CatalogError(String),
}

/// Failure to obtain a taxonomy document.
///
/// Returned by [`crate::taxonomy::TaxonomyCatalog::load`]. Callers that must
/// always end up with a usable schema go through `load_or_fallback`, which
/// swaps in the built-in schema on any of these variants.
#[derive(Error, Debug)]
pub enum TaxonomyLoadError {
    #[error("no taxonomy source configured")]
    MissingSource,

    #[error("failed to read taxonomy file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch taxonomy: {0}")]
    Http(String),

    #[error("failed to parse taxonomy document: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::ValidationError(msg) => {
                tracing::warn!(error = %msg, "Validation error");
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::CatalogError(msg) => {
                tracing::error!(error = %msg, "Catalog error");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for TaxonomyLoadError {
    fn from(err: reqwest::Error) -> Self {
        TaxonomyLoadError::Http(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
