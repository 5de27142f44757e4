use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures while reading the catalog file. All of them are fatal at startup.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Column '{column}' has {found} rows, expected {expected}")]
    Misaligned {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid value in column '{column}' at row {row}: {reason}")]
    InvalidValue {
        column: String,
        row: String,
        reason: String,
    },

    #[error("Catalog contains no movies")]
    Empty,
}

/// Failures while building the similarity engine
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum EngineError {
    #[error("Empty vocabulary: every document is empty or contains only stop words")]
    EmptyVocabulary,

    #[error("Cannot build an engine over an empty catalog")]
    EmptyCatalog,

    #[error("Invalid engine option: {0}")]
    InvalidOption(String),
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Catalog(_)
            | AppError::Engine(_)
            | AppError::Template(_)
            | AppError::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
