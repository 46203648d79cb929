//! Error type shared by the HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::ingest::{ExportError, ParseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Wrong extension or unreadable upload; nothing was parsed.
    #[error("Please upload a valid CSV file: {0}")]
    MalformedFile(String),

    #[error("Failed to process CSV file: {0}")]
    Parse(#[from] ParseError),

    #[error("Failed to export CSV file: {0}")]
    Export(#[from] ExportError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("You must be signed in")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Upload error: {0}")]
    Multipart(#[from] actix_multipart::MultipartError),

    #[error("Background task error: {0}")]
    Task(String),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::MalformedFile(_)
            | ServiceError::Parse(_)
            | ServiceError::BadRequest(_)
            | ServiceError::Multipart(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Export(_) | ServiceError::Database(_) | ServiceError::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(format!("Error: {}", self))
    }
}
