//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every handler returns `Result<_, AppError>`, and the variants map one-to-one onto the
//! HTTP status codes the API exposes.
//!
//! `AppError` implements `actix_web::error::ResponseError` so errors become JSON
//! responses of the form `{"detail": "..."}`. Server-side failures are logged with their
//! detail and reported to the client with a generic message only.

use actix_web::{
    error::{BlockingError, ResponseError},
    http::{header, StatusCode},
    HttpResponse,
};
use serde_json::json;
use validator::ValidationErrors;

/// Message returned for every authentication failure, whatever the underlying cause.
pub const UNAUTHENTICATED_DETAIL: &str = "Could not validate credentials";

/// Represents all possible errors that can occur within the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or invalid input (HTTP 400).
    #[error("{0}")]
    Validation(String),

    /// Registration with an email that is already taken (HTTP 400).
    #[error("Email already registered")]
    DuplicateEmail,

    /// Login with an unknown email or a wrong password (HTTP 400).
    #[error("Incorrect credentials")]
    InvalidCredentials,

    /// Missing, malformed, expired or otherwise unusable bearer token, or a token whose
    /// subject no longer exists (HTTP 401 with a bearer challenge).
    #[error("Could not validate credentials")]
    Unauthenticated,

    /// The resource does not exist or is not owned by the caller (HTTP 404).
    #[error("{0}")]
    NotFound(String),

    /// A store failure (HTTP 500).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Any other unexpected server-side failure (HTTP 500).
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn task_not_found() -> Self {
        AppError::NotFound("Task not found".into())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::DuplicateEmail | AppError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthenticated => HttpResponse::Unauthorized()
                .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
                .json(json!({ "detail": UNAUTHENTICATED_DETAIL })),
            AppError::Database(_) | AppError::Internal(_) => {
                log::error!("{}", self);
                HttpResponse::InternalServerError().json(json!({
                    "detail": "Internal server error"
                }))
            }
            _ => HttpResponse::build(self.status_code()).json(json!({
                "detail": self.to_string()
            })),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::Validation`.
///
/// Only field names and rule codes make it into the message. The rejected values do not,
/// since they may be credentials.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let codes: Vec<&str> = errs.iter().map(|e| e.code.as_ref()).collect();
                format!("{}: {}", field, codes.join(", "))
            })
            .collect();
        fields.sort();
        AppError::Validation(fields.join("; "))
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::Internal`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(format!("password hashing failed: {}", error))
    }
}

/// Raised when a `web::block` closure panicked or the blocking pool is gone.
impl From<BlockingError> for AppError {
    fn from(error: BlockingError) -> AppError {
        AppError::Internal(error.to_string())
    }
}
