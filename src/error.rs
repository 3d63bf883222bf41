//!
//! # Custom Error Handling
//!
//! This module defines the `AppError` type used throughout the application.
//! Every component returns it, usually through `?`, and Actix converts it
//! into an HTTP response via the `ResponseError` implementation below.
//!
//! Expected, user-visible outcomes (duplicate registration, bad credentials,
//! missing or insufficient authorization, unknown ids) carry their message
//! straight to the client. Infrastructure failures (database, hashing,
//! store timeouts) are logged server-side and answered with a generic body
//! so internal details never reach the caller.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all failure modes the API can produce.
#[derive(Debug)]
pub enum AppError {
    /// Registration against an email that already has an account (HTTP 400).
    AlreadyExists(String),
    /// Login with an unknown email or a wrong password (HTTP 401). Both
    /// collapse into this single variant so responses cannot be used to
    /// probe which accounts exist.
    InvalidCredentials,
    /// Missing, malformed, or unverifiable bearer token (HTTP 401).
    Unauthorized(String),
    /// Authenticated but lacking the required role (HTTP 403).
    Forbidden(String),
    /// A path identifier that is not valid identifier syntax (HTTP 400).
    /// Distinct from `NotFound`, which means well-formed but absent.
    InvalidId(String),
    /// A requested record does not exist (HTTP 404).
    NotFound(String),
    /// A store call exceeded its time bound (HTTP 504).
    Timeout,
    /// Password hashing or verification machinery failed (HTTP 500).
    Hashing(String),
    /// An error from the backing store (HTTP 500).
    Database(String),
    /// Request payload failed validation rules (HTTP 422).
    Validation(String),
    /// Any other unexpected server-side error (HTTP 500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::AlreadyExists(msg) => write!(f, "Already Exists: {}", msg),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::InvalidId(msg) => write!(f, "Invalid Id: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Timeout => write!(f, "Store operation timed out"),
            AppError::Hashing(msg) => write!(f, "Hashing Error: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::AlreadyExists(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::InvalidCredentials => HttpResponse::Unauthorized().json(json!({
                "error": "Invalid credentials"
            })),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(json!({
                "error": msg
            })),
            AppError::InvalidId(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            AppError::Timeout => {
                log::error!("store operation exceeded its time bound");
                HttpResponse::GatewayTimeout().json(json!({
                    "error": "Storage timed out"
                }))
            }
            AppError::Hashing(msg) => {
                log::error!("hashing failure: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal server error"
                }))
            }
            AppError::Database(msg) => {
                log::error!("database error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal server error"
                }))
            }
            AppError::Validation(msg) => HttpResponse::UnprocessableEntity().json(json!({
                "error": msg
            })),
            AppError::Internal(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal server error"
                }))
            }
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` maps to `NotFound`; everything else is a store failure.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::Database(error.to_string()),
        }
    }
}

/// A store future outliving its time bound surfaces as `Timeout`.
impl From<tokio::time::error::Elapsed> for AppError {
    fn from(_: tokio::time::error::Elapsed) -> AppError {
        AppError::Timeout
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// JWT processing failures (bad signature, wrong algorithm, expired token)
/// all mean the caller is not authenticated.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {}", error))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Hashing(error.to_string())
    }
}
