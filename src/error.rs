//!
//! # Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management, providing a consistent way to
//! represent every failure a request can hit, from validation problems to
//! ownership violations to unexpected server-side faults.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers can
//! return it directly and have it rendered as an HTTP response whose JSON body
//! always carries the same two fields: a stable machine-readable `code` and a
//! human-readable `message`. Internal errors are the one exception to message
//! transparency: their detail is logged server-side and the client receives a
//! generic message instead.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::auth::token::TokenError;

/// Represents all possible errors that can occur within the application.
///
/// Each variant maps to exactly one HTTP status code and one stable error
/// code, so clients can switch on `code` without parsing messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// A malformed or invalid request body or field (HTTP 400).
    Validation(String),
    /// Authentication is missing, expired, revoked, or wrong (HTTP 401).
    Unauthorized(String),
    /// The caller is authenticated but does not own the resource (HTTP 403).
    Forbidden(String),
    /// The requested resource does not exist (HTTP 404).
    NotFound(String),
    /// The request conflicts with existing state, e.g. a taken email (HTTP 409).
    Conflict(String),
    /// An unexpected server-side error (HTTP 500). The message is logged but
    /// never sent to the client.
    Internal(String),
}

impl AppError {
    /// The stable error code rendered in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// This implementation allows Actix Web to automatically translate `AppError`
/// results from handlers into the correct HTTP status codes and JSON error
/// bodies of the form `{"code": ..., "message": ...}`.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let code = self.code();
        match self {
            AppError::Validation(msg) => HttpResponse::BadRequest().json(json!({
                "code": code,
                "message": msg
            })),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "code": code,
                "message": msg
            })),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(json!({
                "code": code,
                "message": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "code": code,
                "message": msg
            })),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(json!({
                "code": code,
                "message": msg
            })),
            // The detail stays in the server log; the client gets a fixed message.
            AppError::Internal(msg) => {
                log::error!("internal server error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "code": code,
                    "message": "internal server error"
                }))
            }
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::Validation`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// Converts `TokenError` into `AppError`.
///
/// Every verification failure becomes `Unauthorized` with the token error's
/// own wording; only issuance failures are server faults.
impl From<TokenError> for AppError {
    fn from(error: TokenError) -> AppError {
        match error {
            TokenError::Creation(msg) => {
                AppError::Internal(format!("token creation failed: {}", msg))
            }
            other => AppError::Unauthorized(other.to_string()),
        }
    }
}
