//!
//! # Custom Error Handling
//!
//! This module defines the error type `AppError` used throughout the
//! application. It implements `actix_web::error::ResponseError` so handlers
//! can return `Result<_, AppError>` and have failures converted into JSON
//! responses of the form `{"message": "..."}` with the right status code.
//!
//! Two taxonomy rules are enforced here rather than at each call site:
//! a failed login never reveals whether the username or the password was
//! wrong (`InvalidCredentials` carries one fixed message), and a rejected
//! token never reveals which verification check failed (`Unauthorized`
//! carries one fixed message regardless of missing/malformed/expired/
//! bad-signature). Internal failures are logged server-side and presented
//! to the client as a generic 500 body.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use log::error;
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed request fields, or a duplicate username at
    /// registration (HTTP 400).
    BadRequest(String),
    /// Failed login. Deliberately carries no detail: unknown username and
    /// wrong password are indistinguishable to the client (HTTP 400).
    InvalidCredentials,
    /// Missing, malformed, expired, or otherwise invalid token (HTTP 401).
    /// Deliberately one generic message for all of these.
    Unauthorized,
    /// Authenticated, but not the owner of the addressed resource (HTTP 403).
    Forbidden,
    /// The addressed resource does not exist (HTTP 404).
    NotFound(String),
    /// Unexpected store or hasher failure (HTTP 500). The detail is logged,
    /// never sent to the client.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::Unauthorized => write!(f, "Invalid or missing token"),
            AppError::Forbidden => write!(f, "Not authorized"),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Internal(detail) => write!(f, "Internal error: {}", detail),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::BadRequest(msg) => msg.clone(),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::Unauthorized => "Invalid or missing token".to_string(),
            AppError::Forbidden => "Not authorized".to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Internal(detail) => {
                error!("internal error: {}", detail);
                "Server error".to_string()
            }
        };
        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}

/// `RowNotFound` maps to 404; every other database error is an opaque 500.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::Internal(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::BadRequest(error.to_string())
    }
}

/// JWT processing failures all collapse into the generic 401.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(_: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}
