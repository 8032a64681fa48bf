use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication errors (401)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Authorization errors (403)
    #[error("Authorization failed: {0}")]
    Authorization(String),

    /// Validation errors (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Schema validation errors with per-field details (400)
    #[error("Validation failed: invalid request body")]
    InvalidInput(#[from] validator::ValidationErrors),

    /// Not found errors (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Too many requests from one client (429)
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Database errors (500 or mapped)
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Cryptographic errors (500)
    #[error("Cryptographic error: {0}")]
    Cryptographic(String),

    /// Internal server errors (500)
    #[error("Internal server error: {0}")]
    Internal(anyhow::Error),
}

impl AppError {
    /// Get HTTP status code for the error
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Authentication(_) => 401,
            AppError::Authorization(_) => 403,
            AppError::Validation(_) | AppError::InvalidInput(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::RateLimited(_) => 429,
            AppError::Database(e) => match e {
                sea_orm::DbErr::RecordNotFound(_) => 404,
                e if is_unique_violation(e) => 409,
                _ => 500,
            },
            AppError::Internal(_) | AppError::Cryptographic(_) => 500,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Authentication(_) => "AUTHENTICATION_FAILED",
            AppError::Authorization(_) => "AUTHORIZATION_FAILED",
            AppError::Validation(_) | AppError::InvalidInput(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) | AppError::Database(sea_orm::DbErr::RecordNotFound(_)) => "NOT_FOUND",
            AppError::RateLimited(_) => "RATE_LIMITED",
            AppError::Database(e) => {
                if is_unique_violation(e) {
                    "CONFLICT"
                } else {
                    "DATABASE_ERROR"
                }
            }
            AppError::Cryptographic(_) => "CRYPTOGRAPHIC_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Field-level details for schema validation failures
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::InvalidInput(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        }
    }

    /// Message safe to return to clients. Database and server-side failures are not described.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Database(sea_orm::DbErr::RecordNotFound(_)) => "Resource not found".to_string(),
            AppError::Database(e) if is_unique_violation(e) => "Resource already exists".to_string(),
            AppError::Database(_) => "Internal server error".to_string(),
            _ if self.status_code() >= 500 => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}

/// JSON body returned for every failed request
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        ErrorResponse {
            error: err.public_message(),
            error_code: err.error_code().to_string(),
            details: err.details(),
        }
    }
}

// Additional From implementations for conversion

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::Authentication(format!("JWT error: {}", err))
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(err: argon2::password_hash::Error) -> Self {
        AppError::Cryptographic(format!("Password hashing error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::Validation(format!("Invalid UUID: {}", err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;
