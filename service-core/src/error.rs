use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Service Unavailable")]
    ServiceUnavailable,

    #[error("Database error: {0}")]
    DatabaseError(anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(anyhow::Error::new(err))
    }
}

/// Message returned for every rejected create request.
pub const VALIDATION_MESSAGE: &str = "All fields are required";

/// Message returned for every failure the caller cannot act on.
pub const SERVER_ERROR_MESSAGE: &str = "Server Error";

#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<BTreeMap<String, String>>,
}

/// Flattens validator errors into `field -> first message`.
pub fn field_messages(errors: &validator::ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            let message = errs.first().map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })?;
            Some((field.to_string(), message))
        })
        .collect()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::ValidationError(err) => (
                StatusCode::BAD_REQUEST,
                VALIDATION_MESSAGE.to_string(),
                Some(field_messages(&err)),
            ),
            AppError::BadRequest(err) => (StatusCode::BAD_REQUEST, err.to_string(), None),
            AppError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string(), None),
            AppError::ServiceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Service unavailable".to_string(),
                None,
            ),
            AppError::InternalError(err) => {
                tracing::error!(error = ?err, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SERVER_ERROR_MESSAGE.to_string(),
                    None,
                )
            }
            AppError::DatabaseError(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SERVER_ERROR_MESSAGE.to_string(),
                    None,
                )
            }
            AppError::ConfigError(err) => {
                tracing::error!(error = %err, "Configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SERVER_ERROR_MESSAGE.to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorResponse { message, errors })).into_response()
    }
}
