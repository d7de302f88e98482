use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::estimator::{ErrorKind, EstimatorError};

/// API error types that can be returned from handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {message}")]
    ValidationError {
        message: String,
        details: Option<String>,
    },

    #[error(transparent)]
    Estimator(#[from] EstimatorError),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// Error response that gets serialized to JSON
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Offending field, when one can be named
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn validation(message: impl Into<String>, field: &str) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            details: Some(field.to_string()),
        }
    }

    /// Get the HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::Estimator(e) => match e.kind() {
                ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
                ErrorKind::InsufficientData | ErrorKind::InvalidResult => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
            },
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    fn error_type(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NotFound",
            ApiError::ValidationError { .. } => "ValidationError",
            ApiError::Estimator(e) => match e.kind() {
                ErrorKind::InvalidInput => "InvalidInput",
                ErrorKind::InsufficientData => "InsufficientData",
                ErrorKind::InvalidResult => "InvalidResult",
            },
            ApiError::InternalError(_) => "InternalServerError",
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            ApiError::ValidationError { details, .. } => details.clone(),
            ApiError::Estimator(e) => e.field().map(str::to_string),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            ApiError::InternalError(_) => {
                tracing::error!(error = %self, "API error occurred");
                "An internal error occurred".to_string()
            }
            _ => {
                tracing::debug!(error = %self, "Client error");
                self.to_string()
            }
        };

        let error_response = ErrorResponse {
            error: self.error_type().to_string(),
            message,
            details: self.details(),
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::InternalError(error.to_string())
    }
}

/// First failing leaf field, looking through nested structs and lists
fn first_invalid_field(errors: &ValidationErrors) -> Option<String> {
    errors.errors().iter().find_map(|(field, kind)| match kind {
        ValidationErrorsKind::Field(_) => Some(field.to_string()),
        ValidationErrorsKind::Struct(inner) => first_invalid_field(inner),
        ValidationErrorsKind::List(items) => items.values().find_map(|e| first_invalid_field(e)),
    })
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::ValidationError {
            message: errors.to_string(),
            details: first_invalid_field(&errors),
        }
    }
}
