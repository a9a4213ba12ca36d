//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::checkout::CheckoutError;
use crate::pricing::responses::ErrorResponse;
use crate::pricing::PricingError;
use crate::validation::FieldErrors;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("Validation error: {0}")]
    Validation(#[from] FieldErrors),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::Pricing(_) => (StatusCode::BAD_REQUEST, "invalid_pricing_input"),
            AppError::Checkout(CheckoutError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, "validation_error")
            }
            AppError::Checkout(CheckoutError::DatesRequired) => {
                (StatusCode::BAD_REQUEST, "dates_required")
            }
            AppError::Checkout(CheckoutError::InvalidTransition { .. }) => {
                (StatusCode::CONFLICT, "invalid_checkout_step")
            }
            AppError::Checkout(CheckoutError::Receipt(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::Template(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();

        let (message, details) = match &self {
            AppError::Template(e) => {
                tracing::error!("Template error: {}", e);
                ("Template error".to_string(), None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ("Internal error".to_string(), None)
            }
            AppError::Checkout(CheckoutError::Receipt(e)) => {
                tracing::error!("Receipt error: {}", e);
                ("Internal error".to_string(), None)
            }
            AppError::Validation(fields) | AppError::Checkout(CheckoutError::Validation(fields)) => {
                (self.to_string(), serde_json::to_value(fields).ok())
            }
            other => (other.to_string(), None),
        };

        let body = ErrorResponse {
            error_type: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
