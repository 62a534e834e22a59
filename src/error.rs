//! Error types for the coupon engine
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::domain::ValidationError;
use crate::models::ErrorResponse;
use crate::repository::StorageError;

// == Coupon Error Enum ==
/// Unified error type for engine operations and HTTP handlers.
///
/// A coupon that does not exist or does not apply is not an error; it is a
/// negative [`ValidationOutcome`](crate::engine::ValidationOutcome).
#[derive(Error, Debug)]
pub enum CouponError {
    /// Coupon creation input violates an invariant
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Repository failure, passed through unchanged
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Repository call exceeded its deadline
    #[error("repository deadline exceeded during {operation}")]
    Timeout { operation: &'static str },

    /// Malformed request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CouponError {
    fn into_response(self) -> Response {
        let status = match &self {
            CouponError::Validation(ValidationError::CodeExists(_)) => StatusCode::CONFLICT,
            CouponError::Validation(_) => StatusCode::BAD_REQUEST,
            CouponError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CouponError::Storage(StorageError::DuplicateCode(_)) => StatusCode::CONFLICT,
            CouponError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CouponError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the coupon engine.
pub type Result<T> = std::result::Result<T, CouponError>;
