//! HTTP API errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    infrastructure::dto::http::{ErrorDto, MessageDto},
    usecase::{CheckInError, CheckOutError, StatusError},
};

pub const VALIDATION_MESSAGE: &str = "User ID, timestamp, latitude, and longitude are required.";
pub const DUPLICATE_CHECK_IN_MESSAGE: &str = "Check-in already recorded for today.";
pub const INVALID_CHECK_OUT_MESSAGE: &str = "Check-out not possible or already done for today.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request fields
    #[error("{0}")]
    Validation(String),

    /// Check-in already done today
    #[error("check-in already recorded for today")]
    DuplicateOperation,

    /// Check-out without a valid prior check-in
    #[error("check-out not possible or already done for today")]
    InvalidState,

    /// Unexpected store failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation() -> Self {
        Self::Validation(VALIDATION_MESSAGE.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(error) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto { error })).into_response()
            }
            ApiError::DuplicateOperation => (
                StatusCode::BAD_REQUEST,
                Json(MessageDto::new(DUPLICATE_CHECK_IN_MESSAGE)),
            )
                .into_response(),
            ApiError::InvalidState => (
                StatusCode::BAD_REQUEST,
                Json(MessageDto::new(INVALID_CHECK_OUT_MESSAGE)),
            )
                .into_response(),
            ApiError::Internal(detail) => {
                tracing::error!("Request failed: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorDto {
                        error: INTERNAL_ERROR_MESSAGE.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<CheckInError> for ApiError {
    fn from(e: CheckInError) -> Self {
        match e {
            CheckInError::AlreadyRecorded => ApiError::DuplicateOperation,
            CheckInError::Internal(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<CheckOutError> for ApiError {
    fn from(e: CheckOutError) -> Self {
        match e {
            CheckOutError::NotCheckedIn | CheckOutError::AlreadyCheckedOut => {
                ApiError::InvalidState
            }
            CheckOutError::Internal(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<StatusError> for ApiError {
    fn from(e: StatusError) -> Self {
        match e {
            StatusError::Internal(detail) => ApiError::Internal(detail),
        }
    }
}
