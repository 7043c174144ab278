use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::{
    dao::storage::StorageError,
    state::{activity::ActivityBusy, teams::TeamError, wheel::WheelError},
};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage backend is unavailable.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
    /// Invalid input provided by the client.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The request is well formed but cannot run yet (e.g. fewer players than teams).
    #[error("precondition failed: {0}")]
    Precondition(String),
    /// Operation cannot be performed in the current state.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// Another run of the same activity is in flight.
    #[error("busy: {0}")]
    Busy(String),
    /// Requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Unavailable(err)
    }
}

impl From<TeamError> for ServiceError {
    fn from(err: TeamError) -> Self {
        match err {
            TeamError::InvalidConfiguration(_) => ServiceError::InvalidInput(err.to_string()),
            TeamError::IndexOutOfRange { .. } => ServiceError::NotFound(err.to_string()),
            TeamError::InsufficientInput { .. } => ServiceError::Precondition(err.to_string()),
        }
    }
}

impl From<WheelError> for ServiceError {
    fn from(err: WheelError) -> Self {
        match err {
            WheelError::InvalidConfiguration(_) => ServiceError::InvalidState(err.to_string()),
            WheelError::IndexOutOfRange { .. } => ServiceError::NotFound(err.to_string()),
            WheelError::EmptyName => ServiceError::InvalidInput(err.to_string()),
        }
    }
}

impl From<ActivityBusy> for ServiceError {
    fn from(err: ActivityBusy) -> Self {
        ServiceError::Busy(err.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::BadRequest(format!("validation failed: {}", err))
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Conflict with current state.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Request understood but blocked by a precondition.
    #[error("unprocessable: {0}")]
    Unprocessable(String),
    /// Service unavailable or degraded.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unavailable(source) => AppError::ServiceUnavailable(source.to_string()),
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
            ServiceError::Precondition(message) => AppError::Unprocessable(message),
            ServiceError::InvalidState(message) => AppError::Conflict(message),
            ServiceError::Busy(message) => AppError::Conflict(message),
            ServiceError::NotFound(message) => AppError::NotFound(message),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}
