use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::middleware::RequestId;

/// Errors a payment request can end in.
///
/// The `Display` text of each variant is the `message` clients receive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("missing parameter")]
    MissingParameter,

    #[error("invalid value")]
    InvalidValue,

    #[error("cannot process payment")]
    ProcessingRejected,

    #[error("malformed request body")]
    MalformedBody(String),

    #[error("not found")]
    NotFound,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingParameter | AppError::InvalidValue | AppError::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::ProcessingRejected => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// Failure body shared by every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub result: bool,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            result: false,
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// An [`AppError`] tagged with the request it failed, for log correlation.
#[derive(Debug)]
pub struct AppErrorResponse {
    pub error: AppError,
    pub request_id: RequestId,
}

impl IntoResponse for AppErrorResponse {
    fn into_response(self) -> Response {
        match &self.error {
            AppError::MalformedBody(detail) => {
                tracing::warn!(request_id = %self.request_id.0, detail = %detail, "Rejected malformed body");
            }
            AppError::ProcessingRejected => {
                tracing::info!(request_id = %self.request_id.0, "Payment declined");
            }
            error => {
                tracing::debug!(request_id = %self.request_id.0, error = %error, "Payment request rejected");
            }
        }

        self.error.into_response()
    }
}

pub trait ResultExt<T> {
    fn with_request_id(self, request_id: &RequestId) -> Result<T, AppErrorResponse>;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn with_request_id(self, request_id: &RequestId) -> Result<T, AppErrorResponse> {
        self.map_err(|error| AppErrorResponse {
            error,
            request_id: request_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(AppError::MissingParameter.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidValue.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::MalformedBody("eof".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::ProcessingRejected.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn messages_are_client_facing() {
        assert_eq!(AppError::MissingParameter.to_string(), "missing parameter");
        assert_eq!(AppError::InvalidValue.to_string(), "invalid value");
        assert_eq!(AppError::ProcessingRejected.to_string(), "cannot process payment");
        // Decoder detail stays in the logs
        assert_eq!(
            AppError::MalformedBody("expected value at line 1".into()).to_string(),
            "malformed request body"
        );
    }

    #[test]
    fn with_request_id_keeps_error() {
        let request_id = RequestId(uuid::Uuid::new_v4());
        let result: Result<(), AppError> = Err(AppError::InvalidValue);
        let err = result.with_request_id(&request_id).unwrap_err();
        assert_eq!(err.error, AppError::InvalidValue);
        assert_eq!(err.request_id.0, request_id.0);
    }
}
