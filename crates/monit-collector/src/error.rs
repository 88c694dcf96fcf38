//! Error types for monit-collector

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use monit_core::DecodeError;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Daemon-level errors
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server startup error
    #[error("Server error: {0}")]
    Server(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A notification was not handed to the consumer
#[derive(Debug, Error)]
pub enum CollectError {
    /// Body is not a valid notification
    #[error("Invalid notification: {0}")]
    Decode(#[from] DecodeError),

    /// Consumer did not free a queue slot in time
    #[error("Consumer did not accept the notification within {0:?}")]
    PublishTimeout(Duration),

    /// Consumer side of the queue is gone
    #[error("Notification queue is closed")]
    QueueClosed,
}

/// API-specific errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Collect(#[from] CollectError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Collect(CollectError::Decode(_)) => (StatusCode::BAD_REQUEST, "DECODE_ERROR"),
            ApiError::Collect(CollectError::PublishTimeout(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "QUEUE_TIMEOUT")
            }
            ApiError::Collect(CollectError::QueueClosed) => {
                (StatusCode::SERVICE_UNAVAILABLE, "QUEUE_CLOSED")
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for collector operations
pub type CollectResult<T> = Result<T, CollectError>;

/// Result type alias for daemon operations
pub type DaemonResult<T> = Result<T, DaemonError>;
