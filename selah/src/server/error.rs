//! Request-boundary error mapping. Every failure leaves as `{error, details?}`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use schat::{ChatError, ChatErrorKind};
use serde::Serialize;
use sprogram::{ProgramError, ProgramErrorKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<ChatError> for ApiError {
    fn from(value: ChatError) -> Self {
        let status = match value.kind {
            ChatErrorKind::Validation => StatusCode::BAD_REQUEST,
            ChatErrorKind::Provider => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: value.message,
            details: value.detail,
        }
    }
}

impl From<ProgramError> for ApiError {
    fn from(value: ProgramError) -> Self {
        match value.kind {
            ProgramErrorKind::Validation => Self::bad_request(value.message),
            ProgramErrorKind::NotFound => Self::not_found(value.message),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::bad_request("Invalid JSON body").with_details(value.body_text())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        Self::internal("Failed to encode response").with_details(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                phase = "http",
                status = self.status.as_u16(),
                error = %self.message,
                details = self.details.as_deref().unwrap_or_default()
            );
        } else {
            tracing::warn!(
                phase = "http",
                status = self.status.as_u16(),
                error = %self.message
            );
        }

        let body = ErrorBody {
            error: &self.message,
            details: self.details.as_deref(),
        };
        (self.status, Json(body)).into_response()
    }
}
