//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`hlshost_core::Error`] so that route
//! handlers can return `Result<T, AppError>` and use `?` on core results.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError {
    inner: hlshost_core::Error,
}

impl AppError {
    pub fn new(inner: hlshost_core::Error) -> Self {
        Self { inner }
    }
}

impl From<hlshost_core::Error> for AppError {
    fn from(e: hlshost_core::Error) -> Self {
        Self::new(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                "Server error in request handler"
            );
        }

        let code = match &self.inner {
            hlshost_core::Error::NotFound { .. } => "not_found",
            hlshost_core::Error::Validation(_) => "validation_error",
            hlshost_core::Error::UnsupportedContainer { .. } => "unsupported_container",
            hlshost_core::Error::Read { .. } => "read_error",
            hlshost_core::Error::Parse { .. } => "parse_error",
            hlshost_core::Error::Io { .. } => "io_error",
            hlshost_core::Error::Internal(_) => "internal_error",
        };

        let body = json!({
            "error": self.inner.to_string(),
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
