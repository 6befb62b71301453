//! Success envelope for HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// The uniform success envelope.
///
/// Every successful response carries the HTTP status, the payload under
/// `data`, a human-readable message and `success: true`. Handlers return
/// this directly; it implements `IntoResponse` with the matching status
/// line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub data: T,
    pub message: String,
    pub success: bool,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wraps a payload with an explicit status and message.
    ///
    /// The code is validated here so the body's `statusCode` and the wire
    /// status line can never disagree; anything unrepresentable falls back
    /// to 500.
    pub fn new(status_code: u16, data: T, message: impl Into<String>) -> Self {
        let status =
            StatusCode::from_u16(status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        Self {
            status_code: status.as_u16(),
            data,
            message: message.into(),
            success: true,
        }
    }

    /// 200 envelope with the default message.
    pub fn ok(data: T) -> Self {
        Self::new(200, data, "success")
    }

    /// 201 envelope for newly created resources.
    pub fn created(data: T) -> Self {
        Self::new(201, data, "created")
    }

    /// Replaces the message, keeping status and payload.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self)).into_response()
    }
}
