//! Failure envelope and the centralized error-to-response boundary.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use crudlayer_core::error::AppError;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

/// Wrapper that renders an [`AppError`] as the uniform failure envelope.
///
/// Operational errors render their own status, name, message and details.
/// Anything non-operational is a defect: the original error is logged with
/// full detail and the client sees a generic 500 with nothing internal in
/// the body.
#[derive(Debug)]
pub struct ApiError(pub AppError);

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    name: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl ApiError {
    fn body(name: &'static str, message: String, details: Option<Value>) -> ErrorBody {
        ErrorBody {
            success: false,
            error: ErrorDetail { name, message, details },
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if !self.0.is_operational() {
            error!(error = %self.0, detail = ?self.0, "unhandled internal error");

            let body = Self::body("API_ERROR", "internal server error".to_string(), None);
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
        }

        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            warn!(error = %self.0, "request failed");
        }

        let body = Self::body(self.0.name(), self.0.to_string(), self.0.details());

        (status, Json(body)).into_response()
    }
}
