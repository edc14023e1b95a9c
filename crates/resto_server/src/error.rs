//! HTTP error mapping.
//!
//! Wraps `RestoError` so handlers can use `?`, and renders every failure
//! as `(status, { "message": … })`. Internal errors are logged here and
//! replaced with a generic message so store details never reach clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use resto_core::error::RestoError;

pub struct AppError(pub RestoError);

impl From<RestoError> for AppError {
    fn from(err: RestoError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = match &self.0 {
            RestoError::NotFound(msg)
            | RestoError::InvalidInput(msg)
            | RestoError::Unauthorized(msg)
            | RestoError::Forbidden(msg) => msg.clone(),
            RestoError::BadCredentials => self.0.to_string(),
            RestoError::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                "Server error".to_string()
            }
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
