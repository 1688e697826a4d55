use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::error::AppError;

pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Error body shared by every failing endpoint:
/// `{"success": false, "message", "code"}` plus variant-specific extras
/// (`errors` for validation, `locked_until` for lockouts, and so on).
pub fn error_body(err: &AppError) -> Value {
    let mut body = json!({
        "success": false,
        "message": err.message(),
        "code": err.code(),
    });

    let Some(extras) = body.as_object_mut() else {
        return body;
    };
    match err {
        AppError::Validation { errors } => {
            extras.insert(
                "errors".to_string(),
                serde_json::to_value(errors).unwrap_or(Value::Null),
            );
        }
        AppError::Locked { locked_until } => {
            extras.insert(
                "locked_until".to_string(),
                Value::String(locked_until.to_rfc3339()),
            );
        }
        AppError::Unauthorized {
            details: Some(details),
            ..
        } => {
            if let Some(map) = details.as_object() {
                for (key, value) in map {
                    extras.insert(key.clone(), value.clone());
                }
            }
        }
        _ => {}
    }

    body
}

pub fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Locked { .. } => StatusCode::LOCKED,
        AppError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn log_app_error(err: &AppError, status: StatusCode) {
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), code = err.code(), "{}", err.message());
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        log_app_error(&self, status);
        (status, Json(error_body(&self))).into_response()
    }
}
