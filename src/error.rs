use chrono::{DateTime, FixedOffset};

/// Stable machine-readable error codes exposed to API clients.
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const AUTH_TOKEN_REQUIRED: &str = "AUTH_TOKEN_REQUIRED";
    pub const AUTH_TOKEN_INVALID: &str = "AUTH_TOKEN_INVALID";
    pub const INSUFFICIENT_PRIVILEGES: &str = "INSUFFICIENT_PRIVILEGES";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const ACCOUNT_LOCKED: &str = "ACCOUNT_LOCKED";
    pub const REFRESH_TOKEN_REQUIRED: &str = "REFRESH_TOKEN_REQUIRED";
    pub const INVALID_REFRESH_TOKEN: &str = "INVALID_REFRESH_TOKEN";
    pub const INVALID_TOKEN_TYPE: &str = "INVALID_TOKEN_TYPE";
    pub const INVALID_SESSION: &str = "INVALID_SESSION";
    pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const RATE_LIMITED: &str = "RATE_LIMITED";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// A single field-level validation failure, echoed back in the `errors`
/// array of a 400 response.
#[derive(Debug, Clone, serde::Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    Validation {
        errors: Vec<FieldError>,
    },
    BadRequest {
        code: &'static str,
        message: String,
    },
    Unauthorized {
        code: &'static str,
        message: String,
        details: Option<serde_json::Value>,
    },
    Forbidden {
        message: String,
    },
    NotFound {
        code: &'static str,
        message: String,
    },
    Locked {
        locked_until: DateTime<FixedOffset>,
    },
    TooManyRequests {
        message: String,
    },
    Internal {
        message: String,
    },
}

impl AppError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation { errors }
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn unauthorized_with(
        code: &'static str,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self::Unauthorized {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            message: message.into(),
        }
    }

    pub fn locked(locked_until: DateTime<FixedOffset>) -> Self {
        Self::Locked { locked_until }
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::TooManyRequests {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Internal error that keeps the underlying cause out of the client
    /// response but preserves it in the logs.
    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl std::fmt::Display,
    ) -> Self {
        let message = message.into();
        tracing::error!(error = %source, "{message}");
        Self::Internal { message }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => codes::VALIDATION_ERROR,
            Self::BadRequest { code, .. }
            | Self::Unauthorized { code, .. }
            | Self::NotFound { code, .. } => code,
            Self::Forbidden { .. } => codes::INSUFFICIENT_PRIVILEGES,
            Self::Locked { .. } => codes::ACCOUNT_LOCKED,
            Self::TooManyRequests { .. } => codes::RATE_LIMITED,
            Self::Internal { .. } => codes::INTERNAL_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Validation { .. } => "Validation failed".to_string(),
            Self::BadRequest { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::Forbidden { message }
            | Self::NotFound { message, .. }
            | Self::TooManyRequests { message }
            | Self::Internal { message } => message.clone(),
            Self::Locked { locked_until } => {
                format!("Account locked until {}", locked_until.to_rfc3339())
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<crate::db::dao::DaoLayerError> for AppError {
    fn from(err: crate::db::dao::DaoLayerError) -> Self {
        match err {
            crate::db::dao::DaoLayerError::NotFound { .. } => {
                AppError::not_found(codes::NOT_FOUND, err.to_string())
            }
            crate::db::dao::DaoLayerError::InvalidPagination { .. } => {
                AppError::bad_request(codes::VALIDATION_ERROR, err.to_string())
            }
            crate::db::dao::DaoLayerError::Db(db_err) => AppError::internal_with_source(
                "Database operation failed. Please check the logs for more details",
                db_err,
            ),
        }
    }
}
