use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

/// JSON body returned for every failed request.
///
/// The `error` field is a stable machine-readable code (`missing_code`,
/// `not_found`, `campaign_not_configured`, `invalid`, ...) consumed by the
/// storefront SDK and the panel UI. `details` is free-form diagnostic data.
#[derive(Serialize)]
struct ErrorBody {
    ok: bool,
    error: &'static str,
    #[serde(skip_serializing_if = "Value::is_null")]
    details: Value,
}

#[derive(Debug, Clone)]
pub enum AppError {
    Validation {
        code: &'static str,
        message: String,
        details: Value,
    },
    NotFound {
        code: &'static str,
        message: String,
        details: Value,
    },
    /// The entity exists but is missing configuration required to serve the
    /// request (e.g. a campaign with no shop domain). Maps to 400.
    Configuration {
        code: &'static str,
        message: String,
        details: Value,
    },
    Conflict {
        code: &'static str,
        message: String,
        details: Value,
    },
    Unauthorized {
        message: String,
        details: Value,
    },
    Internal {
        message: String,
        details: Value,
    },
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            code,
            message: message.into(),
            details,
        }
    }

    pub fn not_found(code: &'static str, message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            code,
            message: message.into(),
            details,
        }
    }

    pub fn not_configured(code: &'static str, message: impl Into<String>, details: Value) -> Self {
        Self::Configuration {
            code,
            message: message.into(),
            details,
        }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Stable error code exposed in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { code, .. }
            | Self::NotFound { code, .. }
            | Self::Configuration { code, .. }
            | Self::Conflict { code, .. } => code,
            Self::Unauthorized { .. } => "unauthorized",
            Self::Internal { .. } => "internal_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::Configuration { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::Validation { message, .. }
            | Self::NotFound { message, .. }
            | Self::Configuration { message, .. }
            | Self::Conflict { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::Internal { message, .. } => message,
        };
        write!(f, "{}: {}", self.code(), message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let details = match self {
            Self::Validation { details, .. }
            | Self::NotFound { details, .. }
            | Self::Configuration { details, .. }
            | Self::Conflict { details, .. }
            | Self::Unauthorized { details, .. } => details,
            // Internal details stay in the logs, not in the response.
            Self::Internal { message, details } => {
                tracing::error!(%message, %details, "internal error");
                Value::Null
            }
        };

        let body = ErrorBody {
            ok: false,
            error: code,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "invalid",
            "Request validation failed",
            serde_json::to_value(&e).unwrap_or(Value::Null),
        )
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return AppError::conflict(
                    "conflict",
                    "Unique constraint violation",
                    json!({ "constraint": db.constraint() }),
                );
            }
        }

        tracing::error!(error = %e, "database error");
        AppError::internal("Database error", json!({}))
    }
}
