//! HTTP error responses.
//!
//! Every failure leaves the API as `{"message": ..., "errors": [...]}` with a
//! status code chosen from the core error kind.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fitlog_core::Error;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

/// Error returned by route handlers
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    errors: Vec<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// 400 with the list of failed rules
    pub fn validation(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            errors,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Map a core error, using `context` as the message for input problems
    pub fn from_core(context: &str, err: Error) -> Self {
        match err {
            Error::Validation(errors) => Self::validation(context, errors),
            Error::NotFound { .. } => Self::not_found(err.to_string()),
            Error::DanglingReference { .. } => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            other => {
                tracing::error!("{}: {}", context, other);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, context)
            }
        }
    }

    pub fn bad_json(context: &str, rejection: JsonRejection) -> Self {
        Self::validation(context, vec![rejection.body_text()])
    }

    pub fn bad_query(context: &str, rejection: QueryRejection) -> Self {
        Self::validation(context, vec![rejection.body_text()])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.message,
            errors: self.errors,
        };
        (self.status, Json(body)).into_response()
    }
}
