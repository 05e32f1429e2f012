//! # Error Handling
//!
//! Request-time errors are surfaced to the caller as short machine-readable
//! JSON bodies of the form `{"error": "..."}`. Configuration errors are fatal
//! at bootstrap and never cross the HTTP boundary.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

/// JSON error response returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiError {
    /// HTTP status code for the response
    #[serde(skip_serializing, skip_deserializing)]
    pub status: StatusCode,
    /// Short machine-readable error message
    #[schema(example = "Invalid floor")]
    pub error: Box<str>,
}

impl ApiError {
    /// Create a new API error with the given status code and message.
    pub fn new<S: Into<String>>(status: StatusCode, error: S) -> Self {
        Self {
            status,
            error: error.into().into_boxed_str(),
        }
    }

    /// A request referenced a floor outside the configured floor set.
    pub fn invalid_floor() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid floor")
    }

    /// A call was attempted outside the configured wall-clock window.
    pub fn outside_operational_hours() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Outside operational hours")
    }

    /// A move was requested while the latest state is not at rest.
    pub fn elevator_busy() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Elevator is busy")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, axum::Json(self)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match rejection {
            JsonRejection::JsonDataError(err) => format!("Invalid JSON: {}", err),
            JsonRejection::JsonSyntaxError(err) => format!("JSON syntax error: {}", err),
            JsonRejection::MissingJsonContentType(_) => {
                "Missing 'Content-Type: application/json' header".to_string()
            }
            _ => "Invalid request body".to_string(),
        };

        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            format!("Invalid query string: {}", rejection.body_text()),
        )
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(error: sea_orm::DbErr) -> Self {
        tracing::error!("Database error: {:?}", error);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
    }
}
