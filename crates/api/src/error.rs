//! Error surface of the fixture API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failures a fixture route surfaces to the client.
///
/// Callers branch on the status code, never on the message text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No acceptable credential on a protected route. Carries no further
    /// classification on purpose.
    #[error("Unauthorized")]
    Unauthorized,

    /// A referenced record does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
