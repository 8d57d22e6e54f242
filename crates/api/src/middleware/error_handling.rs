//! # Error Handling Middleware
//!
//! Maps domain errors from the reservation store and the validation layer to HTTP
//! responses, so every handler reports failures the same way.
//!
//! | Error             | Status | Body                       |
//! |-------------------|--------|----------------------------|
//! | `Validation`      | 400    | envelope, request echoed   |
//! | `Conflict`        | 409    | none                       |
//! | `NotFound`        | 404    | envelope                   |
//! | `NotFoundForRoom` | 204    | none                       |
//! | `Cancelled`       | 500    | envelope                   |
//! | `Database`        | 500    | envelope                   |

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roombook_core::errors::BookingError;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::response::Envelope;

/// Application error wrapper that provides HTTP status code mapping
///
/// `data` is echoed back in the response envelope; handlers attach the decoded
/// request to validation failures so the client can see what was received.
#[derive(Debug)]
pub struct AppError {
    pub error: BookingError,
    pub data: Option<Value>,
}

impl AppError {
    pub fn with_data<T: Serialize>(error: BookingError, data: &T) -> Self {
        Self {
            error,
            data: serde_json::to_value(data).ok(),
        }
    }

    /// A body that could not be decoded is a validation failure.
    pub fn from_rejection(rejection: JsonRejection) -> Self {
        AppError::from(BookingError::Validation(rejection.body_text()))
    }
}

pub fn status_for(error: &BookingError) -> StatusCode {
    match error {
        BookingError::Validation(_) => StatusCode::BAD_REQUEST,
        BookingError::Conflict => StatusCode::CONFLICT,
        BookingError::NotFound(_) => StatusCode::NOT_FOUND,
        BookingError::NotFoundForRoom(_) => StatusCode::NO_CONTENT,
        BookingError::Cancelled(_) | BookingError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self.error);

        if self.error.is_client_error() {
            debug!(status = status.as_u16(), error = %self.error, "request rejected");
        } else {
            error!(status = status.as_u16(), error = ?self.error, "request failed");
        }

        let message = match self.error {
            BookingError::Conflict | BookingError::NotFoundForRoom(_) => {
                return status.into_response();
            }
            BookingError::Validation(reason) => reason,
            other => other.to_string(),
        };

        let body = Json(Envelope::failure(message, self.data));
        (status, body).into_response()
    }
}

/// Allows `?` on `BookingResult` inside handlers.
impl From<BookingError> for AppError {
    fn from(error: BookingError) -> Self {
        AppError { error, data: None }
    }
}

/// Maps a BookingError to an HTTP response
pub fn map_error(err: BookingError) -> Response {
    AppError::from(err).into_response()
}
