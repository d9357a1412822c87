use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::models::BookingStatus;
use crate::services::scheduling::SchedulingError;

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("{0}")]
    SlotOccupied(#[from] SchedulingError),

    #[error("booking not found: {0}")]
    NotFound(String),

    #[error("a client must be selected for the booking")]
    MissingClient,

    #[error("invalid time {0:?}, expected HH:MM")]
    InvalidTime(String),

    #[error("cannot change booking status from {} to {}", .current.as_str(), .requested.as_str())]
    IllegalTransition {
        current: BookingStatus,
        requested: BookingStatus,
    },

    #[error("cancelling a booking must be explicitly confirmed")]
    ConfirmationRequired,

    #[error("reminders can only be sent for upcoming bookings, this one is {}", .0.as_str())]
    NotRemindable(BookingStatus),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden { redirect: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::Booking(e) => match e {
                BookingError::SlotOccupied(_) => StatusCode::CONFLICT,
                BookingError::NotFound(_) => StatusCode::NOT_FOUND,
                BookingError::MissingClient | BookingError::InvalidTime(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                BookingError::IllegalTransition { .. } | BookingError::NotRemindable(_) => {
                    StatusCode::CONFLICT
                }
                BookingError::ConfirmationRequired => StatusCode::PRECONDITION_REQUIRED,
            },
        };

        let body = match &self {
            AppError::Forbidden { redirect } => {
                serde_json::json!({ "error": self.to_string(), "redirect": redirect })
            }
            _ => serde_json::json!({ "error": self.to_string() }),
        };
        (status, axum::Json(body)).into_response()
    }
}
