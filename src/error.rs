//! Error types for the seating planner.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::warn;
use thiserror::Error;

/// Errors raised by the seating engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeatingError {
    #[error("Insufficient capacity: {requested} students vs {available} seats")]
    CapacityExceeded { requested: usize, available: usize },

    #[error("No free seat left for student {student_id}")]
    NoFreeSeat { student_id: String },
}

/// Errors raised while reading or validating a roster.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Column '{column}' contains empty values")]
    EmptyValue { column: &'static str },

    #[error("'{column}' column must contain numeric values")]
    NotNumeric { column: &'static str },

    #[error("'Past_Attendance' values must be between 0 and 1")]
    AttendanceOutOfRange,

    #[error("'Attended' values must be 0 or 1")]
    AttendedNotBinary,

    #[error("CSV file must contain at least one row of data")]
    Empty,

    #[error("Invalid file encoding. Please ensure the file is UTF-8 encoded")]
    Encoding,

    #[error("Invalid CSV format: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors raised while rendering exports.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV export failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Seating(#[from] SeatingError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Roster(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Seating(SeatingError::CapacityExceeded { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Seating(SeatingError::NoFreeSeat { .. }) | ApiError::Export(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!("Request failed with {}: {}", status, self);
        (status, self.to_string()).into_response()
    }
}
