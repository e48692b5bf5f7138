use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Everything that can go wrong while handling a join request. Each variant
/// carries the exact text shown to the submitter; relay details stay in the
/// `Debug` form for the logs.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Server is not configured to send emails. Please contact the administrator.")]
    Configuration,

    #[error("Please fill in all required fields")]
    MissingFields,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Unable to connect to the email server. Please try again later.")]
    RelayUnavailable(String),

    #[error("Failed to send emails: {0}. Please try again later.")]
    Delivery(String),

    #[error("An unexpected error occurred. Please try again later.")]
    Unexpected(String),
}

impl ResponseError for SubmitError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubmitError::MissingFields | SubmitError::InvalidEmail => StatusCode::BAD_REQUEST,
            SubmitError::Configuration
            | SubmitError::RelayUnavailable(_)
            | SubmitError::Delivery(_)
            | SubmitError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
