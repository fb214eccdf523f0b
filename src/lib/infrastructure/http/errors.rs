//! API response and error-handling module

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::{communication::mailer::MailerError, contact::ValidationErrors};

/// Outcome reported in every response body
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The message was sent
    Success,

    /// Something went wrong, see `message`
    Error,
}

/// The JSON body of every response
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ContactResponse {
    /// Whether the request succeeded
    pub status: Status,

    /// A human-readable description of the outcome
    #[schema(example = "Message sent successfully")]
    pub message: String,

    /// Validation messages keyed by field, only present on 422 responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>, example = json!({"email": ["The email must be a valid email address"]}))]
    pub errors: Option<ValidationErrors>,
}

impl ContactResponse {
    /// A successful response
    pub fn success(message: &str) -> Self {
        Self {
            status: Status::Success,
            message: message.to_string(),
            errors: None,
        }
    }

    /// An error response
    pub fn error(message: &str) -> Self {
        Self {
            status: Status::Error,
            message: message.to_string(),
            errors: None,
        }
    }
}

/// An error raised while handling a submission
#[derive(Debug, Error)]
pub enum ContactError {
    /// The request used a method other than POST
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// No route matched
    #[error("Not found")]
    NotFound,

    /// The body could not be read
    #[error("{message}")]
    Rejected {
        /// Status chosen by the extractor
        status: StatusCode,

        /// Explanation from the extractor
        message: String,
    },

    /// One or more fields failed validation
    #[error("The given data was invalid.")]
    Validation(ValidationErrors),

    /// The mailer could not deliver the message
    #[error("Failed to send message: {0}")]
    Delivery(#[from] MailerError),
}

impl ContactError {
    /// The status code this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            ContactError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ContactError::NotFound => StatusCode::NOT_FOUND,
            ContactError::Rejected { status, .. } => *status,
            ContactError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ContactError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = ContactResponse::error(&self.to_string());

        if let ContactError::Validation(errors) = self {
            body.errors = Some(errors);
        }

        (status, Json(body)).into_response()
    }
}

impl From<BytesRejection> for ContactError {
    fn from(rejection: BytesRejection) -> Self {
        ContactError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}
