//! Mailer errors

use lettre::{address::AddressError, error::Error};
use thiserror::Error;

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// The message has nobody to go to
    #[error("no valid recipients are configured")]
    NoRecipients,

    /// An address was rejected while building the message
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The transport did not finish in time
    #[error("timed out after {0} seconds")]
    Timeout(u64),

    /// The transport refused or failed to deliver the message
    #[error("{0}")]
    Transport(String),

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<anyhow::Error> for MailerError {
    fn from(err: anyhow::Error) -> Self {
        MailerError::UnknownError(err)
    }
}

impl From<AddressError> for MailerError {
    fn from(err: AddressError) -> Self {
        MailerError::InvalidEmail(err.to_string())
    }
}

impl From<Error> for MailerError {
    fn from(err: Error) -> Self {
        MailerError::UnknownError(err.into())
    }
}
