//! Submission validation

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::domain::communication::EmailAddress;

use super::{SubmissionRequest, EMAIL, MESSAGE, NAME, PHONE_NUMBER};

/// Message recorded against a malformed email field
pub const INVALID_EMAIL: &str = "The email must be a valid email address";

/// Validation messages keyed by field name
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// Records a message against `field`
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Messages recorded against `field`
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Whether no field has a message
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with at least one message
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A submission whose fields are all present and whose email is well formed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidSubmission {
    /// The submitter's name
    pub name: String,

    /// The submitter's email address
    pub email: EmailAddress,

    /// The submitter's phone number
    pub phone_number: String,

    /// The message itself
    pub message: String,
}

impl SubmissionRequest {
    /// Checks that every field is present and the email is well formed.
    ///
    /// All problems are collected before returning, so the caller sees every
    /// missing field at once.
    pub fn validate(self) -> Result<ValidSubmission, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = required(&mut errors, NAME, self.name);
        let email = required(&mut errors, EMAIL, self.email);
        let phone_number = required(&mut errors, PHONE_NUMBER, self.phone_number);
        let message = required(&mut errors, MESSAGE, self.message);

        let email = email.and_then(|raw| match EmailAddress::new(&raw) {
            Ok(email) => Some(email),
            Err(_) => {
                errors.add(EMAIL, INVALID_EMAIL);
                None
            }
        });

        match (name, email, phone_number, message) {
            (Some(name), Some(email), Some(phone_number), Some(message)) if errors.is_empty() => {
                Ok(ValidSubmission {
                    name,
                    email,
                    phone_number,
                    message,
                })
            }
            _ => Err(errors),
        }
    }
}

fn required(errors: &mut ValidationErrors, field: &str, value: Option<String>) -> Option<String> {
    match value.as_deref().map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Some(trimmed.to_string()),
        _ => {
            errors.add(field, format!("The {field} field is required"));
            None
        }
    }
}
