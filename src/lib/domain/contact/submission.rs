//! Submission request decoding

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use utoipa::ToSchema;

use super::{EMAIL, MESSAGE, NAME, PHONE_NUMBER};

/// Raised when a request body holds no submission data at all
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// Neither a JSON object nor form fields could be read from the body
    #[error("request body contained no JSON object or form fields")]
    Empty,
}

/// A contact form submission as sent by the browser
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubmissionRequest {
    /// The submitter's name
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,

    /// The submitter's email address
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,

    /// The submitter's phone number
    #[schema(example = "555-1234")]
    pub phone_number: Option<String>,

    /// The message itself
    #[schema(example = "Hello")]
    pub message: Option<String>,
}

impl SubmissionRequest {
    /// Decodes a request body.
    ///
    /// The body is read as a JSON object first. When that fails or the object is
    /// empty, it is read as `application/x-www-form-urlencoded` fields regardless
    /// of the declared content type. Unknown keys are ignored.
    pub fn decode(body: &[u8]) -> Result<Self, PayloadError> {
        let mut fields = decode_json(body)
            .or_else(|| decode_form(body))
            .ok_or(PayloadError::Empty)?;

        Ok(Self {
            name: fields.remove(NAME),
            email: fields.remove(EMAIL),
            phone_number: fields.remove(PHONE_NUMBER),
            message: fields.remove(MESSAGE),
        })
    }
}

fn decode_json(body: &[u8]) -> Option<HashMap<String, String>> {
    let object = serde_json::from_slice::<Map<String, Value>>(body).ok()?;

    if object.is_empty() {
        return None;
    }

    Some(
        object
            .into_iter()
            .filter_map(|(key, value)| scalar_text(value).map(|text| (key, text)))
            .collect(),
    )
}

fn decode_form(body: &[u8]) -> Option<HashMap<String, String>> {
    let pairs = serde_urlencoded::from_bytes::<Vec<(String, String)>>(body).ok()?;

    if pairs.is_empty() {
        return None;
    }

    // later duplicates win
    Some(pairs.into_iter().collect())
}

/// Strings and numbers carry text, anything else counts as absent.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
