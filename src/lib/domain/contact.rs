//! Contact form submissions: decoding, validation, sanitization and composition.

mod compose;
mod sanitize;
mod submission;
mod validation;

pub use compose::{body, compose, subject};
pub use sanitize::{escape_text, SanitizedSubmission};
pub use submission::{PayloadError, SubmissionRequest};
pub use validation::{ValidSubmission, ValidationErrors, INVALID_EMAIL};

/// The submitter's name
pub const NAME: &str = "name";

/// The submitter's email address
pub const EMAIL: &str = "email";

/// The submitter's phone number
pub const PHONE_NUMBER: &str = "phone_number";

/// The message itself
pub const MESSAGE: &str = "message";
