//! Communication module: email addresses and the mailer port.

mod email_address;

pub mod mailer;

pub use email_address::{EmailAddress, EmailAddressError};
