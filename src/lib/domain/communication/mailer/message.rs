//! Email message

use std::fmt;

use crate::domain::communication::EmailAddress;

/// An address with an optional display name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mailbox {
    /// The address
    pub email: EmailAddress,

    /// The display name, empty when there is none
    pub name: String,
}

impl Mailbox {
    /// Create a new mailbox
    pub fn new(email: EmailAddress, name: impl Into<String>) -> Self {
        Self {
            email,
            name: name.into(),
        }
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.email)
        } else {
            write!(f, "{} <{}>", self.name, self.email)
        }
    }
}

/// A plain text email ready to hand to a [`Mailer`](super::Mailer)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// The sender of the email
    pub from: Mailbox,

    /// Where replies should go
    pub reply_to: Mailbox,

    /// The recipients of the email
    pub to: Vec<EmailAddress>,

    /// The subject of the email
    pub subject: String,

    /// The plain text body of the email
    pub body: String,
}
