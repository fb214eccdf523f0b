//! Mailer port

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

mod errors;
mod message;

pub use errors::MailerError;
pub use message::{Mailbox, OutgoingMessage};

/// Delivers composed messages
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Send an email
    ///
    /// # Arguments
    /// * `message` - The [`OutgoingMessage`] to deliver to every recipient it lists.
    ///
    /// # Returns
    /// [`Ok`] once the transport has accepted the message, or a [`MailerError`]
    /// describing why it could not be delivered.
    async fn send_email(&self, message: &OutgoingMessage) -> Result<(), MailerError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    #[async_trait]
    impl Mailer for Mailer {
        async fn send_email(&self, message: &OutgoingMessage) -> Result<(), MailerError>;
    }
}
