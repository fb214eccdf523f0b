//! Local sendmail implementation

use std::{fmt, time::Duration};

use async_trait::async_trait;
use lettre::{AsyncSendmailTransport, AsyncTransport, Tokio1Executor};
use tokio::time::timeout;
use tracing::debug;

use crate::domain::communication::mailer::{Mailer, MailerError, OutgoingMessage};

use super::build_message;

/// Hands messages to the host's sendmail binary
pub struct SendmailMailer {
    transport: AsyncSendmailTransport<Tokio1Executor>,
    command: Option<String>,
    timeout: Duration,
}

impl SendmailMailer {
    /// Create a new sendmail mailer, using lettre's default command when `command` is `None`
    pub fn new(command: Option<&str>, timeout: Duration) -> Self {
        let transport = match command {
            Some(command) => AsyncSendmailTransport::new_with_command(command),
            None => AsyncSendmailTransport::new(),
        };

        Self {
            transport,
            command: command.map(str::to_string),
            timeout,
        }
    }
}

impl fmt::Debug for SendmailMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendmailMailer")
            .field("command", &self.command.as_deref().unwrap_or("sendmail"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl Mailer for SendmailMailer {
    async fn send_email(&self, message: &OutgoingMessage) -> Result<(), MailerError> {
        let email = build_message(message)?;

        // lettre does not kill the child when the send is dropped, so a timed out
        // sendmail keeps running until it exits by itself.
        match timeout(self.timeout, self.transport.send(email)).await {
            Ok(Ok(())) => {
                debug!("sendmail accepted message");
                Ok(())
            }
            Ok(Err(e)) => Err(MailerError::Transport(e.to_string())),
            Err(_) => Err(MailerError::Timeout(self.timeout.as_secs())),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::communication::{mailer::Mailbox, EmailAddress};

    use super::*;

    #[tokio::test]
    async fn test_missing_command_is_a_transport_error() -> TestResult {
        let mailer = SendmailMailer::new(
            Some("/nonexistent/contact-relay/sendmail"),
            Duration::from_secs(1),
        );

        let message = OutgoingMessage {
            from: Mailbox::new(EmailAddress::new("noreply@example.com")?, ""),
            reply_to: Mailbox::new(EmailAddress::new("jane@example.com")?, "Jane"),
            to: vec![EmailAddress::new("a@x.com")?],
            subject: "subject".to_string(),
            body: "body".to_string(),
        };

        let result = mailer.send_email(&message).await;

        assert!(matches!(result, Err(MailerError::Transport(_))));

        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_hanging_command_times_out() -> TestResult {
        use std::os::unix::fs::PermissionsExt;

        let command = std::env::temp_dir().join(format!("contact-relay-hang-{}", std::process::id()));
        std::fs::write(&command, "#!/bin/sh\nsleep 5\n")?;
        std::fs::set_permissions(&command, std::fs::Permissions::from_mode(0o755))?;

        let mailer = SendmailMailer::new(command.to_str(), Duration::from_millis(200));

        let message = OutgoingMessage {
            from: Mailbox::new(EmailAddress::new("noreply@example.com")?, ""),
            reply_to: Mailbox::new(EmailAddress::new("jane@example.com")?, "Jane"),
            to: vec![EmailAddress::new("a@x.com")?],
            subject: "subject".to_string(),
            body: "body".to_string(),
        };

        let result = mailer.send_email(&message).await;
        std::fs::remove_file(&command)?;

        assert!(matches!(result, Err(MailerError::Timeout(_))));

        Ok(())
    }

    #[tokio::test]
    async fn test_no_recipients_skips_the_command() -> TestResult {
        let mailer = SendmailMailer::new(None, Duration::from_secs(1));

        let message = OutgoingMessage {
            from: Mailbox::new(EmailAddress::new("noreply@example.com")?, ""),
            reply_to: Mailbox::new(EmailAddress::new("jane@example.com")?, "Jane"),
            to: vec![],
            subject: "subject".to_string(),
            body: "body".to_string(),
        };

        assert!(matches!(
            mailer.send_email(&message).await,
            Err(MailerError::NoRecipients)
        ));

        Ok(())
    }
}
