//! Mail transports

use std::error::Error as StdError;

use anyhow::Result;
use async_trait::async_trait;
use lettre::{
    message::{
        header::{ContentType, Header, HeaderName, HeaderValue},
        Mailbox as LettreMailbox,
    },
    Message,
};

use crate::{
    domain::communication::mailer::{Mailbox, Mailer, MailerError, OutgoingMessage},
    infrastructure::config::{MailerKind, TransportConfig},
};

mod sendmail;
mod smtp;

pub use sendmail::SendmailMailer;
pub use smtp::SmtpMailer;

/// The transport selected by [`TransportConfig::mailer`]
#[derive(Debug)]
pub enum MailTransport {
    /// Deliver through an SMTP relay
    Smtp(SmtpMailer),

    /// Hand off to the local sendmail binary
    Sendmail(SendmailMailer),
}

impl MailTransport {
    /// Builds the configured transport
    pub fn from_config(config: &TransportConfig) -> Result<Self> {
        Ok(match config.mailer {
            MailerKind::Smtp => MailTransport::Smtp(SmtpMailer::new(&config.smtp)?),
            MailerKind::Sendmail => MailTransport::Sendmail(SendmailMailer::new(
                config.sendmail_path.as_deref(),
                config.smtp.timeout(),
            )),
        })
    }
}

#[async_trait]
impl Mailer for MailTransport {
    async fn send_email(&self, message: &OutgoingMessage) -> Result<(), MailerError> {
        match self {
            MailTransport::Smtp(mailer) => mailer.send_email(message).await,
            MailTransport::Sendmail(mailer) => mailer.send_email(message).await,
        }
    }
}

/// The `X-Mailer` header
#[derive(Clone, Debug)]
struct XMailer(String);

impl Default for XMailer {
    fn default() -> Self {
        Self(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string())
    }
}

impl Header for XMailer {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("X-Mailer")
    }

    fn parse(s: &str) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        Ok(Self(s.to_string()))
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), self.0.clone())
    }
}

fn mailbox(mailbox: &Mailbox) -> Result<LettreMailbox, MailerError> {
    let name = (!mailbox.name.is_empty()).then(|| mailbox.name.clone());

    Ok(LettreMailbox::new(name, mailbox.email.as_str().parse()?))
}

/// Builds the plain text lettre message for `message`.
///
/// Fails with [`MailerError::NoRecipients`] when there is nobody to send to.
pub(crate) fn build_message(message: &OutgoingMessage) -> Result<Message, MailerError> {
    if message.to.is_empty() {
        return Err(MailerError::NoRecipients);
    }

    let mut builder = Message::builder()
        .from(mailbox(&message.from)?)
        .reply_to(mailbox(&message.reply_to)?)
        .subject(message.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .header(XMailer::default());

    for recipient in &message.to {
        builder = builder.to(LettreMailbox::new(None, recipient.as_str().parse()?));
    }

    Ok(builder.body(message.body.clone())?)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::communication::EmailAddress, infrastructure::config::test_config};

    use super::*;

    fn outgoing(to: &[&str]) -> OutgoingMessage {
        let email = |address: &str| EmailAddress::new(address).expect("valid email");

        OutgoingMessage {
            from: Mailbox::new(email("noreply@example.com"), "Website"),
            reply_to: Mailbox::new(email("jane@example.com"), "Jane Doe"),
            to: to.iter().map(|address| email(address)).collect(),
            subject: "New Contact Form Submission from Jane Doe".to_string(),
            body: "Message:\nHello".to_string(),
        }
    }

    #[test]
    fn test_build_message_headers() -> TestResult {
        let message = build_message(&outgoing(&["a@x.com", "b@x.com"]))?;
        let formatted = String::from_utf8(message.formatted())?;

        let header = |name: &str| {
            formatted
                .lines()
                .find(|line| line.starts_with(name))
                .map(str::to_string)
                .unwrap_or_default()
        };

        assert!(header("From:").contains("<noreply@example.com>"));
        assert!(header("Reply-To:").contains("Jane Doe"));
        assert!(header("Reply-To:").contains("<jane@example.com>"));
        assert!(formatted.contains("a@x.com"));
        assert!(formatted.contains("b@x.com"));
        assert!(formatted.contains("Subject: New Contact Form Submission from Jane Doe"));
        assert!(formatted.contains("Content-Type: text/plain; charset=utf-8"));
        assert!(formatted.contains(&format!("X-Mailer: contact-relay/{}", env!("CARGO_PKG_VERSION"))));
        assert_eq!(message.envelope().to().len(), 2);

        Ok(())
    }

    #[test]
    fn test_build_message_without_recipients() -> TestResult {
        let result = build_message(&outgoing(&[]));

        assert!(matches!(result, Err(MailerError::NoRecipients)));

        Ok(())
    }

    #[tokio::test]
    async fn test_from_config_selects_transport() -> TestResult {
        let mut config = test_config();
        assert!(matches!(
            MailTransport::from_config(&config)?,
            MailTransport::Smtp(_)
        ));

        config.mailer = MailerKind::Sendmail;
        assert!(matches!(
            MailTransport::from_config(&config)?,
            MailTransport::Sendmail(_)
        ));

        Ok(())
    }
}
