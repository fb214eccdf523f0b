//! Mail transport configuration, read once at startup.

use std::{convert::Infallible, fmt, str::FromStr, time::Duration};

use clap::{ArgAction, Parser};
use lettre::transport::smtp::authentication::Credentials;
use thiserror::Error;
use tracing::warn;

use crate::domain::communication::{mailer::Mailbox, EmailAddress};

/// Credential value that switches SMTP authentication off
const NO_CREDENTIALS: &str = "null";

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The encryption mode is not one we know
    #[error("unknown SMTP encryption \"{0}\", expected ssl, tls, starttls or none")]
    UnknownEncryption(String),
}

/// Which transport delivers messages
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MailerKind {
    /// An SMTP relay
    #[default]
    Smtp,

    /// The host's sendmail binary
    Sendmail,
}

impl FromStr for MailerKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("smtp") {
            Ok(MailerKind::Smtp)
        } else {
            Ok(MailerKind::Sendmail)
        }
    }
}

/// Security applied to the SMTP session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Encryption {
    /// Plain SMTP
    None,

    /// STARTTLS when the relay offers it
    #[default]
    Opportunistic,

    /// STARTTLS, failing if the relay does not offer it
    StartTls,

    /// TLS from the first byte (SMTPS)
    Implicit,
}

impl FromStr for Encryption {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Encryption::None),
            "" => Ok(Encryption::Opportunistic),
            "tls" | "starttls" => Ok(Encryption::StartTls),
            "ssl" | "smtps" => Ok(Encryption::Implicit),
            _ => Err(ConfigError::UnknownEncryption(s.to_string())),
        }
    }
}

/// Recipients parsed from a comma-separated list
///
/// Entries that are not valid addresses are dropped with a warning.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Recipients(Vec<EmailAddress>);

impl Recipients {
    /// The valid addresses, in the order they were listed
    pub fn as_slice(&self) -> &[EmailAddress] {
        &self.0
    }

    /// Number of valid addresses
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no address survived parsing
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Recipients {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let recipients = s
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .filter_map(|entry| match EmailAddress::new(entry) {
                Ok(email) => Some(email),
                Err(err) => {
                    warn!(entry, %err, "dropping invalid recipient");
                    None
                }
            })
            .collect();

        Ok(Recipients(recipients))
    }
}

/// SMTP configuration
#[derive(Clone, Parser)]
pub struct SmtpConfig {
    /// The SMTP host
    #[arg(long = "smtp-host", env = "SMTP_HOST", default_value = "localhost")]
    pub host: String,

    /// The SMTP port
    #[arg(long = "smtp-port", env = "SMTP_PORT", default_value = "587")]
    pub port: u16,

    /// The SMTP username, "null" disables authentication
    #[arg(long = "smtp-username", env = "SMTP_USERNAME")]
    pub username: Option<String>,

    /// The SMTP password, "null" disables authentication
    #[arg(long = "smtp-password", env = "SMTP_PASSWORD")]
    pub password: Option<String>,

    /// ssl, tls, starttls or none; unset upgrades opportunistically
    #[arg(long = "smtp-encryption", env = "SMTP_ENCRYPTION")]
    pub encryption: Option<Encryption>,

    /// Verify the relay's TLS certificate
    #[arg(
        long = "smtp-verify-tls",
        env = "SMTP_VERIFY_TLS",
        default_value = "true",
        action = ArgAction::Set
    )]
    pub verify_tls: bool,

    /// Seconds to wait for a message to be handed off
    #[arg(long = "smtp-timeout", env = "SMTP_TIMEOUT", default_value = "10")]
    pub timeout_secs: u64,
}

impl SmtpConfig {
    /// Credentials to authenticate with, if both parts are present and not `"null"`
    pub fn credentials(&self) -> Option<Credentials> {
        match (provided(&self.username), provided(&self.password)) {
            (Some(username), Some(password)) => {
                Some(Credentials::new(username.to_string(), password.to_string()))
            }
            _ => None,
        }
    }

    /// The configured encryption mode
    pub fn encryption(&self) -> Encryption {
        self.encryption.unwrap_or_default()
    }

    /// Send timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn provided(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|value| !value.is_empty() && *value != NO_CREDENTIALS)
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("encryption", &self.encryption())
            .field("verify_tls", &self.verify_tls)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Transport configuration
#[derive(Clone, Debug, Parser)]
pub struct TransportConfig {
    /// SMTP, or anything else to hand messages to sendmail
    #[arg(long, env = "MAILER", default_value = "SMTP")]
    pub mailer: MailerKind,

    /// SMTP relay settings
    #[clap(flatten)]
    pub smtp: SmtpConfig,

    /// The sendmail command, lettre's default when unset
    #[arg(long, env = "SENDMAIL_PATH")]
    pub sendmail_path: Option<String>,

    /// The sender email address
    #[arg(long, env = "MAIL_FROM")]
    pub mail_from: EmailAddress,

    /// The sender display name
    #[arg(long, env = "MAIL_FROM_NAME", default_value = "")]
    pub mail_from_name: String,

    /// Comma-separated recipient addresses
    #[arg(long, env = "MAIL_TO")]
    pub mail_to: Recipients,
}

impl TransportConfig {
    /// The mailbox messages are sent from
    pub fn sender(&self) -> Mailbox {
        Mailbox::new(self.mail_from.clone(), self.mail_from_name.trim())
    }

    /// The recipients every message is sent to
    pub fn recipients(&self) -> &[EmailAddress] {
        self.mail_to.as_slice()
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> TransportConfig {
    TransportConfig {
        mailer: MailerKind::Smtp,
        smtp: SmtpConfig {
            host: "localhost".to_string(),
            port: 2525,
            username: None,
            password: None,
            encryption: Some(Encryption::None),
            verify_tls: true,
            timeout_secs: 1,
        },
        sendmail_path: None,
        mail_from: EmailAddress::new("noreply@example.com").expect("valid email"),
        mail_from_name: "Website".to_string(),
        mail_to: "a@x.com, b@x.com".parse().expect("infallible"),
    }
}
