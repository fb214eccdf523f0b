//! SMTP email service implementation

use std::{fmt, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use lettre::{
    transport::smtp::client::{Tls, TlsParameters},
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
};
use tokio::time::timeout;
use tracing::debug;

use crate::{
    domain::communication::mailer::{Mailer, MailerError, OutgoingMessage},
    infrastructure::config::{Encryption, SmtpConfig},
};

use super::build_message;

/// SMTP mailer
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    relay: String,
    timeout: Duration,
}

impl SmtpMailer {
    /// Create a new SMTP mailer
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        Ok(Self {
            transport: Self::transport(config)?,
            relay: format!("{}:{}", config.host, config.port),
            timeout: config.timeout(),
        })
    }

    fn transport(config: &SmtpConfig) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .tls(tls(config)?)
            .timeout(Some(config.timeout()));

        if let Some(credentials) = config.credentials() {
            builder = builder.credentials(credentials);
        }

        Ok(builder.build())
    }
}

/// The TLS mode for the configured encryption
fn tls(config: &SmtpConfig) -> Result<Tls> {
    Ok(match config.encryption() {
        Encryption::None => Tls::None,
        Encryption::Opportunistic => Tls::Opportunistic(tls_parameters(config)?),
        Encryption::StartTls => Tls::Required(tls_parameters(config)?),
        Encryption::Implicit => Tls::Wrapper(tls_parameters(config)?),
    })
}

fn tls_parameters(config: &SmtpConfig) -> Result<TlsParameters> {
    Ok(TlsParameters::builder(config.host.clone())
        .dangerous_accept_invalid_certs(!config.verify_tls)
        .build()?)
}

impl fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("relay", &self.relay)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_email(&self, message: &OutgoingMessage) -> Result<(), MailerError> {
        let email = build_message(message)?;

        match timeout(self.timeout, self.transport.send(email)).await {
            Ok(Ok(response)) => {
                debug!(relay = %self.relay, code = %response.code(), "relay accepted message");
                Ok(())
            }
            Ok(Err(e)) => Err(MailerError::Transport(e.to_string())),
            Err(_) => Err(MailerError::Timeout(self.timeout.as_secs())),
        }
    }
}
