use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::config::MailConfig;
use crate::entity::contact_message;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("outbound mail is not configured")]
    NotConfigured,

    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// A plain-text notification for the site owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

impl Notification {
    pub fn for_contact(msg: &contact_message::Model) -> Self {
        Self {
            subject: format!("STUDIO INQUIRY: {}", msg.subject),
            body: format!(
                "From: {} ({})\n\nMessage:\n{}",
                msg.name, msg.email, msg.body
            ),
        }
    }
}

/// Outbound notification delivery.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, notification: Notification) -> Result<(), MailError>;
}

/// Delivers through an authenticated SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let (Some(username), Some(password)) = (&config.username, &config.password) else {
            return Err(MailError::NotConfigured);
        };

        let from: Mailbox = username.parse()?;
        let to: Mailbox = match &config.recipient {
            Some(recipient) => recipient.parse()?,
            None => from.clone(),
        };

        let builder = if config.tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };
        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(username.clone(), password.clone()))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Ok(Self { transport, from, to })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, notification: Notification) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(notification.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body)?;

        self.transport.send(message).await?;
        Ok(())
    }
}

/// Stand-in used when no SMTP credentials are configured; every send fails.
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, _notification: Notification) -> Result<(), MailError> {
        Err(MailError::NotConfigured)
    }
}

/// Build the mailer for this configuration, falling back to [`DisabledMailer`].
pub fn from_config(config: &MailConfig) -> Result<Arc<dyn Mailer>, MailError> {
    match SmtpMailer::new(config) {
        Ok(mailer) => Ok(Arc::new(mailer)),
        Err(MailError::NotConfigured) => {
            tracing::warn!("MAIL_USERNAME/MAIL_PASSWORD not set, contact notifications disabled");
            Ok(Arc::new(DisabledMailer))
        }
        Err(e) => Err(e),
    }
}
