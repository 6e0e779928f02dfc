//! SMTP delivery via lettre
//!
//! STARTTLS on the configured relay, authenticating with the sender address
//! and an app password. One blocking network call per message.

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use super::{MailError, Mailer, OutboundEmail};
use crate::config::SmtpConfig;

pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    /// Set up a STARTTLS transport against the configured relay.
    ///
    /// No connection is made until the first send.
    pub fn new(config: &SmtpConfig, password: &str) -> Result<Self, MailError> {
        let from: Mailbox = format!("Secret Santa <{}>", config.sender)
            .parse()
            .map_err(|_| MailError::InvalidAddress(config.sender.clone()))?;

        let transport = SmtpTransport::starttls_relay(&config.host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.sender.clone(),
                password.to_string(),
            ))
            .build();

        Ok(SmtpMailer { transport, from })
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|_| MailError::InvalidAddress(email.to.clone()))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.clone())
            .body(email.body.clone())
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport
            .send(&message)
            .map_err(|e| MailError::Transport(e.to_string()))?;

        log::debug!("delivered '{}' to {}", email.subject, email.to);
        Ok(())
    }
}
