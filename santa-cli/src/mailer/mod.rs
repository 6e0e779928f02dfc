//! Outbound email transport
//!
//! A thin abstraction over lettre: the rest of the program only needs
//! "deliver one plaintext message, report success or failure". The trait
//! keeps the notifier testable against an in-memory double.

mod message;
mod smtp;

pub use message::{admin_summary, player_message, OutboundEmail};
pub use smtp::SmtpMailer;

/// Deliver one plaintext message
pub trait Mailer {
    fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}

/// Why a message could not be delivered
#[derive(Debug, Clone)]
pub enum MailError {
    InvalidAddress(String),
    Build(String),
    Transport(String),
}

impl std::fmt::Display for MailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MailError::InvalidAddress(address) => write!(f, "invalid email address: {}", address),
            MailError::Build(detail) => write!(f, "failed to build message: {}", detail),
            MailError::Transport(detail) => write!(f, "SMTP error: {}", detail),
        }
    }
}

impl std::error::Error for MailError {}
