//! Outbound email boundary.
//!
//! The report processor only knows how to hand over a subject, a plain-text
//! body and a recipient. SMTP, dry-run and test implementations live in the
//! infrastructure crate.

use std::sync::Arc;

use thiserror::Error;

/// Failure reported by a mail transport.
///
/// The message is shown to the user as-is, so it should carry the transport's
/// own description of what went wrong.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// A sender or recipient address could not be parsed.
    #[error("invalid address: {0}")]
    Address(String),

    /// The message could not be assembled.
    #[error("could not build message: {0}")]
    Message(String),

    /// Connecting, negotiating TLS, authenticating or transmitting failed.
    #[error("{0}")]
    Smtp(String),
}

/// Sends one plain-text email. Implementations block until the remote side
/// accepts or rejects the message.
pub trait EmailDispatcher: Send + Sync {
    fn send(&self, subject: &str, body: &str, recipient: &str) -> Result<(), TransportError>;
}

impl<T> EmailDispatcher for Arc<T>
where
    T: EmailDispatcher + ?Sized,
{
    fn send(&self, subject: &str, body: &str, recipient: &str) -> Result<(), TransportError> {
        (**self).send(subject, body, recipient)
    }
}
