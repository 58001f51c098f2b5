use std::sync::Mutex;

use shiftstock_inventory::{EmailDispatcher, TransportError};

/// A message accepted by [`InMemoryMailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub subject: String,
    pub body: String,
    pub recipient: String,
}

/// In-memory dispatcher.
///
/// Intended for dry runs and tests. Keeps every accepted message and can be
/// told to reject sends from a given position onwards.
#[derive(Debug, Default)]
pub struct InMemoryMailer {
    sent: Mutex<Vec<SentEmail>>,
    fail_from: Option<usize>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the `index`-th send (0-based) and every send after it.
    pub fn failing_from(index: usize) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_from: Some(index),
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EmailDispatcher for InMemoryMailer {
    fn send(&self, subject: &str, body: &str, recipient: &str) -> Result<(), TransportError> {
        let mut sent = self
            .sent
            .lock()
            .map_err(|_| TransportError::Smtp("in-memory mailer lock poisoned".to_string()))?;

        if self.fail_from.is_some_and(|n| sent.len() >= n) {
            return Err(TransportError::Smtp(
                "connection refused (simulated)".to_string(),
            ));
        }

        tracing::info!(recipient, subject, body, "email recorded (not sent)");
        sent.push(SentEmail {
            subject: subject.to_string(),
            body: body.to_string(),
            recipient: recipient.to_string(),
        });
        Ok(())
    }
}
