use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Message, SmtpTransport, Transport};

use shiftstock_inventory::{EmailDispatcher, TransportError};

use crate::config::{SmtpSettings, TlsMode};

/// SMTP dispatcher.
///
/// Opens one connection per message: STARTTLS (per [`TlsMode`]), then AUTH,
/// then the send. Every network step is bounded by the configured timeout.
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> Result<Self, TransportError> {
        let from = parse_mailbox(&settings.from)?;

        let tls = match settings.tls {
            TlsMode::None => Tls::None,
            TlsMode::Opportunistic => Tls::Opportunistic(tls_parameters(&settings.host)?),
            TlsMode::Required => Tls::Required(tls_parameters(&settings.host)?),
        };

        let mut builder = SmtpTransport::builder_dangerous(settings.host.as_str())
            .port(settings.port)
            .tls(tls)
            .timeout(Some(settings.timeout));
        if let Some(creds) = &settings.credentials {
            builder = builder.credentials(Credentials::new(
                creds.username.clone(),
                creds.password.clone(),
            ));
        }

        tracing::info!(
            host = %settings.host,
            port = settings.port,
            tls = ?settings.tls,
            authenticated = settings.credentials.is_some(),
            "smtp dispatcher configured"
        );

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn build_message(&self, subject: &str, body: &str, recipient: &str) -> Result<Message, TransportError> {
        Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(recipient)?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| TransportError::Message(e.to_string()))
    }
}

impl EmailDispatcher for SmtpMailer {
    fn send(&self, subject: &str, body: &str, recipient: &str) -> Result<(), TransportError> {
        let message = self.build_message(subject, body, recipient)?;

        match self.transport.send(&message) {
            Ok(response) => {
                tracing::debug!(recipient, subject, code = %response.code(), "smtp accepted message");
                Ok(())
            }
            Err(e) => {
                tracing::error!(recipient, subject, error = %e, "smtp send failed");
                Err(TransportError::Smtp(e.to_string()))
            }
        }
    }
}

fn parse_mailbox(raw: &str) -> Result<Mailbox, TransportError> {
    raw.parse::<Mailbox>()
        .map_err(|e| TransportError::Address(format!("{raw}: {e}")))
}

fn tls_parameters(host: &str) -> Result<TlsParameters, TransportError> {
    TlsParameters::new(host.to_string()).map_err(|e| TransportError::Smtp(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::SmtpCredentials;

    fn settings(from: &str, tls: TlsMode) -> SmtpSettings {
        SmtpSettings {
            host: "smtp.example.com".to_string(),
            port: 587,
            credentials: Some(SmtpCredentials {
                username: "bar@example.com".to_string(),
                password: "secret".to_string(),
            }),
            from: from.to_string(),
            tls,
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn builds_for_every_tls_mode() {
        for tls in [TlsMode::Opportunistic, TlsMode::Required, TlsMode::None] {
            assert!(SmtpMailer::new(&settings("bar@example.com", tls)).is_ok());
        }
    }

    #[test]
    fn rejects_unparseable_sender() {
        let err = SmtpMailer::new(&settings("not an address", TlsMode::Required))
            .err()
            .unwrap();
        assert!(matches!(err, TransportError::Address(_)));
    }

    #[test]
    fn builds_plain_text_message_without_connecting() {
        let mailer = SmtpMailer::new(&settings("Stock Desk <bar@example.com>", TlsMode::Required)).unwrap();

        let message = mailer
            .build_message("Stock Report — Asha @ 2024-03-09 22:05", "Chicken (pcs): 4", "manager@example.com")
            .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("To: manager@example.com"));
        assert!(raw.contains("Content-Type: text/plain"));
    }

    #[test]
    fn send_to_bad_recipient_fails_before_connecting() {
        let mailer = SmtpMailer::new(&settings("bar@example.com", TlsMode::Required)).unwrap();
        let err = mailer.send("s", "b", "nobody").unwrap_err();
        assert!(matches!(err, TransportError::Address(_)));
    }
}
