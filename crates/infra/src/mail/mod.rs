//! Email dispatcher implementations.
//!
//! - `smtp`: authenticated SMTP with STARTTLS (production)
//! - `in_memory`: records messages and logs them (dry runs, tests)

use std::sync::Arc;

use shiftstock_inventory::{EmailDispatcher, TransportError};

use crate::config::AppConfig;

pub mod in_memory;
pub mod smtp;

pub use in_memory::{InMemoryMailer, SentEmail};
pub use smtp::SmtpMailer;

/// Pick the dispatcher the configuration asks for.
pub fn build_dispatcher(config: &AppConfig) -> Result<Arc<dyn EmailDispatcher>, TransportError> {
    if config.dry_run {
        tracing::warn!("MAIL_DRY_RUN is set; reports are logged, not emailed");
        return Ok(Arc::new(InMemoryMailer::new()));
    }
    Ok(Arc::new(SmtpMailer::new(&config.smtp)?))
}
