use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::dispatch::{EmailDispatcher, TransportError};
use crate::report::StockReport;
use crate::submission::Submission;

/// Why a submission produced no (or only a partial) set of emails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProcessingError {
    /// A required identifying field was absent or blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A count was not a non-negative integer: `(item name, raw value)`.
    #[error("invalid quantity for {0}: {1:?}")]
    InvalidQuantity(String, String),

    /// The transport refused or failed a send. Emails sent earlier in the
    /// same request stay sent.
    #[error("{0}")]
    DeliveryFailed(#[from] TransportError),
}

/// Result of a fully delivered submission.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    pub report_sent: bool,
    pub alert_sent: bool,
    pub low_stock_count: usize,
}

/// Turns one end-of-shift submission into a report email and, when needed,
/// a low-stock alert.
///
/// Sends are ordered: the full report first, the alert second. A failing
/// alert therefore leaves the report delivered; nothing is rolled back and
/// nothing is retried.
pub struct ReportProcessor {
    catalog: Arc<Catalog>,
    recipient: String,
    dispatcher: Arc<dyn EmailDispatcher>,
}

impl ReportProcessor {
    pub fn new(
        catalog: Arc<Catalog>,
        recipient: impl Into<String>,
        dispatcher: Arc<dyn EmailDispatcher>,
    ) -> Self {
        Self {
            catalog,
            recipient: recipient.into(),
            dispatcher,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Validate, render and send. Blocks on the dispatcher.
    pub fn process(
        &self,
        employee: &str,
        raw_counts: &HashMap<String, String>,
        now: NaiveDateTime,
    ) -> Result<ReportOutcome, ProcessingError> {
        let submission = Submission::parse(&self.catalog, employee, raw_counts)?;
        let report = StockReport::compile(&self.catalog, &submission, now);

        self.dispatcher
            .send(&report.report_subject(), &report.report_body(), &self.recipient)?;
        tracing::info!(
            employee = report.employee(),
            timestamp = report.timestamp(),
            "stock report sent"
        );

        let alert_sent = if report.has_findings() {
            self.dispatcher
                .send(&report.alert_subject(), &report.alert_body(), &self.recipient)
                .inspect_err(|e| {
                    tracing::warn!(error = %e, "low-stock alert failed after report was sent");
                })?;
            tracing::info!(
                employee = report.employee(),
                findings = report.findings().len(),
                "low-stock alert sent"
            );
            true
        } else {
            false
        };

        Ok(ReportOutcome {
            report_sent: true,
            alert_sent,
            low_stock_count: report.findings().len(),
        })
    }
}
