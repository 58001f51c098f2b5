//! Report and alert rendering.
//!
//! Text layout is fixed: recipients read these emails on phones and filter
//! on the subject prefixes, so keep the shapes stable.

use chrono::NaiveDateTime;

use crate::catalog::{Catalog, CatalogEntry};
use crate::submission::Submission;

/// Minute-resolution timestamp used in subjects and bodies.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One reported item count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub entry: CatalogEntry,
    pub quantity: u32,
}

impl core::fmt::Display for ReportLine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({}): {}", self.entry.name(), self.entry.unit(), self.quantity)
    }
}

/// A count strictly below its entry's threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowStockFinding {
    pub entry: CatalogEntry,
    pub quantity: u32,
}

impl core::fmt::Display for LowStockFinding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}: {} < {}{}",
            self.entry.name(),
            self.quantity,
            self.entry.threshold(),
            self.entry.unit()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SectionLines {
    name: String,
    lines: Vec<ReportLine>,
}

/// Everything derived from one submission: per-section lines plus findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockReport {
    employee: String,
    timestamp: String,
    sections: Vec<SectionLines>,
    findings: Vec<LowStockFinding>,
}

impl StockReport {
    pub fn compile(catalog: &Catalog, submission: &Submission, now: NaiveDateTime) -> Self {
        let mut sections = Vec::with_capacity(catalog.sections().len());
        let mut findings = Vec::new();

        for section in catalog.sections() {
            let mut lines = Vec::with_capacity(section.entries().len());
            for entry in section.entries() {
                let quantity = submission.quantity(entry);
                if entry.is_low(quantity) {
                    findings.push(LowStockFinding {
                        entry: entry.clone(),
                        quantity,
                    });
                }
                lines.push(ReportLine {
                    entry: entry.clone(),
                    quantity,
                });
            }
            sections.push(SectionLines {
                name: section.name().to_string(),
                lines,
            });
        }

        Self {
            employee: submission.employee().to_string(),
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
            sections,
            findings,
        }
    }

    pub fn employee(&self) -> &str {
        &self.employee
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// All lines in catalog order.
    pub fn lines(&self) -> impl Iterator<Item = &ReportLine> {
        self.sections.iter().flat_map(|s| s.lines.iter())
    }

    pub fn findings(&self) -> &[LowStockFinding] {
        &self.findings
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    pub fn report_subject(&self) -> String {
        format!("Stock Report — {} @ {}", self.employee, self.timestamp)
    }

    pub fn report_body(&self) -> String {
        let mut out: Vec<String> = vec![
            format!("Stock Report — {}", self.employee),
            format!("Timestamp: {}", self.timestamp),
            String::new(),
        ];
        for section in &self.sections {
            out.push(format!("--- {} ---", section.name));
            out.extend(section.lines.iter().map(ToString::to_string));
            out.push(String::new());
        }
        out.join("\n")
    }

    pub fn alert_subject(&self) -> String {
        format!("[ALERT] Low Stock — {}", self.timestamp)
    }

    pub fn alert_body(&self) -> String {
        let mut out: Vec<String> = vec![
            format!("⚠️ Low Stock Alert — {} @ {}", self.employee, self.timestamp),
            String::new(),
        ];
        out.extend(self.findings.iter().map(ToString::to_string));
        out.join("\n")
    }
}
