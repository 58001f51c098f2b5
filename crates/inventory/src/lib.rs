//! Stock-count domain module.
//!
//! This crate contains the catalog model and the end-of-shift report logic:
//! validating a submission against the catalog, rendering the report and
//! low-stock alert, and handing both to an [`EmailDispatcher`].
//! Mail transport itself lives behind the dispatcher trait.

pub mod catalog;
pub mod dispatch;
pub mod processor;
pub mod report;
pub mod submission;

pub use catalog::{Catalog, CatalogEntry, ItemKey, Section, EMPLOYEE_FIELD};
pub use dispatch::{EmailDispatcher, TransportError};
pub use processor::{ProcessingError, ReportOutcome, ReportProcessor};
pub use report::{LowStockFinding, ReportLine, StockReport, TIMESTAMP_FORMAT};
pub use submission::Submission;
