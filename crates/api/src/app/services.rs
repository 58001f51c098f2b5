use std::sync::Arc;

use anyhow::Context;

use shiftstock_infra::{catalog_file, config::AppConfig, mail};
use shiftstock_inventory::{Catalog, ReportProcessor};

/// Everything a request handler needs. Immutable after startup.
pub struct AppServices {
    processor: Arc<ReportProcessor>,
    site_title: String,
}

impl AppServices {
    pub fn new(processor: ReportProcessor, site_title: impl Into<String>) -> Self {
        Self {
            processor: Arc::new(processor),
            site_title: site_title.into(),
        }
    }

    pub fn processor(&self) -> Arc<ReportProcessor> {
        Arc::clone(&self.processor)
    }

    pub fn catalog(&self) -> &Catalog {
        self.processor.catalog()
    }

    pub fn site_title(&self) -> &str {
        &self.site_title
    }
}

/// Load the catalog and mail transport named by the configuration.
pub fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let catalog = match &config.catalog_path {
        Some(path) => catalog_file::load_catalog(path)?,
        None => catalog_file::default_catalog().context("built-in catalog is invalid")?,
    };

    let dispatcher = mail::build_dispatcher(config).context("failed to set up mail transport")?;

    let processor = ReportProcessor::new(Arc::new(catalog), config.recipient.clone(), dispatcher);
    tracing::info!(
        sections = processor.catalog().sections().len(),
        items = processor.catalog().len(),
        recipient = processor.recipient(),
        "report processor ready"
    );

    Ok(AppServices::new(processor, config.site_title.clone()))
}
