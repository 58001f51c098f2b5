//! Catalog loading from TOML.
//!
//! The built-in catalog ships as `catalog/default.toml` and goes through the
//! same parser as operator-supplied files, so both get identical validation.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use shiftstock_core::DomainError;
use shiftstock_inventory::{Catalog, CatalogEntry, Section};

const DEFAULT_CATALOG: &str = include_str!("../catalog/default.toml");

#[derive(Debug, Error)]
pub enum CatalogFileError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid catalog: {0}")]
    Invalid(#[from] DomainError),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDoc {
    sections: Vec<SectionDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SectionDoc {
    name: String,
    #[serde(default)]
    items: Vec<ItemDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ItemDoc {
    name: String,
    unit: String,
    threshold: u32,
}

/// Parse and validate a catalog document.
pub fn parse_catalog(source: &str) -> Result<Catalog, CatalogFileError> {
    let doc: CatalogDoc = toml::from_str(source)?;

    let sections = doc
        .sections
        .into_iter()
        .map(|s| {
            let entries = s
                .items
                .into_iter()
                .map(|i| CatalogEntry::new(i.name, i.unit, i.threshold))
                .collect::<Result<Vec<_>, _>>()?;
            Section::new(s.name, entries)
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    Ok(Catalog::new(sections)?)
}

/// The reference Kitchen/Bar catalog.
pub fn default_catalog() -> Result<Catalog, CatalogFileError> {
    parse_catalog(DEFAULT_CATALOG)
}

pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogFileError> {
    let source = std::fs::read_to_string(path).map_err(|source| CatalogFileError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let catalog = parse_catalog(&source)?;
    tracing::info!(
        path = %path.display(),
        sections = catalog.sections().len(),
        items = catalog.len(),
        "catalog loaded"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_matches_reference_deployment() {
        let catalog = default_catalog().unwrap();

        let names: Vec<&str> = catalog.sections().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Kitchen", "Bar"]);
        assert_eq!(catalog.sections()[0].entries().len(), 11);
        assert_eq!(catalog.sections()[1].entries().len(), 28);

        let chicken = &catalog.sections()[0].entries()[0];
        assert_eq!((chicken.name(), chicken.unit(), chicken.threshold()), ("Chicken", "pcs", 4));

        let soda = catalog
            .entries()
            .map(|(_, e)| e)
            .find(|e| e.name() == "Soda")
            .unwrap();
        assert_eq!(soda.threshold(), 20);
        assert_eq!(soda.key().as_str(), "soda");
    }

    #[test]
    fn parses_custom_sections_in_file_order() {
        let catalog = parse_catalog(
            r#"
            [[sections]]
            name = "Store"
            items = [{ name = "Rice", unit = "kg", threshold = 5 }]

            [[sections]]
            name = "Kitchen"
            items = [{ name = "Oil", unit = "ltr", threshold = 2 }]

            [[sections]]
            name = "Freezer"
            "#,
        )
        .unwrap();

        let names: Vec<&str> = catalog.sections().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Store", "Kitchen", "Freezer"]);
        assert!(catalog.sections()[2].entries().is_empty());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn rejects_negative_threshold() {
        let err = parse_catalog(
            r#"
            [[sections]]
            name = "Bar"
            items = [{ name = "Water", unit = "pcs", threshold = -1 }]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogFileError::Parse(_)));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = parse_catalog(
            r#"
            [[sections]]
            name = "Bar"
            items = [{ name = "Water", unit = "pcs", threshold = 1, price = 3 }]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogFileError::Parse(_)));
    }

    #[test]
    fn rejects_colliding_item_keys() {
        let err = parse_catalog(
            r#"
            [[sections]]
            name = "Bar"
            items = [
              { name = "Black Ice", unit = "pcs", threshold = 10 },
              { name = "black ice", unit = "pcs", threshold = 10 },
            ]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogFileError::Invalid(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_catalog(Path::new("/nonexistent/catalog.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/catalog.toml"));
    }
}
