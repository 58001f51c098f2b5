use std::collections::HashSet;

use serde::Serialize;

use shiftstock_core::{DomainError, DomainResult, ValueObject};

/// Form field carrying the employee name; no item may normalise to it.
pub const EMPLOYEE_FIELD: &str = "employee";

/// Normalised item identifier used as the form field name.
///
/// Derived from the display name: lowercased, every space replaced by `_`.
/// The same function builds the form and reads the submission back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemKey(String);

impl ItemKey {
    pub fn from_name(name: &str) -> Self {
        Self(name.replace(' ', "_").to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for ItemKey {}

impl core::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One countable item: display name, unit and low-stock threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    name: String,
    unit: String,
    threshold: u32,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, threshold: u32) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        Ok(Self {
            name,
            unit: unit.into(),
            threshold,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn key(&self) -> ItemKey {
        ItemKey::from_name(&self.name)
    }

    /// A count strictly below the threshold is low stock.
    pub fn is_low(&self, quantity: u32) -> bool {
        quantity < self.threshold
    }
}

impl ValueObject for CatalogEntry {}

/// Named, ordered group of entries ("Kitchen", "Bar", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    name: String,
    entries: Vec<CatalogEntry>,
}

impl Section {
    pub fn new(name: impl Into<String>, entries: Vec<CatalogEntry>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("section name cannot be empty"));
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name()) {
                return Err(DomainError::validation(format!(
                    "duplicate item '{}' in section '{}'",
                    entry.name(),
                    name
                )));
            }
        }

        Ok(Self { name, entries })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }
}

/// The full, ordered item catalog.
///
/// Built once at startup and shared read-only between requests. Section and
/// entry order is display order only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    sections: Vec<Section>,
}

impl Catalog {
    /// Build a catalog, checking that every item key is unique across all
    /// sections and does not collide with the employee field.
    pub fn new(sections: Vec<Section>) -> DomainResult<Self> {
        if sections.is_empty() {
            return Err(DomainError::validation("catalog must define at least one section"));
        }

        let mut section_names = HashSet::new();
        let mut keys: HashSet<ItemKey> = HashSet::new();
        for section in &sections {
            if !section_names.insert(section.name()) {
                return Err(DomainError::validation(format!(
                    "duplicate section '{}'",
                    section.name()
                )));
            }
            for entry in section.entries() {
                let key = entry.key();
                if key.as_str() == EMPLOYEE_FIELD {
                    return Err(DomainError::invariant(format!(
                        "item '{}' collides with the reserved '{EMPLOYEE_FIELD}' field",
                        entry.name()
                    )));
                }
                if !keys.insert(key.clone()) {
                    return Err(DomainError::invariant(format!(
                        "item '{}' maps to form key '{key}' which is already in use",
                        entry.name()
                    )));
                }
            }
        }

        Ok(Self { sections })
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// All entries in catalog order, paired with their section.
    pub fn entries(&self) -> impl Iterator<Item = (&Section, &CatalogEntry)> {
        self.sections
            .iter()
            .flat_map(|s| s.entries().iter().map(move |e| (s, e)))
    }

    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.entries().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(name: &str, threshold: u32) -> CatalogEntry {
        CatalogEntry::new(name, "pcs", threshold).unwrap()
    }

    #[test]
    fn item_key_lowercases_and_replaces_spaces() {
        assert_eq!(ItemKey::from_name("Chicken").as_str(), "chicken");
        assert_eq!(ItemKey::from_name("Fish Fingers").as_str(), "fish_fingers");
        assert_eq!(ItemKey::from_name("Black & White").as_str(), "black_&_white");
        assert_eq!(ItemKey::from_name("Gilbey's").as_str(), "gilbey's");
        assert_eq!(ItemKey::from_name("Bond 7").as_str(), "bond_7");
    }

    #[test]
    fn entry_rejects_blank_name() {
        let err = CatalogEntry::new("   ", "kg", 1).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for blank item name"),
        }
    }

    #[test]
    fn is_low_is_strictly_below_threshold() {
        let e = entry("Chicken", 4);
        assert!(e.is_low(3));
        assert!(!e.is_low(4));
        assert!(!e.is_low(5));
        assert!(!entry("Anything", 0).is_low(0));
    }

    #[test]
    fn section_rejects_duplicate_item_names() {
        let err = Section::new("Bar", vec![entry("Water", 10), entry("Water", 5)]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn catalog_rejects_duplicate_sections() {
        let a = Section::new("Bar", vec![entry("Water", 10)]).unwrap();
        let b = Section::new("Bar", vec![entry("Soda", 20)]).unwrap();
        assert!(Catalog::new(vec![a, b]).is_err());
    }

    #[test]
    fn catalog_rejects_colliding_keys_across_sections() {
        let kitchen = Section::new("Kitchen", vec![entry("Fish Fingers", 10)]).unwrap();
        let bar = Section::new("Bar", vec![entry("fish fingers", 1)]).unwrap();
        let err = Catalog::new(vec![kitchen, bar]).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn catalog_rejects_item_named_like_employee_field() {
        let s = Section::new("Staff", vec![entry("Employee", 1)]).unwrap();
        let err = Catalog::new(vec![s]).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn catalog_rejects_no_sections() {
        assert!(Catalog::new(vec![]).is_err());
    }

    #[test]
    fn entries_iterate_in_section_then_item_order() {
        let kitchen = Section::new("Kitchen", vec![entry("Chicken", 4), entry("Pork", 2)]).unwrap();
        let bar = Section::new("Bar", vec![entry("Water", 10)]).unwrap();
        let catalog = Catalog::new(vec![kitchen, bar]).unwrap();

        let order: Vec<(&str, &str)> = catalog
            .entries()
            .map(|(s, e)| (s.name(), e.name()))
            .collect();
        assert_eq!(
            order,
            vec![("Kitchen", "Chicken"), ("Kitchen", "Pork"), ("Bar", "Water")]
        );
        assert_eq!(catalog.len(), 3);
    }

    proptest! {
        #[test]
        fn item_key_is_stable_and_idempotent(name in "[A-Za-z0-9 '&]{1,24}") {
            let once = ItemKey::from_name(&name);
            prop_assert_eq!(&once, &ItemKey::from_name(&name));
            prop_assert_eq!(&ItemKey::from_name(once.as_str()), &once);
            prop_assert!(!once.as_str().contains(' '));
        }
    }
}
